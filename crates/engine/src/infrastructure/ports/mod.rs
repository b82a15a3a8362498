//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Database access (character, ownership, monster and user records)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CharacterRepo, MonsterRepo, OwnershipRepo, UserRepo};

pub use error::RepoError;

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCharacterRepo, MockMonsterRepo, MockOwnershipRepo, MockUserRepo};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;
