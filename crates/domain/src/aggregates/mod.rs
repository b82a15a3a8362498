//! Aggregates - entities with identity and lifecycle.

pub mod character;
pub mod core_stats;
pub mod monster;
pub mod user;

pub use character::Character;
pub use core_stats::CoreStats;
pub use monster::{validate_challenge_rating, Monster};
pub use user::User;
