//! Repository port traits for database access.

use async_trait::async_trait;
use herobook_domain::{
    Character, CharacterId, ContentName, Email, Monster, MonsterId, User, UserId, Username,
};

use super::error::RepoError;

// =============================================================================
// Character Records
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    // CRUD
    async fn create(&self, character: &Character) -> Result<(), RepoError>;
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    /// Persist an already-loaded character if the stored record is still at
    /// `character.version()`, then advance the stored version.
    /// `RepoError::NotFound` if it was deleted since it was loaded,
    /// `RepoError::Conflict` if another write landed first.
    async fn update(&self, character: &Character) -> Result<(), RepoError>;
    /// Remove the character with every relation attached to it. `false` if
    /// nothing matched.
    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError>;

    // Queries
    async fn list_owned_by(&self, user_id: UserId) -> Result<Vec<Character>, RepoError>;

    // Spells / features
    async fn add_spell(&self, id: CharacterId, spell: &ContentName) -> Result<(), RepoError>;
    async fn list_spells(&self, id: CharacterId) -> Result<Vec<ContentName>, RepoError>;
    async fn add_feature(&self, id: CharacterId, feature: &ContentName) -> Result<(), RepoError>;
    async fn list_features(&self, id: CharacterId) -> Result<Vec<ContentName>, RepoError>;
}

// =============================================================================
// Ownership Edges
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipRepo: Send + Sync {
    /// Idempotently link a user to a character. `RepoError::NotFound` if
    /// either node is missing.
    async fn connect(&self, character_id: CharacterId, user_id: UserId) -> Result<(), RepoError>;
    async fn is_owner(&self, character_id: CharacterId, user_id: UserId)
        -> Result<bool, RepoError>;
}

// =============================================================================
// Monsters
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonsterRepo: Send + Sync {
    async fn create(&self, monster: &Monster) -> Result<(), RepoError>;
    async fn get(&self, id: MonsterId) -> Result<Option<Monster>, RepoError>;
    async fn update(&self, monster: &Monster) -> Result<(), RepoError>;
    async fn delete(&self, id: MonsterId) -> Result<bool, RepoError>;
    async fn list(&self) -> Result<Vec<Monster>, RepoError>;
}

// =============================================================================
// Users
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// `RepoError::ConstraintViolation` when the username or email is taken.
    async fn create(&self, user: &User) -> Result<(), RepoError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, RepoError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepoError>;
}
