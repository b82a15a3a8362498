//! Character operation errors.

use herobook_domain::{CharacterId, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    /// The caller does not own the character. Returned whether or not the
    /// character exists.
    #[error("Not permitted to access character {0}")]
    Forbidden(CharacterId),

    /// Other writes kept landing between load and save.
    #[error("Character {0} is being modified concurrently, try again")]
    Conflict(CharacterId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The acting user has no account record.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for CharacterError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl CharacterError {
    /// Map repository `NotFound`/`Conflict` for this character to the matching variant.
    pub(crate) fn from_repo(id: CharacterId, err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound(id),
            RepoError::Conflict { .. } => Self::Conflict(id),
            other => Self::Repo(other),
        }
    }
}
