//! User aggregate - an account that can own characters.

use chrono::{DateTime, Utc};

use crate::ids::UserId;
use crate::value_objects::{Email, Username};

/// A registered account.
///
/// `credential_hash` is produced by the external auth collaborator and is
/// opaque here; it is never exposed through the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    credential_hash: String,
    avatar_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: Username,
        email: Email,
        credential_hash: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            credential_hash: credential_hash.into(),
            avatar_path: None,
            created_at: now,
        }
    }

    #[inline]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[inline]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[inline]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[inline]
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    #[inline]
    pub fn avatar_path(&self) -> Option<&str> {
        self.avatar_path.as_deref()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    pub fn with_avatar_path(mut self, path: impl Into<String>) -> Self {
        self.avatar_path = Some(path.into());
        self
    }
}
