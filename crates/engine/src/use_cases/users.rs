//! User account records.
//!
//! Credential hashing and token issuance happen upstream; registration stores
//! an already-hashed credential.

use std::sync::Arc;

use herobook_domain::{DomainError, Email, User, UserId, Username};

use crate::infrastructure::ports::{ClockPort, RepoError, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(UserId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

pub struct UserManagement {
    users: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
}

impl UserManagement {
    pub fn new(users: Arc<dyn UserRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { users, clock }
    }

    /// Register an account. Duplicate usernames and emails are a `Conflict`,
    /// both from the pre-check and from the store's unique constraints.
    pub async fn register(
        &self,
        username: String,
        email: String,
        credential_hash: String,
    ) -> Result<User, UserError> {
        let username = Username::new(username)?;
        let email = Email::new(email)?;
        if credential_hash.trim().is_empty() {
            return Err(UserError::InvalidInput(
                "credential_hash cannot be empty".to_string(),
            ));
        }

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(UserError::Conflict(format!(
                "username '{}' is already registered",
                username
            )));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(UserError::Conflict(format!(
                "email '{}' is already registered",
                email
            )));
        }

        let user = User::new(username, email, credential_hash, self.clock.now());
        self.users.create(&user).await.map_err(|e| match e {
            RepoError::ConstraintViolation(msg) => UserError::Conflict(msg),
            other => UserError::Repo(other),
        })?;

        tracing::info!(user_id = %user.id(), "Registered user");
        Ok(user)
    }

    pub async fn get(&self, id: UserId) -> Result<User, UserError> {
        self.users.get(id).await?.ok_or(UserError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::infrastructure::ports::{MockClockPort, MockUserRepo};

    fn clock() -> Arc<MockClockPort> {
        let mut clock = MockClockPort::new();
        let now = Utc.with_ymd_and_hms(2025, 2, 2, 8, 0, 0).unwrap();
        clock.expect_now().returning(move || now);
        Arc::new(clock)
    }

    fn existing() -> User {
        User::new(
            Username::new("regdar").unwrap(),
            Email::new("regdar@example.com").unwrap(),
            "hash",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn register_creates_user_with_normalized_email() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().times(1).returning(|_| Ok(()));

        let user = UserManagement::new(Arc::new(users), clock())
            .register(
                "mialee".to_string(),
                "Mialee@Example.com".to_string(),
                "$argon2id$hash".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(user.email().as_str(), "mialee@example.com");
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let mut users = MockUserRepo::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(existing())));
        users.expect_create().never();

        let err = UserManagement::new(Arc::new(users), clock())
            .register(
                "regdar".to_string(),
                "other@example.com".to_string(),
                "hash".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Conflict(_)));
    }

    #[tokio::test]
    async fn constraint_violation_on_create_is_conflict() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|_| Err(RepoError::constraint("email taken")));

        let err = UserManagement::new(Arc::new(users), clock())
            .register(
                "lidda".to_string(),
                "lidda@example.com".to_string(),
                "hash".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Conflict(_)));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let err = UserManagement::new(Arc::new(MockUserRepo::new()), clock())
            .register(
                "lidda".to_string(),
                "not-an-email".to_string(),
                "hash".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidInput(_)));
    }
}
