//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for character and monster names
const MAX_NAME_LENGTH: usize = 200;

/// Username length bounds
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for email addresses
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for spell and feature names
const MAX_CONTENT_NAME_LENGTH: usize = 100;

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character or monster name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Character name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

// ============================================================================
// Username
// ============================================================================

/// A validated account username (3..=50 chars, trimmed, no whitespace inside)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
            return Err(DomainError::validation(format!(
                "Username must be between {} and {} characters",
                MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("Username cannot contain whitespace"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> String {
        name.0
    }
}

// ============================================================================
// Email
// ============================================================================

/// A lowercased email address with a single `@` and non-empty local/domain parts.
///
/// Deliverability is not checked here; the auth collaborator owns that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let email = email.into();
        let normalized = email.trim().to_lowercase();
        if normalized.len() > MAX_EMAIL_LENGTH {
            return Err(DomainError::validation(format!(
                "Email cannot exceed {} characters",
                MAX_EMAIL_LENGTH
            )));
        }
        let mut parts = normalized.split('@');
        let valid = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !valid {
            return Err(DomainError::validation(format!(
                "Invalid email address: {}",
                email.trim()
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}

// ============================================================================
// ContentName
// ============================================================================

/// Name of a spell or feature attached to a character (non-empty, <=100 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentName(String);

impl ContentName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_CONTENT_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Name cannot exceed {} characters",
                MAX_CONTENT_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ContentName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentName> for String {
    fn from(name: ContentName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_name_is_trimmed() {
        let name = CharacterName::new("  Tordek  ").unwrap();
        assert_eq!(name.as_str(), "Tordek");
    }

    #[test]
    fn character_name_rejects_blank() {
        assert!(CharacterName::new("   ").is_err());
        assert!(CharacterName::new("x".repeat(201)).is_err());
        assert!(CharacterName::new("x".repeat(200)).is_ok());
    }

    #[test]
    fn username_bounds() {
        assert!(Username::new("ab").is_err());
        assert!(Username::new("has space").is_err());
        assert_eq!(Username::new(" mialee ").unwrap().as_str(), "mialee");
    }

    #[test]
    fn email_is_lowercased_and_checked() {
        let email = Email::new("Lidda@Example.COM").unwrap();
        assert_eq!(email.as_str(), "lidda@example.com");
        assert!(Email::new("no-at-sign").is_err());
        assert!(Email::new("a@b@c").is_err());
        assert!(Email::new("@example.com").is_err());
    }

    #[test]
    fn names_deserialize_through_validation() {
        let ok: Result<CharacterName, _> = serde_json::from_str("\"Jozan\"");
        assert!(ok.is_ok());
        let err: Result<CharacterName, _> = serde_json::from_str("\"  \"");
        assert!(err.is_err());
    }

    #[test]
    fn content_name_rejects_blank() {
        assert!(ContentName::new("").is_err());
        assert_eq!(ContentName::new(" Fireball ").unwrap().as_str(), "Fireball");
    }
}
