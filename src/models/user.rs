//! User model
//!
//! Every category, expense and budget belongs to exactly one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// A tracker user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Unique login name
    pub username: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username: username.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the user
    pub fn validate(&self) -> Result<(), UserValidationError> {
        let name = self.username.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(UserValidationError::Whitespace);
        }
        if name.len() > 32 {
            return Err(UserValidationError::NameTooLong(name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    Whitespace,
    NameTooLong(usize),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Username cannot be empty"),
            Self::Whitespace => write!(f, "Username cannot contain whitespace"),
            Self::NameTooLong(len) => {
                write!(f, "Username too long ({} characters, max 32)", len)
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(User::new("asha").validate().is_ok());
        assert_eq!(
            User::new("  ").validate(),
            Err(UserValidationError::EmptyName)
        );
        assert_eq!(
            User::new("two words").validate(),
            Err(UserValidationError::Whitespace)
        );
        assert!(matches!(
            User::new("x".repeat(40)).validate(),
            Err(UserValidationError::NameTooLong(40))
        ));
    }
}
