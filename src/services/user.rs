//! User service
//!
//! Users own every other record. Names are unique, ignoring case.

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new user
    pub fn create(&self, username: &str) -> SpendlogResult<User> {
        let user = User::new(username.trim());
        user.validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        if self.storage.users.get_by_name(&user.username)?.is_some() {
            return Err(SpendlogError::Duplicate {
                entity_type: "User",
                identifier: user.username,
            });
        }

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        tracing::info!(user = %user.username, id = %user.id, "user created");
        Ok(user)
    }

    /// Find a user by name or ID
    pub fn find(&self, identifier: &str) -> SpendlogResult<Option<User>> {
        if let Some(user) = self.storage.users.get_by_name(identifier)? {
            return Ok(Some(user));
        }

        if let Ok(id) = identifier.parse::<UserId>() {
            return self.storage.users.get(id);
        }

        Ok(self
            .storage
            .users
            .get_all()?
            .into_iter()
            .find(|u| u.id.matches_short(identifier)))
    }

    /// Find a user or fail with NotFound
    pub fn require(&self, identifier: &str) -> SpendlogResult<User> {
        self.find(identifier)?
            .ok_or_else(|| SpendlogError::user_not_found(identifier))
    }

    /// All users in creation order
    pub fn list(&self) -> SpendlogResult<Vec<User>> {
        self.storage.users.get_all()
    }
}
