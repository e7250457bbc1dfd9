//! User repository for JSON storage
//!
//! Manages loading and saving users to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), SpendlogError> {
        let file_data: UserData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }
        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), SpendlogError> {
        let users = self.get_all()?;
        write_json_atomic(&self.path, &UserData { users })
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Look a user up by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|u| u.username.to_lowercase() == name_lower)
            .cloned())
    }

    /// All users in creation order
    pub fn get_all(&self) -> Result<Vec<User>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.username.cmp(&b.username)));
        Ok(users)
    }

    pub fn upsert(&self, user: User) -> Result<(), SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(user.id, user);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
