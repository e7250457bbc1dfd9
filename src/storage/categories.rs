//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{Category, CategoryId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), SpendlogError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &CategoryData { categories })
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Categories owned by a user, in creation order
    pub fn get_for_user(&self, user_id: UserId) -> Result<Vec<Category>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut categories: Vec<_> = data
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    /// Find a user's category by name (case-insensitive)
    ///
    /// Names are not unique; the oldest matching category wins.
    pub fn get_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Option<Category>, SpendlogError> {
        let name_lower = name.trim().to_lowercase();
        Ok(self
            .get_for_user(user_id)?
            .into_iter()
            .find(|c| c.name.to_lowercase() == name_lower))
    }

    pub fn upsert(&self, category: Category) -> Result<(), SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id).is_some())
    }
}
