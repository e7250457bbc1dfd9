//! Category service
//!
//! Provides business logic for category management: creation, lookup by
//! name or ID, renaming, and deletion that cascades to the category's
//! expenses and budgets.

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Category, CategoryId, CategoryType, UserId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// What a category deletion removed
#[derive(Debug, Clone)]
pub struct CategoryDeletion {
    pub category: Category,
    pub expenses_removed: usize,
    pub budgets_removed: usize,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(
        &self,
        user_id: UserId,
        name: &str,
        category_type: CategoryType,
    ) -> SpendlogResult<Category> {
        let category = Category::new(name.trim(), category_type, user_id);
        category
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(category = %category.name, id = %category.id, "category created");
        Ok(category)
    }

    /// Get one of the user's categories by ID
    pub fn get(&self, user_id: UserId, id: CategoryId) -> SpendlogResult<Option<Category>> {
        Ok(self
            .storage
            .categories
            .get(id)?
            .filter(|c| c.user_id == user_id))
    }

    /// Find a category by name or ID string
    pub fn find(&self, user_id: UserId, identifier: &str) -> SpendlogResult<Option<Category>> {
        // Try by name first
        if let Some(category) = self.storage.categories.get_by_name(user_id, identifier)? {
            return Ok(Some(category));
        }

        // Try parsing as ID
        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.get(user_id, id);
        }

        Ok(self
            .storage
            .categories
            .get_for_user(user_id)?
            .into_iter()
            .find(|c| c.id.matches_short(identifier)))
    }

    /// Find a category or fail with NotFound
    pub fn require(&self, user_id: UserId, identifier: &str) -> SpendlogResult<Category> {
        self.find(user_id, identifier)?
            .ok_or_else(|| SpendlogError::category_not_found(identifier))
    }

    /// List the user's categories in creation order
    pub fn list(&self, user_id: UserId) -> SpendlogResult<Vec<Category>> {
        self.storage.categories.get_for_user(user_id)
    }

    /// Rename and/or retype a category
    pub fn update(
        &self,
        user_id: UserId,
        id: CategoryId,
        name: Option<&str>,
        category_type: Option<CategoryType>,
    ) -> SpendlogResult<Category> {
        let mut category = self
            .get(user_id, id)?
            .ok_or_else(|| SpendlogError::category_not_found(id.to_string()))?;

        if let Some(name) = name {
            category.rename(name.trim());
        }
        if let Some(category_type) = category_type {
            category.set_type(category_type);
        }

        category
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(category = %category.name, id = %category.id, "category updated");
        Ok(category)
    }

    /// Delete a category together with its expenses and budgets
    pub fn delete(&self, user_id: UserId, id: CategoryId) -> SpendlogResult<CategoryDeletion> {
        let category = self
            .get(user_id, id)?
            .ok_or_else(|| SpendlogError::category_not_found(id.to_string()))?;

        let expenses_removed = self.storage.expenses.delete_by_category(id)?;
        let budgets_removed = self.storage.budgets.delete_by_category(id)?;
        self.storage.categories.delete(id)?;

        self.storage.expenses.save()?;
        self.storage.budgets.save()?;
        self.storage.categories.save()?;

        tracing::info!(
            category = %category.name,
            id = %category.id,
            expenses_removed,
            budgets_removed,
            "category deleted"
        );

        Ok(CategoryDeletion {
            category,
            expenses_removed,
            budgets_removed,
        })
    }
}
