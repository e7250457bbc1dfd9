//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{Budget, BudgetId, CategoryId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), SpendlogError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }
        Ok(())
    }

    /// Save budgets to disk in creation order
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut budgets: Vec<_> = data.values().cloned().collect();
        sort_by_creation(&mut budgets);

        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// A user's budgets in creation order
    pub fn get_for_user(&self, user_id: UserId) -> Result<Vec<Budget>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut budgets: Vec<_> = data
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        sort_by_creation(&mut budgets);
        Ok(budgets)
    }

    pub fn upsert(&self, budget: Budget) -> Result<(), SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(budget.id, budget);
        Ok(())
    }

    pub fn delete(&self, id: BudgetId) -> Result<bool, SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id).is_some())
    }

    /// Delete every budget on a category, returning how many were removed
    pub fn delete_by_category(&self, category_id: CategoryId) -> Result<usize, SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let before = data.len();
        data.retain(|_, b| b.category_id != category_id);
        Ok(before - data.len())
    }
}

fn sort_by_creation(budgets: &mut [Budget]) {
    budgets.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money};
    use tempfile::TempDir;

    #[test]
    fn test_creation_order_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let user = UserId::new();
        let cat = CategoryId::new();

        let repo = BudgetRepository::new(path.clone());
        let first = Budget::new(user, cat, Money::from_units(100), BudgetPeriod::Monthly);
        let mut second = Budget::new(user, cat, Money::from_units(900), BudgetPeriod::Yearly);
        second.created_at = first.created_at + chrono::Duration::seconds(5);
        repo.upsert(second.clone()).unwrap();
        repo.upsert(first.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(path);
        reloaded.load().unwrap();
        let ids: Vec<_> = reloaded
            .get_for_user(user)
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_unknown_period_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let user = UserId::new();

        let repo = BudgetRepository::new(path.clone());
        let budget = Budget::new(
            user,
            CategoryId::new(),
            Money::from_units(10),
            BudgetPeriod::Unrecognized("weekly".into()),
        );
        repo.upsert(budget.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(path);
        reloaded.load().unwrap();
        let loaded = reloaded.get(budget.id).unwrap().unwrap();
        assert_eq!(loaded.period.as_str(), "weekly");
    }

    #[test]
    fn test_delete_by_category() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        let user = UserId::new();
        let cat = CategoryId::new();
        repo.upsert(Budget::new(user, cat, Money::from_units(1), BudgetPeriod::Monthly)).unwrap();
        repo.upsert(Budget::new(user, cat, Money::from_units(2), BudgetPeriod::Yearly)).unwrap();
        repo.upsert(Budget::new(user, CategoryId::new(), Money::from_units(3), BudgetPeriod::Yearly))
            .unwrap();

        assert_eq!(repo.delete_by_category(cat).unwrap(), 2);
        assert_eq!(repo.get_for_user(user).unwrap().len(), 1);
    }
}
