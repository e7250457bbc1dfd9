//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with an in-memory
//! index from category to expense IDs for budget evaluation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{CategoryId, DateRange, Expense, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a category index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: category_id -> expense_ids
    by_category: RwLock<HashMap<CategoryId, Vec<ExpenseId>>>,
}

/// Newest first; ISO dates order correctly as text
fn newest_first(a: &Expense, b: &Expense) -> std::cmp::Ordering {
    b.expense_date
        .cmp(&a.expense_date)
        .then(b.created_at.cmp(&a.created_at))
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the category index
    pub fn load(&self) -> Result<(), SpendlogError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        data.clear();
        by_category.clear();

        for expense in file_data.expenses {
            by_category
                .entry(expense.category_id)
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(newest_first);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// A user's expenses, newest first, optionally limited to a date range
    ///
    /// Filtering by range parses each stored date, so a corrupt date surfaces
    /// as a data integrity error.
    pub fn get_for_user(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> Result<Vec<Expense>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut expenses = Vec::new();
        for expense in data.values().filter(|e| e.user_id == user_id) {
            if let Some(range) = range {
                if !range.contains(expense.date()?) {
                    continue;
                }
            }
            expenses.push(expense.clone());
        }
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// A user's expenses in one category, newest first
    pub fn get_by_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<Vec<Expense>, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_category = self.by_category.read().map_err(lock_error)?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut expenses: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_category
            .entry(expense.category_id)
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(ids) = by_category.get_mut(&expense.category_id) {
                    ids.retain(|&other| other != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete every expense in a category, returning how many were removed
    pub fn delete_by_category(&self, category_id: CategoryId) -> Result<usize, SpendlogError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        let ids = by_category.remove(&category_id).unwrap_or_default();
        Ok(ids.iter().filter(|id| data.remove(id).is_some()).count())
    }

    pub fn count(&self) -> Result<usize, SpendlogError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
