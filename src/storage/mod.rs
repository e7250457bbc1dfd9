//! Storage layer for Spendlog
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the read-only query interface the reports are written
//! against.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod queries;
pub mod users;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use queries::FinanceQueries;
pub use users::UserRepository;

use crate::config::paths::SpendlogPaths;
use crate::error::SpendlogError;

/// Map a poisoned lock into a storage error
pub(crate) fn lock_error<E: std::fmt::Display>(err: E) -> SpendlogError {
    SpendlogError::Storage(format!("Failed to acquire lock: {}", err))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendlogPaths,
    pub users: UserRepository,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendlogPaths) -> Result<Self, SpendlogError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &SpendlogPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendlogError> {
        self.users.load()?;
        self.categories.load()?;
        self.expenses.load()?;
        self.budgets.load()?;
        tracing::debug!(
            users = self.users.count()?,
            expenses = self.expenses.count()?,
            "storage loaded"
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendlogError> {
        self.users.save()?;
        self.categories.save()?;
        self.expenses.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
