//! Core data models for Spendlog
//!
//! This module contains the records the tracker stores (users, categories,
//! expenses, budgets) and the value types they are built from.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod user;

pub use budget::{Budget, BudgetWithCategory};
pub use category::{Category, CategorySnapshot, CategoryType};
pub use expense::{parse_date_arg, DateRange, Expense, ExpenseWithCategory, UNCATEGORIZED};
pub use ids::{BudgetId, CategoryId, ExpenseId, UserId};
pub use money::Money;
pub use period::BudgetPeriod;
pub use user::User;
