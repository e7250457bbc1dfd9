//! Service layer for Spendlog
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, ownership checks, and cross-entity operations.

pub mod budget;
pub mod category;
pub mod expense;
pub mod user;

pub use budget::BudgetService;
pub use category::{CategoryDeletion, CategoryService};
pub use expense::{ExpenseService, ExpenseUpdate};
pub use user::UserService;
