//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.
//! Entity listings are rendered as tables; reports format themselves using
//! the helpers in [`report`].

pub mod budget;
pub mod category;
pub mod expense;
pub mod report;
pub mod user;

pub use budget::format_budget_list;
pub use category::{format_category_details, format_category_list};
pub use expense::{format_expense_details, format_expense_list};
pub use user::format_user_list;
