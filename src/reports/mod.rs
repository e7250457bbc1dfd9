//! Reports module for Spendlog
//!
//! Provides the dashboard statistics, budget alerts and the monthly
//! spending summary.

pub mod budget_alerts;
pub mod dashboard;
pub mod monthly;

pub use budget_alerts::{compute_alerts, AlertStatus, BudgetAlert, BudgetAlertReport, Percentage};
pub use dashboard::{compute_dashboard, CategoryTotal, DashboardStats};
pub use monthly::{MonthTotal, MonthlySpendingReport};
