//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod expense;
pub mod report;
pub mod user;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_alerts, handle_dashboard, handle_report_command, ReportCommands};
pub use user::{handle_init, handle_user_command, resolve_user, UserCommands};

use chrono::NaiveDate;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{parse_date_arg, DateRange, Money};

/// The date to evaluate against: `--today` if given, otherwise the local date
pub fn resolve_today(arg: Option<&str>) -> SpendlogResult<NaiveDate> {
    match arg {
        Some(s) => parse_date_arg(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse an amount typed on the command line
pub fn parse_amount(s: &str) -> SpendlogResult<Money> {
    let amount = Money::parse(s)
        .map_err(|e| SpendlogError::Validation(format!("Invalid amount '{}': {}", s, e)))?;
    if amount > Money::MAX {
        return Err(SpendlogError::Validation(format!(
            "Invalid amount '{}': must not exceed {}",
            s,
            Money::MAX
        )));
    }
    Ok(amount)
}

/// Build an inclusive date range from optional `--from`/`--to` arguments
pub fn parse_range(from: Option<&str>, to: Option<&str>) -> SpendlogResult<Option<DateRange>> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(DateRange::new(parse_date_arg(from)?, parse_date_arg(to)?)?)),
        (None, None) => Ok(None),
        _ => Err(SpendlogError::Validation(
            "--from and --to must be given together".into(),
        )),
    }
}
