//! Expense model
//!
//! An expense keeps its amount and date exactly as they are persisted: decimal
//! text with two fraction digits and an ISO `YYYY-MM-DD` date. Typed values are
//! obtained through [`Expense::amount`] and [`Expense::date`], which surface a
//! corrupt record as a data integrity error instead of defaulting it.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;
use crate::error::{SpendlogError, SpendlogResult};

/// Storage format of expense dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single logged expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Decimal amount as stored ("1250.00")
    pub amount: String,

    /// Calendar date as stored ("2025-03-14")
    pub expense_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub category_id: CategoryId,
    pub user_id: UserId,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense from typed values
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            amount: amount.to_decimal_string(),
            expense_date: date.format(DATE_FORMAT).to_string(),
            notes: None,
            category_id,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style note setter
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The amount as Money
    pub fn amount(&self) -> SpendlogResult<Money> {
        Money::from_stored(&self.amount, format_args!("expense {}", self.id))
    }

    /// The calendar date
    pub fn date(&self) -> SpendlogResult<NaiveDate> {
        parse_stored_date(&self.expense_date, format_args!("expense {}", self.id))
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount.to_decimal_string();
        self.updated_at = Utc::now();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.expense_date = date.format(DATE_FORMAT).to_string();
        self.updated_at = Utc::now();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self.updated_at = Utc::now();
    }

    pub fn set_category(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.expense_date, self.amount, self.id)
    }
}

/// An expense together with its category, if the category still resolves
#[derive(Debug, Clone)]
pub struct ExpenseWithCategory {
    pub expense: Expense,
    pub category: Option<Category>,
}

impl ExpenseWithCategory {
    /// Name used when grouping; unresolved categories fall under "Uncategorized"
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// Label for expenses whose category is missing
pub const UNCATEGORIZED: &str = "Uncategorized";

/// An inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting an end before the start
    pub fn new(start: NaiveDate, end: NaiveDate) -> SpendlogResult<Self> {
        if end < start {
            return Err(SpendlogError::Validation(format!(
                "Date range ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let next_month = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        };
        let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(date);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parse a user-supplied `YYYY-MM-DD` date
pub fn parse_date_arg(s: &str) -> SpendlogResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        SpendlogError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
    })
}

fn parse_stored_date(raw: &str, owner: impl fmt::Display) -> SpendlogResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        SpendlogError::DataIntegrity(format!("{}: invalid date '{}': {}", owner, raw, e))
    })
}
