//! Budget period representation
//!
//! A budget renews every calendar month or every calendar year. Any other
//! value read back from storage is kept verbatim so it round-trips, but its
//! window matches no expense.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The renewal cadence of a budget
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetPeriod {
    /// Resets every calendar month
    Monthly,
    /// Resets every calendar year
    Yearly,
    /// A persisted value this version does not understand (e.g. "weekly")
    Unrecognized(String),
}

impl BudgetPeriod {
    /// Whether an expense dated `date` falls into the period window that
    /// contains `today`
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Monthly => date.year() == today.year() && date.month() == today.month(),
            Self::Yearly => date.year() == today.year(),
            Self::Unrecognized(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for BudgetPeriod {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<BudgetPeriod> for String {
    fn from(period: BudgetPeriod) -> Self {
        match period {
            BudgetPeriod::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses user input; only the two known cadences are accepted here
impl FromStr for BudgetPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "y" => Ok(Self::Yearly),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

/// Error returned when user input names an unknown period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid budget period '{}' (expected monthly or yearly)",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_window() {
        let today = date(2025, 6, 15);
        assert!(BudgetPeriod::Monthly.contains(date(2025, 6, 1), today));
        assert!(BudgetPeriod::Monthly.contains(date(2025, 6, 30), today));
        assert!(!BudgetPeriod::Monthly.contains(date(2025, 5, 31), today));
        assert!(!BudgetPeriod::Monthly.contains(date(2024, 6, 15), today));
    }

    #[test]
    fn test_yearly_window_ignores_month() {
        let today = date(2025, 6, 15);
        assert!(BudgetPeriod::Yearly.contains(date(2025, 1, 2), today));
        assert!(BudgetPeriod::Yearly.contains(date(2025, 12, 31), today));
        assert!(!BudgetPeriod::Yearly.contains(date(2024, 12, 31), today));
    }

    #[test]
    fn test_unrecognized_matches_nothing() {
        let today = date(2025, 6, 15);
        let weekly = BudgetPeriod::from("weekly".to_string());
        assert_eq!(weekly, BudgetPeriod::Unrecognized("weekly".into()));
        assert!(!weekly.contains(today, today));
        assert!(!weekly.is_recognized());
    }

    #[test]
    fn test_serde_keeps_raw_value() {
        let json = serde_json::to_string(&BudgetPeriod::Monthly).unwrap();
        assert_eq!(json, r#""monthly""#);

        let period: BudgetPeriod = serde_json::from_str(r#""Quarterly""#).unwrap();
        assert_eq!(serde_json::to_string(&period).unwrap(), r#""Quarterly""#);
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!("Monthly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Monthly);
        assert_eq!("y".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Yearly);
        assert!("weekly".parse::<BudgetPeriod>().is_err());
    }
}
