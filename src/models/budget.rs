//! Budget model
//!
//! A budget puts a spending ceiling on one category for a renewing period.
//! Nothing prevents two budgets for the same category and period; each one is
//! evaluated on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;
use super::period::BudgetPeriod;
use crate::error::SpendlogResult;

/// A spending ceiling for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    /// Ceiling as stored decimal text
    pub amount: String,

    pub period: BudgetPeriod,

    pub category_id: CategoryId,
    pub user_id: UserId,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(user_id: UserId, category_id: CategoryId, amount: Money, period: BudgetPeriod) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            amount: amount.to_decimal_string(),
            period,
            category_id,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// The ceiling as Money
    pub fn amount(&self) -> SpendlogResult<Money> {
        Money::from_stored(&self.amount, format_args!("budget {}", self.id))
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount.to_decimal_string();
        self.updated_at = Utc::now();
    }

    pub fn set_period(&mut self, period: BudgetPeriod) {
        self.period = period;
        self.updated_at = Utc::now();
    }

    /// Validate the budget as entered by a user
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        let amount = Money::parse(&self.amount)
            .map_err(|_| BudgetValidationError::InvalidAmount(self.amount.clone()))?;
        if !amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }
        if amount > Money::MAX {
            return Err(BudgetValidationError::AmountTooLarge);
        }
        if !self.period.is_recognized() {
            return Err(BudgetValidationError::UnknownPeriod(self.period.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.period, self.amount, self.id)
    }
}

/// A budget together with its category, if the category still resolves
#[derive(Debug, Clone)]
pub struct BudgetWithCategory {
    pub budget: Budget,
    pub category: Option<Category>,
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    InvalidAmount(String),
    NonPositiveAmount,
    AmountTooLarge,
    UnknownPeriod(String),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(raw) => write!(f, "Invalid budget amount '{}'", raw),
            Self::NonPositiveAmount => write!(f, "Budget amount must be greater than zero"),
            Self::AmountTooLarge => write!(f, "Budget amount must not exceed {}", Money::MAX),
            Self::UnknownPeriod(p) => {
                write!(f, "Unknown budget period '{}' (expected monthly or yearly)", p)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(
            UserId::new(),
            CategoryId::new(),
            Money::from_units(15000),
            BudgetPeriod::Monthly,
        );
        assert_eq!(budget.amount, "15000.00");
        assert_eq!(budget.amount().unwrap(), Money::from_units(15000));
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new(
            UserId::new(),
            CategoryId::new(),
            Money::zero(),
            BudgetPeriod::Monthly,
        );
        assert_eq!(budget.validate(), Err(BudgetValidationError::NonPositiveAmount));

        budget.set_amount(Money::from_cents(Money::MAX.cents() + 1));
        assert_eq!(budget.validate(), Err(BudgetValidationError::AmountTooLarge));

        budget.set_amount(Money::MAX);
        assert!(budget.validate().is_ok());

        budget.set_amount(Money::from_units(10));
        budget.set_period(BudgetPeriod::Unrecognized("weekly".into()));
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::UnknownPeriod(_))
        ));
    }

    #[test]
    fn test_corrupt_amount() {
        let mut budget = Budget::new(
            UserId::new(),
            CategoryId::new(),
            Money::from_units(10),
            BudgetPeriod::Yearly,
        );
        budget.amount = "NaN".into();
        assert!(budget.amount().unwrap_err().is_data_integrity());
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::InvalidAmount(_))
        ));
    }
}
