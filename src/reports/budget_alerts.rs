//! Budget alerts
//!
//! Compares each budget's ceiling with what was spent in its category during
//! the current period and reports budgets at or above 90% of their ceiling.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::display::report::{double_separator, format_bar, separator, truncate};
use crate::error::SpendlogResult;
use crate::models::money::{accumulate, serialize_as_number};
use crate::models::{
    BudgetId, BudgetPeriod, BudgetWithCategory, CategoryId, CategorySnapshot, Expense, Money,
    UserId,
};
use crate::storage::FinanceQueries;

/// Spend ratio at which a budget starts alerting
pub const WARNING_PERCENT: i64 = 90;

/// Spend ratio at which a budget is over its ceiling
pub const EXCEEDED_PERCENT: i64 = 100;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Warning,
    Exceeded,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// Spent as a percentage of the ceiling
///
/// Serialized as a string with two decimals, or `"Infinity"` when the
/// ceiling is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Percentage {
    /// Hundredths of a percent, e.g. 9333 for 93.33%
    Hundredths(i64),
    Unbounded,
}

impl Percentage {
    /// `spent / ceiling * 100`, rounded half away from zero to two decimals
    ///
    /// The ratio is rounded as an exact decimal, so an exact `.xx5` tie always
    /// rounds up in magnitude. Rounding a binary float (e.g. `toFixed(2)`)
    /// can land one hundredth lower on such ties.
    ///
    /// `ceiling` must be positive.
    fn of(spent: Money, ceiling: Money) -> Self {
        let num = i128::from(spent.cents()) * 10_000;
        let den = i128::from(ceiling.cents());
        let quotient = num / den;
        let remainder = num % den;
        let rounded = if remainder.abs() * 2 >= den {
            quotient + num.signum()
        } else {
            quotient
        };
        Self::Hundredths(i64::try_from(rounded).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hundredths(h) => {
                let sign = if *h < 0 { "-" } else { "" };
                let abs = h.unsigned_abs();
                write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
            }
            Self::Unbounded => write!(f, "Infinity"),
        }
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A budget that has reached the warning threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub budget_id: BudgetId,
    pub category: CategorySnapshot,
    #[serde(serialize_with = "serialize_as_number")]
    pub budget_amount: Money,
    #[serde(serialize_with = "serialize_as_number")]
    pub spent: Money,
    pub percentage: Percentage,
    pub status: AlertStatus,
}

/// Decide whether `spent` against `ceiling` warrants an alert
fn classify(spent: Money, ceiling: Money) -> Option<(Percentage, AlertStatus)> {
    if !ceiling.is_positive() {
        return spent
            .is_positive()
            .then_some((Percentage::Unbounded, AlertStatus::Exceeded));
    }

    let scaled_spent = i128::from(spent.cents()) * 100;
    let ceiling_cents = i128::from(ceiling.cents());
    if scaled_spent < i128::from(WARNING_PERCENT) * ceiling_cents {
        return None;
    }

    let status = if scaled_spent >= i128::from(EXCEEDED_PERCENT) * ceiling_cents {
        AlertStatus::Exceeded
    } else {
        AlertStatus::Warning
    };
    Some((Percentage::of(spent, ceiling), status))
}

/// Sum the expenses dated inside the period window containing `today`
fn period_spend(
    period: &BudgetPeriod,
    expenses: &[Expense],
    today: NaiveDate,
) -> SpendlogResult<Money> {
    if !period.is_recognized() {
        return Ok(Money::zero());
    }

    let mut spent = Money::zero();
    for expense in expenses {
        if period.contains(expense.date()?, today) {
            accumulate(&mut spent, expense.amount()?)?;
        }
    }
    Ok(spent)
}

/// Evaluate a user's budgets as of `today`
///
/// Budgets are visited in the order given and alerts come back in that same
/// order. A budget whose category cannot be resolved, or whose expense lookup
/// fails, is skipped with a warning. Corrupt stored amounts or dates abort
/// the whole pass.
pub fn compute_alerts<F>(
    user_id: UserId,
    budgets: &[BudgetWithCategory],
    lookup: F,
    today: NaiveDate,
) -> SpendlogResult<Vec<BudgetAlert>>
where
    F: Fn(UserId, CategoryId) -> SpendlogResult<Vec<Expense>>,
{
    let mut alerts = Vec::new();

    for entry in budgets {
        let budget = &entry.budget;

        let Some(category) = &entry.category else {
            tracing::warn!(
                budget = %budget.id,
                category = %budget.category_id,
                "skipping budget: category not found"
            );
            continue;
        };

        let expenses = match lookup(user_id, budget.category_id) {
            Ok(expenses) => expenses,
            Err(err) => {
                tracing::warn!(
                    budget = %budget.id,
                    category = %category.name,
                    error = %err,
                    "skipping budget: expense lookup failed"
                );
                continue;
            }
        };

        let ceiling = budget.amount()?;
        let spent = period_spend(&budget.period, &expenses, today)?;

        if let Some((percentage, status)) = classify(spent, ceiling) {
            alerts.push(BudgetAlert {
                budget_id: budget.id,
                category: category.snapshot(),
                budget_amount: ceiling,
                spent,
                percentage,
                status,
            });
        }
    }

    tracing::debug!(
        budgets = budgets.len(),
        alerts = alerts.len(),
        %today,
        "budget alerts computed"
    );

    Ok(alerts)
}

/// Alerts for one user on one day
#[derive(Debug, Clone)]
pub struct BudgetAlertReport {
    pub as_of: NaiveDate,
    pub alerts: Vec<BudgetAlert>,
}

impl BudgetAlertReport {
    /// Load a user's budgets and evaluate them against their categories
    pub fn generate(
        store: &impl FinanceQueries,
        user_id: UserId,
        today: NaiveDate,
    ) -> SpendlogResult<Self> {
        let budgets = store.list_budgets(user_id)?;
        let alerts = compute_alerts(
            user_id,
            &budgets,
            |user, category| store.list_expenses_by_category(user, category),
            today,
        )?;

        Ok(Self {
            as_of: today,
            alerts,
        })
    }

    pub fn has_exceeded(&self) -> bool {
        self.alerts
            .iter()
            .any(|a| a.status == AlertStatus::Exceeded)
    }

    /// Format the alerts for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Alerts - {}\n", self.as_of));
        output.push_str(&double_separator(78));
        output.push('\n');

        if self.alerts.is_empty() {
            output.push_str("All budgets are below 90% of their limit.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>12} {:>12} {:>9}  {:<10} {}\n",
            "Category", "Budget", "Spent", "Used", "Progress", "Status"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for alert in &self.alerts {
            let used = match alert.percentage {
                Percentage::Hundredths(_) => format!("{}%", alert.percentage),
                Percentage::Unbounded => "n/a".to_string(),
            };
            let status = match alert.status {
                AlertStatus::Warning => "warning",
                AlertStatus::Exceeded => "EXCEEDED",
            };

            output.push_str(&format!(
                "{:<22} {:>12} {:>12} {:>9}  {} {}\n",
                truncate(&alert.category.name, 22),
                alert.budget_amount.format_with_symbol(currency),
                alert.spent.format_with_symbol(currency),
                used,
                format_bar(
                    alert.spent.as_f64(),
                    alert.budget_amount.as_f64().max(alert.spent.as_f64()),
                    10
                ),
                status
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpendlogError;
    use crate::models::{Budget, Category, CategoryType};
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// In-memory budgets and expenses for one user
    struct Ledger {
        user: UserId,
        budgets: Vec<BudgetWithCategory>,
        expenses: HashMap<CategoryId, Vec<Expense>>,
    }

    impl Ledger {
        fn new() -> Self {
            Self {
                user: UserId::new(),
                budgets: Vec::new(),
                expenses: HashMap::new(),
            }
        }

        fn category(&self, name: &str) -> Category {
            Category::new(name, CategoryType::Daily, self.user)
        }

        fn budget(&mut self, category: &Category, cents: i64, period: BudgetPeriod) -> BudgetId {
            let budget = Budget::new(self.user, category.id, Money::from_cents(cents), period);
            let id = budget.id;
            self.budgets.push(BudgetWithCategory {
                budget,
                category: Some(category.clone()),
            });
            id
        }

        fn spend(&mut self, category: &Category, cents: i64, on: NaiveDate) {
            self.expenses
                .entry(category.id)
                .or_default()
                .push(Expense::new(self.user, category.id, Money::from_cents(cents), on));
        }

        fn evaluate(&self, today: NaiveDate) -> SpendlogResult<Vec<BudgetAlert>> {
            compute_alerts(
                self.user,
                &self.budgets,
                |_, category| Ok(self.expenses.get(&category).cloned().unwrap_or_default()),
                today,
            )
        }
    }

    #[test]
    fn test_warning_at_ninety_three_percent() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let groceries = ledger.category("Groceries");
        let budget_id = ledger.budget(&groceries, 1_500_000, BudgetPeriod::Monthly);
        ledger.spend(&groceries, 900_000, date(2025, 6, 2));
        ledger.spend(&groceries, 500_000, date(2025, 6, 14));
        // Last month does not count
        ledger.spend(&groceries, 700_000, date(2025, 5, 30));

        let alerts = ledger.evaluate(today).unwrap();
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.budget_id, budget_id);
        assert_eq!(alert.spent, Money::from_units(14_000));
        assert_eq!(alert.percentage.to_string(), "93.33");
        assert_eq!(alert.status, AlertStatus::Warning);
    }

    #[test]
    fn test_exceeded_above_ceiling() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let groceries = ledger.category("Groceries");
        ledger.budget(&groceries, 1_500_000, BudgetPeriod::Monthly);
        ledger.spend(&groceries, 1_550_000, date(2025, 6, 1));

        let alerts = ledger.evaluate(today).unwrap();
        assert_eq!(alerts[0].percentage.to_string(), "103.33");
        assert_eq!(alerts[0].status, AlertStatus::Exceeded);
    }

    #[test]
    fn test_threshold_uses_exact_ratio() {
        let today = date(2025, 6, 15);

        // 8999.99 / 10000 is 89.9999%, which rounds to "90.00" for display
        // but must not alert.
        let mut ledger = Ledger::new();
        let cat = ledger.category("Rent");
        ledger.budget(&cat, 1_000_000, BudgetPeriod::Monthly);
        ledger.spend(&cat, 899_999, today);
        assert!(ledger.evaluate(today).unwrap().is_empty());

        let mut ledger = Ledger::new();
        let cat = ledger.category("Rent");
        ledger.budget(&cat, 1_000_000, BudgetPeriod::Monthly);
        ledger.spend(&cat, 900_000, today);
        let alerts = ledger.evaluate(today).unwrap();
        assert_eq!(alerts[0].percentage.to_string(), "90.00");
        assert_eq!(alerts[0].status, AlertStatus::Warning);

        let mut ledger = Ledger::new();
        let cat = ledger.category("Rent");
        ledger.budget(&cat, 1_000_000, BudgetPeriod::Monthly);
        ledger.spend(&cat, 999_999, today);
        let alerts = ledger.evaluate(today).unwrap();
        assert_eq!(alerts[0].percentage.to_string(), "100.00");
        assert_eq!(alerts[0].status, AlertStatus::Warning);

        let mut ledger = Ledger::new();
        let cat = ledger.category("Rent");
        ledger.budget(&cat, 1_000_000, BudgetPeriod::Monthly);
        ledger.spend(&cat, 1_000_000, today);
        let alerts = ledger.evaluate(today).unwrap();
        assert_eq!(alerts[0].percentage.to_string(), "100.00");
        assert_eq!(alerts[0].status, AlertStatus::Exceeded);
    }

    #[test]
    fn test_yearly_budget_counts_whole_year() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let travel = ledger.category("Travel");
        ledger.budget(&travel, 5_000_000, BudgetPeriod::Yearly);
        ledger.spend(&travel, 1_200_000, date(2025, 2, 10));
        ledger.spend(&travel, 3_400_000, date(2025, 6, 1));
        ledger.spend(&travel, 4_000_000, date(2024, 6, 1));

        let alerts = ledger.evaluate(today).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].spent, Money::from_units(46_000));
        assert_eq!(alerts[0].percentage.to_string(), "92.00");
    }

    #[test]
    fn test_unrecognized_period_never_alerts() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        ledger.budget(&food, 100, BudgetPeriod::Unrecognized("weekly".into()));
        ledger.spend(&food, 100_000, today);

        assert!(ledger.evaluate(today).unwrap().is_empty());
    }

    #[test]
    fn test_zero_ceiling() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        let idle = ledger.category("Idle");
        ledger.budget(&food, 0, BudgetPeriod::Monthly);
        ledger.budget(&idle, 0, BudgetPeriod::Monthly);
        ledger.spend(&food, 1, today);

        let alerts = ledger.evaluate(today).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].percentage, Percentage::Unbounded);
        assert_eq!(alerts[0].status, AlertStatus::Exceeded);

        let json = serde_json::to_value(&alerts[0]).unwrap();
        assert_eq!(json["percentage"], "Infinity");
    }

    #[test]
    fn test_lookup_failure_skips_budget() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let broken = ledger.category("Broken");
        let food = ledger.category("Food");
        ledger.budget(&broken, 100, BudgetPeriod::Monthly);
        let food_budget = ledger.budget(&food, 100, BudgetPeriod::Monthly);
        ledger.spend(&broken, 500, today);
        ledger.spend(&food, 500, today);

        let alerts = compute_alerts(
            ledger.user,
            &ledger.budgets,
            |_, category| {
                if category == broken.id {
                    Err(SpendlogError::Storage("unavailable".into()))
                } else {
                    Ok(ledger.expenses.get(&category).cloned().unwrap_or_default())
                }
            },
            today,
        )
        .unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].budget_id, food_budget);
    }

    #[test]
    fn test_unresolved_category_skips_budget() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        ledger.budget(&food, 100, BudgetPeriod::Monthly);
        ledger.spend(&food, 500, today);
        ledger.budgets[0].category = None;

        assert!(ledger.evaluate(today).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_amount_aborts() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        ledger.budget(&food, 100, BudgetPeriod::Monthly);
        ledger.spend(&food, 500, today);
        ledger.expenses.get_mut(&food.id).unwrap()[0].amount = "5,00".into();

        assert!(ledger.evaluate(today).unwrap_err().is_data_integrity());

        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        ledger.budget(&food, 100, BudgetPeriod::Monthly);
        ledger.budgets[0].budget.amount = "lots".into();
        assert!(ledger.evaluate(today).unwrap_err().is_data_integrity());
    }

    #[test]
    fn test_overflowing_spend_aborts() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        ledger.budget(&food, 100, BudgetPeriod::Monthly);
        ledger.spend(&food, 0, today);
        ledger.spend(&food, 0, today);
        let huge = Money::parse("90000000000000000").unwrap();
        for expense in ledger.expenses.get_mut(&food.id).unwrap() {
            expense.set_amount(huge);
        }

        assert!(ledger.evaluate(today).unwrap_err().is_data_integrity());
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let b = ledger.category("B");
        let a = ledger.category("A");
        let quiet = ledger.category("Quiet");
        let first = ledger.budget(&b, 100, BudgetPeriod::Monthly);
        ledger.budget(&quiet, 100_00, BudgetPeriod::Monthly);
        let second = ledger.budget(&a, 100, BudgetPeriod::Monthly);
        let third = ledger.budget(&b, 100, BudgetPeriod::Monthly);
        ledger.spend(&a, 100, today);
        ledger.spend(&b, 100, today);

        let ids: Vec<_> = ledger
            .evaluate(today)
            .unwrap()
            .into_iter()
            .map(|a| a.budget_id)
            .collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[test]
    fn test_json_shape() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        ledger.budget(&food, 10_000, BudgetPeriod::Monthly);
        ledger.spend(&food, 9_500, today);

        let alerts = ledger.evaluate(today).unwrap();
        let json = serde_json::to_value(&alerts).unwrap();
        let alert = &json[0];
        assert_eq!(alert["budgetAmount"], 100.0);
        assert_eq!(alert["spent"], 95.0);
        assert_eq!(alert["percentage"], "95.00");
        assert_eq!(alert["status"], "warning");
        assert_eq!(alert["category"]["name"], "Food");
        assert_eq!(alert["category"]["type"], "Daily");
        assert_eq!(alert["category"]["id"], food.id.as_uuid().to_string());
        assert_eq!(alert["category"].as_object().unwrap().len(), 3);
        assert!(alert["budgetId"].is_string());
    }

    #[test]
    fn test_percentage_rounding() {
        let p = |spent, ceiling| {
            Percentage::of(Money::from_cents(spent), Money::from_cents(ceiling)).to_string()
        };
        assert_eq!(p(2, 3), "66.67");
        assert_eq!(p(1, 3), "33.33");
        assert_eq!(p(1, 8), "12.50");
        // 1/16000 = 0.00625% rounds half away from zero
        assert_eq!(p(1, 16_000), "0.01");
        assert_eq!(p(-1, 3), "-33.33");
    }

    #[test]
    fn test_format_terminal() {
        let today = date(2025, 6, 15);
        let mut ledger = Ledger::new();
        let food = ledger.category("Food");
        ledger.budget(&food, 10_000, BudgetPeriod::Monthly);
        ledger.spend(&food, 12_000, today);

        let report = BudgetAlertReport {
            as_of: today,
            alerts: ledger.evaluate(today).unwrap(),
        };
        assert!(report.has_exceeded());
        let output = report.format_terminal("$");
        assert!(output.contains("Food"));
        assert!(output.contains("120.00%"));
        assert!(output.contains("EXCEEDED"));

        let empty = BudgetAlertReport {
            as_of: today,
            alerts: Vec::new(),
        };
        assert!(empty.format_terminal("$").contains("below 90%"));
    }
}
