//! Monthly Spending Report
//!
//! Totals a user's expenses per calendar month, optionally limited to a date
//! range and a single category.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::display::report::{double_separator, format_bar, separator};
use crate::error::SpendlogResult;
use crate::models::money::accumulate;
use crate::models::{CategoryId, DateRange, Money, UserId};
use crate::storage::FinanceQueries;

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTotal {
    /// Month key formatted as `YYYY-MM`
    pub month: String,
    pub total: Money,
    pub expense_count: usize,
}

/// Monthly Spending Report
#[derive(Debug, Clone)]
pub struct MonthlySpendingReport {
    pub range: Option<DateRange>,
    pub category: Option<CategoryId>,
    /// Months with at least one expense, oldest first
    pub months: Vec<MonthTotal>,
    pub total: Money,
    pub expense_count: usize,
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

impl MonthlySpendingReport {
    /// Generate the report for a user
    pub fn generate(
        store: &impl FinanceQueries,
        user_id: UserId,
        range: Option<DateRange>,
        category: Option<CategoryId>,
    ) -> SpendlogResult<Self> {
        let expenses = store.list_expenses(user_id, range)?;

        let mut by_month: BTreeMap<String, (Money, usize)> = BTreeMap::new();
        let mut total = Money::zero();
        let mut expense_count = 0;

        for entry in &expenses {
            if category.is_some_and(|id| entry.expense.category_id != id) {
                continue;
            }

            let amount = entry.expense.amount()?;
            let date = entry.expense.date()?;

            let slot = by_month
                .entry(month_key(date))
                .or_insert((Money::zero(), 0));
            accumulate(&mut slot.0, amount)?;
            slot.1 += 1;

            accumulate(&mut total, amount)?;
            expense_count += 1;
        }

        let months = by_month
            .into_iter()
            .map(|(month, (total, expense_count))| MonthTotal {
                month,
                total,
                expense_count,
            })
            .collect();

        Ok(Self {
            range,
            category,
            months,
            total,
            expense_count,
        })
    }

    /// Month with the highest spending (earliest on ties)
    pub fn peak_month(&self) -> Option<&MonthTotal> {
        let mut peak: Option<&MonthTotal> = None;
        for month in &self.months {
            if peak.map_or(true, |p| month.total > p.total) {
                peak = Some(month);
            }
        }
        peak
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        match &self.range {
            Some(range) => output.push_str(&format!("Monthly Spending: {}\n", range)),
            None => output.push_str("Monthly Spending: all time\n"),
        }
        output.push_str(&double_separator(60));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        let max = self
            .peak_month()
            .map(|m| m.total.as_f64())
            .unwrap_or_default();

        output.push_str(&format!(
            "{:<9} {:>14} {:>6}  {}\n",
            "Month", "Amount", "Count", ""
        ));
        output.push_str(&separator(60));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<9} {:>14} {:>6}  {}\n",
                month.month,
                month.total.format_with_symbol(currency),
                month.expense_count,
                format_bar(month.total.as_f64(), max, 20)
            ));
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<9} {:>14} {:>6}\n",
            "TOTAL",
            self.total.format_with_symbol(currency),
            self.expense_count
        ));

        output
    }
}
