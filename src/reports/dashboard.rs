//! Dashboard statistics
//!
//! One pass over all of a user's expenses produces the today/month/year
//! totals, the per-category breakdown and the top category.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::display::report::{double_separator, separator, truncate};
use crate::error::SpendlogResult;
use crate::models::money::{accumulate, serialize_as_number};
use crate::models::{ExpenseWithCategory, Money, UserId};
use crate::storage::FinanceQueries;

/// Summed spend for one category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    #[serde(serialize_with = "serialize_as_number")]
    pub value: Money,
}

/// Dashboard output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(serialize_with = "serialize_as_number")]
    pub today: Money,
    #[serde(serialize_with = "serialize_as_number")]
    pub month: Money,
    #[serde(serialize_with = "serialize_as_number")]
    pub year: Money,
    /// Empty when no category has a positive total
    pub highest_category: String,
    /// One entry per distinct category name, in order of first appearance
    pub category_breakdown: Vec<CategoryTotal>,
}

/// Category totals that remember the order names were first seen in
#[derive(Debug, Default)]
struct CategoryTotals {
    totals: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    fn add(&mut self, name: &str, amount: Money) -> SpendlogResult<()> {
        match self.index.get(name) {
            Some(&i) => accumulate(&mut self.totals[i].value, amount)?,
            None => {
                self.index.insert(name.to_string(), self.totals.len());
                self.totals.push(CategoryTotal {
                    name: name.to_string(),
                    value: amount,
                });
            }
        }
        Ok(())
    }

    /// First category holding the strictly largest positive total
    fn highest(&self) -> Option<&CategoryTotal> {
        let mut best: Option<&CategoryTotal> = None;
        let mut best_value = Money::zero();
        for total in &self.totals {
            if total.value > best_value {
                best_value = total.value;
                best = Some(total);
            }
        }
        best
    }
}

/// Aggregate a user's expenses as of `today`
///
/// Expenses are visited in slice order, which decides the breakdown order
/// and ties for the top category. An unparsable amount or date, or a total
/// that overflows, fails the whole computation.
pub fn compute_dashboard(
    expenses: &[ExpenseWithCategory],
    today: NaiveDate,
) -> SpendlogResult<DashboardStats> {
    let mut today_total = Money::zero();
    let mut month_total = Money::zero();
    let mut year_total = Money::zero();
    let mut by_category = CategoryTotals::default();

    for entry in expenses {
        let amount = entry.expense.amount()?;
        let date = entry.expense.date()?;

        if date == today {
            accumulate(&mut today_total, amount)?;
        }
        if date.year() == today.year() && date.month() == today.month() {
            accumulate(&mut month_total, amount)?;
        }
        if date.year() == today.year() {
            accumulate(&mut year_total, amount)?;
        }

        by_category.add(entry.category_name(), amount)?;
    }

    let highest_category = by_category
        .highest()
        .map(|t| t.name.clone())
        .unwrap_or_default();

    tracing::debug!(
        expenses = expenses.len(),
        categories = by_category.totals.len(),
        %today,
        "dashboard computed"
    );

    Ok(DashboardStats {
        today: today_total,
        month: month_total,
        year: year_total,
        highest_category,
        category_breakdown: by_category.totals,
    })
}

impl DashboardStats {
    /// Fetch a user's expenses and aggregate them in the order they were recorded
    pub fn generate(
        store: &impl FinanceQueries,
        user_id: UserId,
        today: NaiveDate,
    ) -> SpendlogResult<Self> {
        let mut expenses = store.list_expenses(user_id, None)?;
        expenses.sort_by(|a, b| {
            a.expense
                .created_at
                .cmp(&b.expense.created_at)
                .then_with(|| a.expense.id.as_uuid().cmp(b.expense.id.as_uuid()))
        });
        compute_dashboard(&expenses, today)
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency: &str, today: NaiveDate) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", today));
        output.push_str(&double_separator(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "Today",
            self.today.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "This month",
            self.month.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "This year",
            self.year.format_with_symbol(currency)
        ));

        if self.category_breakdown.is_empty() {
            output.push_str("\nNo expenses recorded yet.\n");
            return output;
        }

        output.push_str(&format!(
            "\nTop category: {}\n\n",
            if self.highest_category.is_empty() {
                "-"
            } else {
                self.highest_category.as_str()
            }
        ));

        output.push_str(&format!("{:<30} {:>14}\n", "Category", "All time"));
        output.push_str(&separator(50));
        output.push('\n');
        for total in &self.category_breakdown {
            output.push_str(&format!(
                "{:<30} {:>14}\n",
                truncate(&total.name, 30),
                total.value.format_with_symbol(currency)
            ));
        }

        output
    }
}
