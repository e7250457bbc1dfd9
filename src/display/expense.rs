//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::SpendlogResult;
use crate::models::money::accumulate;
use crate::models::{Expense, ExpenseWithCategory, Money};

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Format expenses as a table followed by their total
///
/// Fails if a stored amount or date cannot be parsed.
pub fn format_expense_list(
    expenses: &[ExpenseWithCategory],
    currency: &str,
    date_format: &str,
) -> SpendlogResult<String> {
    if expenses.is_empty() {
        return Ok("No expenses found.".to_string());
    }

    let mut rows = Vec::with_capacity(expenses.len());
    let mut total = Money::zero();

    for entry in expenses {
        let amount = entry.expense.amount()?;
        let date = entry.expense.date()?;
        accumulate(&mut total, amount)?;
        rows.push(ExpenseRow {
            id: entry.expense.id.to_string(),
            date: date.format(date_format).to_string(),
            category: entry.category_name().to_string(),
            amount: amount.format_with_symbol(currency),
            notes: entry
                .expense
                .notes
                .as_deref()
                .map(|n| truncate(n, 40))
                .unwrap_or_default(),
        });
    }

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push_str(&format!(
        "\n{} expense(s), total {}",
        expenses.len(),
        total.format_with_symbol(currency)
    ));
    Ok(output)
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, category_name: &str, currency: &str) -> String {
    let amount = expense
        .amount()
        .map(|a| a.format_with_symbol(currency))
        .unwrap_or_else(|_| format!("{} (unreadable)", expense.amount));

    let mut output = String::new();
    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Date:     {}\n", expense.expense_date));
    output.push_str(&format!("  Amount:   {}\n", amount));
    output.push_str(&format!("  Category: {}\n", category_name));
    if let Some(notes) = &expense.notes {
        output.push_str(&format!("  Notes:    {}\n", notes));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryType, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_format_expense_list() {
        let user = UserId::new();
        let food = Category::new("Food", CategoryType::Daily, user);
        let day = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let expenses = vec![
            ExpenseWithCategory {
                expense: Expense::new(user, food.id, Money::from_cents(1050), day)
                    .with_notes("pizza"),
                category: Some(food.clone()),
            },
            ExpenseWithCategory {
                expense: Expense::new(user, food.id, Money::from_cents(200), day),
                category: None,
            },
        ];

        let output = format_expense_list(&expenses, "$", "%Y-%m-%d").unwrap();
        assert!(output.contains("2025-02-03"));
        assert!(output.contains("pizza"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("2 expense(s), total $12.50"));

        let output = format_expense_list(&expenses, "€", "%d/%m/%Y").unwrap();
        assert!(output.contains("03/02/2025"));
        assert!(output.contains("€10.50"));
    }

    #[test]
    fn test_corrupt_amount_fails_listing() {
        let user = UserId::new();
        let mut expense = Expense::new(
            user,
            crate::models::CategoryId::new(),
            Money::from_units(1),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        );
        expense.amount = "one".into();
        let expenses = vec![ExpenseWithCategory {
            expense: expense.clone(),
            category: None,
        }];

        assert!(format_expense_list(&expenses, "$", "%d/%m/%Y").unwrap_err().is_data_integrity());
        assert!(format_expense_details(&expense, "Food", "$").contains("one (unreadable)"));
    }
}
