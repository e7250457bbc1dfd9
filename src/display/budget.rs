use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::BudgetWithCategory;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Limit")]
    amount: String,
}

/// Format budgets as a table
pub fn format_budget_list(budgets: &[BudgetWithCategory], currency: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = budgets.iter().map(|entry| BudgetRow {
        id: entry.budget.id.to_string(),
        category: entry
            .category
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "(missing category)".to_string()),
        period: entry.budget.period.to_string(),
        amount: entry
            .budget
            .amount()
            .map(|a| a.format_with_symbol(currency))
            .unwrap_or_else(|_| entry.budget.amount.clone()),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetPeriod, Category, CategoryId, CategoryType, Money, UserId};

    #[test]
    fn test_format_budget_list() {
        let user = UserId::new();
        let travel = Category::new("Travel", CategoryType::Big, user);
        let budgets = vec![
            BudgetWithCategory {
                budget: Budget::new(user, travel.id, Money::from_units(500), BudgetPeriod::Yearly),
                category: Some(travel),
            },
            BudgetWithCategory {
                budget: Budget::new(user, CategoryId::new(), Money::from_units(5), BudgetPeriod::Monthly),
                category: None,
            },
        ];

        let output = format_budget_list(&budgets, "$");
        assert!(output.contains("Travel"));
        assert!(output.contains("yearly"));
        assert!(output.contains("$500.00"));
        assert!(output.contains("(missing category)"));
    }
}
