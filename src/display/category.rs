//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    category_type: String,
}

/// Format a list of categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'spendlog category add <NAME>' to create one."
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        category_type: c.category_type.to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a single category's details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!("  Type:    {}\n", category.category_type));
    output.push_str(&format!(
        "  Created: {}\n",
        category.created_at.format("%Y-%m-%d %H:%M")
    ));
    output
}
