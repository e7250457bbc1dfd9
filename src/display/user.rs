use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{User, UserId};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Since")]
    since: String,
}

/// Format users as a table, marking the active one
pub fn format_user_list(users: &[User], active: Option<UserId>) -> String {
    if users.is_empty() {
        return "No users found.\n\nRun 'spendlog user add <NAME>' to create one.".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        marker: if Some(u.id) == active { "*" } else { "" },
        id: u.id.to_string(),
        username: u.username.clone(),
        since: u.created_at.format("%Y-%m-%d").to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
