//! Expense CLI commands
//!
//! Implements CLI commands for logging, listing, editing and deleting
//! expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::SpendlogResult;
use crate::models::{parse_date_arg, User, UNCATEGORIZED};
use crate::services::{CategoryService, ExpenseService, ExpenseUpdate};
use crate::storage::Storage;

use super::{parse_amount, parse_range, resolve_today};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log a new expense
    Add {
        /// Amount (e.g., "12" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form note
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Start date (YYYY-MM-DD), requires --to
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), requires --from
        #[arg(long)]
        to: Option<String>,
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show expense details
    Show {
        /// Expense ID
        expense: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        expense: String,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New note
        #[arg(short, long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        /// Remove the note
        #[arg(long)]
        clear_notes: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ExpenseCommands,
) -> SpendlogResult<()> {
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            notes,
        } => {
            let amount = parse_amount(&amount)?;
            let category = categories.require(user.id, &category)?;
            let date = match date {
                Some(d) => parse_date_arg(&d)?,
                None => resolve_today(None)?,
            };

            let expense = service.create(user.id, category.id, amount, date, notes)?;
            println!(
                "Logged {} in {} on {}",
                amount.format_with_symbol(currency),
                category.name,
                expense.expense_date
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { from, to, category } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let mut expenses = service.list(user.id, range)?;

            if let Some(category) = category {
                let category = categories.require(user.id, &category)?;
                expenses.retain(|e| e.expense.category_id == category.id);
            }

            println!(
                "{}",
                format_expense_list(&expenses, currency, &settings.date_format)?
            );
        }

        ExpenseCommands::Show { expense } => {
            let expense = service.require(user.id, &expense)?;
            let category_name = categories
                .get(user.id, expense.category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            print!("{}", format_expense_details(&expense, &category_name, currency));
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            date,
            category,
            notes,
            clear_notes,
        } => {
            let expense = service.require(user.id, &expense)?;

            let update = ExpenseUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date_arg).transpose()?,
                category_id: match category {
                    Some(c) => Some(categories.require(user.id, &c)?.id),
                    None => None,
                },
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
            };

            if update.is_empty() {
                println!("No changes specified. Use --amount, --date, --category, --notes or --clear-notes.");
                return Ok(());
            }

            let updated = service.update(user.id, expense.id, update)?;
            println!("Updated expense: {}", updated.id);
        }

        ExpenseCommands::Delete { expense } => {
            let expense = service.require(user.id, &expense)?;
            let deleted = service.delete(user.id, expense.id)?;
            println!(
                "Deleted expense {} ({} on {})",
                deleted.id, deleted.amount, deleted.expense_date
            );
        }
    }

    Ok(())
}
