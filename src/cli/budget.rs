//! Budget CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_list;
use crate::error::SpendlogResult;
use crate::models::{BudgetPeriod, User};
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a spending limit on a category
    Add {
        /// Category name or ID
        category: String,
        /// Limit per period (e.g., "500" or "500.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Budget period: monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
    },

    /// List your budgets
    List,

    /// Change a budget's limit or period
    Edit {
        /// Budget ID
        budget: String,
        /// New limit
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New period: monthly or yearly
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: BudgetCommands,
) -> SpendlogResult<()> {
    let service = BudgetService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            period,
        } => {
            let category = CategoryService::new(storage).require(user.id, &category)?;
            let amount = parse_amount(&amount)?;

            let budget = service.create(user.id, category.id, amount, period)?;
            println!(
                "Budget set: {} {} for {}",
                amount.format_with_symbol(currency),
                budget.period,
                category.name
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List => {
            let budgets = service.list(user.id)?;
            println!("{}", format_budget_list(&budgets, currency));
        }

        BudgetCommands::Edit {
            budget,
            amount,
            period,
        } => {
            let budget = service.require(user.id, &budget)?;

            if amount.is_none() && period.is_none() {
                println!("No changes specified. Use --amount or --period.");
                return Ok(());
            }

            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let updated = service.update(user.id, budget.id, amount, period)?;
            println!("Updated budget: {} ({} {})", updated.id, updated.amount, updated.period);
        }

        BudgetCommands::Delete { budget } => {
            let budget = service.require(user.id, &budget)?;
            service.delete(user.id, budget.id)?;
            println!("Deleted budget: {}", budget.id);
        }
    }

    Ok(())
}
