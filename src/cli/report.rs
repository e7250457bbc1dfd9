//! CLI commands for reports
//!
//! The dashboard and budget alerts print either a terminal view or, with
//! `--json`, the camelCase JSON document for scripting.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::SpendlogResult;
use crate::models::User;
use crate::reports::{BudgetAlertReport, DashboardStats, MonthlySpendingReport};
use crate::services::CategoryService;
use crate::storage::Storage;

use super::{parse_range, resolve_today};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending totals per month
    Monthly {
        /// Start date (YYYY-MM-DD), requires --to
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), requires --from
        #[arg(long)]
        to: Option<String>,
        /// Only include this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Print the dashboard
pub fn handle_dashboard(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    today: Option<&str>,
    json: bool,
) -> SpendlogResult<()> {
    let today = resolve_today(today)?;
    let stats = DashboardStats::generate(storage, user.id, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", stats.format_terminal(&settings.currency_symbol, today));
    }
    Ok(())
}

/// Print budget alerts
pub fn handle_alerts(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    today: Option<&str>,
    json: bool,
) -> SpendlogResult<()> {
    let today = resolve_today(today)?;
    let report = BudgetAlertReport::generate(storage, user.id, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.alerts)?);
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }
    Ok(())
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ReportCommands,
) -> SpendlogResult<()> {
    match cmd {
        ReportCommands::Monthly { from, to, category } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let category = match category {
                Some(c) => Some(CategoryService::new(storage).require(user.id, &c)?),
                None => None,
            };

            let report = MonthlySpendingReport::generate(
                storage,
                user.id,
                range,
                category.as_ref().map(|c| c.id),
            )?;

            if let Some(category) = &category {
                println!("Category: {}", category.name);
            }
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
    }

    Ok(())
}
