use anyhow::Result;
use clap::{Parser, Subcommand};

use spendlog::cli::{
    handle_alerts, handle_budget_command, handle_category_command, handle_dashboard,
    handle_expense_command, handle_init, handle_report_command, handle_user_command,
    resolve_user,
};
use spendlog::config::{paths::SpendlogPaths, settings::Settings};
use spendlog::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendlog",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Spendlog tracks your expenses by category, keeps monthly and \
                  yearly budgets, and warns you when a budget is close to its limit."
)]
struct Cli {
    /// User to act as (defaults to the configured default user)
    #[arg(short, long, global = true, env = "SPENDLOG_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory (with --user, also create that user)
    Init,

    /// Show current configuration and paths
    Config,

    /// User management commands
    #[command(subcommand)]
    User(spendlog::cli::UserCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(spendlog::cli::CategoryCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(spendlog::cli::ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(spendlog::cli::BudgetCommands),

    /// Show spending totals for today, this month and this year
    Dashboard {
        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show budgets at or above 90% of their limit
    Alerts {
        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Reports
    #[command(subcommand)]
    Report(spendlog::cli::ReportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SpendlogPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    spendlog::logging::init_tracing(&settings.log_level);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let requested = cli.user.as_deref();

    match cli.command {
        Some(Commands::Init) => {
            handle_init(&storage, &mut settings, requested)?;
        }
        Some(Commands::Config) => {
            println!("Spendlog Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Default user:    {}",
                settings.default_user.as_deref().unwrap_or("(none)")
            );
            println!("  Log level:       {}", settings.log_level);
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &mut settings, requested, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let user = resolve_user(&storage, &settings, requested)?;
            handle_category_command(&storage, &user, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let user = resolve_user(&storage, &settings, requested)?;
            handle_expense_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let user = resolve_user(&storage, &settings, requested)?;
            handle_budget_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Dashboard { today, json }) => {
            let user = resolve_user(&storage, &settings, requested)?;
            handle_dashboard(&storage, &settings, &user, today.as_deref(), json)?;
        }
        Some(Commands::Alerts { today, json }) => {
            let user = resolve_user(&storage, &settings, requested)?;
            handle_alerts(&storage, &settings, &user, today.as_deref(), json)?;
        }
        Some(Commands::Report(cmd)) => {
            let user = resolve_user(&storage, &settings, requested)?;
            handle_report_command(&storage, &settings, &user, cmd)?;
        }
        None => {
            println!("Spendlog - Terminal-based personal expense tracker");
            println!();
            println!("Run 'spendlog --help' for usage information.");
            if !paths.is_initialized() {
                println!("Run 'spendlog init --user <NAME>' to get started.");
            }
        }
    }

    Ok(())
}
