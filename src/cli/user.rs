//! User CLI commands
//!
//! Implements `init`, user management, and resolution of the active user.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_user_list;
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::User;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new user
    Add {
        /// Username (no spaces)
        name: String,
        /// Make this the default user
        #[arg(long)]
        default: bool,
    },

    /// List all users
    List,

    /// Set the default user
    Use {
        /// Username or ID
        name: String,
    },
}

/// Resolve the user commands act on
///
/// `requested` comes from `--user` / `SPENDLOG_USER`; the configured default
/// user is used otherwise.
pub fn resolve_user(
    storage: &Storage,
    settings: &Settings,
    requested: Option<&str>,
) -> SpendlogResult<User> {
    let name = requested
        .or(settings.default_user.as_deref())
        .ok_or_else(|| {
            SpendlogError::Validation(
                "No active user. Pass --user NAME or run 'spendlog user add NAME --default'"
                    .into(),
            )
        })?;

    UserService::new(storage).require(name)
}

/// Initialize the data directory, optionally creating a first user
pub fn handle_init(
    storage: &Storage,
    settings: &mut Settings,
    user: Option<&str>,
) -> SpendlogResult<()> {
    let paths = storage.paths();
    println!("Initializing Spendlog at: {}", paths.base_dir().display());

    storage.save_all()?;

    if let Some(name) = user {
        let service = UserService::new(storage);
        let user = match service.find(name)? {
            Some(existing) => existing,
            None => service.create(name)?,
        };
        settings.default_user = Some(user.username.clone());
        println!("Default user: {}", user.username);
    }

    settings.save(paths)?;
    println!("Initialization complete!");
    if settings.default_user.is_none() {
        println!();
        println!("Run 'spendlog user add <NAME> --default' to create your first user.");
    }
    Ok(())
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    settings: &mut Settings,
    requested: Option<&str>,
    cmd: UserCommands,
) -> SpendlogResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add { name, default } => {
            let user = service.create(&name)?;
            println!("Created user: {}", user.username);
            println!("  ID: {}", user.id);

            if default || settings.default_user.is_none() {
                settings.default_user = Some(user.username.clone());
                settings.save(storage.paths())?;
                println!("  Set as default user");
            }
        }

        UserCommands::List => {
            let users = service.list()?;
            let active = resolve_user(storage, settings, requested).ok().map(|u| u.id);
            println!("{}", format_user_list(&users, active));
        }

        UserCommands::Use { name } => {
            let user = service.require(&name)?;
            settings.default_user = Some(user.username.clone());
            settings.save(storage.paths())?;
            println!("Default user is now: {}", user.username);
        }
    }

    Ok(())
}
