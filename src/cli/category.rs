//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::SpendlogResult;
use crate::models::{CategoryType, User};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List your categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Category type: daily or big
        #[arg(short = 't', long = "type", default_value = "daily")]
        category_type: CategoryType,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type: daily or big
        #[arg(short = 't', long = "type")]
        category_type: Option<CategoryType>,
    },

    /// Delete a category and all of its expenses and budgets
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    user: &User,
    cmd: CategoryCommands,
) -> SpendlogResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list(user.id)?;
            println!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add {
            name,
            category_type,
        } => {
            let category = service.create(user.id, &name, category_type)?;
            println!("Created category: {}", category.name);
            println!("  Type: {}", category.category_type);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.require(user.id, &category)?;
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::Edit {
            category,
            name,
            category_type,
        } => {
            let category = service.require(user.id, &category)?;

            if name.is_none() && category_type.is_none() {
                println!("No changes specified. Use --name or --type.");
                return Ok(());
            }

            let updated = service.update(user.id, category.id, name.as_deref(), category_type)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let category = service.require(user.id, &category)?;
            let deletion = service.delete(user.id, category.id)?;
            println!("Deleted category: {}", deletion.category.name);
            if deletion.expenses_removed > 0 || deletion.budgets_removed > 0 {
                println!(
                    "  Also removed {} expense(s) and {} budget(s)",
                    deletion.expenses_removed, deletion.budgets_removed
                );
            }
        }
    }

    Ok(())
}
