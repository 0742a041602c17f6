// CLI module for administrative operations

pub mod accounts;

use clap::{Parser, Subcommand};
use std::sync::Arc;

use crate::app_data::AppData;

/// Bank backend: HTTP server plus administrative commands
#[derive(Parser, Debug)]
#[command(name = "bank-backend")]
#[command(about = "Bank account service and administrative CLI", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Open an account with a generated account number
    CreateAccount {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        password: String,
    },

    /// Print every account
    ListAccounts,

    /// Deposit (positive delta) or withdraw (negative delta)
    AdjustBalance {
        #[arg(long)]
        id: i64,
        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },

    /// Permanently delete an account
    DeleteAccount {
        #[arg(long)]
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Execute an account command
///
/// `Serve` and `Migrate` are handled by the binary before AppData exists.
pub async fn execute_command(
    command: Commands,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve | Commands::Migrate => {
            return Err("serve and migrate are handled by the binary".into());
        }
        Commands::CreateAccount {
            first_name,
            last_name,
            password,
        } => {
            accounts::create_account(app_data, &first_name, &last_name, &password).await?;
        }
        Commands::ListAccounts => {
            accounts::list_accounts(app_data).await?;
        }
        Commands::AdjustBalance { id, delta } => {
            accounts::adjust_balance(app_data, id, delta).await?;
        }
        Commands::DeleteAccount { id, yes } => {
            accounts::delete_account(app_data, id, yes).await?;
        }
    }

    Ok(())
}
