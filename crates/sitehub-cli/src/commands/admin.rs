//! Admin account commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use sitehub_core::error::AppError;
use sitehub_database::store::{AccountStore, Stores};
use sitehub_entity::account::Account;
use sitehub_service::AccountService;

use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create the super admin account
    CreateSuperAdmin {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List admin accounts
    List,
}

/// One row of the admin listing.
#[derive(Debug, Serialize, Tabled)]
struct AdminRow {
    id: String,
    username: String,
    email: String,
    role: String,
    active: bool,
}

impl From<&Account> for AdminRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            role: account.role.to_string(),
            active: account.is_active,
        }
    }
}

fn prompt(label: &str) -> Result<String, AppError> {
    dialoguer::Input::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let stores = Stores::postgres(pool);

    match &args.command {
        AdminCommand::CreateSuperAdmin {
            username,
            email,
            password,
        } => {
            let username = match username {
                Some(u) => u.clone(),
                None => prompt("Username")?,
            };
            let email = match email {
                Some(e) => e.clone(),
                None => prompt("Email")?,
            };
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let service = AccountService::new(stores.accounts, &config.auth);
            let account = service
                .create_super_admin(&username, &email, &password)
                .await?;

            output::print_success(&format!(
                "Super admin '{}' created (id: {})",
                account.username, account.id
            ));
        }
        AdminCommand::List => {
            let admins = stores.accounts.list_admins().await?;
            let rows: Vec<AdminRow> = admins.iter().map(AdminRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
