//! Newsletter subscriber commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use sitehub_core::error::AppError;
use sitehub_core::types::format_display_date;
use sitehub_database::store::{Stores, SubscriberStore};

use crate::output::{self, OutputFormat};

/// Arguments for subscriber commands
#[derive(Debug, Args)]
pub struct SubscriberArgs {
    /// Subscriber subcommand
    #[command(subcommand)]
    pub command: SubscriberCommand,
}

/// Subscriber subcommands
#[derive(Debug, Subcommand)]
pub enum SubscriberCommand {
    /// List every subscriber
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct SubscriberRow {
    email: String,
    subscribed: String,
    active: bool,
}

/// Execute subscriber commands
pub async fn execute(
    args: &SubscriberArgs,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let stores = Stores::postgres(pool);

    match &args.command {
        SubscriberCommand::List => {
            let rows: Vec<SubscriberRow> = stores
                .subscribers
                .list()
                .await?
                .into_iter()
                .map(|s| SubscriberRow {
                    email: s.email,
                    subscribed: format_display_date(&s.subscribed_at),
                    active: s.is_active,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
