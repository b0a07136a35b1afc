//! Configuration commands.

use clap::{Args, Subcommand};

use sitehub_core::error::AppError;
use sitehub_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show,
    /// Validate the configuration files
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = super::load_config(env)?;
            config.database.url = mask_password(&config.database.url);
            config.auth.jwt_secret = "****".to_string();
            if !config.mail.smtp_password.is_empty() {
                config.mail.smtp_password = "****".to_string();
            }
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => match super::load_config(env) {
            Ok(config) => {
                output::print_success(&format!("Configuration for '{env}' is valid"));
                println!("  Server: {}:{}", config.server.host, config.server.port);
                println!("  Database: {}", mask_password(&config.database.url));
                println!("  Cache: {}", config.cache.provider);
                println!("  Mail: {}", config.mail.transport);
                println!("  Storage: {}", config.storage.root_path);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
