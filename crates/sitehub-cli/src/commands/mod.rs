//! CLI command definitions and dispatch.

pub mod admin;
pub mod config;
pub mod migrate;
pub mod serve;
pub mod subscriber;

use clap::{Parser, Subcommand};
use sqlx::PgPool;

use sitehub_core::config::AppConfig;
use sitehub_core::error::AppError;

use crate::output::OutputFormat;

/// SiteHub: company website backend
#[derive(Debug, Parser)]
#[command(name = "sitehub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (`config/{env}.toml`)
    #[arg(short, long, env = "SITEHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show progress logs (`-v` info, `-vv` debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the SiteHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin account management
    Admin(admin::AdminArgs),
    /// Newsletter subscribers
    Subscriber(subscriber::SubscriberArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env, self.format).await,
            Commands::Admin(args) => admin::execute(args, &self.env, self.format).await,
            Commands::Subscriber(args) => subscriber::execute(args, &self.env, self.format).await,
            Commands::Config(args) => config::execute(args, &self.env, self.format),
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    sitehub_database::connect(&config.database).await
}
