//! `serve`: run the HTTP API in the foreground.

use clap::Args;
use tracing::info;

use sitehub_core::error::AppError;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on instead of `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind instead of `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Start without applying pending migrations
    #[arg(long)]
    pub no_migrate: bool,
}

pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;
    config.server.port = args.port.unwrap_or(config.server.port);
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }

    let pool = super::create_db_pool(&config).await?;
    if args.no_migrate {
        info!("Skipping migrations");
    } else {
        sitehub_database::migration::run_migrations(&pool).await?;
    }

    println!(
        "SiteHub listening on http://{}:{} ({env})",
        config.server.host, config.server.port
    );
    sitehub_api::run_server(config, pool).await
}
