//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default so that an empty
//! configuration still produces a runnable development setup.

pub mod app;
pub mod auth;
pub mod cache;
pub mod database;
pub mod logging;
pub mod mail;
pub mod rate_limit;
pub mod site;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::mail::MailConfig;
pub use self::rate_limit::RateLimitConfig;
pub use self::site::{BootstrapConfig, SiteConfig};
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`SITEHUB__DATABASE__URL`).
pub const ENV_PREFIX: &str = "SITEHUB";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Upload storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Request throttling settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Public site settings used in outbound messages.
    #[serde(default)]
    pub site: SiteConfig,
    /// Default super admin created on first start.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// (`config/{env}.toml`) and environment variables prefixed with
    /// `SITEHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single TOML string (used by tests and tooling).
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config should deserialize");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.access_ttl_minutes, 50);
        assert_eq!(config.auth.refresh_ttl_days, 7);
        assert_eq!(config.rate_limit.anon_per_minute, 5);
        assert!(!config.rate_limit.trust_forwarded_for);
        assert_eq!(config.rate_limit.user_per_minute, 10);
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.site.frontend_url, "https://godigital-africa.web.app");
        assert_eq!(config.bootstrap.username, "admin");
    }

    #[test]
    fn test_section_override() {
        let config = AppConfig::from_toml(
            r#"
            [mail]
            transport = "log"
            from_address = "news@example.org"

            [rate_limit]
            enabled = false
            "#,
        )
        .expect("config should deserialize");
        assert_eq!(config.mail.transport, "log");
        assert_eq!(config.mail.from_address, "news@example.org");
        assert!(!config.rate_limit.enabled);
        assert_eq!(config.mail.smtp_port, 587);
    }
}
