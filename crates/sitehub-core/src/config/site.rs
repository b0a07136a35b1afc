//! Public site and first-run settings.

use serde::{Deserialize, Serialize};

/// Values about the public website that appear in outbound messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the public frontend (used to build reset links).
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Company name used in email subjects.
    #[serde(default = "default_company_name")]
    pub company_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            frontend_url: default_frontend_url(),
            company_name: default_company_name(),
        }
    }
}

/// Credentials for the super admin created when none exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Whether the server creates the default super admin on startup.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Username of the default super admin.
    #[serde(default = "default_username")]
    pub username: String,
    /// Email of the default super admin.
    #[serde(default = "default_email")]
    pub email: String,
    /// Initial password. When empty a built-in default is used and a warning logged.
    #[serde(default)]
    pub password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            username: default_username(),
            email: default_email(),
            password: String::new(),
        }
    }
}

fn default_frontend_url() -> String {
    "https://godigital-africa.web.app".to_string()
}

fn default_company_name() -> String {
    "Go Digital Africa".to_string()
}

fn default_true() -> bool {
    true
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_email() -> String {
    "admin@example.com".to_string()
}
