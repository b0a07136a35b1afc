//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// SMTP relay and sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transport: `"smtp"` delivers through the relay, `"log"` only records
    /// messages in the log (development).
    #[serde(default = "default_transport")]
    pub transport: String,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Whether to upgrade the connection with STARTTLS.
    #[serde(default = "default_true")]
    pub starttls: bool,
    /// Timeout for a single send, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Default sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Display name used with the sender address.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Sender address for automated notifications to applicants.
    #[serde(default = "default_noreply")]
    pub noreply_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            starttls: default_true(),
            timeout_seconds: default_timeout(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            noreply_address: default_noreply(),
        }
    }
}

fn default_transport() -> String {
    "smtp".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_from_address() -> String {
    "info@godigitalafrica.com".to_string()
}

fn default_from_name() -> String {
    "Go Digital Africa".to_string()
}

fn default_noreply() -> String {
    "noreply@godigitalafrica.com".to_string()
}
