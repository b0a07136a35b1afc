//! Mailer trait and the logging transport.

use async_trait::async_trait;
use tracing::info;

use sitehub_core::config::MailConfig;
use sitehub_core::result::AppResult;

use crate::message::MailMessage;

/// Sends email messages.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver `message`. Errors are `ExternalService` errors.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// Transport that logs messages instead of sending them.
#[derive(Debug, Clone)]
pub struct LogMailer {
    default_from: String,
}

impl LogMailer {
    /// Create a logging mailer.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            default_from: config.from_address.clone(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            from = %message.from.as_deref().unwrap_or(&self.default_from),
            to = ?message.to,
            bcc = message.bcc.len(),
            subject = %message.subject,
            attachments = message.attachments.len(),
            "Email not sent (log transport)"
        );
        Ok(())
    }
}
