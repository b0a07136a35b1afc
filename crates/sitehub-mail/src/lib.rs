//! # sitehub-mail
//!
//! Outbound email. Services build a [`MailMessage`] and hand it to a
//! [`Mailer`]; the transport is chosen from `mail.transport`:
//!
//! - `smtp`: [`SmtpMailer`], delivery through an SMTP relay with lettre
//! - `log`: [`LogMailer`], writes a log line instead of sending
//!
//! [`RecordingMailer`] keeps sent messages in memory for tests.

pub mod mailer;
pub mod message;
pub mod recording;
pub mod smtp;

use std::sync::Arc;

use sitehub_core::config::MailConfig;
use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;

pub use mailer::{LogMailer, Mailer};
pub use message::{Attachment, MailMessage};
pub use recording::RecordingMailer;
pub use smtp::SmtpMailer;

/// Build the mailer selected by configuration.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    match config.transport.as_str() {
        "smtp" => Ok(Arc::new(SmtpMailer::new(config)?)),
        "log" => Ok(Arc::new(LogMailer::new(config))),
        other => Err(AppError::configuration(format!(
            "Unknown mail transport: '{other}'. Supported: smtp, log"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_transport() {
        let config = MailConfig {
            transport: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        assert!(build_mailer(&config).is_err());
    }

    #[test]
    fn test_log_transport() {
        let config = MailConfig {
            transport: "log".to_string(),
            ..Default::default()
        };
        assert!(build_mailer(&config).is_ok());
    }
}
