//! SMTP delivery through lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as LettreAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use sitehub_core::config::MailConfig;
use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;

use crate::mailer::Mailer;
use crate::message::MailMessage;

/// Mailer delivering through an SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    default_from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("default_from", &self.default_from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Create an SMTP mailer from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host).map_err(
                |e| {
                    AppError::with_source(
                        ErrorKind::Configuration,
                        format!("Invalid SMTP relay '{}'", config.smtp_host),
                        e,
                    )
                },
            )?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        let address = config.from_address.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid sender address '{}'", config.from_address),
                e,
            )
        })?;

        Ok(Self {
            transport: builder.build(),
            default_from: Mailbox::new(Some(config.from_name.clone()), address),
        })
    }

    fn build_message(&self, message: &MailMessage) -> AppResult<Message> {
        let from = match &message.from {
            Some(from) => parse_mailbox(from)?,
            None => self.default_from.clone(),
        };

        let mut builder = Message::builder().from(from).subject(&message.subject);
        for to in &message.to {
            builder = builder.to(parse_mailbox(to)?);
        }
        for bcc in &message.bcc {
            builder = builder.bcc(parse_mailbox(bcc)?);
        }

        let body = match &message.html {
            Some(html) => MultiPart::alternative_plain_html(message.text.clone(), html.clone()),
            None => MultiPart::mixed().singlepart(SinglePart::plain(message.text.clone())),
        };

        let email = if message.attachments.is_empty() {
            builder.multipart(body)
        } else {
            let mut mixed = MultiPart::mixed().multipart(body);
            for attachment in &message.attachments {
                let content_type = ContentType::parse(&attachment.content_type)
                    .or_else(|_| ContentType::parse("application/octet-stream"))
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Internal, "Invalid content type", e)
                    })?;
                mixed = mixed.singlepart(
                    LettreAttachment::new(attachment.filename.clone())
                        .body(attachment.data.to_vec(), content_type),
                );
            }
            builder.multipart(mixed)
        };

        email.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to build email", e)
        })
    }
}

fn parse_mailbox(address: &str) -> AppResult<Mailbox> {
    address.parse().map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Invalid email address: {address}"),
            e,
        )
    })
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let email = self.build_message(message)?;
        self.transport.send(email).await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, format!("SMTP error: {e}"), e)
        })?;

        info!(
            to = ?message.to,
            bcc = message.bcc.len(),
            subject = %message.subject,
            "Email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Attachment;
    use bytes::Bytes;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(&MailConfig {
            starttls: false,
            smtp_host: "localhost".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_builds_bcc_only_message() {
        let message = MailMessage {
            bcc: vec!["a@example.com".into(), "b@example.com".into()],
            subject: "Newsletter".into(),
            text: "Hello".into(),
            html: Some("<p>Hello</p>".into()),
            ..Default::default()
        };
        let email = mailer().build_message(&message).unwrap();
        assert_eq!(email.envelope().to().len(), 2);
    }

    #[test]
    fn test_builds_message_with_attachment() {
        let message = MailMessage::new("client@example.com", "Proposal", "See attached")
            .attach(Attachment {
                filename: "proposal.pdf".into(),
                content_type: "application/pdf".into(),
                data: Bytes::from_static(b"%PDF-1.4"),
            });
        let email = mailer().build_message(&message).unwrap();
        let raw = String::from_utf8_lossy(&email.formatted()).to_string();
        assert!(raw.contains("proposal.pdf"));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let message = MailMessage::new("not an address", "Hi", "Hello");
        assert!(mailer().build_message(&message).is_err());
    }
}
