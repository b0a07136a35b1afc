//! Transport-independent email message.

use bytes::Bytes;

/// A file attached to a message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// MIME type, e.g. `application/pdf`.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

/// An outbound email.
#[derive(Debug, Clone, Default)]
pub struct MailMessage {
    /// Sender address. `None` uses the configured default sender.
    pub from: Option<String>,
    /// Visible recipients.
    pub to: Vec<String>,
    /// Blind-copy recipients.
    pub bcc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// Optional HTML alternative.
    pub html: Option<String>,
    /// Attached files.
    pub attachments: Vec<Attachment>,
}

impl MailMessage {
    /// Plain-text message to one recipient.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the sender address.
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Add an HTML alternative body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Attach a file.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Every address the message is delivered to.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.to.iter().chain(self.bcc.iter()).map(String::as_str)
    }
}
