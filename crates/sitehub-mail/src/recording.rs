//! In-memory mailer that records every message.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;

use crate::mailer::Mailer;
use crate::message::MailMessage;

/// Mailer that keeps sent messages in memory. It can be switched into a
/// failing mode to simulate an unreachable relay.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<MailMessage>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMailer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far, oldest first.
    pub async fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().await.clone()
    }

    /// Number of delivered messages.
    pub async fn count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Make every following send fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external("Connection refused by mail relay"));
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}
