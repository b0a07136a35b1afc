//! Subscribe, unsubscribe and broadcast.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use sitehub_core::error::AppError;
use sitehub_core::types::SubscriberId;
use sitehub_database::store::SubscriberStore;
use sitehub_entity::subscriber::Subscriber;
use sitehub_mail::{MailMessage, Mailer};

use super::html::strip_tags;
use crate::context::RequestContext;

/// Subscription request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
}

/// Newsletter broadcast request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNewsletterRequest {
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default)]
    pub html_content: String,
    /// Used only for test sends.
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub is_test: bool,
}

fn default_subject() -> String {
    "Newsletter".to_string()
}

/// Manages newsletter subscribers and sends newsletters.
#[derive(Debug, Clone)]
pub struct NewsletterService {
    subscribers: Arc<dyn SubscriberStore>,
    mailer: Arc<dyn Mailer>,
}

impl NewsletterService {
    pub fn new(subscribers: Arc<dyn SubscriberStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            subscribers,
            mailer,
        }
    }

    /// Adds a subscriber.
    pub async fn subscribe(&self, req: SubscribeRequest) -> Result<Subscriber, AppError> {
        req.validate()?;
        if self.subscribers.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email already subscribed!"));
        }
        let subscriber = self.subscribers.create(&req.email).await?;
        info!(subscriber_id = %subscriber.id, "New newsletter subscriber");
        Ok(subscriber)
    }

    /// Deactivates and then removes a subscriber.
    pub async fn unsubscribe(&self, email: &str) -> Result<(), AppError> {
        let subscriber = self
            .subscribers
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("Email not found."))?;
        if !subscriber.is_active {
            return Err(AppError::validation("You are already unsubscribed."));
        }

        self.subscribers.set_active(subscriber.id, false).await?;
        self.subscribers.delete(subscriber.id).await?;
        info!(subscriber_id = %subscriber.id, "Subscriber removed");
        Ok(())
    }

    /// Lists every subscriber, active or not.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Subscriber>, AppError> {
        ctx.require_admin()?;
        self.subscribers.list().await
    }

    /// Deletes a subscriber by id.
    pub async fn delete(&self, ctx: &RequestContext, id: SubscriberId) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.subscribers.delete(id).await? {
            return Err(AppError::not_found("Subscriber not found"));
        }
        Ok(())
    }

    /// Sends one newsletter to every active subscriber, or to the given
    /// list for a test send. Recipients are blind-copied. Returns the
    /// number of recipients.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        req: SendNewsletterRequest,
    ) -> Result<usize, AppError> {
        ctx.require_admin()?;

        let recipients = if req.is_test {
            req.recipients
        } else {
            self.subscribers.active_emails().await?
        };
        if recipients.is_empty() {
            return Err(AppError::validation("No recipients found."));
        }

        let count = recipients.len();
        let message = MailMessage {
            bcc: recipients,
            subject: req.subject,
            text: strip_tags(&req.html_content),
            html: Some(req.html_content),
            ..Default::default()
        };
        if let Err(e) = self.mailer.send(&message).await {
            error!(error = %e, recipients = count, "Failed to send newsletter");
            return Err(e);
        }

        info!(
            actor = %ctx.account_id,
            recipients = count,
            test = req.is_test,
            "Newsletter sent"
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use sitehub_core::error::ErrorKind;

    fn subscribe(email: &str) -> SubscribeRequest {
        SubscribeRequest {
            email: email.into(),
        }
    }

    fn newsletter(is_test: bool, recipients: &[&str]) -> SendNewsletterRequest {
        SendNewsletterRequest {
            subject: "Monthly update".into(),
            html_content: "<h1>Hello</h1><p>News</p>".into(),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            is_test,
        }
    }

    #[tokio::test]
    async fn test_duplicate_subscription() {
        let h = Harness::new().await;
        let service = h.newsletter();
        service.subscribe(subscribe("a@example.com")).await.unwrap();
        let err = service.subscribe(subscribe("a@example.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "Email already subscribed!");
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let h = Harness::new().await;
        let err = h.newsletter().subscribe(subscribe("not-an-email")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_unsubscribe_outcomes() {
        let h = Harness::new().await;
        let service = h.newsletter();

        let err = service.unsubscribe("ghost@example.com").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let subscriber = service.subscribe(subscribe("a@example.com")).await.unwrap();
        service.unsubscribe("a@example.com").await.unwrap();
        assert!(h.stores.subscribers.find_by_id(subscriber.id).await.unwrap().is_none());

        let inactive = h.stores.subscribers.create("b@example.com").await.unwrap();
        h.stores.subscribers.set_active(inactive.id, false).await.unwrap();
        let err = service.unsubscribe("b@example.com").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "You are already unsubscribed.");
    }

    #[tokio::test]
    async fn test_broadcast_blind_copies_active_subscribers() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.newsletter();
        service.subscribe(subscribe("a@example.com")).await.unwrap();
        service.subscribe(subscribe("b@example.com")).await.unwrap();
        let gone = h.stores.subscribers.create("c@example.com").await.unwrap();
        h.stores.subscribers.set_active(gone.id, false).await.unwrap();

        let count = service.send(&admin, newsletter(false, &[])).await.unwrap();
        assert_eq!(count, 2);

        let sent = h.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].to.is_empty());
        assert_eq!(sent[0].bcc.len(), 2);
        assert_eq!(sent[0].text, "HelloNews");
        assert!(sent[0].html.is_some());
    }

    #[tokio::test]
    async fn test_test_send_and_empty_recipients() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.newsletter();

        let err = service.send(&admin, newsletter(false, &[])).await.unwrap_err();
        assert_eq!(err.message, "No recipients found.");

        let count = service
            .send(&admin, newsletter(true, &["qa@example.com"]))
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(h.mailer.sent().await[0].bcc, vec!["qa@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        h.mailer.set_failing(true);
        let err = h
            .newsletter()
            .send(&admin, newsletter(true, &["qa@example.com"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
