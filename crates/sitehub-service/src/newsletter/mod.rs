//! Newsletter subscriptions and broadcasts.

pub mod html;
pub mod service;

pub use html::strip_tags;
pub use service::{NewsletterService, SendNewsletterRequest, SubscribeRequest};
