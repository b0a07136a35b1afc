//! HTTP-level tests against a memory-backed SiteHub app.

mod helpers;

mod accounts;
mod applications;
mod content;
mod dashboard;
mod newsletter;
mod proposals;
mod throttling;
