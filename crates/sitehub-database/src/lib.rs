//! # sitehub-database
//!
//! PostgreSQL connection management, the store traits the services are
//! written against, and their implementations: PostgreSQL repositories
//! and (with the `memory` feature) in-memory stores for tests and local
//! experiments.

pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::connect;
pub use store::{
    AccountStore, ApplicationQuery, ApplicationStore, ContentPage, ContentQuery, ContentStore,
    ProposalStore, Stores, SubscriberStore,
};
