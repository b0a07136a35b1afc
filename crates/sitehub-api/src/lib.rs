//! # sitehub-api
//!
//! HTTP API layer for SiteHub built on Axum.
//!
//! Provides the REST endpoints under `/api/v1`, middleware (rate
//! limiting, CORS, logging), extractors, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
