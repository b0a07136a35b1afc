//! PostgreSQL implementations of the store traits.

pub mod account;
pub mod application;
pub mod content;
pub mod proposal;
pub mod subscriber;

pub use account::AccountRepository;
pub use application::ApplicationRepository;
pub use content::ContentRepository;
pub use proposal::ProposalRepository;
pub use subscriber::SubscriberRepository;

use sitehub_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error with a context message.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Name of the constraint a database error violated, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}
