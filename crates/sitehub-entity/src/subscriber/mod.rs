//! Newsletter subscriber entity.

pub mod model;

pub use model::Subscriber;
