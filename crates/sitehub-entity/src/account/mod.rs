//! Account domain entities.

pub mod model;
pub mod role;

pub use model::{Account, AccountChanges, NewAccount};
pub use role::{Privileges, Role};
