//! # sitehub-auth
//!
//! Authentication building blocks for SiteHub.
//!
//! - `jwt`: access, refresh and password-reset tokens, plus the refresh
//!   token blocklist kept in the cache
//! - `password`: Argon2id hashing and the password policy
//! - `reset`: the account id encoding and password fingerprint used in
//!   reset links
//! - `rbac`: role gates for staff, admin and super admin operations

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod reset;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
