//! Admin login, token rotation and password reset.

pub mod reset;
pub mod service;

pub use reset::{PasswordResetService, ResetPasswordRequest};
pub use service::{AuthService, LoginRequest, LoginResponse};
