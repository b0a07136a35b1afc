//! Password policy enforcement for new passwords.

use sitehub_core::config::AuthConfig;
use sitehub_core::error::AppError;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "@$!%*?&";

/// Validates password strength and confirmation.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Create a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Check that both entries match.
    pub fn validate_confirmation(&self, password: &str, confirm: &str) -> Result<(), AppError> {
        if password != confirm {
            return Err(AppError::field("password", "Passwords do not match."));
        }
        Ok(())
    }

    /// Check the password against the policy. Reports the first violation.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::field(
                "password",
                format!(
                    "Password must be at least {} characters long.",
                    self.min_length
                ),
            ));
        }

        let rules: [(fn(char) -> bool, &str); 4] = [
            (
                |c| c.is_ascii_uppercase(),
                "Password must contain at least one uppercase letter.",
            ),
            (
                |c| c.is_ascii_lowercase(),
                "Password must contain at least one lowercase letter.",
            ),
            (
                |c| c.is_ascii_digit(),
                "Password must contain at least one digit.",
            ),
            (
                |c| SPECIAL_CHARACTERS.contains(c),
                "Password must contain at least one special character (@$!%*?&).",
            ),
        ];

        for (rule, message) in rules {
            if !password.chars().any(rule) {
                return Err(AppError::field("password", message));
            }
        }
        Ok(())
    }

    /// Only the minimum length applies; used by the reset confirmation.
    pub fn validate_length(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::field(
                "password",
                format!(
                    "Password must be at least {} characters long.",
                    self.min_length
                ),
            ));
        }
        Ok(())
    }
}
