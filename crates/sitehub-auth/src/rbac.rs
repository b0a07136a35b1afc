//! Role gates for back-office operations.

use sitehub_core::error::AppError;
use sitehub_entity::account::Role;

/// Message returned when a role is insufficient.
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

/// Require a staff role (admin or super admin).
pub fn require_staff(role: Role) -> Result<(), AppError> {
    if role.is_staff() {
        Ok(())
    } else {
        Err(AppError::forbidden(PERMISSION_DENIED))
    }
}

/// Require the admin flag (admin or super admin).
pub fn require_admin(role: Role) -> Result<(), AppError> {
    if role.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden(PERMISSION_DENIED))
    }
}

/// Require the super admin role.
pub fn require_super_admin(role: Role) -> Result<(), AppError> {
    if role.is_super_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden(PERMISSION_DENIED))
    }
}
