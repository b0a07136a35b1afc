//! Account role enumeration and the privileges derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sitehub_core::AppError;

/// The closed set of account roles.
///
/// At most one account may hold [`Role::SuperAdmin`] at any time; the
/// database enforces this with a partial unique index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account without back-office access.
    User,
    /// Back-office administrator. Several may exist.
    Admin,
    /// The single account allowed to manage other administrators.
    SuperAdmin,
}

/// Privilege bits derived from a [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Privileges {
    /// Holds the admin flag.
    pub is_admin: bool,
    /// Holds the super admin flag.
    pub is_super_admin: bool,
    /// Elevated access to staff-only operations.
    pub is_staff: bool,
    /// Full, unrestricted access.
    pub is_superuser: bool,
}

impl Role {
    /// Derive the privilege bits for this role.
    pub const fn privileges(self) -> Privileges {
        match self {
            Self::User => Privileges {
                is_admin: false,
                is_super_admin: false,
                is_staff: false,
                is_superuser: false,
            },
            Self::Admin => Privileges {
                is_admin: true,
                is_super_admin: false,
                is_staff: true,
                is_superuser: false,
            },
            Self::SuperAdmin => Privileges {
                is_admin: true,
                is_super_admin: true,
                is_staff: true,
                is_superuser: true,
            },
        }
    }

    /// Build a role from the legacy pair of flags. The super admin flag wins.
    pub fn from_flags(is_admin: bool, is_super_admin: bool) -> Self {
        match (is_admin, is_super_admin) {
            (_, true) => Self::SuperAdmin,
            (true, false) => Self::Admin,
            (false, false) => Self::User,
        }
    }

    /// Whether the role may use staff-only endpoints.
    pub fn is_staff(self) -> bool {
        self.privileges().is_staff
    }

    /// Whether the role is admin or super admin.
    pub fn is_admin(self) -> bool {
        self.privileges().is_admin
    }

    /// Whether the role is the super admin.
    pub fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Human-readable role label shown in the admin UI.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }

    /// Return the role as a snake_case string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "_").as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: user, admin, super_admin"
            ))),
        }
    }
}
