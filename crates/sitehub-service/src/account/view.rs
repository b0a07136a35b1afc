//! JSON shape of an account.

use serde::Serialize;

use sitehub_core::types::{AccountId, format_display_date};
use sitehub_entity::account::Account;

/// Account as shown to super admins.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// "Super Admin", "Admin" or "User".
    pub role: &'static str,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    /// Formatted as `Jan 05, 2025`.
    pub date_joined: String,
    /// Formatted like `date_joined`, or `Never`.
    pub last_login: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        let privileges = account.role.privileges();
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role.display_name(),
            is_admin: privileges.is_admin,
            is_super_admin: privileges.is_super_admin,
            is_staff: privileges.is_staff,
            is_superuser: privileges.is_superuser,
            is_active: account.is_active,
            date_joined: format_display_date(&account.date_joined),
            last_login: account
                .last_login
                .as_ref()
                .map(format_display_date)
                .unwrap_or_else(|| "Never".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sitehub_entity::account::Role;

    #[test]
    fn test_view_formats_dates_and_role() {
        let account = Account {
            id: AccountId::new(),
            username: "admin".into(),
            email: "admin@example.com".into(),
            password_hash: "hash".into(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::SuperAdmin,
            is_active: true,
            date_joined: Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap(),
            last_login: None,
        };
        let view = AccountView::from(&account);
        assert_eq!(view.role, "Super Admin");
        assert_eq!(view.date_joined, "Jan 05, 2025");
        assert_eq!(view.last_login, "Never");
        assert!(view.is_superuser && view.is_staff && view.is_admin);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
