//! Who may call which content operation.

use sitehub_core::error::AppError;
use sitehub_entity::content::ContentKind;

use crate::context::{self, RequestContext};

/// Gate on a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Anyone, including anonymous callers.
    Public,
    /// Admins and the super admin.
    Staff,
}

impl Gate {
    /// Checks the caller against the gate.
    pub fn check(self, ctx: Option<&RequestContext>) -> Result<(), AppError> {
        match self {
            Self::Public => Ok(()),
            Self::Staff => context::require_staff(ctx).map(|_| ()),
        }
    }
}

/// Gates for each operation on a content kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub list: Gate,
    pub retrieve: Gate,
    pub create: Gate,
    pub update: Gate,
    pub delete: Gate,
}

impl Access {
    /// Public reads, staff writes.
    const EDITORIAL: Self = Self {
        list: Gate::Public,
        retrieve: Gate::Public,
        create: Gate::Staff,
        update: Gate::Staff,
        delete: Gate::Staff,
    };

    /// Anyone may submit; only staff read them back.
    const LEAD: Self = Self {
        list: Gate::Staff,
        retrieve: Gate::Staff,
        create: Gate::Public,
        update: Gate::Staff,
        delete: Gate::Staff,
    };

    /// Public testimonials, moderated by staff.
    const REVIEW: Self = Self {
        list: Gate::Public,
        retrieve: Gate::Public,
        create: Gate::Public,
        update: Gate::Staff,
        delete: Gate::Staff,
    };

    /// Gates for `kind`.
    pub fn of(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Message | ContentKind::Consultation => Self::LEAD,
            ContentKind::Review => Self::REVIEW,
            ContentKind::Blog
            | ContentKind::News
            | ContentKind::Career
            | ContentKind::Award
            | ContentKind::CaseStudy
            | ContentKind::CompanyInfo
            | ContentKind::Partner
            | ContentKind::TeamMember => Self::EDITORIAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitehub_core::error::ErrorKind;
    use sitehub_entity::account::Role;
    use sitehub_core::types::AccountId;

    #[test]
    fn test_lead_submissions_are_public() {
        let access = Access::of(ContentKind::Message);
        assert_eq!(access.create, Gate::Public);
        assert_eq!(access.list, Gate::Staff);
    }

    #[test]
    fn test_staff_gate() {
        let err = Gate::Staff.check(None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let user = RequestContext::new(AccountId::new(), Role::User, "visitor");
        let err = Gate::Staff.check(Some(&user)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let admin = RequestContext::new(AccountId::new(), Role::Admin, "editor");
        assert!(Gate::Staff.check(Some(&admin)).is_ok());
        assert!(Gate::Public.check(None).is_ok());
    }
}
