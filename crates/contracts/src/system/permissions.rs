//! Permission strings of the form `"{resource}.{action}"`.
//!
//! A user holding `"*"` has every permission. When enforcement is disabled
//! (`enable_permissions = false`) every check passes.

use super::auth::AdminUser;

pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub fn code(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }

    pub fn all() -> [Action; 4] {
        [Action::View, Action::Create, Action::Edit, Action::Delete]
    }
}

/// `permission("products", Action::Edit)` → `"products.edit"`
pub fn permission(resource: &str, action: Action) -> String {
    format!("{}.{}", resource, action.code())
}

/// True when `user` holds every permission in `required`.
pub fn has_permission(user: Option<&AdminUser>, required: &[&str], enforce: bool) -> bool {
    if !enforce {
        return true;
    }
    let Some(user) = user else {
        return false;
    };
    if user.permissions.iter().any(|p| p == WILDCARD) {
        return true;
    }
    required
        .iter()
        .all(|r| user.permissions.iter().any(|p| p == r))
}

pub fn can(user: Option<&AdminUser>, resource: &str, action: Action, enforce: bool) -> bool {
    has_permission(user, &[permission(resource, action).as_str()], enforce)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(permissions: &[&str]) -> AdminUser {
        AdminUser {
            id: 1,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: "editor".into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_permission_string() {
        assert_eq!(permission("admin_accounts", Action::Delete), "admin_accounts.delete");
    }

    #[test]
    fn test_exact_match() {
        let u = user(&["products.view", "products.edit"]);
        assert!(can(Some(&u), "products", Action::Edit, true));
        assert!(!can(Some(&u), "products", Action::Delete, true));
        assert!(!can(Some(&u), "orders", Action::View, true));
    }

    #[test]
    fn test_wildcard() {
        let u = user(&["*"]);
        for action in Action::all() {
            assert!(can(Some(&u), "invoices", action, true));
        }
    }

    #[test]
    fn test_no_user_is_denied_when_enforced() {
        assert!(!has_permission(None, &["products.view"], true));
    }

    #[test]
    fn test_all_required_permissions_needed() {
        let u = user(&["orders.view"]);
        assert!(has_permission(Some(&u), &["orders.view"], true));
        assert!(!has_permission(Some(&u), &["orders.view", "invoices.view"], true));
        assert!(has_permission(Some(&u), &[], true));
    }

    #[test]
    fn test_enforcement_disabled_allows_everything() {
        let u = user(&[]);
        assert!(has_permission(Some(&u), &["products.delete"], false));
        assert!(has_permission(None, &["products.delete"], false));
    }
}
