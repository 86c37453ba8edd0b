use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Back-office user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdminAccount {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
    #[serde(default)]
    pub last_login_at: Option<String>,
}

pub const ADMIN_ROLES: &[&str] = &["superadmin", "admin", "editor", "viewer"];

/// `password` is only sent when filled in; an empty value keeps the current one.
pub const ADMIN_ACCOUNT_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::required("email"),
    FieldSpec::optional("password"),
    FieldSpec::required("role"),
    FieldSpec::list("permissions"),
    FieldSpec::flag("active", true),
];

impl Entity for AdminAccount {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    fn aggregate_index() -> &'static str {
        "a012"
    }

    fn collection_name() -> &'static str {
        "admin_accounts"
    }

    fn element_name() -> &'static str {
        "Admin account"
    }

    fn list_name() -> &'static str {
        "Admin accounts"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        ADMIN_ACCOUNT_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "name"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::transform_for_api;
    use serde_json::json;

    #[test]
    fn test_blank_password_is_not_sent() {
        let form = json!({
            "name": "Ana",
            "email": "a@x.es",
            "password": "",
            "role": "editor",
            "permissions": [],
            "active": true,
        });

        let payload = transform_for_api(ADMIN_ACCOUNT_PAYLOAD, &form);

        assert!(payload.get("password").is_none());
        assert_eq!(payload["role"], json!("editor"));
        assert_eq!(transform_for_api(ADMIN_ACCOUNT_PAYLOAD, &payload), payload);
    }

    #[test]
    fn test_new_password_is_sent() {
        let payload = transform_for_api(ADMIN_ACCOUNT_PAYLOAD, &json!({"name": "Ana", "password": "n3w-pass"}));
        assert_eq!(payload["password"], json!("n3w-pass"));
    }
}
