use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Customer {
    pub id: EntityId,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname).trim().to_string()
    }
}

pub const CUSTOMER_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("firstname"),
    FieldSpec::required("lastname"),
    FieldSpec::required("email"),
    FieldSpec::text("phone"),
    FieldSpec::text("company"),
    FieldSpec::text("tax_id"),
    FieldSpec::flag("active", true),
];

impl Entity for Customer {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }

    fn aggregate_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "customers"
    }

    fn element_name() -> &'static str {
        "Customer"
    }

    fn list_name() -> &'static str {
        "Customers"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        CUSTOMER_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "lastname"
    }
}
