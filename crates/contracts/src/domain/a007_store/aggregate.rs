use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Storefront. A store may publish through a marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Store {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_marketplace: Option<EntityId>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
}

pub const STORE_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::required("code"),
    FieldSpec::text("url"),
    FieldSpec::text("email"),
    FieldSpec::text("phone"),
    FieldSpec::id("id_marketplace"),
    FieldSpec::flag("active", true),
];

impl Entity for Store {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "stores"
    }

    fn element_name() -> &'static str {
        "Store"
    }

    fn list_name() -> &'static str {
        "Stores"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        STORE_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "name"
    }
}
