use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Goods supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Supplier {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    /// NIF/CIF
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
}

pub const SUPPLIER_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::text("tax_id"),
    FieldSpec::text("email"),
    FieldSpec::text("phone"),
    FieldSpec::text("address"),
    FieldSpec::text("city"),
    FieldSpec::text("postal_code"),
    FieldSpec::text("country"),
    FieldSpec::flag("active", true),
];

impl Entity for Supplier {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "suppliers"
    }

    fn element_name() -> &'static str {
        "Supplier"
    }

    fn list_name() -> &'static str {
        "Suppliers"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        SUPPLIER_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "name"
    }
}
