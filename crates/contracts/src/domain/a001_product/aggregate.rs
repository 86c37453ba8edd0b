use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flex::decimal")]
    pub price: f64,
    #[serde(default, deserialize_with = "flex::int")]
    pub stock: i64,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_category: Option<EntityId>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_supplier: Option<EntityId>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub visible: bool,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }
}

pub const PRODUCT_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::text("reference"),
    FieldSpec::text("description"),
    FieldSpec::decimal("price"),
    FieldSpec::integer("stock", Some(0)),
    FieldSpec::id("id_category"),
    FieldSpec::id("id_supplier"),
    FieldSpec::flag("visible", true),
    FieldSpec::flag("active", true),
];

impl Entity for Product {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        match &self.reference {
            Some(r) if !r.is_empty() => format!("{} ({})", self.name, r),
            _ => self.name.clone(),
        }
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "products"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        PRODUCT_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "name"
    }
}
