use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Product attribute (size, colour, material…), scoped to a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Attribute {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_category: Option<EntityId>,
    #[serde(default)]
    pub attribute_type: Option<String>,
    #[serde(default, deserialize_with = "flex::int")]
    pub position: i64,
    #[serde(default, deserialize_with = "flex::flag")]
    pub visible: bool,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
}

/// Input types the storefront knows how to render
pub const ATTRIBUTE_TYPES: &[&str] = &["select", "radio", "color", "text"];

pub const ATTRIBUTE_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::id("id_category"),
    FieldSpec::text("attribute_type"),
    FieldSpec::integer("position", Some(0)),
    FieldSpec::flag("visible", true),
    FieldSpec::flag("active", true),
];

impl Entity for Attribute {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "attributes"
    }

    fn element_name() -> &'static str {
        "Attribute"
    }

    fn list_name() -> &'static str {
        "Attributes"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        ATTRIBUTE_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "position"
    }
}
