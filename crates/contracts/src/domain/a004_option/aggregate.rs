use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Selectable value of an attribute ("XL", "Red")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductOption {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub id_attribute: Option<EntityId>,
    #[serde(default, deserialize_with = "flex::int")]
    pub position: i64,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
}

pub const OPTION_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::text("value"),
    FieldSpec::id("id_attribute"),
    FieldSpec::integer("position", Some(0)),
    FieldSpec::flag("active", true),
];

impl Entity for ProductOption {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "options"
    }

    fn element_name() -> &'static str {
        "Option"
    }

    fn list_name() -> &'static str {
        "Options"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        OPTION_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "position"
    }
}
