use crate::domain::common::{flex, Entity, EntityId, FieldSpec};
use serde::{Deserialize, Serialize};

/// Catalog category. Categories form a tree through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Category {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub parent_id: Option<EntityId>,
    #[serde(default, deserialize_with = "flex::int")]
    pub position: i64,
    #[serde(default, deserialize_with = "flex::flag")]
    pub visible: bool,
    #[serde(default, deserialize_with = "flex::flag")]
    pub active: bool,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

pub const CATEGORY_PAYLOAD: &[FieldSpec] = &[
    FieldSpec::required("name"),
    FieldSpec::text("slug"),
    FieldSpec::text("description"),
    FieldSpec::id("parent_id"),
    FieldSpec::integer("position", Some(0)),
    FieldSpec::flag("visible", true),
    FieldSpec::flag("active", true),
];

impl Entity for Category {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "categories"
    }

    fn element_name() -> &'static str {
        "Category"
    }

    fn list_name() -> &'static str {
        "Categories"
    }

    fn payload_schema() -> &'static [FieldSpec] {
        CATEGORY_PAYLOAD
    }

    fn default_sort() -> &'static str {
        "position"
    }
}
