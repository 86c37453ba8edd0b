use super::payload::FieldSpec;
use serde::{de::DeserializeOwned, Serialize};

/// Identifier type used by every back-office resource.
pub type EntityId = i64;

/// Trait implemented by every record the back-office manages.
///
/// Instance methods expose the data the generic list/detail layouts need;
/// the static methods describe the resource itself (REST path, UI labels,
/// payload schema).
pub trait Entity: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    // ============================================================================
    // Instance methods
    // ============================================================================

    /// Record id
    fn id(&self) -> EntityId;

    /// Human-readable label (headers, delete confirmations)
    fn display_name(&self) -> String;

    // ============================================================================
    // Resource metadata
    // ============================================================================

    /// Index of the entity in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name: REST path segment, cache root and URL segment (e.g. "products")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Product")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Products")
    fn list_name() -> &'static str;

    /// Fields sent on create/update and how each one is coerced
    fn payload_schema() -> &'static [FieldSpec];

    /// Default sort field for list views
    fn default_sort() -> &'static str {
        "id"
    }

    // ============================================================================
    // Provided
    // ============================================================================

    /// Full entity name (e.g. "a001_products")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// REST path of the collection (e.g. "/products")
    fn resource_path() -> String {
        format!("/{}", Self::collection_name())
    }

    /// REST path of a single record (e.g. "/products/12")
    fn item_path(id: EntityId) -> String {
        format!("/{}/{}", Self::collection_name(), id)
    }

    /// Record as form state, the input of `transform_for_api`
    fn to_form(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
