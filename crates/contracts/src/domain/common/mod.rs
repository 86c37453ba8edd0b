//! Common types and traits for all back-office entities

pub mod entity;
pub mod flex;
pub mod pagination;
pub mod payload;

// Re-exports
pub use entity::{Entity, EntityId};
pub use pagination::{normalize_item, normalize_list, normalize_list_as, EnvelopeError, Paginated, PaginationMeta};
pub use payload::{transform_for_api, validate_required, FieldKind, FieldSpec, PayloadError};
