//! Generic record page: detail layout, edit drawer, create page

pub mod create;
pub mod form;
pub mod info;
pub mod layout;
pub mod nested;
pub mod related;
pub mod state;

pub use create::CreatePage;
pub use form::{select_options, static_options, FormField, FormSpec, SelectOption};
pub use info::{InfoGrid, InfoRow, RecordSection};
pub use layout::{DetailAction, DetailHandlers, DetailLayout};
pub use nested::{NestedColumn, NestedTable};
pub use related::RelatedTable;
