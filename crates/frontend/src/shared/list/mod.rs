//! Generic paginated list page and its persisted state

pub mod container;
pub mod state;

pub use container::{flag_cell, text_cell, Column, ListContainer};
pub use state::{back_url, mark_just_edited, peek_snapshot, ListStateSnapshot};
