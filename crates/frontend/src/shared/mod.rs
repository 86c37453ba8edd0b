//! Building blocks shared by every feature page

pub mod api;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod detail;
pub mod dialog;
pub mod icons;
pub mod list;
pub mod list_utils;
pub mod modal_frame;
pub mod page_frame;
pub mod page_standard;
pub mod query;
pub mod storage;
