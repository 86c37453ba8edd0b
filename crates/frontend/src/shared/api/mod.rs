//! HTTP access to the back-office API

pub mod client;
pub mod error;
pub mod resource;
pub mod retry;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind};
pub use resource::{EntityApi, ListFilters, NestedResource, SortDirection};
pub use retry::{with_retry, RetryPolicy};
