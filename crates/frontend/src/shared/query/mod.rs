//! Client-side data fetching: keyed cache, queries and entity mutations

pub mod cache;
pub mod client;
pub mod hooks;
pub mod key;

pub use cache::{stale, QueryCache};
pub use client::{use_query_client, QueryClient};
pub use hooks::{use_api_client, use_entity_hooks, use_query, DeleteFn, EntityHooks, QueryState, RELATION_PAGE_SIZE};
pub use key::QueryKey;
