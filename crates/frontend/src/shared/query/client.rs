use super::cache::{OptimisticSnapshot, QueryCache};
use super::key::QueryKey;
use crate::shared::api::ApiError;
use chrono::Utc;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use serde_json::Value;

/// Reactive handle to the shared [`QueryCache`].
///
/// Data changes notify every subscribed query; in-flight bookkeeping does not.
#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: RwSignal<QueryCache>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: RwSignal::new(QueryCache::new()),
        }
    }

    /// Subscribe the current reactive scope to cache changes
    pub fn track(&self) {
        self.cache.track();
    }

    pub fn read<R>(&self, f: impl FnOnce(&QueryCache) -> R) -> R {
        self.cache.with_untracked(f)
    }

    pub fn set(&self, key: QueryKey, value: Value, stale_ms: i64) {
        self.cache.update(|c| c.set(key, value, stale_ms, Utc::now()));
    }

    pub fn invalidate(&self, prefix: &QueryKey) {
        self.cache.update(|c| {
            let count = c.invalidate(prefix);
            log::debug!("Invalidated {} cache entries under {}", count, prefix);
        });
    }

    pub fn invalidate_lists(&self, entity: &str) {
        self.cache.update(|c| {
            c.invalidate_lists(entity);
        });
    }

    pub fn remove(&self, prefix: &QueryKey) {
        self.cache.update(|c| {
            c.remove(prefix);
        });
    }

    pub fn begin_fetch(&self, key: &QueryKey) -> bool {
        self.cache
            .try_update_untracked(|c| c.begin_fetch(key))
            .unwrap_or(false)
    }

    pub fn clear_error(&self, key: &QueryKey) {
        self.cache.update_untracked(|c| c.clear_error(key));
    }

    /// Store a fetched value and release the in-flight slot
    pub fn resolve(&self, key: QueryKey, value: Value, stale_ms: i64) {
        self.cache.update(|c| {
            c.end_fetch(&key);
            c.set(key, value, stale_ms, Utc::now());
        });
    }

    /// Record a failed fetch and release the in-flight slot
    pub fn fail(&self, key: QueryKey, error: ApiError) {
        self.cache.update(|c| {
            c.end_fetch(&key);
            c.set_error(key, error);
        });
    }

    pub fn apply_optimistic(&self, entity: &str, id: EntityId, patch: &Value) -> OptimisticSnapshot {
        self.cache
            .try_update(|c| c.apply_optimistic(entity, id, patch))
            .unwrap_or_default()
    }

    pub fn rollback(&self, snapshot: OptimisticSnapshot) {
        self.cache.update(|c| c.rollback(snapshot));
    }

    pub fn apply_created(&self, entity: &str, id: EntityId, item: Value) {
        self.cache.update(|c| c.apply_created(entity, id, item, Utc::now()));
    }

    pub fn apply_updated(&self, entity: &str, id: EntityId, item: Value) {
        self.cache.update(|c| c.apply_updated(entity, id, item, Utc::now()));
    }

    pub fn apply_deleted(&self, entity: &str, id: EntityId) {
        self.cache.update(|c| c.apply_deleted(entity, id));
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryClient not found in context")
}
