//! In-memory query cache.
//!
//! Values are stored as JSON (`Paginated<E>` for lists, `E` for details) with
//! the time they were written and their staleness window. The store is plain
//! data; [`super::client::QueryClient`] wraps it in a signal.

use super::key::QueryKey;
use crate::shared::api::ApiError;
use chrono::{DateTime, Utc};
use contracts::domain::common::pagination::total_pages;
use contracts::domain::common::EntityId;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Staleness windows, in milliseconds
pub mod stale {
    pub const LIST: i64 = 5 * 60 * 1000;
    pub const DETAIL: i64 = 10 * 60 * 1000;
    pub const RELATION: i64 = 10 * 60 * 1000;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub updated_at: DateTime<Utc>,
    pub stale_ms: i64,
    pub invalidated: bool,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        !self.invalidated && (now - self.updated_at).num_milliseconds() < self.stale_ms
    }
}

/// Exact prior state of every entry touched by an optimistic update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimisticSnapshot {
    entries: Vec<(QueryKey, Option<CacheEntry>)>,
}

impl OptimisticSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    errors: HashMap<QueryKey, ApiError>,
    in_flight: HashSet<QueryKey>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &QueryKey) -> Option<&Value> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn entry(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: QueryKey, value: Value, stale_ms: i64, now: DateTime<Utc>) {
        self.errors.remove(&key);
        self.entries.insert(
            key,
            CacheEntry {
                value,
                updated_at: now,
                stale_ms,
                invalidated: false,
            },
        );
    }

    pub fn is_fresh(&self, key: &QueryKey, now: DateTime<Utc>) -> bool {
        self.entries.get(key).map(|e| e.is_fresh(now)).unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Errors of the last fetch
    // ------------------------------------------------------------------

    pub fn error(&self, key: &QueryKey) -> Option<&ApiError> {
        self.errors.get(key)
    }

    pub fn set_error(&mut self, key: QueryKey, error: ApiError) {
        self.errors.insert(key, error);
    }

    pub fn clear_error(&mut self, key: &QueryKey) {
        self.errors.remove(key);
    }

    // ------------------------------------------------------------------
    // In-flight deduplication
    // ------------------------------------------------------------------

    /// Returns false when the same key is already being fetched.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> bool {
        self.in_flight.insert(key.clone())
    }

    pub fn end_fetch(&mut self, key: &QueryKey) {
        self.in_flight.remove(key);
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.in_flight.contains(key)
    }

    // ------------------------------------------------------------------
    // Invalidation
    // ------------------------------------------------------------------

    /// Mark every entry matching `pred` stale. Returns the number of entries marked.
    pub fn invalidate_where(&mut self, pred: impl Fn(&QueryKey) -> bool) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if pred(key) {
                entry.invalidated = true;
                count += 1;
            }
        }
        self.errors.retain(|key, _| !pred(key));
        count
    }

    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        self.invalidate_where(|key| key.starts_with(prefix))
    }

    pub fn invalidate_lists(&mut self, entity: &str) -> usize {
        self.invalidate_where(|key| key.entity_name() == entity && key.is_list())
    }

    pub fn invalidate_relations(&mut self, entity: &str) -> usize {
        self.invalidate_where(|key| key.entity_name() == entity && key.is_relation())
    }

    pub fn remove(&mut self, prefix: &QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        self.errors.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len()
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn snapshot(&self, keys: &[QueryKey]) -> OptimisticSnapshot {
        OptimisticSnapshot {
            entries: keys
                .iter()
                .map(|k| (k.clone(), self.entries.get(k).cloned()))
                .collect(),
        }
    }

    /// Put back exactly what `snapshot` captured (including absence).
    pub fn restore(&mut self, snapshot: OptimisticSnapshot) {
        for (key, entry) in snapshot.entries {
            match entry {
                Some(entry) => {
                    self.entries.insert(key, entry);
                }
                None => {
                    self.entries.remove(&key);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // List surgery
    // ------------------------------------------------------------------

    fn list_keys(&self, entity: &str) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self
            .entries
            .keys()
            .filter(|k| k.entity_name() == entity && k.is_list())
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    fn list_keys_containing(&self, entity: &str, id: EntityId) -> Vec<QueryKey> {
        self.list_keys(entity)
            .into_iter()
            .filter(|k| {
                self.entries
                    .get(k)
                    .map(|e| position_of(&e.value, id).is_some())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Replace the item `id` in every cached list of `entity`. Returns the number of lists patched.
    pub fn patch_item_in_lists(&mut self, entity: &str, id: EntityId, item: &Value) -> usize {
        let mut count = 0;
        for key in self.list_keys_containing(entity, id) {
            if let Some(entry) = self.entries.get_mut(&key) {
                if let Some(slot) = items_mut(&mut entry.value)
                    .and_then(|items| items.iter_mut().find(|v| item_id(v) == Some(id)))
                {
                    *slot = item.clone();
                    count += 1;
                }
            }
        }
        count
    }

    /// Splice `id` out of the cached lists of `entity`.
    ///
    /// Every list's `total` goes down by exactly one (never below zero) and
    /// `totalPages` is recomputed.
    pub fn remove_item_from_lists(&mut self, entity: &str, id: EntityId) -> usize {
        let mut removed = 0;
        for key in self.list_keys(entity) {
            let Some(entry) = self.entries.get_mut(&key) else {
                continue;
            };
            if let Some(items) = items_mut(&mut entry.value) {
                let before = items.len();
                items.retain(|v| item_id(v) != Some(id));
                removed += before - items.len();
            }
            decrement_total(&mut entry.value);
        }
        removed
    }

    /// Merge `patch` into the detail entry and every list item with `id`.
    ///
    /// The returned snapshot restores the exact previous values.
    pub fn apply_optimistic(&mut self, entity: &str, id: EntityId, patch: &Value) -> OptimisticSnapshot {
        let detail_key = QueryKey::detail(entity, id);
        let mut keys = vec![detail_key.clone()];
        keys.extend(self.list_keys_containing(entity, id));
        let snapshot = self.snapshot(&keys);

        if let Some(entry) = self.entries.get_mut(&detail_key) {
            merge_into(&mut entry.value, patch);
        }
        for key in keys.iter().skip(1) {
            if let Some(slot) = self
                .entries
                .get_mut(key)
                .and_then(|e| items_mut(&mut e.value))
                .and_then(|items| items.iter_mut().find(|v| item_id(v) == Some(id)))
            {
                merge_into(slot, patch);
            }
        }
        snapshot
    }

    pub fn rollback(&mut self, snapshot: OptimisticSnapshot) {
        self.restore(snapshot);
    }

    // ------------------------------------------------------------------
    // Mutation outcomes
    // ------------------------------------------------------------------

    /// After a create: seed the detail, refresh lists and relation queries.
    pub fn apply_created(&mut self, entity: &str, id: EntityId, item: Value, now: DateTime<Utc>) {
        self.set(QueryKey::detail(entity, id), item, stale::DETAIL, now);
        self.invalidate_lists(entity);
        self.invalidate_relations(entity);
    }

    /// After an update: the server object becomes the detail and replaces the
    /// item in every list; relation queries are refreshed.
    pub fn apply_updated(&mut self, entity: &str, id: EntityId, item: Value, now: DateTime<Utc>) {
        self.patch_item_in_lists(entity, id, &item);
        self.set(QueryKey::detail(entity, id), item, stale::DETAIL, now);
        self.invalidate_relations(entity);
    }

    /// After a delete: drop the detail, splice lists, refresh relation queries.
    pub fn apply_deleted(&mut self, entity: &str, id: EntityId) {
        self.remove(&QueryKey::detail(entity, id));
        self.remove_item_from_lists(entity, id);
        self.invalidate_relations(entity);
    }
}

fn item_id(item: &Value) -> Option<EntityId> {
    match item.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn items_mut(list: &mut Value) -> Option<&mut Vec<Value>> {
    list.get_mut("items").and_then(Value::as_array_mut)
}

fn position_of(list: &Value, id: EntityId) -> Option<usize> {
    list.get("items")?
        .as_array()?
        .iter()
        .position(|v| item_id(v) == Some(id))
}

fn decrement_total(list: &mut Value) {
    let Some(meta) = list.get_mut("pagination").and_then(Value::as_object_mut) else {
        return;
    };
    let total = meta
        .get("total")
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .saturating_sub(1);
    let page_size = meta.get("pageSize").and_then(Value::as_u64).unwrap_or(0);
    meta.insert("total".to_string(), Value::from(total));
    meta.insert("totalPages".to_string(), Value::from(total_pages(total, page_size)));
}

fn merge_into(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ListFilters;
    use chrono::TimeZone;
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn page(items: Value, total: u64, page_size: u64) -> Value {
        json!({
            "items": items,
            "pagination": {
                "total": total,
                "page": 1,
                "pageSize": page_size,
                "totalPages": total_pages(total, page_size)
            }
        })
    }

    fn list_key(entity: &str, page_no: u32) -> QueryKey {
        QueryKey::list(entity, &ListFilters::new().page(page_no, 2))
    }

    #[test]
    fn test_freshness_window() {
        let mut cache = QueryCache::new();
        let key = QueryKey::detail("products", 1);
        cache.set(key.clone(), json!({"id": 1}), stale::DETAIL, t0());

        assert!(cache.is_fresh(&key, t0() + chrono::Duration::milliseconds(stale::DETAIL - 1)));
        assert!(!cache.is_fresh(&key, t0() + chrono::Duration::milliseconds(stale::DETAIL)));
    }

    #[test]
    fn test_invalidate_by_prefix() {
        let mut cache = QueryCache::new();
        cache.set(QueryKey::detail("products", 1), json!({"id": 1}), stale::DETAIL, t0());
        cache.set(list_key("products", 1), page(json!([]), 0, 2), stale::LIST, t0());
        cache.set(QueryKey::detail("orders", 1), json!({"id": 1}), stale::DETAIL, t0());

        assert_eq!(cache.invalidate(&QueryKey::entity("products")), 2);
        assert!(!cache.is_fresh(&QueryKey::detail("products", 1), t0()));
        assert!(cache.is_fresh(&QueryKey::detail("orders", 1), t0()));
        assert!(cache.get(&QueryKey::detail("products", 1)).is_some());
    }

    #[test]
    fn test_in_flight_dedupe() {
        let mut cache = QueryCache::new();
        let key = QueryKey::detail("stores", 3);
        assert!(cache.begin_fetch(&key));
        assert!(!cache.begin_fetch(&key));
        cache.end_fetch(&key);
        assert!(cache.begin_fetch(&key));
    }

    #[test]
    fn test_successful_update_reflected_in_detail_and_lists() {
        let mut cache = QueryCache::new();
        cache.set(QueryKey::detail("suppliers", 7), json!({"id": 7, "name": "Old"}), stale::DETAIL, t0());
        cache.set(list_key("suppliers", 1), page(json!([{"id": 7, "name": "Old"}, {"id": 8, "name": "B"}]), 3, 2), stale::LIST, t0());
        cache.set(list_key("suppliers", 2), page(json!([{"id": 9, "name": "C"}]), 3, 2), stale::LIST, t0());
        cache.set(QueryKey::relation("suppliers", "active"), page(json!([{"id": 7, "name": "Old"}]), 1, 1), stale::RELATION, t0());

        let server = json!({"id": 7, "name": "New", "email": "n@x.es"});
        cache.apply_updated("suppliers", 7, server.clone(), t0());

        assert_eq!(cache.get(&QueryKey::detail("suppliers", 7)), Some(&server));
        assert_eq!(cache.get(&list_key("suppliers", 1)).unwrap()["items"][0], server);
        assert_eq!(cache.get(&list_key("suppliers", 1)).unwrap()["items"][1]["name"], "B");
        assert_eq!(cache.get(&list_key("suppliers", 2)).unwrap()["items"][0]["name"], "C");
        assert!(!cache.is_fresh(&QueryKey::relation("suppliers", "active"), t0()));
    }

    #[test]
    fn test_successful_delete_splices_and_decrements_totals() {
        let mut cache = QueryCache::new();
        cache.set(QueryKey::detail("products", 1), json!({"id": 1}), stale::DETAIL, t0());
        cache.set(list_key("products", 1), page(json!([{"id": 1}, {"id": 2}]), 3, 2), stale::LIST, t0());
        cache.set(list_key("products", 2), page(json!([{"id": 3}]), 3, 2), stale::LIST, t0());
        cache.set(
            QueryKey::list("products", &ListFilters::new().search("x")),
            page(json!([]), 0, 20),
            stale::LIST,
            t0(),
        );

        cache.apply_deleted("products", 1);

        assert!(cache.get(&QueryKey::detail("products", 1)).is_none());

        let first = cache.get(&list_key("products", 1)).unwrap();
        assert_eq!(first["items"], json!([{"id": 2}]));
        assert_eq!(first["pagination"]["total"], 2);
        assert_eq!(first["pagination"]["totalPages"], 1);

        let second = cache.get(&list_key("products", 2)).unwrap();
        assert_eq!(second["pagination"]["total"], 2);

        let empty = cache
            .get(&QueryKey::list("products", &ListFilters::new().search("x")))
            .unwrap();
        assert_eq!(empty["pagination"]["total"], 0);
    }

    #[test]
    fn test_failed_optimistic_update_restores_exact_previous_object() {
        let mut cache = QueryCache::new();
        let detail = json!({
            "id": 7,
            "name": "Acme",
            "email": "info@acme.es",
            "active": true,
            "city": null
        });
        let list = page(json!([detail.clone(), {"id": 8, "name": "Beta"}]), 2, 20);
        cache.set(QueryKey::detail("suppliers", 7), detail.clone(), stale::DETAIL, t0());
        cache.set(list_key("suppliers", 1), list.clone(), stale::LIST, t0());
        let before_detail = cache.entry(&QueryKey::detail("suppliers", 7)).cloned();
        let before_list = cache.entry(&list_key("suppliers", 1)).cloned();

        let snapshot = cache.apply_optimistic("suppliers", 7, &json!({"name": "Acme 2", "city": "Bilbao"}));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(cache.get(&QueryKey::detail("suppliers", 7)).unwrap()["name"], "Acme 2");
        assert_eq!(cache.get(&list_key("suppliers", 1)).unwrap()["items"][0]["city"], "Bilbao");

        cache.rollback(snapshot);

        assert_eq!(cache.entry(&QueryKey::detail("suppliers", 7)).cloned(), before_detail);
        assert_eq!(cache.entry(&list_key("suppliers", 1)).cloned(), before_list);
        assert_eq!(
            serde_json::to_string(cache.get(&QueryKey::detail("suppliers", 7)).unwrap()).unwrap(),
            serde_json::to_string(&detail).unwrap()
        );
    }

    #[test]
    fn test_rollback_removes_entries_that_did_not_exist() {
        let mut cache = QueryCache::new();
        let snapshot = cache.snapshot(&[QueryKey::detail("stores", 1)]);
        cache.set(QueryKey::detail("stores", 1), json!({"id": 1}), stale::DETAIL, t0());
        cache.restore(snapshot);
        assert!(cache.get(&QueryKey::detail("stores", 1)).is_none());
    }

    #[test]
    fn test_create_seeds_detail_and_invalidates_lists() {
        let mut cache = QueryCache::new();
        cache.set(list_key("stores", 1), page(json!([]), 0, 2), stale::LIST, t0());
        cache.apply_created("stores", 4, json!({"id": 4}), t0());

        assert!(cache.is_fresh(&QueryKey::detail("stores", 4), t0()));
        assert!(!cache.is_fresh(&list_key("stores", 1), t0()));
    }

    #[test]
    fn test_errors_cleared_by_set_and_invalidate() {
        let mut cache = QueryCache::new();
        let key = QueryKey::detail("orders", 2);
        cache.set_error(key.clone(), ApiError::network("offline"));
        assert!(cache.error(&key).is_some());
        cache.invalidate(&QueryKey::entity("orders"));
        assert!(cache.error(&key).is_none());

        cache.set_error(key.clone(), ApiError::network("offline"));
        cache.set(key.clone(), json!({"id": 2}), stale::DETAIL, t0());
        assert!(cache.error(&key).is_none());
    }
}
