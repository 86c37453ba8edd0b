//! List page state: what survives a round trip to a detail page.
//!
//! Before leaving a list the container writes a [`ListStateSnapshot`] to session
//! storage under `{resource}_list_state`. On mount the state is taken from the
//! URL query first, then from that snapshot (which is consumed), then from
//! defaults.

use crate::shared::api::{ListFilters, SortDirection};
use crate::shared::storage::{read_json, write_json, KeyValueStore};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const PAGE_SIZE_OPTIONS: &[u32] = &[10, 20, 50, 100];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStateSnapshot {
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort_field: String,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl ListStateSnapshot {
    pub fn new(default_sort: &str) -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort_field: default_sort.to_string(),
            sort_direction: SortDirection::Asc,
        }
    }

    /// State carried by the URL (`page`, `pageSize`, `search`, `sort`,
    /// `direction`); `None` when the query holds none of them.
    pub fn from_query(query: impl Fn(&str) -> Option<String>, default_sort: &str) -> Option<Self> {
        let page = query("page");
        let page_size = query("pageSize");
        let search = query("search");
        let sort = query("sort");
        let direction = query("direction");

        if page.is_none() && page_size.is_none() && search.is_none() && sort.is_none() && direction.is_none() {
            return None;
        }

        let mut state = Self::new(default_sort);
        if let Some(p) = page.and_then(|p| p.trim().parse::<u32>().ok()).filter(|p| *p >= 1) {
            state.page = p;
        }
        if let Some(s) = page_size.and_then(|s| s.trim().parse::<u32>().ok()).filter(|s| *s > 0) {
            state.page_size = s;
        }
        if let Some(s) = search {
            state.search = s;
        }
        if let Some(s) = sort.filter(|s| !s.trim().is_empty()) {
            state.sort_field = s;
        }
        if let Some(d) = direction.as_deref().and_then(SortDirection::parse) {
            state.sort_direction = d;
        }
        Some(state)
    }

    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.page = 1;
        }
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Same field flips the direction, another field sorts ascending
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn to_filters(&self) -> ListFilters {
        let mut filters = ListFilters::new()
            .page(self.page, self.page_size)
            .search(self.search.clone());
        if !self.sort_field.is_empty() {
            filters = filters.sort(self.sort_field.clone(), self.sort_direction);
        }
        filters
    }

    /// `page=..&pageSize=..[&search=..]&sort=..&direction=..`
    pub fn to_query(&self) -> String {
        let mut parts = vec![
            format!("page={}", self.page),
            format!("pageSize={}", self.page_size),
        ];
        if !self.search.is_empty() {
            parts.push(format!("search={}", urlencoding::encode(&self.search)));
        }
        if !self.sort_field.is_empty() {
            parts.push(format!("sort={}", urlencoding::encode(&self.sort_field)));
            parts.push(format!("direction={}", self.sort_direction.as_str()));
        }
        parts.join("&")
    }
}

pub fn list_state_key(resource: &str) -> String {
    format!("{}_list_state", resource)
}

pub fn just_edited_key(resource: &str) -> String {
    format!("{}_just_edited", resource)
}

pub fn save_snapshot(store: &impl KeyValueStore, resource: &str, snapshot: &ListStateSnapshot) {
    write_json(store, &list_state_key(resource), snapshot);
}

/// Read the saved snapshot without consuming it
pub fn peek_snapshot(store: &impl KeyValueStore, resource: &str) -> Option<ListStateSnapshot> {
    read_json(store, &list_state_key(resource))
}

/// Read and clear the saved snapshot
pub fn take_snapshot(store: &impl KeyValueStore, resource: &str) -> Option<ListStateSnapshot> {
    let snapshot = peek_snapshot(store, resource);
    store.remove(&list_state_key(resource));
    snapshot
}

/// State a list page mounts with: URL, then saved snapshot, then defaults.
/// The saved snapshot is cleared in every case.
pub fn initial_state(
    store: &impl KeyValueStore,
    resource: &str,
    query: impl Fn(&str) -> Option<String>,
    default_sort: &str,
) -> ListStateSnapshot {
    let saved = take_snapshot(store, resource);
    ListStateSnapshot::from_query(query, default_sort)
        .or(saved)
        .unwrap_or_else(|| ListStateSnapshot::new(default_sort))
}

/// List URL restoring `snapshot`, plain `/{resource}` without one
pub fn back_url(resource: &str, snapshot: Option<&ListStateSnapshot>) -> String {
    match snapshot {
        Some(s) => format!("/{}?{}", resource, s.to_query()),
        None => format!("/{}", resource),
    }
}

pub fn mark_just_edited(store: &impl KeyValueStore, resource: &str) {
    store.set(&just_edited_key(resource), "1");
}

/// One-shot: true if the flag was set, and clears it
pub fn take_just_edited(store: &impl KeyValueStore, resource: &str) -> bool {
    let key = just_edited_key(resource);
    let present = store.get(&key).is_some();
    if present {
        store.remove(&key);
    }
    present
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use std::collections::HashMap;

    fn query_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    fn sample() -> ListStateSnapshot {
        ListStateSnapshot {
            page: 3,
            page_size: 50,
            search: "red shoes".into(),
            sort_field: "price".into(),
            sort_direction: SortDirection::Desc,
        }
    }

    #[test]
    fn test_saved_snapshot_is_restored() {
        let store = MemoryStorage::new();
        save_snapshot(&store, "products", &sample());

        let state = initial_state(&store, "products", query_of(&[]), "name");

        assert_eq!(state, sample());
        assert!(!store.contains("products_list_state"));
    }

    #[test]
    fn test_url_wins_over_snapshot() {
        let store = MemoryStorage::new();
        save_snapshot(&store, "products", &sample());

        let state = initial_state(&store, "products", query_of(&[("page", "2"), ("search", "hat")]), "name");

        assert_eq!(state.page, 2);
        assert_eq!(state.search, "hat");
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.sort_field, "name");
        // snapshot is consumed even when the URL wins
        assert!(!store.contains("products_list_state"));
    }

    #[test]
    fn test_defaults() {
        let store = MemoryStorage::new();
        let state = initial_state(&store, "orders", query_of(&[]), "created_at");
        assert_eq!(state, ListStateSnapshot::new("created_at"));
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 20);
    }

    #[test]
    fn test_invalid_url_values_fall_back() {
        let state = ListStateSnapshot::from_query(
            query_of(&[("page", "0"), ("pageSize", "x"), ("direction", "sideways")]),
            "id",
        )
        .unwrap();
        assert_eq!(state, ListStateSnapshot::new("id"));
    }

    #[test]
    fn test_malformed_snapshot_ignored() {
        let store = MemoryStorage::new();
        store.set("suppliers_list_state", "{not json");
        assert_eq!(initial_state(&store, "suppliers", query_of(&[]), "name"), ListStateSnapshot::new("name"));
    }

    #[test]
    fn test_back_url_round_trips_through_query() {
        let url = back_url("products", Some(&sample()));
        assert_eq!(url, "/products?page=3&pageSize=50&search=red%20shoes&sort=price&direction=desc");

        let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
        let pairs: HashMap<String, String> = query
            .split('&')
            .filter_map(|p| p.split_once('='))
            .map(|(k, v)| (k.to_string(), urlencoding::decode(v).unwrap().into_owned()))
            .collect();
        let restored = ListStateSnapshot::from_query(|k| pairs.get(k).cloned(), "name").unwrap();
        assert_eq!(restored, sample());

        assert_eq!(back_url("products", None), "/products");
    }

    #[test]
    fn test_search_and_page_size_reset_page() {
        let mut state = sample();
        state.set_search("boots".into());
        assert_eq!(state.page, 1);

        state.set_page(4);
        state.set_search("boots".into());
        assert_eq!(state.page, 4);

        state.set_page_size(10);
        assert_eq!((state.page, state.page_size), (1, 10));
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = ListStateSnapshot::new("name");
        state.toggle_sort("name");
        assert_eq!(state.sort_direction, SortDirection::Desc);
        state.toggle_sort("price");
        assert_eq!((state.sort_field.as_str(), state.sort_direction), ("price", SortDirection::Asc));
    }

    #[test]
    fn test_to_filters() {
        let filters = sample().to_filters();
        assert_eq!(filters.page, Some(3));
        assert_eq!(filters.page_size, Some(50));
        assert_eq!(filters.search.as_deref(), Some("red shoes"));
        assert_eq!(filters.direction, Some(SortDirection::Desc));
    }

    #[test]
    fn test_just_edited_is_one_shot() {
        let store = MemoryStorage::new();
        assert!(!take_just_edited(&store, "invoices"));
        mark_just_edited(&store, "invoices");
        assert!(take_just_edited(&store, "invoices"));
        assert!(!take_just_edited(&store, "invoices"));
    }
}
