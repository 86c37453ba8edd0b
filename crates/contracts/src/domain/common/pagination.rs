//! Pagination envelope and normalization of the shapes the API returns.
//!
//! Depending on the endpoint the server answers a list request with
//! `{data: {data: {items, pagination}}}`, `{data: {items, pagination}}`,
//! `{items, pagination}`, a Laravel paginator (`{data: [...], current_page,
//! per_page, total, last_page}`, optionally with a `meta` object) or a bare
//! array. Everything is folded into [`Paginated`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u64, page_size: u64) -> Self {
        Self {
            total,
            page: page.max(1),
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }
}

impl Default for PaginationMeta {
    fn default() -> Self {
        Self::new(0, 1, 0)
    }
}

/// `ceil(total / page_size)`, never below 1
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationMeta::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Failed to decode items: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fold any known list envelope into `Paginated<Value>`.
pub fn normalize_list(body: Value) -> Result<Paginated<Value>, EnvelopeError> {
    match body {
        Value::Array(items) => {
            let len = items.len() as u64;
            Ok(Paginated {
                items,
                pagination: PaginationMeta::new(len, 1, len),
            })
        }
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("items") {
                let pagination = read_meta(&map, items.len());
                return Ok(Paginated { items, pagination });
            }
            match map.remove("data") {
                Some(Value::Array(items)) => {
                    let pagination = read_meta(&map, items.len());
                    Ok(Paginated { items, pagination })
                }
                Some(inner @ Value::Object(_)) => normalize_list(inner),
                Some(other) => Err(EnvelopeError::UnexpectedShape(kind_of(&other).to_string())),
                None => Err(EnvelopeError::UnexpectedShape(
                    "object without items or data".to_string(),
                )),
            }
        }
        other => Err(EnvelopeError::UnexpectedShape(kind_of(&other).to_string())),
    }
}

/// Normalize and decode the items into `T`.
pub fn normalize_list_as<T: DeserializeOwned>(body: Value) -> Result<Paginated<T>, EnvelopeError> {
    let page = normalize_list(body)?;
    let items = page
        .items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()?;
    Ok(Paginated {
        items,
        pagination: page.pagination,
    })
}

/// Unwrap `{data: {...}}` / `{data: {data: {...}}}` single-item envelopes.
pub fn normalize_item(body: Value) -> Value {
    let mut current = body;
    loop {
        let inner = match &current {
            Value::Object(map) if is_wrapper(map) => map.get("data").cloned(),
            _ => None,
        };
        match inner {
            Some(next) => current = next,
            None => return current,
        }
    }
}

// A wrapper carries an object under `data` and nothing that looks like a record id.
fn is_wrapper(map: &Map<String, Value>) -> bool {
    matches!(map.get("data"), Some(Value::Object(_))) && !map.contains_key("id")
}

fn read_meta(map: &Map<String, Value>, item_count: usize) -> PaginationMeta {
    let source = [map.get("pagination"), map.get("meta")]
        .into_iter()
        .flatten()
        .find_map(Value::as_object)
        .unwrap_or(map);

    let count = item_count as u64;
    let total = read_u64(source, &["total"]).unwrap_or(count);
    let page = read_u64(source, &["page", "current_page", "currentPage"]).unwrap_or(1);
    let page_size = read_u64(source, &["pageSize", "page_size", "per_page", "perPage"])
        .unwrap_or(count);
    let total_pages = read_u64(source, &["totalPages", "total_pages", "last_page", "lastPage"])
        .map(|p| p.max(1))
        .unwrap_or_else(|| total_pages(total, page_size));

    PaginationMeta {
        total,
        page: page.max(1),
        page_size,
        total_pages,
    }
}

fn read_u64(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| match map.get(*k)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_doubly_nested_envelope() {
        let body = json!({
            "success": true,
            "data": { "data": {
                "items": [{"id": 1}, {"id": 2}],
                "pagination": {"total": 42, "page": 2, "pageSize": 2, "totalPages": 21}
            }}
        });

        let page = normalize_list(body).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination, PaginationMeta { total: 42, page: 2, page_size: 2, total_pages: 21 });
    }

    #[test]
    fn test_laravel_paginator() {
        let body = json!({
            "data": [{"id": 7}],
            "current_page": 3,
            "per_page": 15,
            "total": 31,
            "last_page": 3
        });

        let page = normalize_list(body).unwrap();

        assert_eq!(page.items, vec![json!({"id": 7})]);
        assert_eq!(page.pagination, PaginationMeta { total: 31, page: 3, page_size: 15, total_pages: 3 });
    }

    #[test]
    fn test_laravel_resource_collection_with_meta() {
        let body = json!({
            "data": [{"id": 1}, {"id": 2}, {"id": 3}],
            "meta": {"current_page": "1", "per_page": "2", "total": "3"}
        });

        let page = normalize_list(body).unwrap();

        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.page_size, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_bare_array() {
        let page = normalize_list(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(page.pagination, PaginationMeta { total: 2, page: 1, page_size: 2, total_pages: 1 });
    }

    #[test]
    fn test_empty_bare_array_has_one_page() {
        let page = normalize_list(json!([])).unwrap();
        assert_eq!(page.pagination.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(normalize_list(json!("nope")).is_err());
        assert!(normalize_list(json!({"data": 5})).is_err());
        assert!(normalize_list(json!({"message": "ok"})).is_err());
    }

    #[test]
    fn test_typed_decode() {
        #[derive(Deserialize)]
        struct Row {
            id: i64,
        }

        let page: Paginated<Row> = normalize_list_as(json!({"items": [{"id": 9}], "pagination": {"total": 1, "page": 1, "pageSize": 20, "totalPages": 1}})).unwrap();
        assert_eq!(page.items[0].id, 9);
    }

    #[test]
    fn test_normalize_item() {
        assert_eq!(normalize_item(json!({"data": {"data": {"id": 3, "name": "x"}}})), json!({"id": 3, "name": "x"}));
        assert_eq!(normalize_item(json!({"data": {"id": 3}})), json!({"id": 3}));
        assert_eq!(normalize_item(json!({"id": 3, "data": {"k": 1}})), json!({"id": 3, "data": {"k": 1}}));
    }
}
