use super::client::ApiClient;
use super::error::ApiError;
use contracts::domain::common::{
    normalize_item, normalize_list_as, transform_for_api, validate_required, Entity, EntityId,
    FieldSpec, Paginated,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Query parameters of a list request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "per_page", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    /// Resource specific filters (`active=1`, `id_category=4`, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ListFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then(|| search.trim().to_string());
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(field.into());
        self.direction = Some(direction);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    /// Canonical query string (stable key order); also used in cache keys
    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_else(|e| {
            log::error!("Failed to encode list filters: {}", e);
            String::new()
        })
    }
}

/// REST client of one entity collection
pub struct EntityApi<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityApi<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityApi<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get_all(&self, filters: &ListFilters) -> Result<Paginated<E>, ApiError> {
        let query = filters.to_query_string();
        let body = self
            .client
            .get(&E::resource_path(), Some(&query))
            .await
            .map_err(|e| e.context(format!("Loading {}", E::list_name().to_lowercase())))?;
        Ok(normalize_list_as(body)?)
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<E, ApiError> {
        let body = self
            .client
            .get(&E::item_path(id), None)
            .await
            .map_err(|e| e.context(format!("Loading {} {}", E::element_name().to_lowercase(), id)))?;
        decode_item(body)
    }

    /// `form` is raw form state; it is validated and coerced with the entity schema.
    pub async fn create(&self, form: &Value) -> Result<E, ApiError> {
        let payload = prepare(E::payload_schema(), form)?;
        let body = self
            .client
            .post(&E::resource_path(), &payload)
            .await
            .map_err(|e| e.context(format!("Creating {}", E::element_name().to_lowercase())))?;
        decode_item(body)
    }

    pub async fn update(&self, id: EntityId, form: &Value) -> Result<E, ApiError> {
        let payload = prepare(E::payload_schema(), form)?;
        let body = self
            .client
            .put(&E::item_path(id), &payload)
            .await
            .map_err(|e| e.context(format!("Updating {} {}", E::element_name().to_lowercase(), id)))?;
        decode_item(body)
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.client
            .delete(&E::item_path(id))
            .await
            .map_err(|e| e.context(format!("Deleting {} {}", E::element_name().to_lowercase(), id)))?;
        Ok(())
    }

    /// `GET /{collection}/{id}/{segment}` decoded as a list
    pub async fn get_related<T: DeserializeOwned>(&self, id: EntityId, segment: &str) -> Result<Vec<T>, ApiError> {
        let path = format!("{}/{}", E::item_path(id), segment);
        let body = self
            .client
            .get(&path, None)
            .await
            .map_err(|e| e.context(format!("Loading {} of {} {}", segment, E::element_name().to_lowercase(), id)))?;
        Ok(normalize_list_as::<T>(body)?.items)
    }
}

/// CRUD of a collection nested under a parent record
/// (e.g. `/affiliates/3/contacts`)
pub struct NestedResource<T> {
    client: ApiClient,
    path: String,
    schema: &'static [FieldSpec],
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for NestedResource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            schema: self.schema,
            _item: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> NestedResource<T> {
    pub fn new(client: ApiClient, path: String, schema: &'static [FieldSpec]) -> Self {
        Self {
            client,
            path,
            schema,
            _item: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        let body = self
            .client
            .get(&self.path, None)
            .await
            .map_err(|e| e.context(format!("Loading {}", self.path)))?;
        Ok(normalize_list_as::<T>(body)?.items)
    }

    pub async fn create(&self, form: &Value) -> Result<T, ApiError> {
        let payload = prepare(self.schema, form)?;
        let body = self
            .client
            .post(&self.path, &payload)
            .await
            .map_err(|e| e.context(format!("Adding to {}", self.path)))?;
        decode_item(body)
    }

    pub async fn update(&self, child_id: EntityId, form: &Value) -> Result<T, ApiError> {
        let payload = prepare(self.schema, form)?;
        let path = format!("{}/{}", self.path, child_id);
        let body = self
            .client
            .put(&path, &payload)
            .await
            .map_err(|e| e.context(format!("Updating {}", path)))?;
        decode_item(body)
    }

    pub async fn delete(&self, child_id: EntityId) -> Result<(), ApiError> {
        let path = format!("{}/{}", self.path, child_id);
        self.client
            .delete(&path)
            .await
            .map_err(|e| e.context(format!("Deleting {}", path)))?;
        Ok(())
    }
}

fn prepare(schema: &[FieldSpec], form: &Value) -> Result<Value, ApiError> {
    validate_required(schema, form)?;
    Ok(transform_for_api(schema, form))
}

fn decode_item<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(normalize_item(body))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        let filters = ListFilters::new()
            .page(2, 20)
            .search("  shoes ")
            .sort("name", SortDirection::Desc)
            .with("active", 1);

        assert_eq!(
            filters.to_query_string(),
            "page=2&per_page=20&search=shoes&sort=name&direction=desc&active=1"
        );
    }

    #[test]
    fn test_empty_filters() {
        assert_eq!(ListFilters::new().to_query_string(), "");
        assert_eq!(ListFilters::new().search("   ").search, None);
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn test_prepare_rejects_missing_required() {
        let schema = &[FieldSpec::required("name"), FieldSpec::flag("active", true)];
        let err = prepare(schema, &serde_json::json!({"name": " "})).unwrap_err();
        assert!(err.is_validation());

        let ok = prepare(schema, &serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(ok, serde_json::json!({"name": "x", "active": true}));
    }
}
