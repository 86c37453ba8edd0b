use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{EntityHooks, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a004_option::aggregate::ProductOption;
use contracts::domain::common::{EntityId, Paginated};
use leptos::prelude::*;

pub fn by_attribute_filters(attribute_id: EntityId) -> ListFilters {
    ListFilters::new()
        .page(1, RELATION_PAGE_SIZE)
        .with("id_attribute", attribute_id)
}

impl EntityApi<ProductOption> {
    pub async fn get_by_attribute(&self, attribute_id: EntityId) -> Result<Paginated<ProductOption>, ApiError> {
        self.get_all(&by_attribute_filters(attribute_id)).await
    }
}

impl EntityHooks<ProductOption> {
    pub fn use_by_attribute(&self, attribute_id: Signal<Option<EntityId>>) -> QueryState<Paginated<ProductOption>> {
        self.use_filtered_by("byAttribute", "id_attribute", attribute_id)
    }
}
