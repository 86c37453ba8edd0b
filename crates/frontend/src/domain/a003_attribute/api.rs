use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{EntityHooks, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a003_attribute::aggregate::Attribute;
use contracts::domain::common::{EntityId, Paginated};
use leptos::prelude::*;

pub fn visible_filters() -> ListFilters {
    ListFilters::new().page(1, RELATION_PAGE_SIZE).with("visible", 1)
}

pub fn by_category_filters(category_id: EntityId) -> ListFilters {
    ListFilters::new()
        .page(1, RELATION_PAGE_SIZE)
        .with("id_category", category_id)
}

impl EntityApi<Attribute> {
    pub async fn get_visible(&self) -> Result<Paginated<Attribute>, ApiError> {
        self.get_all(&visible_filters()).await
    }

    pub async fn get_by_category(&self, category_id: EntityId) -> Result<Paginated<Attribute>, ApiError> {
        self.get_all(&by_category_filters(category_id)).await
    }
}

impl EntityHooks<Attribute> {
    pub fn use_visible(&self) -> QueryState<Paginated<Attribute>> {
        self.use_filtered("visible", visible_filters())
    }

    pub fn use_by_category(&self, category_id: Signal<Option<EntityId>>) -> QueryState<Paginated<Attribute>> {
        self.use_filtered_by("byCategory", "id_category", category_id)
    }
}
