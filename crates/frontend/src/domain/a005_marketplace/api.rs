use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{EntityHooks, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a005_marketplace::aggregate::Marketplace;
use contracts::domain::common::Paginated;

pub fn active_filters() -> ListFilters {
    ListFilters::new().page(1, RELATION_PAGE_SIZE).with("active", 1)
}

pub fn visible_filters() -> ListFilters {
    ListFilters::new().page(1, RELATION_PAGE_SIZE).with("visible", 1)
}

impl EntityApi<Marketplace> {
    pub async fn get_active(&self) -> Result<Paginated<Marketplace>, ApiError> {
        self.get_all(&active_filters()).await
    }

    pub async fn get_visible(&self) -> Result<Paginated<Marketplace>, ApiError> {
        self.get_all(&visible_filters()).await
    }
}

impl EntityHooks<Marketplace> {
    pub fn use_active(&self) -> QueryState<Paginated<Marketplace>> {
        self.use_filtered("active", active_filters())
    }

    pub fn use_visible(&self) -> QueryState<Paginated<Marketplace>> {
        self.use_filtered("visible", visible_filters())
    }
}
