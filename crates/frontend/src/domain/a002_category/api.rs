use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{EntityHooks, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::common::{EntityId, Paginated};
use leptos::prelude::*;

fn preset() -> ListFilters {
    ListFilters::new().page(1, RELATION_PAGE_SIZE)
}

pub fn active_filters() -> ListFilters {
    preset().with("active", 1)
}

pub fn visible_filters() -> ListFilters {
    preset().with("visible", 1)
}

pub fn by_parent_filters(parent_id: EntityId) -> ListFilters {
    preset().with("parent_id", parent_id)
}

/// Top-level categories are requested as `parent_id=0`
pub fn root_filters() -> ListFilters {
    by_parent_filters(0)
}

impl EntityApi<Category> {
    pub async fn get_active(&self) -> Result<Paginated<Category>, ApiError> {
        self.get_all(&active_filters()).await
    }

    pub async fn get_visible(&self) -> Result<Paginated<Category>, ApiError> {
        self.get_all(&visible_filters()).await
    }

    pub async fn get_by_parent(&self, parent_id: EntityId) -> Result<Paginated<Category>, ApiError> {
        self.get_all(&by_parent_filters(parent_id)).await
    }

    pub async fn get_root(&self) -> Result<Paginated<Category>, ApiError> {
        self.get_all(&root_filters()).await
    }
}

impl EntityHooks<Category> {
    pub fn use_active(&self) -> QueryState<Paginated<Category>> {
        self.use_filtered("active", active_filters())
    }

    pub fn use_visible(&self) -> QueryState<Paginated<Category>> {
        self.use_filtered("visible", visible_filters())
    }

    pub fn use_root(&self) -> QueryState<Paginated<Category>> {
        self.use_filtered("root", root_filters())
    }

    /// Children of the chosen category; idle until a parent is chosen
    pub fn use_by_parent(&self, parent_id: Signal<Option<EntityId>>) -> QueryState<Paginated<Category>> {
        self.use_filtered_by("byParent", "parent_id", parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_filters() {
        assert_eq!(visible_filters().to_query_string(), "page=1&per_page=100&visible=1");
        assert_eq!(by_parent_filters(4).to_query_string(), "page=1&per_page=100&parent_id=4");
        assert_eq!(root_filters().extra.get("parent_id").map(String::as_str), Some("0"));
    }
}
