use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{EntityHooks, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a001_product::aggregate::Product;
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

pub fn by_category_filters(category_id: EntityId) -> ListFilters {
    preset().with("id_category", category_id)
}

pub fn by_supplier_filters(supplier_id: EntityId) -> ListFilters {
    preset().with("id_supplier", supplier_id)
}

impl EntityApi<Product> {
    pub async fn get_active(&self) -> Result<Paginated<Product>, ApiError> {
        self.get_all(&active_filters()).await
    }

    pub async fn get_visible(&self) -> Result<Paginated<Product>, ApiError> {
        self.get_all(&visible_filters()).await
    }

    pub async fn get_by_category(&self, category_id: EntityId) -> Result<Paginated<Product>, ApiError> {
        self.get_all(&by_category_filters(category_id)).await
    }

    pub async fn get_by_supplier(&self, supplier_id: EntityId) -> Result<Paginated<Product>, ApiError> {
        self.get_all(&by_supplier_filters(supplier_id)).await
    }
}

impl EntityHooks<Product> {
    pub fn use_by_category(&self, category_id: Signal<Option<EntityId>>) -> QueryState<Paginated<Product>> {
        self.use_filtered_by("byCategory", "id_category", category_id)
    }

    pub fn use_by_supplier(&self, supplier_id: Signal<Option<EntityId>>) -> QueryState<Paginated<Product>> {
        self.use_filtered_by("bySupplier", "id_supplier", supplier_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_filters() {
        assert_eq!(
            by_category_filters(7).to_query_string(),
            "page=1&per_page=100&id_category=7"
        );
        assert_eq!(
            by_supplier_filters(3).to_query_string(),
            "page=1&per_page=100&id_supplier=3"
        );
    }
}
