use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{stale, use_query, EntityHooks, QueryKey, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a010_order::aggregate::{Order, OrderAddress, OrderLine};
use contracts::domain::common::{Entity, EntityId, Paginated};
use contracts::enums::OrderStatus;
use leptos::prelude::*;

pub fn by_customer_filters(customer_id: EntityId) -> ListFilters {
    ListFilters::new()
        .page(1, RELATION_PAGE_SIZE)
        .with("id_customer", customer_id)
}

pub fn by_status_filters(status: OrderStatus) -> ListFilters {
    ListFilters::new()
        .page(1, RELATION_PAGE_SIZE)
        .with("status", status.code())
}

impl EntityApi<Order> {
    pub async fn get_by_customer(&self, customer_id: EntityId) -> Result<Paginated<Order>, ApiError> {
        self.get_all(&by_customer_filters(customer_id)).await
    }

    pub async fn get_by_status(&self, status: OrderStatus) -> Result<Paginated<Order>, ApiError> {
        self.get_all(&by_status_filters(status)).await
    }

    /// Product lines (`/orders/:id/products`)
    pub async fn get_products(&self, id: EntityId) -> Result<Vec<OrderLine>, ApiError> {
        self.get_related(id, "products").await
    }

    pub async fn get_addresses(&self, id: EntityId) -> Result<Vec<OrderAddress>, ApiError> {
        self.get_related(id, "addresses").await
    }
}

impl EntityHooks<Order> {
    pub fn use_by_customer(&self, customer_id: Signal<Option<EntityId>>) -> QueryState<Paginated<Order>> {
        self.use_filtered_by("byCustomer", "id_customer", customer_id)
    }

    /// Lines under `[orders, products, id]`
    pub fn use_lines(&self, id: EntityId) -> QueryState<Vec<OrderLine>> {
        let api = self.api();
        use_query(
            move || (QueryKey::relation(Order::collection_name(), "products").with(id), id),
            stale::RELATION,
            true,
            move |id: EntityId| {
                let api = api.clone();
                async move { api.get_products(id).await }
            },
        )
    }

    /// Addresses under `[orders, addresses, id]`
    pub fn use_addresses(&self, id: EntityId) -> QueryState<Vec<OrderAddress>> {
        let api = self.api();
        use_query(
            move || (QueryKey::relation(Order::collection_name(), "addresses").with(id), id),
            stale::RELATION,
            true,
            move |id: EntityId| {
                let api = api.clone();
                async move { api.get_addresses(id).await }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_uses_code() {
        assert_eq!(
            by_status_filters(OrderStatus::Shipped).to_query_string(),
            "page=1&per_page=100&status=shipped"
        );
    }
}
