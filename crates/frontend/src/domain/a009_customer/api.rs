use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{EntityHooks, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a009_customer::aggregate::Customer;
use contracts::domain::common::Paginated;

pub fn active_filters() -> ListFilters {
    ListFilters::new().page(1, RELATION_PAGE_SIZE).with("active", 1)
}

impl EntityApi<Customer> {
    pub async fn get_active(&self) -> Result<Paginated<Customer>, ApiError> {
        self.get_all(&active_filters()).await
    }
}

impl EntityHooks<Customer> {
    pub fn use_active(&self) -> QueryState<Paginated<Customer>> {
        self.use_filtered("active", active_filters())
    }
}
