use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::{EntityHooks, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::domain::common::Paginated;

pub fn active_filters() -> ListFilters {
    ListFilters::new().page(1, RELATION_PAGE_SIZE).with("active", 1)
}

impl EntityApi<Supplier> {
    pub async fn get_active(&self) -> Result<Paginated<Supplier>, ApiError> {
        self.get_all(&active_filters()).await
    }
}

impl EntityHooks<Supplier> {
    /// Active suppliers, for selects
    pub fn use_active(&self) -> QueryState<Paginated<Supplier>> {
        self.use_filtered("active", active_filters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_filters() {
        assert_eq!(active_filters().to_query_string(), "page=1&per_page=100&active=1");
    }
}
