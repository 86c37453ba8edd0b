use crate::shared::api::{ApiError, EntityApi, ListFilters};
use crate::shared::query::RELATION_PAGE_SIZE;
use contracts::domain::a012_admin_account::aggregate::AdminAccount;
use contracts::domain::common::Paginated;

impl EntityApi<AdminAccount> {
    pub async fn get_active(&self) -> Result<Paginated<AdminAccount>, ApiError> {
        self.get_all(&ListFilters::new().page(1, RELATION_PAGE_SIZE).with("active", 1))
            .await
    }
}
