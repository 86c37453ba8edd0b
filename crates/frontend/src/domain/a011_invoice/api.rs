//! Invoices and their Verifactu (AEAT) transmission

use crate::shared::api::{with_retry, ApiError, EntityApi, ListFilters, RetryPolicy};
use crate::shared::query::{stale, use_query, EntityHooks, QueryKey, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a011_invoice::aggregate::{AeatStatus, Invoice};
use contracts::domain::common::{normalize_item, Entity, EntityId, Paginated};
use leptos::prelude::*;
use serde_json::json;

pub fn by_order_filters(order_id: EntityId) -> ListFilters {
    ListFilters::new()
        .page(1, RELATION_PAGE_SIZE)
        .with("id_order", order_id)
}

pub fn verifactu_path(id: EntityId, action: &str) -> String {
    format!("{}/verifactu/{}", Invoice::item_path(id), action)
}

pub fn aeat_status_key(id: EntityId) -> QueryKey {
    QueryKey::relation(Invoice::collection_name(), "aeatStatus").with(id)
}

impl EntityApi<Invoice> {
    pub async fn get_by_order(&self, order_id: EntityId) -> Result<Paginated<Invoice>, ApiError> {
        self.get_all(&by_order_filters(order_id)).await
    }

    /// Register the invoice at AEAT
    pub async fn send_to_aeat(&self, id: EntityId) -> Result<(), ApiError> {
        self.client()
            .post(&verifactu_path(id, "send"), &json!({}))
            .await
            .map_err(|e| e.context(format!("Sending invoice {} to AEAT", id)))?;
        Ok(())
    }

    /// Status of the last transmission, retried on network and server errors
    pub async fn check_aeat_status(&self, id: EntityId) -> Result<AeatStatus, ApiError> {
        let path = verifactu_path(id, "status");
        let client = self.client();
        let body = with_retry(RetryPolicy::default(), || client.get(&path, None))
            .await
            .map_err(|e| e.context(format!("Checking AEAT status of invoice {}", id)))?;
        Ok(serde_json::from_value(normalize_item(body))?)
    }

    /// Cancel the invoice's registration at AEAT
    pub async fn cancel(&self, id: EntityId) -> Result<(), ApiError> {
        self.client()
            .post(&verifactu_path(id, "cancel"), &json!({}))
            .await
            .map_err(|e| e.context(format!("Cancelling invoice {}", id)))?;
        Ok(())
    }
}

impl EntityHooks<Invoice> {
    pub fn use_by_order(&self, order_id: Signal<Option<EntityId>>) -> QueryState<Paginated<Invoice>> {
        self.use_filtered_by("byOrder", "id_order", order_id)
    }

    /// Last AEAT answer; nothing is asked until `enabled` (the invoice was sent)
    pub fn use_aeat_status(&self, id: EntityId, enabled: Signal<bool>) -> QueryState<AeatStatus> {
        let api = self.api();
        use_query(
            move || (aeat_status_key(id), id),
            stale::RELATION,
            enabled,
            move |id: EntityId| {
                let api = api.clone();
                async move { api.check_aeat_status(id).await }
            },
        )
    }

    /// Caches the answer of a manual status check; the record itself is refetched
    pub fn store_aeat_status(&self, id: EntityId, status: &AeatStatus) {
        match serde_json::to_value(status) {
            Ok(value) => self.client().set(aeat_status_key(id), value, stale::RELATION),
            Err(e) => {
                log::error!("Failed to cache AEAT status of invoice {}: {}", id, e);
                self.client().invalidate(&aeat_status_key(id));
            }
        }
        self.invalidate_detail(id);
        self.invalidate_lists();
    }

    /// Refresh the record and its AEAT answer after an AEAT action
    pub fn invalidate_aeat(&self, id: EntityId) {
        self.invalidate_detail(id);
        self.invalidate_lists();
        self.client().invalidate(&aeat_status_key(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ApiClient;
    use crate::shared::config::AppConfig;
    use crate::shared::query::{use_entity_hooks, QueryClient};
    use contracts::enums::VerifactuStatus;

    #[test]
    fn test_verifactu_paths() {
        assert_eq!(verifactu_path(12, "send"), "/invoices/12/verifactu/send");
        assert_eq!(verifactu_path(12, "status"), "/invoices/12/verifactu/status");
        assert_eq!(verifactu_path(12, "cancel"), "/invoices/12/verifactu/cancel");
    }

    #[test]
    fn test_aeat_status_key_is_scoped_to_invoices() {
        let key = aeat_status_key(3);
        assert!(key.starts_with(&QueryKey::entity("invoices")));
        assert!(key.is_relation());
    }

    #[test]
    fn test_checked_status_is_cached_without_refetch() {
        Owner::new().with(|| {
            let client = QueryClient::new();
            provide_context(client);
            provide_context(ApiClient::new(AppConfig::default(), || None));
            let hooks = use_entity_hooks::<Invoice>();
            client.set(QueryKey::detail("invoices", 5), json!({"id": 5}), stale::DETAIL);

            let status = AeatStatus {
                status: Some(VerifactuStatus::Accepted),
                csv: Some("A-123".to_string()),
                ..Default::default()
            };
            hooks.store_aeat_status(5, &status);

            let now = chrono::Utc::now();
            let (cached, fresh, detail_fresh) = client.read(|c| {
                (
                    c.get(&aeat_status_key(5)).cloned(),
                    c.is_fresh(&aeat_status_key(5), now),
                    c.is_fresh(&QueryKey::detail("invoices", 5), now),
                )
            });
            let cached: AeatStatus = serde_json::from_value(cached.unwrap()).unwrap();
            assert_eq!(cached, status);
            assert!(fresh);
            assert!(!detail_fresh);
        });
    }
}
