use crate::shared::api::{ApiError, EntityApi, ListFilters, NestedResource};
use crate::shared::query::{stale, use_query, EntityHooks, QueryKey, QueryState, RELATION_PAGE_SIZE};
use contracts::domain::a008_affiliate::aggregate::{
    Affiliate, AffiliateContact, AffiliateZone, AFFILIATE_CONTACT_PAYLOAD, AFFILIATE_ZONE_PAYLOAD,
};
use contracts::domain::common::{Entity, EntityId, Paginated};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn active_filters() -> ListFilters {
    ListFilters::new().page(1, RELATION_PAGE_SIZE).with("active", 1)
}

pub const CONTACTS: &str = "contacts";
pub const ZONES: &str = "zones";

/// `[affiliates, contacts|zones, id]`
pub fn nested_key(segment: &str, id: EntityId) -> QueryKey {
    QueryKey::relation(Affiliate::collection_name(), segment).with(id)
}

impl EntityApi<Affiliate> {
    pub async fn get_active(&self) -> Result<Paginated<Affiliate>, ApiError> {
        self.get_all(&active_filters()).await
    }

    /// `/affiliates/:id/contacts`
    pub fn contacts(&self, id: EntityId) -> NestedResource<AffiliateContact> {
        NestedResource::new(
            self.client().clone(),
            format!("{}/{}", Affiliate::item_path(id), CONTACTS),
            AFFILIATE_CONTACT_PAYLOAD,
        )
    }

    /// `/affiliates/:id/zones`
    pub fn zones(&self, id: EntityId) -> NestedResource<AffiliateZone> {
        NestedResource::new(
            self.client().clone(),
            format!("{}/{}", Affiliate::item_path(id), ZONES),
            AFFILIATE_ZONE_PAYLOAD,
        )
    }
}

fn use_nested<T>(segment: &'static str, id: EntityId, resource: NestedResource<T>) -> QueryState<Vec<T>>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static,
{
    use_query(
        move || (nested_key(segment, id), ()),
        stale::RELATION,
        true,
        move |_: ()| {
            let resource = resource.clone();
            async move { resource.list().await }
        },
    )
}

impl EntityHooks<Affiliate> {
    pub fn use_active(&self) -> QueryState<Paginated<Affiliate>> {
        self.use_filtered("active", active_filters())
    }

    pub fn use_contacts(&self, id: EntityId) -> QueryState<Vec<AffiliateContact>> {
        use_nested(CONTACTS, id, self.api().contacts(id))
    }

    pub fn use_zones(&self, id: EntityId) -> QueryState<Vec<AffiliateZone>> {
        use_nested(ZONES, id, self.api().zones(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_keys_live_under_the_affiliate_root() {
        let key = nested_key(CONTACTS, 4);
        assert_eq!(key.segments(), ["affiliates", "contacts", "4"]);
        assert!(key.starts_with(&QueryKey::entity("affiliates")));
    }
}
