use super::cache::stale;
use super::client::{use_query_client, QueryClient};
use super::key::QueryKey;
use crate::shared::api::{ApiClient, ApiError, EntityApi, ListFilters};
use chrono::Utc;
use contracts::domain::common::{transform_for_api, Entity, EntityId, Paginated};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Page size of relation lists feeding selects and side tables
pub const RELATION_PAGE_SIZE: u32 = 100;

/// Delete action handed to generic views: `(id, on_done)`
pub type DeleteFn = Arc<dyn Fn(EntityId, Box<dyn FnOnce(Result<(), ApiError>)>) + Send + Sync>;

/// Reactive result of [`use_query`]
pub struct QueryState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub is_fetching: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    refetch: RwSignal<u32>,
}

impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Send + Sync + 'static> QueryState<T> {
    pub(crate) fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            is_fetching: RwSignal::new(false),
            error: RwSignal::new(None),
            refetch: RwSignal::new(0),
        }
    }

    /// Fetching with nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.is_fetching.get() && self.data.with(Option::is_none)
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.with(|e| e.as_ref().map(|e| e.message.clone()))
    }

    /// Fetch again even if the cached value is fresh
    pub fn refetch(&self) {
        self.refetch.update(|n| *n += 1);
    }
}

/// Cached, deduplicated query.
///
/// `key` yields the cache key and the parameters handed to `fetcher`; it is
/// reactive, so a key change issues a new query while the previous data stays
/// visible. Fresh cached values are served without a request and nothing is
/// issued while `enabled` is false. Responses for a key that is no longer
/// current are cached but not applied.
pub fn use_query<P, T, K, F, Fut>(
    key: K,
    stale_ms: i64,
    enabled: impl Into<Signal<bool>>,
    fetcher: F,
) -> QueryState<T>
where
    K: Fn() -> (QueryKey, P) + 'static,
    P: 'static,
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static,
    F: Fn(P) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let enabled = enabled.into();
    let state = QueryState::<T>::new();
    let generation = StoredValue::new(0u64);
    let current_key = StoredValue::new(None::<QueryKey>);
    let seen_refetch = StoredValue::new(0u32);

    Effect::new(move |_| {
        client.track();
        let refetch_count = state.refetch.get();

        if !enabled.get() {
            state.is_fetching.set(false);
            return;
        }

        let (key, params) = key();
        let forced = seen_refetch.get_value() != refetch_count;
        seen_refetch.set_value(refetch_count);

        if current_key.with_value(|k| k.as_ref() != Some(&key)) {
            current_key.set_value(Some(key.clone()));
            generation.update_value(|g| *g += 1);
            client.clear_error(&key);
        }

        let now = Utc::now();
        let (cached, fresh, failed, in_flight) = client.read(|c| {
            (
                c.get(&key).cloned(),
                c.is_fresh(&key, now),
                c.error(&key).cloned(),
                c.is_fetching(&key),
            )
        });

        if let Some(value) = cached {
            match serde_json::from_value::<T>(value) {
                Ok(v) => {
                    if state.data.with_untracked(|d| d.as_ref() != Some(&v)) {
                        state.data.set(Some(v));
                    }
                }
                Err(e) => log::error!("Cached value of {} does not decode: {}", key, e),
            }
        }

        if !forced {
            if fresh {
                state.error.set(None);
                state.is_fetching.set(false);
                return;
            }
            if let Some(e) = failed {
                state.error.set(Some(e));
                state.is_fetching.set(false);
                return;
            }
        }
        if in_flight || !client.begin_fetch(&key) {
            state.is_fetching.set(true);
            return;
        }

        let issued = generation.get_value();
        state.is_fetching.set(true);
        let request = fetcher(params);

        spawn_local(async move {
            let result = request.await;
            let is_current = generation.try_get_value() == Some(issued);

            match result {
                Ok(data) => {
                    match serde_json::to_value(&data) {
                        Ok(value) => client.resolve(key, value, stale_ms),
                        Err(e) => client.fail(key, ApiError::decode(e.to_string())),
                    }
                    if is_current {
                        state.data.try_set(Some(data));
                        state.error.try_set(None);
                        state.is_fetching.try_set(false);
                    }
                }
                Err(e) => {
                    log::error!("Query {} failed: {}", key, e);
                    client.fail(key, e.clone());
                    if is_current {
                        state.error.try_set(Some(e));
                        state.is_fetching.try_set(false);
                    }
                }
            }
        });
    });

    state
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not found in context")
}

/// Queries and mutations of one entity collection
pub struct EntityHooks<E: Entity> {
    client: QueryClient,
    api: StoredValue<EntityApi<E>>,
}

impl<E: Entity> Clone for EntityHooks<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity> Copy for EntityHooks<E> {}

pub fn use_entity_hooks<E: Entity>() -> EntityHooks<E> {
    EntityHooks {
        client: use_query_client(),
        api: StoredValue::new(EntityApi::new(use_api_client())),
    }
}

impl<E: Entity> EntityHooks<E> {
    pub fn api(&self) -> EntityApi<E> {
        self.api.get_value()
    }

    pub fn client(&self) -> QueryClient {
        self.client
    }

    pub fn use_list(&self, filters: impl Fn() -> ListFilters + 'static) -> QueryState<Paginated<E>> {
        let api = self.api;
        use_query(
            move || {
                let f = filters();
                (QueryKey::list(E::collection_name(), &f), f)
            },
            stale::LIST,
            true,
            move |f: ListFilters| {
                let api = api.get_value();
                async move { api.get_all(&f).await }
            },
        )
    }

    pub fn use_detail(&self, id: Signal<Option<EntityId>>) -> QueryState<E> {
        let api = self.api;
        use_query(
            move || {
                let id = id.get().unwrap_or_default();
                (QueryKey::detail(E::collection_name(), id), id)
            },
            stale::DETAIL,
            Signal::derive(move || id.get().is_some()),
            move |id: EntityId| {
                let api = api.get_value();
                async move { api.get_by_id(id).await }
            },
        )
    }

    /// List under a relation key (`[categories, byParent, 3]`), refreshed on every mutation.
    pub fn use_related(
        &self,
        key: impl Fn() -> (QueryKey, ListFilters) + 'static,
        enabled: impl Into<Signal<bool>>,
    ) -> QueryState<Paginated<E>> {
        let api = self.api;
        use_query(key, stale::RELATION, enabled, move |f: ListFilters| {
            let api = api.get_value();
            async move { api.get_all(&f).await }
        })
    }

    /// Preset list under `[entity, name]` (`active`, `visible`, `root`, ...)
    pub fn use_filtered(&self, name: &'static str, filters: ListFilters) -> QueryState<Paginated<E>> {
        let filters = StoredValue::new(filters);
        self.use_related(
            move || (QueryKey::relation(E::collection_name(), name), filters.get_value()),
            true,
        )
    }

    /// List of the records whose `field` equals the chosen id, under
    /// `[entity, name, id]`; nothing is fetched while no id is chosen.
    pub fn use_filtered_by(
        &self,
        name: &'static str,
        field: &'static str,
        parent: Signal<Option<EntityId>>,
    ) -> QueryState<Paginated<E>> {
        self.use_related(
            move || {
                let id = parent.get().unwrap_or_default();
                (
                    QueryKey::relation(E::collection_name(), name).with(id),
                    ListFilters::new().page(1, RELATION_PAGE_SIZE).with(field, id),
                )
            },
            Signal::derive(move || parent.get().is_some()),
        )
    }

    pub fn create(&self, form: Value, on_done: impl FnOnce(Result<E, ApiError>) + 'static) {
        let client = self.client;
        let api = self.api.get_value();
        spawn_local(async move {
            let result = api.create(&form).await;
            match &result {
                Ok(item) => match serde_json::to_value(item) {
                    Ok(value) => client.apply_created(E::collection_name(), item.id(), value),
                    Err(e) => log::error!("Failed to cache new {}: {}", E::element_name(), e),
                },
                Err(e) => log::error!("{}", e),
            }
            on_done(result);
        });
    }

    /// Optimistic update; the cache is rolled back if the request fails.
    pub fn update(&self, id: EntityId, form: Value, on_done: impl FnOnce(Result<E, ApiError>) + 'static) {
        let api = self.api.get_value();
        let body = form.clone();
        self.update_with(id, form, async move { api.update(id, &body).await }, on_done);
    }

    fn update_with(
        &self,
        id: EntityId,
        form: Value,
        request: impl Future<Output = Result<E, ApiError>> + 'static,
        on_done: impl FnOnce(Result<E, ApiError>) + 'static,
    ) {
        let client = self.client;
        let patch = transform_for_api(E::payload_schema(), &form);
        let snapshot = client.apply_optimistic(E::collection_name(), id, &patch);

        spawn_local(async move {
            let result = request.await;
            match &result {
                Ok(item) => match serde_json::to_value(item) {
                    Ok(value) => client.apply_updated(E::collection_name(), id, value),
                    Err(e) => {
                        log::error!("Failed to cache updated {} {}: {}", E::element_name(), id, e);
                        client.invalidate(&QueryKey::entity(E::collection_name()));
                    }
                },
                Err(e) => {
                    log::error!("{}", e);
                    client.rollback(snapshot);
                }
            }
            on_done(result);
        });
    }

    pub fn delete(&self, id: EntityId, on_done: impl FnOnce(Result<(), ApiError>) + 'static) {
        let api = self.api.get_value();
        self.delete_with(id, async move { api.delete(id).await }, on_done);
    }

    fn delete_with(
        &self,
        id: EntityId,
        request: impl Future<Output = Result<(), ApiError>> + 'static,
        on_done: impl FnOnce(Result<(), ApiError>) + 'static,
    ) {
        let client = self.client;
        spawn_local(async move {
            let result = request.await;
            match &result {
                Ok(()) => client.apply_deleted(E::collection_name(), id),
                Err(e) => log::error!("{}", e),
            }
            on_done(result);
        });
    }

    pub fn delete_fn(&self) -> DeleteFn {
        let hooks = *self;
        Arc::new(move |id: EntityId, on_done: Box<dyn FnOnce(Result<(), ApiError>)>| {
            hooks.delete(id, on_done)
        })
    }

    pub fn invalidate_lists(&self) {
        self.client.invalidate_lists(E::collection_name());
    }

    pub fn invalidate_detail(&self, id: EntityId) {
        self.client
            .invalidate(&QueryKey::detail(E::collection_name(), id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ApiClient;
    use crate::shared::config::AppConfig;
    use any_spawner::Executor;
    use contracts::domain::a006_supplier::aggregate::Supplier;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;
    use tokio::sync::oneshot;
    use tokio::task::LocalSet;

    /// Lets effects and spawned requests run to completion
    async fn settle() {
        for _ in 0..8 {
            Executor::tick().await;
        }
    }

    fn setup() -> (Owner, QueryClient) {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();
        let client = QueryClient::new();
        provide_context(client);
        provide_context(ApiClient::new(AppConfig::default(), || None));
        (owner, client)
    }

    type StubFuture = std::pin::Pin<Box<dyn Future<Output = Result<String, ApiError>>>>;

    /// Fetcher answering `<name>-data`; names with a pending gate wait for it
    #[derive(Clone, Default)]
    struct StubFetcher {
        calls: Rc<Cell<usize>>,
        gates: Rc<RefCell<HashMap<&'static str, oneshot::Receiver<()>>>>,
    }

    impl StubFetcher {
        fn gate(&self, name: &'static str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(name, rx);
            tx
        }

        fn fetch(&self) -> impl Fn(&'static str) -> StubFuture + 'static {
            let stub = self.clone();
            move |name: &'static str| -> StubFuture {
                stub.calls.set(stub.calls.get() + 1);
                let gate = stub.gates.borrow_mut().remove(name);
                Box::pin(async move {
                    if let Some(gate) = gate {
                        let _ = gate.await;
                    }
                    Ok(format!("{}-data", name))
                })
            }
        }
    }

    fn key_of(name: &'static str) -> (QueryKey, &'static str) {
        (QueryKey::relation("stubs", name), name)
    }

    #[tokio::test]
    async fn test_disabled_query_sends_nothing() {
        LocalSet::new()
            .run_until(async {
                let (_owner, _client) = setup();
                let stub = StubFetcher::default();
                let state = use_query(|| key_of("a"), stale::LIST, false, stub.fetch());
                settle().await;

                assert_eq!(stub.calls.get(), 0);
                assert!(!state.is_fetching.get_untracked());
                assert_eq!(state.data.get_untracked(), None);
            })
            .await;
    }

    #[tokio::test]
    async fn test_fresh_cache_is_served_without_request() {
        LocalSet::new()
            .run_until(async {
                let (_owner, client) = setup();
                client.set(QueryKey::relation("stubs", "a"), json!("cached"), stale::LIST);
                let stub = StubFetcher::default();
                let state = use_query(|| key_of("a"), stale::LIST, true, stub.fetch());
                settle().await;

                assert_eq!(stub.calls.get(), 0);
                assert_eq!(state.data.get_untracked().as_deref(), Some("cached"));
                assert!(!state.is_fetching.get_untracked());

                state.refetch();
                settle().await;
                assert_eq!(stub.calls.get(), 1);
                assert_eq!(state.data.get_untracked().as_deref(), Some("a-data"));
            })
            .await;
    }

    #[tokio::test]
    async fn test_two_observers_share_one_request() {
        LocalSet::new()
            .run_until(async {
                let (_owner, _client) = setup();
                let stub = StubFetcher::default();
                let release = stub.gate("a");
                let first = use_query(|| key_of("a"), stale::LIST, true, stub.fetch());
                let second = use_query(|| key_of("a"), stale::LIST, true, stub.fetch());
                settle().await;

                assert_eq!(stub.calls.get(), 1);
                assert!(first.is_fetching.get_untracked());
                assert!(second.is_fetching.get_untracked());

                let _ = release.send(());
                settle().await;

                assert_eq!(stub.calls.get(), 1);
                assert_eq!(first.data.get_untracked().as_deref(), Some("a-data"));
                assert_eq!(second.data.get_untracked().as_deref(), Some("a-data"));
                assert!(!first.is_fetching.get_untracked());
                assert!(!second.is_fetching.get_untracked());
            })
            .await;
    }

    #[tokio::test]
    async fn test_response_for_previous_key_is_not_applied() {
        LocalSet::new()
            .run_until(async {
                let (_owner, client) = setup();
                let stub = StubFetcher::default();
                let release_a = stub.gate("a");
                let name = RwSignal::new("a");
                let state = use_query(move || key_of(name.get()), stale::LIST, true, stub.fetch());
                settle().await;

                name.set("b");
                settle().await;
                assert_eq!(state.data.get_untracked().as_deref(), Some("b-data"));

                let _ = release_a.send(());
                settle().await;

                assert_eq!(stub.calls.get(), 2);
                assert_eq!(state.data.get_untracked().as_deref(), Some("b-data"));
                assert_eq!(
                    client.read(|c| c.get(&QueryKey::relation("stubs", "a")).cloned()),
                    Some(json!("a-data"))
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back_cache() {
        LocalSet::new()
            .run_until(async {
                let (_owner, client) = setup();
                let detail = json!({"id": 7, "name": "Acme", "email": "info@acme.es", "active": true});
                let detail_key = QueryKey::detail("suppliers", 7);
                client.set(detail_key.clone(), detail.clone(), stale::DETAIL);

                let hooks = use_entity_hooks::<Supplier>();
                let outcome = Rc::new(RefCell::new(None));
                let (fail, failed) = oneshot::channel::<()>();
                let seen = outcome.clone();
                hooks.update_with(
                    7,
                    json!({"name": "Acme 2", "email": "info@acme.es", "active": true}),
                    async move {
                        let _ = failed.await;
                        Err(ApiError::network("offline"))
                    },
                    move |result| *seen.borrow_mut() = Some(result.is_ok()),
                );

                assert_eq!(client.read(|c| c.get(&detail_key).cloned()).unwrap()["name"], "Acme 2");

                let _ = fail.send(());
                settle().await;

                assert_eq!(*outcome.borrow(), Some(false));
                assert_eq!(client.read(|c| c.get(&detail_key).cloned()), Some(detail));
            })
            .await;
    }

    #[tokio::test]
    async fn test_successful_delete_drops_detail() {
        LocalSet::new()
            .run_until(async {
                let (_owner, client) = setup();
                let detail_key = QueryKey::detail("suppliers", 7);
                client.set(detail_key.clone(), json!({"id": 7, "name": "Acme"}), stale::DETAIL);

                let hooks = use_entity_hooks::<Supplier>();
                hooks.delete_with(7, async { Ok(()) }, |_| {});
                settle().await;

                assert!(client.read(|c| c.get(&detail_key).is_none()));
            })
            .await;
    }
}
