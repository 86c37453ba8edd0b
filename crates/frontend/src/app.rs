use crate::layout::global_context::AppGlobalContext;
use crate::routes::router::AppRouter;
use crate::routes::routes::AppRoutes;
use crate::shared::api::ApiClient;
use crate::shared::config::{load_config, AppConfig};
use crate::shared::query::QueryClient;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Waits for the configuration, then starts the panel with it
#[component]
pub fn App() -> impl IntoView {
    let config = RwSignal::new(None::<AppConfig>);
    spawn_local(async move {
        let loaded = load_config().await;
        config.set(Some(loaded));
    });

    move || match config.get() {
        Some(config) => view! { <ConfiguredApp config=config /> }.into_any(),
        None => view! {
            <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; height: 100vh;">
                <Spinner />
                "Loading..."
            </Flex>
        }
        .into_any(),
    }
}

#[component]
fn ConfiguredApp(config: AppConfig) -> impl IntoView {
    log::info!("Starting cPanel against {}", config.api_base_url);

    provide_context(ApiClient::with_session(config.clone()));
    provide_context(config);
    provide_context(QueryClient::new());

    let router = AppRouter::from_location();
    router.listen();
    provide_context(router);

    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
