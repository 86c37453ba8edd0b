use crate::layout::Shell;
use crate::routes::registry::render_route;
use crate::routes::router::{use_router, Route};
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireAuth;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let router = use_router();
    let auth = use_auth();

    view! {
        <Shell>
            {move || {
                let route = router.route();
                // lists read page, search and sort from the URL when mounted
                if matches!(route, Route::List { .. }) {
                    router.track_visits();
                }
                log::debug!("Rendering {:?}", route);
                render_route(&route, auth)
            }}
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireAuth>
            <MainLayout />
        </RequireAuth>
    }
}
