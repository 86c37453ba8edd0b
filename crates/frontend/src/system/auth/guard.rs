use super::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

/// Renders `children` for a signed-in admin, the login page otherwise
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show when=move || auth.is_authenticated() fallback=|| view! { <LoginPage /> }>
            {children()}
        </Show>
    }
}

/// Shown in place of a page the admin may not open
pub fn access_denied() -> AnyView {
    view! {
        <div class="page page--system">
            <div class="warning-box warning-box--error">
                "You do not have permission to view this page."
            </div>
        </div>
    }
    .into_any()
}
