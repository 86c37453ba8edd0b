//! Top navigation bar: sidebar toggle, title, signed-in admin, logout

use crate::layout::global_context::use_global_context;
use crate::routes::router::use_router;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let auth = use_auth();
    let router = use_router();

    let logout = move |_| {
        auth.logout();
        router.navigate("/");
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || {
                        if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                    }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title" on:click=move |_| router.navigate("/")>"cPanel"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || {
                            auth.state
                                .with(|s| s.user.as_ref().map(|u| if u.name.is_empty() { u.email.clone() } else { u.name.clone() }))
                                .unwrap_or_else(|| "Guest".to_string())
                        }}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
