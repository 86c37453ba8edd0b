use crate::layout::sidebar::get_menu_groups;
use crate::routes::router::use_router;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::use_auth;
use contracts::system::permissions::Action;
use leptos::prelude::*;

/// Landing page: one card per section the admin may open
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let greeting = move || {
        auth.user()
            .map(|u| format!("Welcome, {}", u.name))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    view! {
        <PageFrame page_id="home--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{greeting}</h1>
                </div>
            </div>
            <div class="page__content home-grid">
                {move || {
                    get_menu_groups()
                        .into_iter()
                        .map(|group| {
                            let items: Vec<_> = group
                                .items
                                .into_iter()
                                .filter(|(resource, _, _)| auth.can(resource, Action::View))
                                .collect();
                            (group.label, items)
                        })
                        .filter(|(_, items)| !items.is_empty())
                        .map(|(label, items)| {
                            view! {
                                <section class="home-card">
                                    <h3 class="home-card__title">{label}</h3>
                                    <ul class="home-card__links">
                                        {items
                                            .into_iter()
                                            .map(|(resource, item_label, item_icon)| {
                                                view! {
                                                    <li
                                                        class="home-card__link"
                                                        on:click=move |_| router.navigate(&format!("/{}", resource))
                                                    >
                                                        {icon(item_icon)}
                                                        <span>{item_label}</span>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                </section>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </PageFrame>
    }
}
