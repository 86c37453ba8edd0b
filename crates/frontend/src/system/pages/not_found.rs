use crate::routes::router::use_router;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let router = use_router();

    view! {
        <PageFrame page_id="not-found--system" category=PAGE_CAT_SYSTEM>
            <div class="page__content">
                <div class="warning-box">
                    <p>{move || format!("Nothing found at {}", router.path())}</p>
                    <button class="button button--secondary" on:click=move |_| router.navigate("/")>
                        "Back to start"
                    </button>
                </div>
            </div>
        </PageFrame>
    }
}
