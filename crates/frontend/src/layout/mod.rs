pub mod global_context;
pub mod sidebar;
pub mod top_header;

use global_context::use_global_context;
use leptos::prelude::*;
use sidebar::Sidebar;
use top_header::TopHeader;

/// Application frame: header on top, navigation on the left (collapsible
/// from the header), the routed page in the remaining space.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let ctx = use_global_context();

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <aside data-zone="left" class="app-sidebar" class:hidden=move || !ctx.left_open.get()>
                    <Sidebar />
                </aside>
                <main data-zone="center" class="app-main app-content">
                    {children()}
                </main>
            </div>
        </div>
    }
}
