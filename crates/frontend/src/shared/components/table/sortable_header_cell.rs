//! Sortable table header cell
//!
//! ```text
//! <SortableHeaderCell
//!     label="Price"
//!     sort_field="price"
//!     current_sort_field=Signal::derive(move || state.with(|s| s.sort_field.clone()))
//!     sort_direction=Signal::derive(move || state.with(|s| s.sort_direction))
//!     on_sort=Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)))
//! />
//! ```

use crate::shared::api::SortDirection;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,
    sort_field: &'static str,
    #[prop(into)]
    current_sort_field: Signal<String>,
    #[prop(into)]
    sort_direction: Signal<SortDirection>,
    on_sort: Callback<String>,
    /// Right-align (numeric columns)
    #[prop(optional)]
    align_right: bool,
) -> impl IntoView {
    let class = if align_right {
        "table__header-cell table__header-cell--sortable table__header-cell--right"
    } else {
        "table__header-cell table__header-cell--sortable"
    };

    view! {
        <th class=class on:click=move |_| on_sort.run(sort_field.to_string())>
            <div class="table__sortable-header">
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), sort_field)>
                    {move || get_sort_indicator(&current_sort_field.get(), sort_field, sort_direction.get())}
                </span>
            </div>
        </th>
    }
}
