//! Search box and sort indicators shared by the list pages
use crate::shared::api::SortDirection;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub const SEARCH_DEBOUNCE_MS: i32 = 300;

/// Search input reporting its value once typing pauses
#[component]
pub fn SearchInput(
    /// Value currently applied to the list
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Local value before the debounce fires
    let input_value = RwSignal::new(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let cancel_pending = move || {
        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(w) = web_sys::window() {
                w.clear_timeout_with_handle(timeout_id);
            }
            debounce_timeout.set_value(None);
        }
    };

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        cancel_pending();

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        let closure: wasm_bindgen::closure::Closure<dyn FnMut()> =
            wasm_bindgen::closure::Closure::once(move || {
                debounce_timeout.set_value(None);
                on_change.run(new_value);
            });

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            SEARCH_DEBOUNCE_MS,
        ) {
            Ok(timeout_id) => {
                closure.forget();
                debounce_timeout.set_value(Some(timeout_id));
            }
            Err(_) => log::error!("setTimeout failed, search not applied"),
        }
    };

    let clear_filter = move |_| {
        cancel_pending();
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, direction: SortDirection) -> &'static str {
    if current_field != field {
        " ⇅"
    } else if direction == SortDirection::Asc {
        " ▲"
    } else {
        " ▼"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "price", SortDirection::Asc), " ⇅");
        assert_eq!(get_sort_indicator("name", "name", SortDirection::Asc), " ▲");
        assert_eq!(get_sort_indicator("name", "name", SortDirection::Desc), " ▼");
        assert!(get_sort_class("name", "name").ends_with("--active"));
    }
}
