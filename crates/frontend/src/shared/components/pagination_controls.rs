use crate::shared::icons::icon;
use leptos::prelude::*;

/// How many page buttons are shown around the current page
const PAGE_WINDOW: u32 = 2;

/// `(first, last)` record numbers shown on `page`, `(0, 0)` for an empty list
pub fn record_range(page: u32, page_size: u32, total: u64) -> (u64, u64) {
    if total == 0 || page == 0 {
        return (0, 0);
    }
    let first = (page as u64 - 1) * page_size as u64 + 1;
    let last = (page as u64 * page_size as u64).min(total);
    (first.min(total), last)
}

/// Page numbers to render as buttons; `None` marks a gap
pub fn page_buttons(current: u32, last: u32) -> Vec<Option<u32>> {
    let last = last.max(1);
    let current = current.clamp(1, last);
    let from = current.saturating_sub(PAGE_WINDOW).max(1);
    let to = (current + PAGE_WINDOW).min(last);

    let mut pages = Vec::new();
    if from > 1 {
        pages.push(Some(1));
        if from > 2 {
            pages.push(None);
        }
    }
    pages.extend((from..=to).map(Some));
    if to < last {
        if to + 1 < last {
            pages.push(None);
        }
        pages.push(Some(last));
    }
    pages
}

/// Record range, page buttons and the page size select below a list
#[component]
pub fn PaginationControls(
    /// 1-based
    #[prop(into)]
    current_page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] total_count: Signal<u64>,
    #[prop(into)] page_size: Signal<u32>,
    on_page_change: Callback<u32>,
    on_page_size_change: Callback<u32>,
    page_size_options: Vec<u32>,
) -> impl IntoView {
    let last_page = move || total_pages.get().max(1);
    let go = move |page: u32| {
        if page >= 1 && page <= last_page() && page != current_page.get_untracked() {
            on_page_change.run(page);
        }
    };

    let range_text = move || {
        let (first, last) = record_range(current_page.get(), page_size.get(), total_count.get());
        format!("{}-{} of {}", first, last, total_count.get())
    };

    let buttons = move || {
        let current = current_page.get();
        page_buttons(current, last_page())
            .into_iter()
            .map(|entry| match entry {
                Some(page) => view! {
                    <button
                        class="pagination__page"
                        class:pagination__page--active=page == current
                        on:click=move |_| go(page)
                    >
                        {page.to_string()}
                    </button>
                }
                .into_any(),
                None => view! { <span class="pagination__gap">"..."</span> }.into_any(),
            })
            .collect_view()
    };

    view! {
        <nav class="pagination">
            <span class="pagination__range">{range_text}</span>
            <div class="pagination__pages">
                <button
                    class="pagination__step"
                    title="Previous page"
                    disabled=move || current_page.get() <= 1
                    on:click=move |_| go(current_page.get_untracked().saturating_sub(1))
                >
                    {icon("chevron-left")}
                </button>
                {buttons}
                <button
                    class="pagination__step"
                    title="Next page"
                    disabled=move || current_page.get() >= last_page()
                    on:click=move |_| go(current_page.get_untracked() + 1)
                >
                    {icon("chevron-right")}
                </button>
            </div>
            <label class="pagination__size">
                "Per page "
                <select
                    prop:value=move || page_size.get().to_string()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        match value.parse::<u32>() {
                            Ok(size) => on_page_size_change.run(size),
                            Err(_) => log::warn!("Ignoring page size {}", value),
                        }
                    }
                >
                    {page_size_options
                        .into_iter()
                        .map(|size| view! { <option value=size.to_string()>{size.to_string()}</option> })
                        .collect_view()}
                </select>
            </label>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_range() {
        assert_eq!(record_range(1, 20, 45), (1, 20));
        assert_eq!(record_range(3, 20, 45), (41, 45));
        assert_eq!(record_range(1, 20, 0), (0, 0));
    }

    #[test]
    fn test_page_buttons_window() {
        assert_eq!(page_buttons(1, 1), vec![Some(1)]);
        assert_eq!(page_buttons(2, 4), vec![Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(
            page_buttons(10, 20),
            vec![Some(1), None, Some(8), Some(9), Some(10), Some(11), Some(12), None, Some(20)]
        );
        assert_eq!(page_buttons(20, 20), vec![Some(1), None, Some(18), Some(19), Some(20)]);
    }
}
