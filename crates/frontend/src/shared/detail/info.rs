//! Read-only record sections of a detail page

use crate::shared::query::QueryState;
use leptos::prelude::*;

/// `(label, value)`
pub type InfoRow = (&'static str, AnyView);

#[component]
pub fn InfoGrid(rows: Vec<InfoRow>) -> impl IntoView {
    view! {
        <dl class="info-grid">
            {rows
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <dt class="info-grid__label">{label}</dt>
                        <dd class="info-grid__value">{value}</dd>
                    }
                })
                .collect_view()}
        </dl>
    }
}

/// Titled card showing `rows(record)` once the record is loaded
#[component]
pub fn RecordSection<E>(
    query: QueryState<E>,
    title: &'static str,
    rows: fn(&E) -> Vec<InfoRow>,
) -> impl IntoView
where
    E: Clone + PartialEq + Send + Sync + 'static,
{
    view! {
        <section class="detail-section">
            <h3 class="detail-section__title">{title}</h3>
            {move || query.data.with(|d| d.as_ref().map(rows)).map(|rows| view! { <InfoGrid rows=rows /> })}
        </section>
    }
}
