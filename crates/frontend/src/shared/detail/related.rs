use crate::routes::router::use_router;
use crate::shared::list::Column;
use crate::shared::query::QueryState;
use contracts::domain::common::{Entity, Paginated};
use leptos::prelude::*;
use thaw::*;

/// Compact table of records linked to the current one; a row click opens
/// the record.
#[component]
pub fn RelatedTable<E: Entity>(
    query: QueryState<Paginated<E>>,
    columns: Vec<Column<E>>,
    #[prop(optional, into)]
    empty_text: Option<String>,
) -> impl IntoView {
    let router = use_router();
    let columns = StoredValue::new(columns);
    let empty_text = empty_text.unwrap_or_else(|| "Nothing here yet".to_string());

    view! {
        <div class="table-wrapper">
            {move || query.error_message().map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })}
            <table class="table__data table--striped table--compact">
                <thead>
                    <tr>
                        {columns
                            .get_value()
                            .into_iter()
                            .map(|c| {
                                view! {
                                    <th class="table__header-cell" class:text-right=c.align_right>
                                        {c.label}
                                    </th>
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        if query.is_loading() {
                            return view! {
                                <tr>
                                    <td class="table__cell" colspan=columns.with_value(Vec::len).to_string()>
                                        <Spinner />
                                    </td>
                                </tr>
                            }
                            .into_any();
                        }
                        let rows = query.data.with(|d| d.as_ref().map(|p| p.items.clone()).unwrap_or_default());
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="table__cell text-muted" colspan=columns.with_value(Vec::len).to_string()>
                                        {empty_text.clone()}
                                    </td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|row| {
                                let url = format!("/{}/{}", E::collection_name(), row.id());
                                view! {
                                    <tr class="table__row table__row--clickable" on:click=move |_| router.navigate(&url)>
                                        {columns
                                            .get_value()
                                            .into_iter()
                                            .map(|c| {
                                                view! {
                                                    <td class="table__cell" class:text-right=c.align_right>
                                                        {(c.render)(&row)}
                                                    </td>
                                                }
                                            })
                                            .collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}
