//! Child records managed from the parent's detail page

use super::form::{EntityForm, FormSpec, FormValues};
use crate::shared::api::{ApiError, NestedResource};
use crate::shared::dialog::{alert, confirm};
use crate::shared::icons::icon;
use crate::shared::query::{use_query_client, QueryKey, QueryState};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone)]
pub struct NestedColumn<T> {
    pub label: &'static str,
    pub cell: fn(&T) -> String,
}

impl<T> NestedColumn<T> {
    pub fn new(label: &'static str, cell: fn(&T) -> String) -> Self {
        Self { label, cell }
    }
}

/// Inline form target: a new child record, or the one being edited
#[derive(Clone, Copy)]
struct InlineEditor {
    editing: RwSignal<Option<EntityId>>,
    values: FormValues,
}

impl InlineEditor {
    fn new(spec: &FormSpec) -> Self {
        Self {
            editing: RwSignal::new(None),
            values: FormValues::new(spec),
        }
    }

    /// Load `item` into the form; the next submit updates it
    fn start<T: Serialize>(&self, spec: &FormSpec, id: EntityId, item: &T) {
        match serde_json::to_value(item) {
            Ok(record) => {
                self.values.reset(spec, &record);
                self.editing.set(Some(id));
            }
            Err(e) => log::error!("Cannot edit row {}: {}", id, e),
        }
    }

    /// Back to an empty add form
    fn finish(&self, spec: &FormSpec) {
        self.values.reset(spec, &Value::Null);
        self.editing.set(None);
    }
}

/// Table of the child records with an inline add/edit form and per-row
/// edit and delete. Every successful change refetches `cache_key`; failures
/// are alerted (422 messages also appear under their field).
#[component]
pub fn NestedTable<T>(
    title: &'static str,
    resource: NestedResource<T>,
    query: QueryState<Vec<T>>,
    cache_key: QueryKey,
    columns: Vec<NestedColumn<T>>,
    row_id: fn(&T) -> EntityId,
    row_label: fn(&T) -> String,
    form: FormSpec,
    #[prop(optional, into)]
    can_edit: MaybeProp<bool>,
) -> impl IntoView
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static,
{
    let client = use_query_client();
    let can_edit = Signal::derive(move || can_edit.get().unwrap_or(true));
    let resource = StoredValue::new(resource);
    let cache_key = StoredValue::new(cache_key);
    let columns = StoredValue::new(columns);
    let editor = InlineEditor::new(&form);
    let values = editor.values;
    let form = StoredValue::new(form);
    let error = RwSignal::new(None::<ApiError>);
    let saving = RwSignal::new(false);
    let column_count = columns.with_value(|c| c.len()) + 1;

    let refresh = move || client.invalidate(&cache_key.get_value());

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let resource = resource.get_value();
        let payload = values.to_json();
        let editing = editor.editing.get_untracked();
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            let result = match editing {
                Some(child_id) => resource.update(child_id, &payload).await,
                None => resource.create(&payload).await,
            };
            saving.try_set(false);
            match result {
                Ok(_) => {
                    form.with_value(|f| editor.finish(f));
                    refresh();
                }
                Err(e) => {
                    if !e.is_validation() {
                        alert(&e.to_string());
                    }
                    error.try_set(Some(e));
                }
            }
        });
    };

    let edit = move |item: T| {
        error.set(None);
        form.with_value(|f| editor.start(f, row_id(&item), &item));
    };

    let cancel = move || {
        error.set(None);
        form.with_value(|f| editor.finish(f));
    };

    let remove = move |item: T| {
        if !confirm(&format!("Delete \"{}\"?", row_label(&item))) {
            return;
        }
        let resource = resource.get_value();
        let child_id = row_id(&item);
        spawn_local(async move {
            match resource.delete(child_id).await {
                Ok(()) => {
                    if editor.editing.try_get_untracked().flatten() == Some(child_id) {
                        form.with_value(|f| editor.finish(f));
                    }
                    refresh();
                }
                Err(e) => alert(&e.to_string()),
            }
        });
    };

    view! {
        <section class="detail-section">
            <h3 class="detail-section__title">{title}</h3>
            {move || query.error_message().map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })}
            <table class="table__data table--striped table--compact">
                <thead>
                    <tr>
                        {columns
                            .get_value()
                            .into_iter()
                            .map(|c| view! { <th class="table__header-cell">{c.label}</th> })
                            .collect_view()}
                        <th class="table__header-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let items = query.data.get().unwrap_or_default();
                        if items.is_empty() {
                            return view! {
                                <tr>
                                    <td class="table__cell table__cell--empty" colspan=column_count.to_string()>
                                        "Nothing here yet"
                                    </td>
                                </tr>
                            }
                            .into_any();
                        }
                        items
                            .into_iter()
                            .map(|item| {
                                let cells = columns
                                    .with_value(|cols| cols.iter().map(|c| (c.cell)(&item)).collect::<Vec<_>>());
                                view! {
                                    <tr class="table__row">
                                        {cells.into_iter().map(|c| view! { <td class="table__cell">{c}</td> }).collect_view()}
                                        <td class="table__cell text-right">
                                            <Show when=move || can_edit.get()>
                                                {
                                                    let item = item.clone();
                                                    let edited = item.clone();
                                                    view! {
                                                        <button
                                                            class="button button--icon"
                                                            title="Edit"
                                                            on:click=move |_| edit(edited.clone())
                                                        >
                                                            {icon("edit")}
                                                        </button>
                                                        <button
                                                            class="button button--icon"
                                                            title="Delete"
                                                            on:click=move |_| remove(item.clone())
                                                        >
                                                            {icon("delete")}
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
            <Show when=move || can_edit.get()>
                <form class="nested-form" on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }>
                    <EntityForm spec=form.get_value() values=values error=error disabled=saving />
                    <button type="submit" class="button button--secondary" disabled=move || saving.get()>
                        {move || icon(if editor.editing.get().is_some() { "check" } else { "plus" })}
                        {move || submit_label(editor.editing.get().is_some(), saving.get())}
                    </button>
                    <Show when=move || editor.editing.get().is_some()>
                        <button type="button" class="button button--secondary" on:click=move |_| cancel()>
                            "Cancel"
                        </button>
                    </Show>
                </form>
            </Show>
        </section>
    }
}

fn submit_label(editing: bool, saving: bool) -> &'static str {
    match (editing, saving) {
        (true, true) => "Saving...",
        (true, false) => "Save",
        (false, true) => "Adding...",
        (false, false) => "Add",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::detail::form::FormField;
    use serde_json::json;

    #[derive(Serialize)]
    struct Contact {
        id: EntityId,
        name: String,
        email: String,
    }

    fn spec() -> FormSpec {
        FormSpec::new(vec![FormField::text("name", "Name"), FormField::email("email", "Email")])
    }

    #[test]
    fn test_edit_loads_row_and_finish_clears_it() {
        Owner::new().with(|| {
            let spec = spec();
            let editor = InlineEditor::new(&spec);
            let row = Contact {
                id: 9,
                name: "Ana".to_string(),
                email: "ana@x.es".to_string(),
            };

            editor.start(&spec, row.id, &row);
            assert_eq!(editor.editing.get_untracked(), Some(9));
            assert_eq!(editor.values.to_json()["name"], json!("Ana"));
            assert_eq!(editor.values.to_json()["email"], json!("ana@x.es"));

            editor.finish(&spec);
            assert_eq!(editor.editing.get_untracked(), None);
            assert_eq!(editor.values.to_json()["name"], json!(""));
        });
    }

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(false, false), "Add");
        assert_eq!(submit_label(true, false), "Save");
        assert_eq!(submit_label(true, true), "Saving...");
    }
}
