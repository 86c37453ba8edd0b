use super::state::{
    initial_state, save_snapshot, take_just_edited, ListStateSnapshot, PAGE_SIZE_OPTIONS,
};
use crate::routes::router::use_router;
use crate::shared::api::ListFilters;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::sortable_header_cell::SortableHeaderCell;
use crate::shared::components::ui::badge::{Badge, BadgeVariant};
use crate::shared::dialog::alert;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal_frame::ConfirmModal;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use crate::shared::query::{use_query_client, DeleteFn, QueryState};
use crate::shared::storage::BrowserStorage;
use contracts::domain::common::{Entity, EntityId, Paginated};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use thaw::*;

/// Table column of a list page
pub struct Column<E> {
    /// Sort key sent to the API
    pub field: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub align_right: bool,
    pub render: fn(&E) -> AnyView,
}

impl<E> Clone for Column<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Column<E> {}

impl<E> Column<E> {
    pub fn new(field: &'static str, label: &'static str, render: fn(&E) -> AnyView) -> Self {
        Self {
            field,
            label,
            sortable: true,
            align_right: false,
            render,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn right(mut self) -> Self {
        self.align_right = true;
        self
    }
}

/// Plain text cell
pub fn text_cell(value: impl Into<String>) -> AnyView {
    let value = value.into();
    if value.trim().is_empty() {
        view! { <span class="text-muted">"—"</span> }.into_any()
    } else {
        view! { <span>{value}</span> }.into_any()
    }
}

/// Yes/No badge cell
pub fn flag_cell(value: bool) -> AnyView {
    if value {
        view! { <Badge variant=BadgeVariant::Success>"Yes"</Badge> }.into_any()
    } else {
        view! { <Badge>"No"</Badge> }.into_any()
    }
}

/// Generic paginated list page.
///
/// `query` receives the reactive list filters derived from the page state and
/// returns the list query; rows already loaded stay on screen while the next
/// page loads. The state is saved to session storage before every navigation
/// to a record so coming back restores page, search and sort.
#[component]
pub fn ListContainer<E, Q>(
    columns: Vec<Column<E>>,
    query: Q,
    /// Delete action; without it no delete button is shown
    #[prop(optional)]
    on_delete: Option<DeleteFn>,
    /// Replace the default `/{resource}/{id}` navigation
    #[prop(optional)]
    on_view: Option<Callback<EntityId>>,
    /// Replace the default `/{resource}/{id}?edit=true` navigation
    #[prop(optional)]
    on_edit: Option<Callback<EntityId>>,
    /// Replace the default `/{resource}/create` navigation
    #[prop(optional)]
    on_create: Option<Callback<()>>,
    #[prop(optional, into)]
    can_create: MaybeProp<bool>,
    #[prop(optional, into)]
    can_edit: MaybeProp<bool>,
    #[prop(optional, into)]
    can_delete: MaybeProp<bool>,
    /// Extra filter controls rendered next to the search box
    #[prop(optional)]
    toolbar: Option<ChildrenFn>,
) -> impl IntoView
where
    E: Entity,
    Q: FnOnce(Signal<ListFilters>) -> QueryState<Paginated<E>> + 'static,
{
    let resource = E::collection_name();
    let router = use_router();

    if take_just_edited(&BrowserStorage::Session, resource) {
        log::debug!("{} edited elsewhere, refreshing lists", resource);
        use_query_client().invalidate_lists(resource);
    }

    let state = RwSignal::new(initial_state(
        &BrowserStorage::Session,
        resource,
        |k| router.query_untracked(k),
        E::default_sort(),
    ));
    let filters = Signal::derive(move || state.with(ListStateSnapshot::to_filters));
    let list = query(filters);

    // keep the address bar in step so a reload shows the same page
    Effect::new(move |prev: Option<String>| {
        let query = state.with(ListStateSnapshot::to_query);
        if prev.is_some() && prev.as_ref() != Some(&query) {
            router.replace(&format!("/{}?{}", resource, query));
        }
        query
    });

    let columns = StoredValue::new(columns);
    let on_delete = StoredValue::new(on_delete);
    let can_create = Signal::derive(move || can_create.get().unwrap_or(true));
    let can_edit = Signal::derive(move || can_edit.get().unwrap_or(true));
    let can_delete = Signal::derive(move || {
        can_delete.get().unwrap_or(true) && on_delete.with_value(Option::is_some)
    });

    let leave_to = move |url: String| {
        save_snapshot(&BrowserStorage::Session, resource, &state.get_untracked());
        router.navigate(&url);
    };

    let open_view = move |id: EntityId| match on_view {
        Some(cb) => {
            save_snapshot(&BrowserStorage::Session, resource, &state.get_untracked());
            cb.run(id);
        }
        None => leave_to(format!("/{}/{}", resource, id)),
    };

    let open_edit = move |id: EntityId| match on_edit {
        Some(cb) => {
            save_snapshot(&BrowserStorage::Session, resource, &state.get_untracked());
            cb.run(id);
        }
        None => leave_to(format!("/{}/{}?edit=true", resource, id)),
    };

    let open_create = move |_: MouseEvent| match on_create {
        Some(cb) => {
            save_snapshot(&BrowserStorage::Session, resource, &state.get_untracked());
            cb.run(());
        }
        None => leave_to(format!("/{}/create", resource)),
    };

    // (id, label) of the record awaiting confirmation
    let pending_delete = RwSignal::new(None::<(EntityId, String)>);

    let confirm_delete = Callback::new(move |_| {
        let Some((id, label)) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        if let Some(delete) = on_delete.get_value() {
            delete(
                id,
                Box::new(move |result| match result {
                    Ok(()) => log::info!("Deleted {} {}", resource, id),
                    Err(e) => alert(&format!("Could not delete {}: {}", label, e)),
                }),
            );
        }
    });
    let cancel_delete = Callback::new(move |_| pending_delete.set(None));

    let on_search = Callback::new(move |value: String| state.update(|s| s.set_search(value)));
    let on_sort = Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)));
    let on_page_change = Callback::new(move |page: u32| state.update(|s| s.set_page(page)));
    let on_page_size_change =
        Callback::new(move |size: u32| state.update(|s| s.set_page_size(size)));

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_direction = Signal::derive(move || state.with(|s| s.sort_direction));
    let total = Signal::derive(move || {
        list.data
            .with(|d| d.as_ref().map(|p| p.pagination.total).unwrap_or(0))
    });
    let total_pages = Signal::derive(move || {
        list.data
            .with(|d| d.as_ref().map(|p| p.pagination.total_pages as u32).unwrap_or(1))
    });
    let column_count = columns.with_value(Vec::len) + 1;

    let header_cells = move || {
        columns
            .get_value()
            .into_iter()
            .map(|col| {
                if col.sortable {
                    view! {
                        <SortableHeaderCell
                            label=col.label
                            sort_field=col.field
                            current_sort_field=sort_field
                            sort_direction=sort_direction
                            on_sort=on_sort
                            align_right=col.align_right
                        />
                    }
                    .into_any()
                } else {
                    view! { <th class="table__header-cell">{col.label}</th> }.into_any()
                }
            })
            .collect_view()
    };

    let rows = move || {
        let items = list.data.with(|d| d.as_ref().map(|p| p.items.clone()).unwrap_or_default());
        if items.is_empty() {
            let body = if list.is_loading() {
                view! { <Spinner /> }.into_any()
            } else {
                view! { <span>"No records found"</span> }.into_any()
            };
            return view! {
                <tr>
                    <td class="table__cell table__cell--empty" colspan=column_count.to_string()>
                        {body}
                    </td>
                </tr>
            }
            .into_any();
        }

        items
            .into_iter()
            .map(|item| {
                let id = item.id();
                let label = item.display_name();
                let cells = columns
                    .get_value()
                    .into_iter()
                    .map(|col| {
                        let class = if col.align_right {
                            "table__cell table__cell--right"
                        } else {
                            "table__cell"
                        };
                        view! { <td class=class>{(col.render)(&item)}</td> }
                    })
                    .collect_view();

                view! {
                    <tr class="table__row" on:click=move |_| open_view(id)>
                        {cells}
                        <td class="table__cell table__cell--actions">
                            <button
                                class="button button--icon"
                                title="View"
                                on:click=move |ev: MouseEvent| {
                                    ev.stop_propagation();
                                    open_view(id);
                                }
                            >
                                {icon("eye")}
                            </button>
                            {move || {
                                can_edit.get().then(|| view! {
                                    <button
                                        class="button button--icon"
                                        title="Edit"
                                        on:click=move |ev: MouseEvent| {
                                            ev.stop_propagation();
                                            open_edit(id);
                                        }
                                    >
                                        {icon("edit")}
                                    </button>
                                })
                            }}
                            {move || {
                                let label = label.clone();
                                can_delete.get().then(move || view! {
                                    <button
                                        class="button button--icon button--danger"
                                        title="Delete"
                                        on:click=move |ev: MouseEvent| {
                                            ev.stop_propagation();
                                            pending_delete.set(Some((id, label.clone())));
                                        }
                                    >
                                        {icon("delete")}
                                    </button>
                                })
                            }}
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <PageFrame page_id=page_id(resource, PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{E::list_name()}</h1>
                    <Badge variant=BadgeVariant::Primary>{move || total.get().to_string()}</Badge>
                    <Show when=move || list.is_fetching.get()>
                        <span class="page__status">"Updating..."</span>
                    </Show>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.refetch()>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Show when=move || can_create.get()>
                        <Button appearance=ButtonAppearance::Primary on_click=open_create>
                            {icon("plus")}
                            {format!(" New {}", E::element_name().to_lowercase())}
                        </Button>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                <div class="list-toolbar">
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search.clone()))
                        on_change=on_search
                    />
                    {toolbar.map(|t| t())}
                </div>

                {move || {
                    list.error_message()
                        .map(|e| {
                            view! {
                                <div class="warning-box warning-box--error">
                                    <span class="warning-box__text">{e}</span>
                                    <button class="button button--secondary" on:click=move |_| list.refetch()>
                                        "Retry"
                                    </button>
                                </div>
                            }
                        })
                }}

                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                {header_cells}
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                </div>

                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_pages=total_pages
                    total_count=total
                    page_size=Signal::derive(move || state.with(|s| s.page_size))
                    on_page_change=on_page_change
                    on_page_size_change=on_page_size_change
                    page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                />
            </div>

            <Show when=move || pending_delete.with(Option::is_some)>
                <ConfirmModal
                    title={format!("Delete {}", E::element_name().to_lowercase())}
                    message=Signal::derive(move || {
                        pending_delete
                            .get()
                            .map(|(_, label)| format!("Delete \"{}\"? This cannot be undone.", label))
                            .unwrap_or_default()
                    })
                    on_confirm=confirm_delete
                    on_cancel=cancel_delete
                />
            </Show>
        </PageFrame>
    }
}
