use super::form::{EntityForm, FormSpec, FormValues};
use super::state::{take_action_flags, DeleteModalState, DrawerState};
use crate::routes::router::use_router;
use crate::shared::api::ApiError;
use crate::shared::icons::icon;
use crate::shared::list::state::{back_url, mark_just_edited, peek_snapshot};
use crate::shared::modal_frame::ConfirmModal;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_DETAIL};
use crate::shared::query::{EntityHooks, QueryState};
use crate::shared::storage::BrowserStorage;
use contracts::domain::common::{Entity, EntityId};
use leptos::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use thaw::*;

/// Called once the handler's request has finished
pub type Completion = Box<dyn FnOnce(Result<(), ApiError>)>;
pub type SubmitFn = Arc<dyn Fn(Value, Completion) + Send + Sync>;
pub type DeleteRecordFn = Arc<dyn Fn(Completion) + Send + Sync>;
/// Returns `true` to keep the drawer closed (editing handled elsewhere)
pub type EditFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// What the detail page does on edit, submit and delete
#[derive(Clone)]
pub struct DetailHandlers {
    pub on_edit: Option<EditFn>,
    pub on_submit: SubmitFn,
    pub on_delete: Option<DeleteRecordFn>,
}

impl DetailHandlers {
    /// Update/delete through the entity's mutation hooks
    pub fn for_entity<E: Entity>(hooks: EntityHooks<E>, id: EntityId) -> Self {
        Self {
            on_edit: None,
            on_submit: Arc::new(move |values: Value, done: Completion| {
                hooks.update(id, values, move |result| done(result.map(|_| ())))
            }),
            on_delete: Some(Arc::new(move |done: Completion| hooks.delete(id, done))),
        }
    }

    pub fn on_edit(mut self, handler: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.on_edit = Some(Arc::new(handler));
        self
    }

    pub fn on_submit(mut self, handler: impl Fn(Value, Completion) + Send + Sync + 'static) -> Self {
        self.on_submit = Arc::new(handler);
        self
    }

    pub fn without_delete(mut self) -> Self {
        self.on_delete = None;
        self
    }
}

/// Extra entry of the actions menu
#[derive(Clone)]
pub struct DetailAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub run: Callback<()>,
    pub enabled: Signal<bool>,
}

impl DetailAction {
    pub fn new(label: &'static str, icon: &'static str, run: Callback<()>) -> Self {
        Self {
            label,
            icon,
            run,
            enabled: Signal::derive(|| true),
        }
    }

    pub fn enabled_when(mut self, enabled: Signal<bool>) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Record page: header with actions, caller sections, edit drawer and
/// delete confirmation.
///
/// `?edit=true` / `?delete=true` in the URL open the drawer / confirmation on
/// arrival and are removed from the address bar. Escape closes whichever is
/// open unless a request is running.
#[component]
pub fn DetailLayout<E: Entity>(
    id: EntityId,
    query: QueryState<E>,
    form: FormSpec,
    handlers: DetailHandlers,
    /// Badges next to the title
    #[prop(optional)]
    badges: Option<fn(&E) -> AnyView>,
    #[prop(optional)]
    actions: Vec<DetailAction>,
    #[prop(optional, into)]
    can_edit: MaybeProp<bool>,
    #[prop(optional, into)]
    can_delete: MaybeProp<bool>,
    #[prop(optional)]
    sidebar: Option<ChildrenFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let resource = E::collection_name();
    let router = use_router();

    let drawer = RwSignal::new(DrawerState::Closed);
    let delete_modal = RwSignal::new(DeleteModalState::Closed);
    let submit_error = RwSignal::new(None::<ApiError>);
    let menu_open = RwSignal::new(false);
    let form_values = FormValues::new(&form);
    let form = StoredValue::new(form);
    let handlers = StoredValue::new(handlers);

    let can_edit = Signal::derive(move || can_edit.get().unwrap_or(true));
    let can_delete = Signal::derive(move || {
        can_delete.get().unwrap_or(true) && handlers.with_value(|h| h.on_delete.is_some())
    });

    let go_back = move || {
        let snapshot = peek_snapshot(&BrowserStorage::Session, resource);
        router.navigate(&back_url(resource, snapshot.as_ref()));
    };

    let open_drawer = move || {
        menu_open.set(false);
        let vetoed = handlers.with_value(|h| h.on_edit.as_ref().map(|f| f()).unwrap_or(false));
        if vetoed {
            return;
        }
        submit_error.set(None);
        drawer.update(DrawerState::open);
    };

    let open_delete = move || {
        menu_open.set(false);
        delete_modal.update(DeleteModalState::open);
    };

    // Fill the form when the drawer opens, or as soon as the record arrives
    // if it opened first (URL flag on a cold cache).
    let form_loaded = StoredValue::new(false);
    Effect::new(move |_| {
        if !drawer.with(DrawerState::is_open) {
            form_loaded.set_value(false);
            return;
        }
        if form_loaded.get_value() {
            return;
        }
        if let Some(record) = query.data.with(|d| d.as_ref().map(E::to_form)) {
            form.with_value(|spec| form_values.reset(spec, &record));
            form_loaded.set_value(true);
        }
    });

    let (flags, replacement) = take_action_flags(&router.path_untracked(), &router.search_untracked());
    if let Some(url) = replacement {
        router.replace(&url);
    }
    if flags.edit && can_edit.get_untracked() {
        open_drawer();
    }
    if flags.delete && can_delete.get_untracked() {
        open_delete();
    }

    let submit = move || {
        if !drawer.try_update(DrawerState::submit).unwrap_or(false) {
            return;
        }
        submit_error.set(None);
        let values = form_values.to_json();
        let on_submit = handlers.with_value(|h| h.on_submit.clone());
        on_submit(
            values,
            Box::new(move |result| match result {
                Ok(()) => {
                    mark_just_edited(&BrowserStorage::Session, resource);
                    drawer.try_update(DrawerState::succeed);
                }
                Err(e) => {
                    drawer.try_update(|d| d.fail(e.message.clone()));
                    submit_error.try_set(Some(e));
                }
            }),
        );
    };

    let cancel_drawer = move || {
        if drawer.try_update(DrawerState::cancel).unwrap_or(false) {
            submit_error.set(None);
        }
    };

    let confirm_delete = Callback::new(move |_| {
        if !delete_modal.try_update(DeleteModalState::confirm).unwrap_or(false) {
            return;
        }
        let Some(on_delete) = handlers.with_value(|h| h.on_delete.clone()) else {
            return;
        };
        on_delete(Box::new(move |result| match result {
            Ok(()) => {
                delete_modal.try_update(DeleteModalState::succeed);
                mark_just_edited(&BrowserStorage::Session, resource);
                go_back();
            }
            Err(e) => {
                delete_modal.try_update(|m| m.fail(e.message));
            }
        }));
    });
    let cancel_delete = Callback::new(move |_| {
        delete_modal.update(|m| {
            m.cancel();
        });
    });

    let escape = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() != "Escape" {
            return;
        }
        if drawer.with_untracked(DrawerState::is_open) {
            cancel_drawer();
        } else if delete_modal.with_untracked(DeleteModalState::is_open) {
            delete_modal.update(|m| {
                m.cancel();
            });
        } else {
            menu_open.set(false);
        }
    });
    on_cleanup(move || escape.remove());

    let title = move || {
        query.data.with(|d| match d {
            Some(record) => record.display_name(),
            None => format!("{} #{}", E::element_name(), id),
        })
    };
    let actions = StoredValue::new(actions);
    let submitting = Signal::derive(move || drawer.with(DrawerState::is_submitting));

    view! {
        <PageFrame page_id=page_id(resource, PAGE_CAT_DETAIL) category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <button class="button button--icon" title="Back" on:click=move |_| go_back()>
                        {icon("arrow-left")}
                    </button>
                    <h1 class="page__title">{title}</h1>
                    {move || badges.and_then(|render| query.data.with(|d| d.as_ref().map(render)))}
                </div>
                <div class="page__header-right">
                    <div class="actions-menu">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| menu_open.update(|open| *open = !*open)
                        >
                            {icon("more")}
                            " Actions"
                        </Button>
                        <Show when=move || menu_open.get()>
                            <ul class="actions-menu__list">
                                <Show when=move || can_edit.get()>
                                    <li class="actions-menu__item" on:click=move |_| open_drawer()>
                                        {icon("edit")}
                                        " Edit"
                                    </li>
                                </Show>
                                {actions
                                    .get_value()
                                    .into_iter()
                                    .map(|action| {
                                        let enabled = action.enabled;
                                        view! {
                                            <li
                                                class="actions-menu__item"
                                                class:actions-menu__item--disabled=move || !enabled.get()
                                                on:click=move |_| {
                                                    if enabled.get_untracked() {
                                                        menu_open.set(false);
                                                        action.run.run(());
                                                    }
                                                }
                                            >
                                                {icon(action.icon)}
                                                {format!(" {}", action.label)}
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                                <Show when=move || can_delete.get()>
                                    <li
                                        class="actions-menu__item actions-menu__item--danger"
                                        on:click=move |_| open_delete()
                                    >
                                        {icon("delete")}
                                        " Delete"
                                    </li>
                                </Show>
                            </ul>
                        </Show>
                    </div>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    query.error_message()
                        .map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })
                }}
                <Show
                    when=move || query.data.with(Option::is_some)
                    fallback=move || {
                        view! {
                            <Show when=move || query.is_fetching.get()>
                                <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                                    <Spinner />
                                    "Loading..."
                                </Flex>
                            </Show>
                        }
                    }
                >
                    <div class="detail-layout">
                        <div class="detail-layout__main">{children()}</div>
                        {sidebar.as_ref().map(|s| view! { <aside class="detail-layout__sidebar">{s()}</aside> })}
                    </div>
                </Show>
            </div>

            <Show when=move || drawer.with(DrawerState::is_open)>
                <div class="drawer-overlay">
                    <aside class="drawer">
                        <div class="drawer__header">
                            <h2 class="drawer__title">{format!("Edit {}", E::element_name().to_lowercase())}</h2>
                            <button
                                class="button button--icon"
                                title="Close"
                                disabled=move || submitting.get()
                                on:click=move |_| cancel_drawer()
                            >
                                {icon("x")}
                            </button>
                        </div>
                        <div class="drawer__body">
                            {move || {
                                drawer.with(|d| d.error().map(str::to_string))
                                    .map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })
                            }}
                            <form on:submit=move |ev| {
                                ev.prevent_default();
                                submit();
                            }>
                                <EntityForm
                                    spec=form.get_value()
                                    values=form_values
                                    error=submit_error
                                    disabled=submitting
                                />
                                <div class="drawer__footer">
                                    <button
                                        type="button"
                                        class="button button--secondary"
                                        disabled=move || submitting.get()
                                        on:click=move |_| cancel_drawer()
                                    >
                                        "Cancel"
                                    </button>
                                    <button type="submit" class="button button--primary" disabled=move || submitting.get()>
                                        {move || if submitting.get() { "Saving..." } else { "Save" }}
                                    </button>
                                </div>
                            </form>
                        </div>
                    </aside>
                </div>
            </Show>

            <Show when=move || delete_modal.with(DeleteModalState::is_open)>
                <ConfirmModal
                    title={format!("Delete {}", E::element_name().to_lowercase())}
                    message=Signal::derive(move || format!("Delete \"{}\"? This cannot be undone.", title()))
                    busy=Signal::derive(move || delete_modal.with(DeleteModalState::is_confirming))
                    error=Signal::derive(move || delete_modal.with(|m| m.error().map(str::to_string)))
                    on_confirm=confirm_delete
                    on_cancel=cancel_delete
                />
            </Show>
        </PageFrame>
    }
}
