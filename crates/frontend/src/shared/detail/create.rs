use super::form::{EntityForm, FormSpec, FormValues};
use crate::routes::router::use_router;
use crate::shared::api::ApiError;
use crate::shared::list::state::{back_url, mark_just_edited, peek_snapshot};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_DETAIL};
use crate::shared::query::EntityHooks;
use crate::shared::storage::BrowserStorage;
use contracts::domain::common::Entity;
use leptos::prelude::*;
use serde_json::Value;

/// New-record page: the entity's form, created through its hooks, then the
/// new record's detail page.
#[component]
pub fn CreatePage<E: Entity>(
    hooks: EntityHooks<E>,
    form: FormSpec,
    /// Initial form state (e.g. `{"active": true}`)
    #[prop(optional)]
    initial: Option<Value>,
) -> impl IntoView {
    let resource = E::collection_name();
    let router = use_router();
    let values = FormValues::new(&form);
    values.reset(&form, &initial.unwrap_or(Value::Null));

    let error = RwSignal::new(None::<ApiError>);
    let saving = RwSignal::new(false);

    let go_back = move || {
        let snapshot = peek_snapshot(&BrowserStorage::Session, resource);
        router.navigate(&back_url(resource, snapshot.as_ref()));
    };

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let form_state = values.to_json();
        error.set(None);
        saving.set(true);
        hooks.create(form_state, move |result| {
            saving.try_set(false);
            match result {
                Ok(created) => {
                    mark_just_edited(&BrowserStorage::Session, resource);
                    router.navigate(&format!("/{}/{}", resource, created.id()));
                }
                Err(e) => {
                    error.try_set(Some(e));
                }
            }
        });
    };

    view! {
        <PageFrame page_id=page_id(resource, PAGE_CAT_DETAIL) category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <button class="button button--icon" title="Back" on:click=move |_| go_back()>
                        {crate::shared::icons::icon("arrow-left")}
                    </button>
                    <h1 class="page__title">{format!("New {}", E::element_name().to_lowercase())}</h1>
                </div>
            </div>
            <div class="page__content">
                {move || {
                    error.with(|e| e.as_ref().map(|e| e.message.clone()))
                        .map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })
                }}
                <form class="create-form" on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }>
                    <EntityForm spec=form values=values error=error disabled=saving />
                    <div class="create-form__footer">
                        <button type="button" class="button button--secondary" on:click=move |_| go_back()>
                            "Cancel"
                        </button>
                        <button type="submit" class="button button--primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Creating..." } else { "Create" }}
                        </button>
                    </div>
                </form>
            </div>
        </PageFrame>
    }
}
