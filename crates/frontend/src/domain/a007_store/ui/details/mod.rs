use crate::shared::detail::{
    select_options, CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection,
    SelectOption,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a005_marketplace::aggregate::Marketplace;
use contracts::domain::a007_store::aggregate::Store;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn store_form(marketplaces: Signal<Vec<SelectOption>>) -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("code", "Code").required(),
        FormField::text("url", "URL").placeholder("https://"),
        FormField::email("email", "Email"),
        FormField::text("phone", "Phone"),
        FormField::select("id_marketplace", "Marketplace", marketplaces),
        FormField::checkbox("active", "Active"),
    ])
}

fn general_rows(s: &Store) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(s.name.clone())),
        ("Code", text_cell(s.code.clone())),
        ("URL", text_cell(s.url.clone().unwrap_or_default())),
        ("Email", text_cell(s.email.clone().unwrap_or_default())),
        ("Phone", text_cell(s.phone.clone().unwrap_or_default())),
        ("Marketplace", text_cell(s.id_marketplace.map(|id| format!("#{}", id)).unwrap_or_default())),
        ("Active", flag_cell(s.active)),
    ]
}

#[component]
pub fn StoreDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Store>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let marketplaces = select_options(use_entity_hooks::<Marketplace>().use_active());

    view! {
        <DetailLayout
            id=id
            query=query
            form=store_form(marketplaces)
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=auth.can_signal("stores", Action::Edit)
            can_delete=auth.can_signal("stores", Action::Delete)
        >
            <RecordSection query=query title="General" rows=general_rows />
        </DetailLayout>
    }
}

#[component]
pub fn StoreCreate() -> impl IntoView {
    let marketplaces = select_options(use_entity_hooks::<Marketplace>().use_active());

    view! {
        <CreatePage
            hooks={use_entity_hooks::<Store>()}
            form=store_form(marketplaces)
            initial={json!({ "active": true })}
        />
    }
}
