use crate::shared::detail::{CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a005_marketplace::aggregate::Marketplace;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn marketplace_form() -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("code", "Code").required().placeholder("AMZ"),
        FormField::text("url", "URL").placeholder("https://"),
        FormField::textarea("description", "Description"),
        FormField::checkbox("visible", "Visible"),
        FormField::checkbox("active", "Active"),
    ])
}

fn general_rows(m: &Marketplace) -> Vec<InfoRow> {
    let url = m.url.clone().unwrap_or_default();
    let link = if url.is_empty() {
        text_cell("")
    } else {
        let href = url.clone();
        view! { <a href=href target="_blank" rel="noopener">{url}</a> }.into_any()
    };
    vec![
        ("Name", text_cell(m.name.clone())),
        ("Code", text_cell(m.code.clone())),
        ("URL", link),
        ("Description", text_cell(m.description.clone().unwrap_or_default())),
        ("Visible", flag_cell(m.visible)),
        ("Active", flag_cell(m.active)),
    ]
}

#[component]
pub fn MarketplaceDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Marketplace>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));

    view! {
        <DetailLayout
            id=id
            query=query
            form=marketplace_form()
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=auth.can_signal("marketplaces", Action::Edit)
            can_delete=auth.can_signal("marketplaces", Action::Delete)
        >
            <RecordSection query=query title="General" rows=general_rows />
        </DetailLayout>
    }
}

#[component]
pub fn MarketplaceCreate() -> impl IntoView {
    view! {
        <CreatePage
            hooks={use_entity_hooks::<Marketplace>()}
            form=marketplace_form()
            initial={json!({ "visible": true, "active": true })}
        />
    }
}
