use crate::shared::detail::{
    select_options, CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection,
    SelectOption,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a003_attribute::aggregate::Attribute;
use contracts::domain::a004_option::aggregate::ProductOption;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn option_form(attributes: Signal<Vec<SelectOption>>) -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("value", "Value").placeholder("#ff0000, XL, ..."),
        FormField::select("id_attribute", "Attribute", attributes),
        FormField::number("position", "Position"),
        FormField::checkbox("active", "Active"),
    ])
}

fn general_rows(o: &ProductOption) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(o.name.clone())),
        ("Value", text_cell(o.value.clone().unwrap_or_default())),
        ("Attribute", text_cell(o.id_attribute.map(|id| format!("#{}", id)).unwrap_or_default())),
        ("Position", text_cell(o.position.to_string())),
        ("Active", flag_cell(o.active)),
    ]
}

#[component]
pub fn OptionDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<ProductOption>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let attributes = select_options(use_entity_hooks::<Attribute>().use_visible());

    view! {
        <DetailLayout
            id=id
            query=query
            form=option_form(attributes)
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=auth.can_signal("options", Action::Edit)
            can_delete=auth.can_signal("options", Action::Delete)
        >
            <RecordSection query=query title="Option" rows=general_rows />
        </DetailLayout>
    }
}

#[component]
pub fn OptionCreate() -> impl IntoView {
    let attributes = select_options(use_entity_hooks::<Attribute>().use_visible());

    view! {
        <CreatePage
            hooks={use_entity_hooks::<ProductOption>()}
            form=option_form(attributes)
            initial={json!({ "position": 0, "active": true })}
        />
    }
}
