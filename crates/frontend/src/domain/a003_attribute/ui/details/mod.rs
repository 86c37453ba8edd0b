use crate::domain::a004_option::ui::list::columns as option_columns;
use crate::shared::detail::{
    select_options, static_options, CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow,
    RecordSection, RelatedTable, SelectOption,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_attribute::aggregate::{Attribute, ATTRIBUTE_TYPES};
use contracts::domain::a004_option::aggregate::ProductOption;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn attribute_form(categories: Signal<Vec<SelectOption>>) -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::select("id_category", "Category", categories),
        FormField::select("attribute_type", "Type", static_options(ATTRIBUTE_TYPES)),
        FormField::number("position", "Position"),
        FormField::checkbox("visible", "Visible"),
        FormField::checkbox("active", "Active"),
    ])
}

fn general_rows(a: &Attribute) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(a.name.clone())),
        ("Type", text_cell(a.attribute_type.clone().unwrap_or_default())),
        ("Category", text_cell(a.id_category.map(|id| format!("#{}", id)).unwrap_or_default())),
        ("Position", text_cell(a.position.to_string())),
        ("Visible", flag_cell(a.visible)),
        ("Active", flag_cell(a.active)),
    ]
}

#[component]
pub fn AttributeDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Attribute>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let categories = select_options(use_entity_hooks::<Category>().use_visible());
    let options = use_entity_hooks::<ProductOption>().use_by_attribute(Signal::derive(move || Some(id)));

    view! {
        <DetailLayout
            id=id
            query=query
            form=attribute_form(categories)
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=auth.can_signal("attributes", Action::Edit)
            can_delete=auth.can_signal("attributes", Action::Delete)
        >
            <RecordSection query=query title="Attribute" rows=general_rows />
            <section class="detail-section">
                <h3 class="detail-section__title">"Options"</h3>
                <RelatedTable query=options columns=option_columns() empty_text="No options" />
            </section>
        </DetailLayout>
    }
}

#[component]
pub fn AttributeCreate() -> impl IntoView {
    let categories = select_options(use_entity_hooks::<Category>().use_visible());

    view! {
        <CreatePage
            hooks={use_entity_hooks::<Attribute>()}
            form=attribute_form(categories)
            initial={json!({ "attribute_type": "select", "position": 0, "visible": true, "active": true })}
        />
    }
}
