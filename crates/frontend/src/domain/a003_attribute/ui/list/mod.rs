use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a003_attribute::aggregate::Attribute;
use contracts::system::permissions::Action;
use leptos::prelude::*;

pub fn columns() -> Vec<Column<Attribute>> {
    vec![
        Column::new("id", "ID", |a: &Attribute| text_cell(a.id.to_string())),
        Column::new("name", "Name", |a: &Attribute| text_cell(a.name.clone())),
        Column::new("attribute_type", "Type", |a: &Attribute| {
            text_cell(a.attribute_type.clone().unwrap_or_default())
        }),
        Column::new("id_category", "Category", |a: &Attribute| {
            text_cell(a.id_category.map(|id| format!("#{}", id)).unwrap_or_default())
        }),
        Column::new("position", "Position", |a: &Attribute| text_cell(a.position.to_string())).right(),
        Column::new("visible", "Visible", |a: &Attribute| flag_cell(a.visible)),
        Column::new("active", "Active", |a: &Attribute| flag_cell(a.active)),
    ]
}

#[component]
pub fn AttributeList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Attribute>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("attributes", Action::Create)
            can_edit=auth.can_signal("attributes", Action::Edit)
            can_delete=auth.can_signal("attributes", Action::Delete)
        />
    }
}
