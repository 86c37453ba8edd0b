use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a004_option::aggregate::ProductOption;
use contracts::system::permissions::Action;
use leptos::prelude::*;

pub fn columns() -> Vec<Column<ProductOption>> {
    vec![
        Column::new("id", "ID", |o: &ProductOption| text_cell(o.id.to_string())),
        Column::new("name", "Name", |o: &ProductOption| text_cell(o.name.clone())),
        Column::new("value", "Value", |o: &ProductOption| text_cell(o.value.clone().unwrap_or_default())),
        Column::new("id_attribute", "Attribute", |o: &ProductOption| {
            text_cell(o.id_attribute.map(|id| format!("#{}", id)).unwrap_or_default())
        }),
        Column::new("position", "Position", |o: &ProductOption| text_cell(o.position.to_string())).right(),
        Column::new("active", "Active", |o: &ProductOption| flag_cell(o.active)),
    ]
}

#[component]
pub fn OptionList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<ProductOption>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("options", Action::Create)
            can_edit=auth.can_signal("options", Action::Edit)
            can_delete=auth.can_signal("options", Action::Delete)
        />
    }
}
