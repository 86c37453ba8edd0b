use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a002_category::aggregate::Category;
use contracts::system::permissions::Action;
use leptos::prelude::*;

pub fn columns() -> Vec<Column<Category>> {
    vec![
        Column::new("id", "ID", |c: &Category| text_cell(c.id.to_string())),
        Column::new("name", "Name", |c: &Category| text_cell(c.name.clone())),
        Column::new("parent_id", "Parent", |c: &Category| {
            text_cell(c.parent_id.map(|id| format!("#{}", id)).unwrap_or_default())
        }),
        Column::new("position", "Position", |c: &Category| text_cell(c.position.to_string())).right(),
        Column::new("visible", "Visible", |c: &Category| flag_cell(c.visible)),
        Column::new("active", "Active", |c: &Category| flag_cell(c.active)),
    ]
}

#[component]
pub fn CategoryList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Category>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("categories", Action::Create)
            can_edit=auth.can_signal("categories", Action::Edit)
            can_delete=auth.can_signal("categories", Action::Delete)
        />
    }
}
