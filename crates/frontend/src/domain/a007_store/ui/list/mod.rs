use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a007_store::aggregate::Store;
use contracts::system::permissions::Action;
use leptos::prelude::*;

fn columns() -> Vec<Column<Store>> {
    vec![
        Column::new("id", "ID", |s: &Store| text_cell(s.id.to_string())),
        Column::new("code", "Code", |s: &Store| text_cell(s.code.clone())),
        Column::new("name", "Name", |s: &Store| text_cell(s.name.clone())),
        Column::new("url", "URL", |s: &Store| text_cell(s.url.clone().unwrap_or_default())).unsortable(),
        Column::new("email", "Email", |s: &Store| text_cell(s.email.clone().unwrap_or_default())),
        Column::new("active", "Active", |s: &Store| flag_cell(s.active)),
    ]
}

#[component]
pub fn StoreList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Store>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("stores", Action::Create)
            can_edit=auth.can_signal("stores", Action::Edit)
            can_delete=auth.can_signal("stores", Action::Delete)
        />
    }
}
