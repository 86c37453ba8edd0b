use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a005_marketplace::aggregate::Marketplace;
use contracts::system::permissions::Action;
use leptos::prelude::*;

fn columns() -> Vec<Column<Marketplace>> {
    vec![
        Column::new("id", "ID", |m: &Marketplace| text_cell(m.id.to_string())),
        Column::new("code", "Code", |m: &Marketplace| text_cell(m.code.clone())),
        Column::new("name", "Name", |m: &Marketplace| text_cell(m.name.clone())),
        Column::new("url", "URL", |m: &Marketplace| text_cell(m.url.clone().unwrap_or_default())).unsortable(),
        Column::new("visible", "Visible", |m: &Marketplace| flag_cell(m.visible)),
        Column::new("active", "Active", |m: &Marketplace| flag_cell(m.active)),
    ]
}

#[component]
pub fn MarketplaceList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Marketplace>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("marketplaces", Action::Create)
            can_edit=auth.can_signal("marketplaces", Action::Edit)
            can_delete=auth.can_signal("marketplaces", Action::Delete)
        />
    }
}
