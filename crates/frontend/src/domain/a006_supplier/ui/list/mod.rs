use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::system::permissions::Action;
use leptos::prelude::*;

fn columns() -> Vec<Column<Supplier>> {
    vec![
        Column::new("id", "ID", |s: &Supplier| text_cell(s.id.to_string())),
        Column::new("name", "Name", |s: &Supplier| text_cell(s.name.clone())),
        Column::new("tax_id", "Tax ID", |s: &Supplier| text_cell(s.tax_id.clone().unwrap_or_default())),
        Column::new("email", "Email", |s: &Supplier| text_cell(s.email.clone().unwrap_or_default())),
        Column::new("phone", "Phone", |s: &Supplier| text_cell(s.phone.clone().unwrap_or_default())).unsortable(),
        Column::new("city", "City", |s: &Supplier| text_cell(s.city.clone().unwrap_or_default())),
        Column::new("active", "Active", |s: &Supplier| flag_cell(s.active)),
    ]
}

#[component]
pub fn SupplierList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Supplier>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("suppliers", Action::Create)
            can_edit=auth.can_signal("suppliers", Action::Edit)
            can_delete=auth.can_signal("suppliers", Action::Delete)
        />
    }
}
