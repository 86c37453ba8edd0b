use crate::shared::date_utils::format_optional_datetime;
use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a009_customer::aggregate::Customer;
use contracts::system::permissions::Action;
use leptos::prelude::*;

fn columns() -> Vec<Column<Customer>> {
    vec![
        Column::new("id", "ID", |c: &Customer| text_cell(c.id.to_string())),
        Column::new("lastname", "Name", |c: &Customer| text_cell(c.full_name())),
        Column::new("email", "Email", |c: &Customer| text_cell(c.email.clone())),
        Column::new("company", "Company", |c: &Customer| text_cell(c.company.clone().unwrap_or_default())),
        Column::new("phone", "Phone", |c: &Customer| text_cell(c.phone.clone().unwrap_or_default())).unsortable(),
        Column::new("active", "Active", |c: &Customer| flag_cell(c.active)),
        Column::new("created_at", "Created", |c: &Customer| {
            text_cell(format_optional_datetime(c.created_at.as_deref()))
        }),
    ]
}

#[component]
pub fn CustomerList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Customer>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("customers", Action::Create)
            can_edit=auth.can_signal("customers", Action::Edit)
            can_delete=auth.can_signal("customers", Action::Delete)
        />
    }
}
