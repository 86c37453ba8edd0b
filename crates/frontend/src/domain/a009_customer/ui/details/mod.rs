use crate::domain::a010_order::ui::details::OrdersTable;
use crate::shared::date_utils::format_optional_datetime;
use crate::shared::detail::{CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a009_customer::aggregate::Customer;
use contracts::domain::a010_order::aggregate::Order;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn customer_form() -> FormSpec {
    FormSpec::new(vec![
        FormField::text("firstname", "First name").required(),
        FormField::text("lastname", "Last name").required(),
        FormField::email("email", "Email").required(),
        FormField::text("phone", "Phone"),
        FormField::text("company", "Company"),
        FormField::text("tax_id", "Tax ID"),
        FormField::checkbox("active", "Active"),
    ])
}

fn general_rows(c: &Customer) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(c.full_name())),
        ("Email", text_cell(c.email.clone())),
        ("Phone", text_cell(c.phone.clone().unwrap_or_default())),
        ("Company", text_cell(c.company.clone().unwrap_or_default())),
        ("Tax ID", text_cell(c.tax_id.clone().unwrap_or_default())),
        ("Active", flag_cell(c.active)),
        ("Created", text_cell(format_optional_datetime(c.created_at.as_deref()))),
    ]
}

#[component]
pub fn CustomerDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Customer>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let orders = use_entity_hooks::<Order>().use_by_customer(Signal::derive(move || Some(id)));

    view! {
        <DetailLayout
            id=id
            query=query
            form=customer_form()
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=auth.can_signal("customers", Action::Edit)
            can_delete=auth.can_signal("customers", Action::Delete)
        >
            <RecordSection query=query title="Customer" rows=general_rows />
            <section class="detail-section">
                <h3 class="detail-section__title">"Orders"</h3>
                <OrdersTable query=orders />
            </section>
        </DetailLayout>
    }
}

#[component]
pub fn CustomerCreate() -> impl IntoView {
    view! {
        <CreatePage
            hooks={use_entity_hooks::<Customer>()}
            form=customer_form()
            initial={json!({ "active": true })}
        />
    }
}
