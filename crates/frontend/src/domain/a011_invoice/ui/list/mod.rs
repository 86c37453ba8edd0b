use crate::shared::components::ui::badge::{Badge, BadgeVariant};
use crate::shared::date_utils::{format_date, format_money};
use crate::shared::list::{text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a011_invoice::aggregate::Invoice;
use contracts::enums::VerifactuStatus;
use contracts::system::permissions::Action;
use leptos::prelude::*;

pub const INVOICE_CURRENCY: &str = "EUR";

pub fn aeat_variant(status: VerifactuStatus) -> BadgeVariant {
    match status {
        VerifactuStatus::NotSent => BadgeVariant::Neutral,
        VerifactuStatus::Pending => BadgeVariant::Primary,
        VerifactuStatus::Accepted => BadgeVariant::Success,
        VerifactuStatus::AcceptedWithErrors => BadgeVariant::Warning,
        VerifactuStatus::Rejected | VerifactuStatus::Cancelled => BadgeVariant::Error,
    }
}

pub fn aeat_badge(status: VerifactuStatus) -> AnyView {
    view! { <Badge variant=aeat_variant(status)>{status.display_name()}</Badge> }.into_any()
}

pub fn columns() -> Vec<Column<Invoice>> {
    vec![
        Column::new("id", "ID", |i: &Invoice| text_cell(i.id.to_string())),
        Column::new("number", "Number", |i: &Invoice| text_cell(i.full_number())),
        Column::new("customer_name", "Customer", |i: &Invoice| {
            text_cell(i.customer_name.clone().unwrap_or_default())
        }),
        Column::new("issue_date", "Date", |i: &Invoice| {
            text_cell(i.issue_date.as_deref().map(format_date).unwrap_or_default())
        }),
        Column::new("total", "Total", |i: &Invoice| text_cell(format_money(i.total, INVOICE_CURRENCY))).right(),
        Column::new("status", "Status", |i: &Invoice| text_cell(i.status.clone())),
        Column::new("verifactu_status", "AEAT", |i: &Invoice| aeat_badge(i.aeat_status())),
    ]
}

#[component]
pub fn InvoiceList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Invoice>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("invoices", Action::Create)
            can_edit=auth.can_signal("invoices", Action::Edit)
            can_delete=auth.can_signal("invoices", Action::Delete)
        />
    }
}
