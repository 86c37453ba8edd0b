use crate::domain::a011_invoice::ui::list::{aeat_badge, INVOICE_CURRENCY};
use crate::shared::api::{ApiError, EntityApi};
use crate::shared::components::ui::badge::{Badge, BadgeVariant};
use crate::shared::date_utils::{format_date, format_money, format_optional_datetime};
use crate::shared::detail::{
    select_options, CreatePage, DetailAction, DetailHandlers, DetailLayout, FormField, FormSpec, InfoGrid,
    InfoRow, RecordSection, SelectOption,
};
use crate::shared::dialog::{alert, confirm};
use crate::shared::list::text_cell;
use crate::shared::query::{use_entity_hooks, EntityHooks};
use crate::system::auth::context::use_auth;
use contracts::domain::a009_customer::aggregate::Customer;
use contracts::domain::a011_invoice::aggregate::Invoice;
use contracts::domain::common::EntityId;
use contracts::enums::VerifactuStatus;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;

pub fn invoice_form(customers: Signal<Vec<SelectOption>>) -> FormSpec {
    FormSpec::new(vec![
        FormField::text("series", "Series"),
        FormField::text("number", "Number"),
        FormField::number("id_order", "Order ID"),
        FormField::select("id_customer", "Customer", customers),
        FormField::date("issue_date", "Issue date"),
        FormField::textarea("notes", "Notes"),
    ])
}

fn general_rows(i: &Invoice) -> Vec<InfoRow> {
    vec![
        ("Number", text_cell(i.full_number())),
        ("Customer", text_cell(i.customer_name.clone().unwrap_or_default())),
        ("Order", text_cell(i.id_order.map(|id| format!("#{}", id)).unwrap_or_default())),
        ("Issue date", text_cell(i.issue_date.as_deref().map(format_date).unwrap_or_default())),
        ("Status", text_cell(i.status.clone())),
        ("Notes", text_cell(i.notes.clone().unwrap_or_default())),
    ]
}

fn amount_rows(i: &Invoice) -> Vec<InfoRow> {
    vec![
        ("Subtotal", text_cell(format_money(i.subtotal, INVOICE_CURRENCY))),
        ("Tax", text_cell(format_money(i.tax_total, INVOICE_CURRENCY))),
        ("Total", text_cell(format_money(i.total, INVOICE_CURRENCY))),
    ]
}

fn verifactu_rows(i: &Invoice) -> Vec<InfoRow> {
    vec![
        ("Status", aeat_badge(i.aeat_status())),
        ("CSV", text_cell(i.verifactu_csv.clone().unwrap_or_default())),
        ("Sent", text_cell(format_optional_datetime(i.verifactu_sent_at.as_deref()))),
    ]
}

fn header_badges(i: &Invoice) -> AnyView {
    view! {
        {aeat_badge(i.aeat_status())}
        {i.is_cancelled().then(|| view! { <Badge variant=BadgeVariant::Error>"Cancelled"</Badge> })}
    }
    .into_any()
}

/// Runs one AEAT request; failures are alerted, success goes to `on_success`.
fn run_aeat_action<T, F, Fut>(
    hooks: EntityHooks<Invoice>,
    busy: RwSignal<bool>,
    request: F,
    on_success: impl FnOnce(T) + 'static,
) where
    F: FnOnce(EntityApi<Invoice>) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    if busy.get_untracked() {
        return;
    }
    busy.set(true);
    let api = hooks.api();
    spawn_local(async move {
        let result = request(api).await;
        busy.try_set(false);
        match result {
            Ok(value) => on_success(value),
            Err(e) => alert(&e.to_string()),
        }
    });
}

fn aeat_actions(hooks: EntityHooks<Invoice>, id: EntityId, status: Signal<VerifactuStatus>, can_edit: Signal<bool>) -> Vec<DetailAction> {
    let busy = RwSignal::new(false);

    let send = Callback::new(move |_: ()| {
        run_aeat_action(
            hooks,
            busy,
            move |api| async move { api.send_to_aeat(id).await },
            move |()| hooks.invalidate_aeat(id),
        )
    });
    let check = Callback::new(move |_: ()| {
        run_aeat_action(
            hooks,
            busy,
            move |api| async move { api.check_aeat_status(id).await },
            move |status| hooks.store_aeat_status(id, &status),
        )
    });
    let cancel = Callback::new(move |_: ()| {
        if !confirm("Cancel this invoice at AEAT? This cannot be undone.") {
            return;
        }
        run_aeat_action(
            hooks,
            busy,
            move |api| async move { api.cancel(id).await },
            move |()| hooks.invalidate_aeat(id),
        )
    });

    vec![
        DetailAction::new("Send to AEAT", "send", send)
            .enabled_when(Signal::derive(move || can_edit.get() && !busy.get() && status.get().can_send())),
        DetailAction::new("Check AEAT status", "refresh", check)
            .enabled_when(Signal::derive(move || !busy.get() && status.get() != VerifactuStatus::NotSent)),
        DetailAction::new("Cancel invoice", "ban", cancel)
            .enabled_when(Signal::derive(move || can_edit.get() && !busy.get() && status.get().can_cancel())),
    ]
}

#[component]
pub fn InvoiceDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Invoice>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let status = Signal::derive(move || query.data.with(|i| i.as_ref().map(Invoice::aeat_status).unwrap_or_default()));
    let aeat = hooks.use_aeat_status(id, Signal::derive(move || status.get() != VerifactuStatus::NotSent));
    let can_edit = auth.can_signal("invoices", Action::Edit);
    let customers = select_options(use_entity_hooks::<Customer>().use_active());

    let last_check = move || {
        aeat.data.get().map(|s| {
            let rows: Vec<InfoRow> = vec![
                ("AEAT answer", s.status.map(aeat_badge).unwrap_or_else(|| text_cell(""))),
                ("Message", text_cell(s.message.unwrap_or_default())),
                ("Checked", text_cell(format_optional_datetime(s.checked_at.as_deref()))),
            ];
            view! { <InfoGrid rows=rows /> }
        })
    };

    view! {
        <DetailLayout
            id=id
            query=query
            form=invoice_form(customers)
            handlers=DetailHandlers::for_entity(hooks, id)
            badges=header_badges
            actions=aeat_actions(hooks, id, status, can_edit)
            can_edit=can_edit
            can_delete=auth.can_signal("invoices", Action::Delete)
            sidebar=Arc::new(move || {
                view! {
                    <RecordSection query=query title="Verifactu" rows=verifactu_rows />
                    <section class="detail-section">{last_check}</section>
                }
                .into_any()
            })
        >
            <RecordSection query=query title="Invoice" rows=general_rows />
            <RecordSection query=query title="Amounts" rows=amount_rows />
        </DetailLayout>
    }
}

#[component]
pub fn InvoiceCreate() -> impl IntoView {
    let customers = select_options(use_entity_hooks::<Customer>().use_active());

    view! {
        <CreatePage
            hooks={use_entity_hooks::<Invoice>()}
            form=invoice_form(customers)
            initial={json!({ "issue_date": chrono::Utc::now().format("%Y-%m-%d").to_string() })}
        />
    }
}
