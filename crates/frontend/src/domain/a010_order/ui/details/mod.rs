use crate::domain::a010_order::ui::list::{columns, status_badge};
use crate::domain::a011_invoice::ui::list::columns as invoice_columns;
use crate::shared::date_utils::{format_money, format_optional_datetime};
use crate::shared::detail::{
    select_options, CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection,
    RelatedTable, SelectOption,
};
use crate::shared::list::text_cell;
use crate::shared::query::{use_entity_hooks, QueryState};
use crate::system::auth::context::use_auth;
use contracts::domain::a007_store::aggregate::Store;
use contracts::domain::a009_customer::aggregate::Customer;
use contracts::domain::a010_order::aggregate::{Order, OrderAddress, OrderLine};
use contracts::domain::a011_invoice::aggregate::Invoice;
use contracts::domain::common::{EntityId, Paginated};
use contracts::enums::OrderStatus;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;
use std::sync::Arc;

pub fn status_options() -> Signal<Vec<SelectOption>> {
    let options: Vec<SelectOption> = OrderStatus::all()
        .into_iter()
        .map(|s| (s.code().to_string(), s.display_name().to_string()))
        .collect();
    Signal::derive(move || options.clone())
}

pub fn order_form(customers: Signal<Vec<SelectOption>>, stores: Signal<Vec<SelectOption>>) -> FormSpec {
    FormSpec::new(vec![
        FormField::select("id_customer", "Customer", customers),
        FormField::select("id_store", "Store", stores),
        FormField::select("status", "Status", status_options()).required(),
        FormField::text("payment_method", "Payment method"),
        FormField::textarea("notes", "Notes"),
    ])
}

/// Orders of another record (customer page)
#[component]
pub fn OrdersTable(query: QueryState<Paginated<Order>>) -> impl IntoView {
    view! { <RelatedTable query=query columns=columns() empty_text="No orders" /> }
}

fn general_rows(o: &Order) -> Vec<InfoRow> {
    vec![
        ("Reference", text_cell(o.reference.clone())),
        ("Status", status_badge(o)),
        ("Customer", text_cell(o.customer_name.clone().unwrap_or_default())),
        ("Store", text_cell(o.id_store.map(|id| format!("#{}", id)).unwrap_or_default())),
        ("Payment method", text_cell(o.payment_method.clone().unwrap_or_default())),
        ("Date", text_cell(format_optional_datetime(o.created_at.as_deref()))),
        ("Notes", text_cell(o.notes.clone().unwrap_or_default())),
    ]
}

fn total_rows(o: &Order) -> Vec<InfoRow> {
    vec![
        ("Total", text_cell(format_money(o.total, &o.currency))),
        ("Currency", text_cell(o.currency.clone())),
    ]
}

#[component]
fn OrderLines(query: QueryState<Vec<OrderLine>>, currency: Signal<String>) -> impl IntoView {
    view! {
        <section class="detail-section">
            <h3 class="detail-section__title">"Products"</h3>
            {move || query.error_message().map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })}
            <table class="table__data table--striped table--compact">
                <thead>
                    <tr>
                        <th class="table__header-cell">"Product"</th>
                        <th class="table__header-cell">"Reference"</th>
                        <th class="table__header-cell text-right">"Qty"</th>
                        <th class="table__header-cell text-right">"Unit price"</th>
                        <th class="table__header-cell text-right">"Total"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let currency = currency.get();
                        let lines = query.data.get().unwrap_or_default();
                        if lines.is_empty() {
                            return view! {
                                <tr><td class="table__cell table__cell--empty" colspan="5">"No products"</td></tr>
                            }
                            .into_any();
                        }
                        lines
                            .into_iter()
                            .map(|line| {
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{line.product_name}</td>
                                        <td class="table__cell">{line.reference.unwrap_or_default()}</td>
                                        <td class="table__cell text-right">{line.quantity}</td>
                                        <td class="table__cell text-right">{format_money(line.unit_price, &currency)}</td>
                                        <td class="table__cell text-right">{format_money(line.total, &currency)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </section>
    }
}

fn address_card(a: OrderAddress) -> impl IntoView {
    let locality = [a.postal_code, a.city, a.country]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let title = match a.address_type.as_str() {
        "billing" => "Billing address".to_string(),
        "shipping" => "Shipping address".to_string(),
        other => other.to_string(),
    };

    view! {
        <div class="address-card">
            <h4 class="address-card__title">{title}</h4>
            <div>{a.name}</div>
            <div>{a.address}</div>
            <div>{locality}</div>
            {a.phone.map(|p| view! { <div class="address-card__phone">{p}</div> })}
        </div>
    }
}

#[component]
fn OrderAddresses(query: QueryState<Vec<OrderAddress>>) -> impl IntoView {
    view! {
        <section class="detail-section">
            <h3 class="detail-section__title">"Addresses"</h3>
            {move || query.error_message().map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })}
            <div class="address-list">
                {move || query.data.get().unwrap_or_default().into_iter().map(address_card).collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn OrderDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Order>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let lines = hooks.use_lines(id);
    let addresses = hooks.use_addresses(id);
    let invoices = use_entity_hooks::<Invoice>().use_by_order(Signal::derive(move || Some(id)));
    let currency = Signal::derive(move || query.data.with(|o| o.as_ref().map(|o| o.currency.clone()).unwrap_or_default()));
    let customers = select_options(use_entity_hooks::<Customer>().use_active());
    let stores = select_options(use_entity_hooks::<Store>().use_active());

    view! {
        <DetailLayout
            id=id
            query=query
            form=order_form(customers, stores)
            handlers=DetailHandlers::for_entity(hooks, id)
            badges=status_badge
            can_edit=auth.can_signal("orders", Action::Edit)
            can_delete=auth.can_signal("orders", Action::Delete)
            sidebar=Arc::new(move || view! { <RecordSection query=query title="Totals" rows=total_rows /> }.into_any())
        >
            <RecordSection query=query title="Order" rows=general_rows />
            <OrderLines query=lines currency=currency />
            <OrderAddresses query=addresses />
            <section class="detail-section">
                <h3 class="detail-section__title">"Invoices"</h3>
                <RelatedTable query=invoices columns=invoice_columns() empty_text="Not invoiced yet" />
            </section>
        </DetailLayout>
    }
}

#[component]
pub fn OrderCreate() -> impl IntoView {
    let customers = select_options(use_entity_hooks::<Customer>().use_active());
    let stores = select_options(use_entity_hooks::<Store>().use_active());

    view! {
        <CreatePage
            hooks={use_entity_hooks::<Order>()}
            form=order_form(customers, stores)
            initial={json!({ "status": OrderStatus::Pending.code() })}
        />
    }
}
