use crate::shared::components::ui::badge::{Badge, BadgeVariant};
use crate::shared::date_utils::{format_money, format_optional_datetime};
use crate::shared::list::{text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a010_order::aggregate::Order;
use contracts::enums::OrderStatus;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use std::sync::Arc;

fn status_variant(status: Option<OrderStatus>) -> BadgeVariant {
    match status {
        Some(OrderStatus::Pending) => BadgeVariant::Warning,
        Some(OrderStatus::Paid | OrderStatus::Processing) => BadgeVariant::Primary,
        Some(OrderStatus::Shipped | OrderStatus::Delivered) => BadgeVariant::Success,
        Some(OrderStatus::Cancelled | OrderStatus::Refunded) => BadgeVariant::Error,
        None => BadgeVariant::Neutral,
    }
}

/// Unknown codes are shown as received
pub fn status_badge(o: &Order) -> AnyView {
    let status = o.status();
    let label = status
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| o.status.clone());
    view! { <Badge variant=status_variant(status)>{label}</Badge> }.into_any()
}

pub fn columns() -> Vec<Column<Order>> {
    vec![
        Column::new("id", "ID", |o: &Order| text_cell(o.id.to_string())),
        Column::new("reference", "Reference", |o: &Order| text_cell(o.reference.clone())),
        Column::new("customer_name", "Customer", |o: &Order| {
            text_cell(o.customer_name.clone().unwrap_or_default())
        }),
        Column::new("status", "Status", status_badge),
        Column::new("total", "Total", |o: &Order| text_cell(format_money(o.total, &o.currency))).right(),
        Column::new("created_at", "Date", |o: &Order| {
            text_cell(format_optional_datetime(o.created_at.as_deref()))
        }),
    ]
}

#[component]
pub fn OrderList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Order>();
    let status = RwSignal::new(None::<OrderStatus>);

    let status_filter = move || {
        view! {
            <select
                class="list-toolbar__filter"
                on:change=move |ev| status.set(OrderStatus::from_code(&event_target_value(&ev)))
            >
                <option value="" selected=move || status.get().is_none()>"All statuses"</option>
                {OrderStatus::all()
                    .into_iter()
                    .map(|s| {
                        view! {
                            <option value=s.code() selected=move || status.get() == Some(s)>
                                {s.display_name()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any()
    };

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| {
                hooks.use_list(move || {
                    let filters = filters.get();
                    match status.get() {
                        Some(s) => filters.with("status", s.code()),
                        None => filters,
                    }
                })
            }
            toolbar=Arc::new(status_filter)
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("orders", Action::Create)
            can_edit=auth.can_signal("orders", Action::Edit)
            can_delete=auth.can_signal("orders", Action::Delete)
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_variants() {
        assert_eq!(status_variant(Some(OrderStatus::Pending)), BadgeVariant::Warning);
        assert_eq!(status_variant(Some(OrderStatus::Delivered)), BadgeVariant::Success);
        assert_eq!(status_variant(Some(OrderStatus::Refunded)), BadgeVariant::Error);
        assert_eq!(status_variant(OrderStatus::from_code("on_hold")), BadgeVariant::Neutral);
    }
}
