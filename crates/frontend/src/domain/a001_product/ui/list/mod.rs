use crate::shared::components::ui::badge::{Badge, BadgeVariant};
use crate::shared::date_utils::format_money;
use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a001_product::aggregate::Product;
use contracts::system::permissions::Action;
use leptos::prelude::*;

pub const PRODUCT_CURRENCY: &str = "EUR";

/// Stock count, flagged when nothing is left
pub fn stock_cell(p: &Product) -> AnyView {
    if p.is_out_of_stock() {
        let label = format!("{} · Out of stock", p.stock);
        view! { <Badge variant=BadgeVariant::Error>{label}</Badge> }.into_any()
    } else {
        text_cell(p.stock.to_string())
    }
}

pub fn columns() -> Vec<Column<Product>> {
    vec![
        Column::new("id", "ID", |p: &Product| text_cell(p.id.to_string())),
        Column::new("name", "Name", |p: &Product| text_cell(p.name.clone())),
        Column::new("reference", "Reference", |p: &Product| text_cell(p.reference.clone().unwrap_or_default())),
        Column::new("price", "Price", |p: &Product| text_cell(format_money(p.price, PRODUCT_CURRENCY))).right(),
        Column::new("stock", "Stock", stock_cell).right(),
        Column::new("visible", "Visible", |p: &Product| flag_cell(p.visible)),
        Column::new("active", "Active", |p: &Product| flag_cell(p.active)),
    ]
}

#[component]
pub fn ProductList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Product>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("products", Action::Create)
            can_edit=auth.can_signal("products", Action::Edit)
            can_delete=auth.can_signal("products", Action::Delete)
        />
    }
}
