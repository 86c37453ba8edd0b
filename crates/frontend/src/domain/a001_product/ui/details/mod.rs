use crate::domain::a001_product::ui::list::{stock_cell, PRODUCT_CURRENCY};
use crate::shared::components::ui::badge::{Badge, BadgeVariant};
use crate::shared::date_utils::{format_money, format_optional_datetime};
use crate::shared::detail::{
    select_options, CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection,
    SelectOption,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;
use std::sync::Arc;

/// Choices of the two category selects. The category list narrows to the
/// subcategories of the chosen parent; with no parent it offers every
/// visible category.
#[derive(Clone, Copy)]
pub struct CategoryPicker {
    pub parent: RwSignal<String>,
    pub parents: Signal<Vec<SelectOption>>,
    pub categories: Signal<Vec<SelectOption>>,
}

impl CategoryPicker {
    pub fn new() -> Self {
        let hooks = use_entity_hooks::<Category>();
        let parent = RwSignal::new(String::new());
        let parent_id = Signal::derive(move || parent_id_of(&parent.get()));

        let parents = select_options(hooks.use_root());
        let visible = select_options(hooks.use_visible());
        let children = select_options(hooks.use_by_parent(parent_id));
        let categories = Signal::derive(move || {
            if parent_id.get().is_some() {
                children.get()
            } else {
                visible.get()
            }
        });

        Self {
            parent,
            parents,
            categories,
        }
    }
}

impl Default for CategoryPicker {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_id_of(value: &str) -> Option<EntityId> {
    value.trim().parse::<EntityId>().ok().filter(|id| *id > 0)
}

/// `category_group` only drives the category choices; it is not part of the
/// product payload.
pub fn product_form(categories: CategoryPicker, suppliers: Signal<Vec<SelectOption>>) -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("reference", "Reference"),
        FormField::textarea("description", "Description"),
        FormField::number("price", "Price"),
        FormField::number("stock", "Stock"),
        FormField::select("category_group", "Parent category", categories.parents).bind(categories.parent),
        FormField::select("id_category", "Category", categories.categories),
        FormField::select("id_supplier", "Supplier", suppliers),
        FormField::checkbox("visible", "Visible"),
        FormField::checkbox("active", "Active"),
    ])
}

fn general_rows(p: &Product) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(p.name.clone())),
        ("Reference", text_cell(p.reference.clone().unwrap_or_default())),
        ("Price", text_cell(format_money(p.price, PRODUCT_CURRENCY))),
        ("Stock", stock_cell(p)),
        ("Category", text_cell(p.id_category.map(|id| format!("#{}", id)).unwrap_or_default())),
        ("Supplier", text_cell(p.id_supplier.map(|id| format!("#{}", id)).unwrap_or_default())),
        ("Visible", flag_cell(p.visible)),
        ("Active", flag_cell(p.active)),
    ]
}

fn description_rows(p: &Product) -> Vec<InfoRow> {
    vec![("Description", text_cell(p.description.clone().unwrap_or_default()))]
}

fn date_rows(p: &Product) -> Vec<InfoRow> {
    vec![
        ("Created", text_cell(format_optional_datetime(p.created_at.as_deref()))),
        ("Updated", text_cell(format_optional_datetime(p.updated_at.as_deref()))),
    ]
}

fn header_badges(p: &Product) -> AnyView {
    view! {
        {(!p.active).then(|| view! { <Badge>"Inactive"</Badge> })}
        {p.is_out_of_stock().then(|| view! { <Badge variant=BadgeVariant::Error>"Out of stock"</Badge> })}
    }
    .into_any()
}

#[component]
pub fn ProductDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Product>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let suppliers = select_options(use_entity_hooks::<Supplier>().use_active());

    view! {
        <DetailLayout
            id=id
            query=query
            form=product_form(CategoryPicker::new(), suppliers)
            handlers=DetailHandlers::for_entity(hooks, id)
            badges=header_badges
            can_edit=auth.can_signal("products", Action::Edit)
            can_delete=auth.can_signal("products", Action::Delete)
            sidebar=Arc::new(move || view! { <RecordSection query=query title="Dates" rows=date_rows /> }.into_any())
        >
            <RecordSection query=query title="Product" rows=general_rows />
            <RecordSection query=query title="Description" rows=description_rows />
        </DetailLayout>
    }
}

#[component]
pub fn ProductCreate() -> impl IntoView {
    let suppliers = select_options(use_entity_hooks::<Supplier>().use_active());

    view! {
        <CreatePage
            hooks={use_entity_hooks::<Product>()}
            form=product_form(CategoryPicker::new(), suppliers)
            initial={json!({ "price": 0, "stock": 0, "visible": true, "active": true })}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_id_of() {
        assert_eq!(parent_id_of("4"), Some(4));
        assert_eq!(parent_id_of(""), None);
        assert_eq!(parent_id_of("0"), None);
        assert_eq!(parent_id_of("abc"), None);
    }
}
