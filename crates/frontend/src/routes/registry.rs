//! Route → page mapping, the one place that knows every feature page.

use crate::domain::a001_product::ui::details::{ProductCreate, ProductDetails};
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_category::ui::details::{CategoryCreate, CategoryDetails};
use crate::domain::a002_category::ui::list::CategoryList;
use crate::domain::a003_attribute::ui::details::{AttributeCreate, AttributeDetails};
use crate::domain::a003_attribute::ui::list::AttributeList;
use crate::domain::a004_option::ui::details::{OptionCreate, OptionDetails};
use crate::domain::a004_option::ui::list::OptionList;
use crate::domain::a005_marketplace::ui::details::{MarketplaceCreate, MarketplaceDetails};
use crate::domain::a005_marketplace::ui::list::MarketplaceList;
use crate::domain::a006_supplier::ui::details::{SupplierCreate, SupplierDetails};
use crate::domain::a006_supplier::ui::list::SupplierList;
use crate::domain::a007_store::ui::details::{StoreCreate, StoreDetails};
use crate::domain::a007_store::ui::list::StoreList;
use crate::domain::a008_affiliate::ui::details::{AffiliateCreate, AffiliateDetails};
use crate::domain::a008_affiliate::ui::list::AffiliateList;
use crate::domain::a009_customer::ui::details::{CustomerCreate, CustomerDetails};
use crate::domain::a009_customer::ui::list::CustomerList;
use crate::domain::a010_order::ui::details::{OrderCreate, OrderDetails};
use crate::domain::a010_order::ui::list::OrderList;
use crate::domain::a011_invoice::ui::details::{InvoiceCreate, InvoiceDetails};
use crate::domain::a011_invoice::ui::list::InvoiceList;
use crate::domain::a012_admin_account::ui::details::{AdminAccountCreate, AdminAccountDetails};
use crate::domain::a012_admin_account::ui::list::AdminAccountList;
use crate::routes::router::Route;
use crate::system::auth::context::AuthContext;
use crate::system::auth::guard::access_denied;
use crate::system::pages::home::HomePage;
use crate::system::pages::not_found::NotFoundPage;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;

/// Every resource with pages, in menu order
pub const RESOURCES: &[&str] = &[
    "products",
    "categories",
    "attributes",
    "options",
    "orders",
    "invoices",
    "customers",
    "suppliers",
    "affiliates",
    "stores",
    "marketplaces",
    "admin_accounts",
];

pub fn is_known_resource(resource: &str) -> bool {
    RESOURCES.contains(&resource)
}

/// Permission a route needs: view for lists and records, create for new ones
pub fn required_action(route: &Route) -> Option<Action> {
    match route {
        Route::List { .. } | Route::Detail { .. } => Some(Action::View),
        Route::Create { .. } => Some(Action::Create),
        Route::Home | Route::NotFound => None,
    }
}

/// Page of `route`, or the access-denied notice when `auth` lacks the permission
pub fn render_route(route: &Route, auth: AuthContext) -> AnyView {
    if let (Some(resource), Some(action)) = (route.resource(), required_action(route)) {
        if is_known_resource(resource) && !auth.can(resource, action) {
            log::warn!("Access to {} ({:?}) denied", resource, action);
            return access_denied();
        }
    }

    match route {
        Route::Home => view! { <HomePage /> }.into_any(),
        Route::List { resource } => render_list(resource),
        Route::Create { resource } => render_create(resource),
        Route::Detail { resource, id } => render_detail(resource, *id),
        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

fn render_list(resource: &str) -> AnyView {
    match resource {
        "products" => view! { <ProductList /> }.into_any(),
        "categories" => view! { <CategoryList /> }.into_any(),
        "attributes" => view! { <AttributeList /> }.into_any(),
        "options" => view! { <OptionList /> }.into_any(),
        "orders" => view! { <OrderList /> }.into_any(),
        "invoices" => view! { <InvoiceList /> }.into_any(),
        "customers" => view! { <CustomerList /> }.into_any(),
        "suppliers" => view! { <SupplierList /> }.into_any(),
        "affiliates" => view! { <AffiliateList /> }.into_any(),
        "stores" => view! { <StoreList /> }.into_any(),
        "marketplaces" => view! { <MarketplaceList /> }.into_any(),
        "admin_accounts" => view! { <AdminAccountList /> }.into_any(),
        _ => view! { <NotFoundPage /> }.into_any(),
    }
}

fn render_detail(resource: &str, id: EntityId) -> AnyView {
    match resource {
        "products" => view! { <ProductDetails id=id /> }.into_any(),
        "categories" => view! { <CategoryDetails id=id /> }.into_any(),
        "attributes" => view! { <AttributeDetails id=id /> }.into_any(),
        "options" => view! { <OptionDetails id=id /> }.into_any(),
        "orders" => view! { <OrderDetails id=id /> }.into_any(),
        "invoices" => view! { <InvoiceDetails id=id /> }.into_any(),
        "customers" => view! { <CustomerDetails id=id /> }.into_any(),
        "suppliers" => view! { <SupplierDetails id=id /> }.into_any(),
        "affiliates" => view! { <AffiliateDetails id=id /> }.into_any(),
        "stores" => view! { <StoreDetails id=id /> }.into_any(),
        "marketplaces" => view! { <MarketplaceDetails id=id /> }.into_any(),
        "admin_accounts" => view! { <AdminAccountDetails id=id /> }.into_any(),
        _ => view! { <NotFoundPage /> }.into_any(),
    }
}

fn render_create(resource: &str) -> AnyView {
    match resource {
        "products" => view! { <ProductCreate /> }.into_any(),
        "categories" => view! { <CategoryCreate /> }.into_any(),
        "attributes" => view! { <AttributeCreate /> }.into_any(),
        "options" => view! { <OptionCreate /> }.into_any(),
        "orders" => view! { <OrderCreate /> }.into_any(),
        "invoices" => view! { <InvoiceCreate /> }.into_any(),
        "customers" => view! { <CustomerCreate /> }.into_any(),
        "suppliers" => view! { <SupplierCreate /> }.into_any(),
        "affiliates" => view! { <AffiliateCreate /> }.into_any(),
        "stores" => view! { <StoreCreate /> }.into_any(),
        "marketplaces" => view! { <MarketplaceCreate /> }.into_any(),
        "admin_accounts" => view! { <AdminAccountCreate /> }.into_any(),
        _ => view! { <NotFoundPage /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::sidebar::get_menu_groups;

    #[test]
    fn test_every_menu_entry_has_pages() {
        for group in get_menu_groups() {
            for (resource, _, _) in group.items {
                assert!(is_known_resource(resource), "{} has no pages", resource);
            }
        }
    }

    #[test]
    fn test_required_action() {
        assert_eq!(required_action(&Route::parse("/orders")), Some(Action::View));
        assert_eq!(required_action(&Route::parse("/orders/4")), Some(Action::View));
        assert_eq!(required_action(&Route::parse("/orders/create")), Some(Action::Create));
        assert_eq!(required_action(&Route::Home), None);
    }
}
