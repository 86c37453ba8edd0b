//! Sidebar navigation with collapsible menu groups

use crate::layout::global_context::use_global_context;
use crate::routes::router::use_router;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::system::permissions::Action;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// (resource, label, icon)
    pub items: Vec<(&'static str, &'static str, &'static str)>,
}

pub fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "catalog",
            label: "Catalog",
            icon: "products",
            items: vec![
                ("products", "Products", "products"),
                ("categories", "Categories", "categories"),
                ("attributes", "Attributes", "attributes"),
                ("options", "Options", "options"),
            ],
        },
        MenuGroup {
            id: "sales",
            label: "Sales",
            icon: "orders",
            items: vec![
                ("orders", "Orders", "orders"),
                ("invoices", "Invoices", "invoices"),
                ("customers", "Customers", "customers"),
            ],
        },
        MenuGroup {
            id: "partners",
            label: "Partners",
            icon: "affiliates",
            items: vec![
                ("suppliers", "Suppliers", "suppliers"),
                ("affiliates", "Affiliates", "affiliates"),
            ],
        },
        MenuGroup {
            id: "channels",
            label: "Channels",
            icon: "marketplaces",
            items: vec![
                ("stores", "Stores", "stores"),
                ("marketplaces", "Marketplaces", "marketplaces"),
            ],
        },
        MenuGroup {
            id: "administration",
            label: "Administration",
            icon: "users",
            items: vec![("admin_accounts", "Admin accounts", "users")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let router = use_router();
    let auth = use_auth();

    let active_resource = Memo::new(move |_| router.route().resource().map(str::to_string));

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups()
                .into_iter()
                .map(|group| {
                    let group_id = group.id;
                    let items = StoredValue::new(group.items);
                    // groups with nothing the admin may view are hidden
                    let visible = move || {
                        items.with_value(|items| items.iter().any(|(r, _, _)| auth.can(r, Action::View)))
                    };

                    view! {
                        <Show when=visible>
                            <div>
                                <div
                                    class="app-sidebar__item"
                                    style:padding-left="12px"
                                    on:click=move |_| ctx.toggle_group(group_id)
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(group.icon)}
                                        <span>{group.label}</span>
                                    </div>
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || ctx.is_expanded(group_id)
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                </div>

                                <Show when=move || ctx.is_expanded(group_id)>
                                    <div class="app-sidebar__children">
                                        {items
                                            .get_value()
                                            .into_iter()
                                            .filter(|(resource, _, _)| auth.can(resource, Action::View))
                                            .map(|(resource, label, icon_name)| {
                                                view! {
                                                    <div
                                                        class="app-sidebar__item"
                                                        class:app-sidebar__item--active=move || {
                                                            active_resource.with(|a| a.as_deref() == Some(resource))
                                                        }
                                                        style:padding-left="10px"
                                                        on:click=move |_| router.navigate(&format!("/{}", resource))
                                                    >
                                                        <div class="app-sidebar__item-content">
                                                            {icon(icon_name)}
                                                            <span>{label}</span>
                                                        </div>
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </Show>
                            </div>
                        </Show>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_resource_listed_once() {
        let resources: Vec<&str> = get_menu_groups()
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(r, _, _)| r))
            .collect();
        let unique: HashSet<&str> = resources.iter().copied().collect();

        assert_eq!(resources.len(), 12);
        assert_eq!(unique.len(), 12);
        assert!(unique.contains("admin_accounts"));
    }
}
