use crate::domain::a012_admin_account::ui::list::role_badge;
use crate::shared::components::ui::badge::Badge;
use crate::shared::date_utils::format_optional_datetime;
use crate::shared::detail::{
    static_options, CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a012_admin_account::aggregate::{AdminAccount, ADMIN_ROLES};
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

/// The password input starts empty; leaving it empty keeps the current password.
pub fn admin_account_form() -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::email("email", "Email").required(),
        FormField::password("password", "Password").placeholder("Leave empty to keep"),
        FormField::select("role", "Role", static_options(ADMIN_ROLES)).required(),
        FormField::textarea("permissions", "Permissions").placeholder("products.view, orders.edit, *"),
        FormField::checkbox("active", "Active"),
    ])
}

fn permission_badges(a: &AdminAccount) -> AnyView {
    if a.permissions.is_empty() {
        return text_cell("");
    }
    a.permissions
        .clone()
        .into_iter()
        .map(|p| view! { <Badge>{p}</Badge> })
        .collect_view()
        .into_any()
}

fn general_rows(a: &AdminAccount) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(a.name.clone())),
        ("Email", text_cell(a.email.clone())),
        ("Role", role_badge(&a.role)),
        ("Permissions", permission_badges(a)),
        ("Active", flag_cell(a.active)),
        ("Last login", text_cell(format_optional_datetime(a.last_login_at.as_deref()))),
    ]
}

fn header_badges(a: &AdminAccount) -> AnyView {
    role_badge(&a.role)
}

#[component]
pub fn AdminAccountDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<AdminAccount>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));

    view! {
        <DetailLayout
            id=id
            query=query
            form=admin_account_form()
            handlers=DetailHandlers::for_entity(hooks, id)
            badges=header_badges
            can_edit=auth.can_signal("admin_accounts", Action::Edit)
            can_delete=auth.can_signal("admin_accounts", Action::Delete)
        >
            <RecordSection query=query title="Account" rows=general_rows />
        </DetailLayout>
    }
}

#[component]
pub fn AdminAccountCreate() -> impl IntoView {
    view! {
        <CreatePage
            hooks={use_entity_hooks::<AdminAccount>()}
            form=admin_account_form()
            initial={json!({ "role": "editor", "active": true })}
        />
    }
}
