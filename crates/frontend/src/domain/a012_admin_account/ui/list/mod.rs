use crate::shared::components::ui::badge::{Badge, BadgeVariant};
use crate::shared::date_utils::format_optional_datetime;
use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a012_admin_account::aggregate::AdminAccount;
use contracts::system::permissions::Action;
use leptos::prelude::*;

fn role_variant(role: &str) -> BadgeVariant {
    match role {
        "superadmin" => BadgeVariant::Error,
        "admin" => BadgeVariant::Primary,
        "editor" => BadgeVariant::Success,
        _ => BadgeVariant::Neutral,
    }
}

pub fn role_badge(role: &str) -> AnyView {
    let variant = role_variant(role);
    let label = role.to_string();
    view! { <Badge variant=variant>{label}</Badge> }.into_any()
}

fn columns() -> Vec<Column<AdminAccount>> {
    vec![
        Column::new("id", "ID", |a: &AdminAccount| text_cell(a.id.to_string())),
        Column::new("name", "Name", |a: &AdminAccount| text_cell(a.name.clone())),
        Column::new("email", "Email", |a: &AdminAccount| text_cell(a.email.clone())),
        Column::new("role", "Role", |a: &AdminAccount| role_badge(&a.role)),
        Column::new("active", "Active", |a: &AdminAccount| flag_cell(a.active)),
        Column::new("last_login_at", "Last login", |a: &AdminAccount| {
            text_cell(format_optional_datetime(a.last_login_at.as_deref()))
        }),
    ]
}

#[component]
pub fn AdminAccountList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<AdminAccount>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("admin_accounts", Action::Create)
            can_edit=auth.can_signal("admin_accounts", Action::Edit)
            can_delete=auth.can_signal("admin_accounts", Action::Delete)
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_variants() {
        assert_eq!(role_variant("superadmin"), BadgeVariant::Error);
        assert_eq!(role_variant("editor"), BadgeVariant::Success);
        assert_eq!(role_variant("viewer"), BadgeVariant::Neutral);
    }
}
