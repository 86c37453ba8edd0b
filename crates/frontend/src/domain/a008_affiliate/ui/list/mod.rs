use crate::shared::list::{flag_cell, text_cell, Column, ListContainer};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a008_affiliate::aggregate::Affiliate;
use contracts::system::permissions::Action;
use leptos::prelude::*;

pub fn commission_text(a: &Affiliate) -> String {
    a.commission_rate.map(|r| format!("{:.2} %", r)).unwrap_or_default()
}

pub fn columns() -> Vec<Column<Affiliate>> {
    vec![
        Column::new("id", "ID", |a: &Affiliate| text_cell(a.id.to_string())),
        Column::new("name", "Name", |a: &Affiliate| text_cell(a.name.clone())),
        Column::new("tax_id", "Tax ID", |a: &Affiliate| text_cell(a.tax_id.clone().unwrap_or_default())),
        Column::new("email", "Email", |a: &Affiliate| text_cell(a.email.clone().unwrap_or_default())),
        Column::new("commission_rate", "Commission", |a: &Affiliate| text_cell(commission_text(a))).right(),
        Column::new("active", "Active", |a: &Affiliate| flag_cell(a.active)),
    ]
}

#[component]
pub fn AffiliateList() -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Affiliate>();

    view! {
        <ListContainer
            columns=columns()
            query=move |filters| hooks.use_list(move || filters.get())
            on_delete=hooks.delete_fn()
            can_create=auth.can_signal("affiliates", Action::Create)
            can_edit=auth.can_signal("affiliates", Action::Edit)
            can_delete=auth.can_signal("affiliates", Action::Delete)
        />
    }
}
