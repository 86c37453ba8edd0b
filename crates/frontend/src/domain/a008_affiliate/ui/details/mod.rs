use crate::domain::a008_affiliate::api::{nested_key, CONTACTS, ZONES};
use crate::domain::a008_affiliate::ui::list::commission_text;
use crate::shared::detail::{
    CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, NestedColumn, NestedTable,
    RecordSection,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a008_affiliate::aggregate::{Affiliate, AffiliateContact, AffiliateZone};
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn affiliate_form() -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("tax_id", "Tax ID"),
        FormField::email("email", "Email"),
        FormField::text("phone", "Phone"),
        FormField::number("commission_rate", "Commission (%)"),
        FormField::checkbox("active", "Active"),
    ])
}

fn contact_form() -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::email("email", "Email"),
        FormField::text("phone", "Phone"),
        FormField::text("position", "Position"),
    ])
}

fn zone_form() -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("postal_code", "Postal code"),
        FormField::text("province", "Province"),
        FormField::text("country", "Country"),
    ])
}

fn contact_columns() -> Vec<NestedColumn<AffiliateContact>> {
    vec![
        NestedColumn::new("Name", |c: &AffiliateContact| c.name.clone()),
        NestedColumn::new("Email", |c: &AffiliateContact| c.email.clone().unwrap_or_default()),
        NestedColumn::new("Phone", |c: &AffiliateContact| c.phone.clone().unwrap_or_default()),
        NestedColumn::new("Position", |c: &AffiliateContact| c.position.clone().unwrap_or_default()),
    ]
}

fn zone_columns() -> Vec<NestedColumn<AffiliateZone>> {
    vec![
        NestedColumn::new("Name", |z: &AffiliateZone| z.name.clone()),
        NestedColumn::new("Postal code", |z: &AffiliateZone| z.postal_code.clone().unwrap_or_default()),
        NestedColumn::new("Province", |z: &AffiliateZone| z.province.clone().unwrap_or_default()),
        NestedColumn::new("Country", |z: &AffiliateZone| z.country.clone().unwrap_or_default()),
    ]
}

fn contact_id(c: &AffiliateContact) -> EntityId {
    c.id
}

fn contact_name(c: &AffiliateContact) -> String {
    c.name.clone()
}

fn zone_id(z: &AffiliateZone) -> EntityId {
    z.id
}

fn zone_name(z: &AffiliateZone) -> String {
    z.name.clone()
}

fn general_rows(a: &Affiliate) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(a.name.clone())),
        ("Tax ID", text_cell(a.tax_id.clone().unwrap_or_default())),
        ("Email", text_cell(a.email.clone().unwrap_or_default())),
        ("Phone", text_cell(a.phone.clone().unwrap_or_default())),
        ("Commission", text_cell(commission_text(a))),
        ("Active", flag_cell(a.active)),
    ]
}

#[component]
pub fn AffiliateDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Affiliate>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let contacts = hooks.use_contacts(id);
    let zones = hooks.use_zones(id);
    let can_edit = auth.can_signal("affiliates", Action::Edit);

    view! {
        <DetailLayout
            id=id
            query=query
            form=affiliate_form()
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=can_edit
            can_delete=auth.can_signal("affiliates", Action::Delete)
        >
            <RecordSection query=query title="Affiliate" rows=general_rows />
            <NestedTable
                title="Contacts"
                resource=hooks.api().contacts(id)
                query=contacts
                cache_key=nested_key(CONTACTS, id)
                columns=contact_columns()
                row_id=contact_id
                row_label=contact_name
                form=contact_form()
                can_edit=can_edit
            />
            <NestedTable
                title="Zones"
                resource=hooks.api().zones(id)
                query=zones
                cache_key=nested_key(ZONES, id)
                columns=zone_columns()
                row_id=zone_id
                row_label=zone_name
                form=zone_form()
                can_edit=can_edit
            />
        </DetailLayout>
    }
}

#[component]
pub fn AffiliateCreate() -> impl IntoView {
    view! {
        <CreatePage
            hooks={use_entity_hooks::<Affiliate>()}
            form=affiliate_form()
            initial={json!({ "active": true })}
        />
    }
}
