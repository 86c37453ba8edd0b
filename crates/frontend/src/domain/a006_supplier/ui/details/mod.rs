use crate::domain::a001_product::ui::list::columns as product_columns;
use crate::shared::detail::{
    CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection, RelatedTable,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::use_entity_hooks;
use crate::system::auth::context::use_auth;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::domain::common::EntityId;
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn supplier_form() -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("tax_id", "Tax ID").placeholder("B12345678"),
        FormField::email("email", "Email"),
        FormField::text("phone", "Phone"),
        FormField::text("address", "Address"),
        FormField::text("city", "City"),
        FormField::text("postal_code", "Postal code"),
        FormField::text("country", "Country"),
        FormField::checkbox("active", "Active"),
    ])
}

fn general_rows(s: &Supplier) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(s.name.clone())),
        ("Tax ID", text_cell(s.tax_id.clone().unwrap_or_default())),
        ("Active", flag_cell(s.active)),
    ]
}

fn contact_rows(s: &Supplier) -> Vec<InfoRow> {
    vec![
        ("Email", text_cell(s.email.clone().unwrap_or_default())),
        ("Phone", text_cell(s.phone.clone().unwrap_or_default())),
        ("Address", text_cell(s.address.clone().unwrap_or_default())),
        ("City", text_cell(s.city.clone().unwrap_or_default())),
        ("Postal code", text_cell(s.postal_code.clone().unwrap_or_default())),
        ("Country", text_cell(s.country.clone().unwrap_or_default())),
    ]
}

#[component]
pub fn SupplierDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Supplier>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let products = use_entity_hooks::<Product>().use_by_supplier(Signal::derive(move || Some(id)));

    view! {
        <DetailLayout
            id=id
            query=query
            form=supplier_form()
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=auth.can_signal("suppliers", Action::Edit)
            can_delete=auth.can_signal("suppliers", Action::Delete)
        >
            <RecordSection query=query title="General" rows=general_rows />
            <RecordSection query=query title="Contact" rows=contact_rows />
            <section class="detail-section">
                <h3 class="detail-section__title">"Products"</h3>
                <RelatedTable query=products columns=product_columns() empty_text="No products from this supplier" />
            </section>
        </DetailLayout>
    }
}

#[component]
pub fn SupplierCreate() -> impl IntoView {
    view! {
        <CreatePage
            hooks={use_entity_hooks::<Supplier>()}
            form=supplier_form()
            initial={json!({ "active": true })}
        />
    }
}
