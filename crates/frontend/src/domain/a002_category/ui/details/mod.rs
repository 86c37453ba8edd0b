use crate::domain::a001_product::ui::list::columns as product_columns;
use crate::domain::a002_category::ui::list::columns;
use crate::domain::a003_attribute::ui::list::columns as attribute_columns;
use crate::shared::detail::{
    CreatePage, DetailHandlers, DetailLayout, FormField, FormSpec, InfoRow, RecordSection, RelatedTable,
    SelectOption,
};
use crate::shared::list::{flag_cell, text_cell};
use crate::shared::query::{use_entity_hooks, QueryState};
use crate::system::auth::context::use_auth;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_attribute::aggregate::Attribute;
use contracts::domain::common::{Entity, EntityId, Paginated};
use contracts::system::permissions::Action;
use leptos::prelude::*;
use serde_json::json;

pub fn category_form(parents: Signal<Vec<SelectOption>>) -> FormSpec {
    FormSpec::new(vec![
        FormField::text("name", "Name").required(),
        FormField::text("slug", "Slug"),
        FormField::textarea("description", "Description"),
        FormField::select("parent_id", "Parent category", parents),
        FormField::number("position", "Position"),
        FormField::checkbox("visible", "Visible"),
        FormField::checkbox("active", "Active"),
    ])
}

/// Visible categories as parent choices, without `exclude` (a category is
/// never its own parent)
pub fn parent_options(visible: QueryState<Paginated<Category>>, exclude: Option<EntityId>) -> Signal<Vec<SelectOption>> {
    Signal::derive(move || {
        visible.data.with(|page| {
            page.as_ref()
                .map(|p| {
                    p.items
                        .iter()
                        .filter(|c| Some(c.id) != exclude)
                        .map(|c| (c.id.to_string(), c.display_name()))
                        .collect()
                })
                .unwrap_or_default()
        })
    })
}

fn general_rows(c: &Category) -> Vec<InfoRow> {
    vec![
        ("Name", text_cell(c.name.clone())),
        ("Slug", text_cell(c.slug.clone().unwrap_or_default())),
        ("Description", text_cell(c.description.clone().unwrap_or_default())),
        (
            "Parent",
            text_cell(c.parent_id.map(|id| format!("#{}", id)).unwrap_or_else(|| "Root".to_string())),
        ),
        ("Position", text_cell(c.position.to_string())),
        ("Visible", flag_cell(c.visible)),
        ("Active", flag_cell(c.active)),
    ]
}

#[component]
pub fn CategoryDetails(id: EntityId) -> impl IntoView {
    let auth = use_auth();
    let hooks = use_entity_hooks::<Category>();
    let query = hooks.use_detail(Signal::derive(move || Some(id)));
    let parents = parent_options(hooks.use_visible(), Some(id));
    let subcategories = hooks.use_by_parent(Signal::derive(move || Some(id)));
    let products = use_entity_hooks::<Product>().use_by_category(Signal::derive(move || Some(id)));
    let attributes = use_entity_hooks::<Attribute>().use_by_category(Signal::derive(move || Some(id)));

    view! {
        <DetailLayout
            id=id
            query=query
            form=category_form(parents)
            handlers=DetailHandlers::for_entity(hooks, id)
            can_edit=auth.can_signal("categories", Action::Edit)
            can_delete=auth.can_signal("categories", Action::Delete)
        >
            <RecordSection query=query title="Category" rows=general_rows />
            <section class="detail-section">
                <h3 class="detail-section__title">"Subcategories"</h3>
                <RelatedTable query=subcategories columns=columns() empty_text="No subcategories" />
            </section>
            <section class="detail-section">
                <h3 class="detail-section__title">"Attributes"</h3>
                <RelatedTable query=attributes columns=attribute_columns() empty_text="No attributes" />
            </section>
            <section class="detail-section">
                <h3 class="detail-section__title">"Products"</h3>
                <RelatedTable query=products columns=product_columns() empty_text="No products in this category" />
            </section>
        </DetailLayout>
    }
}

#[component]
pub fn CategoryCreate() -> impl IntoView {
    let hooks = use_entity_hooks::<Category>();
    let parents = parent_options(hooks.use_visible(), None);

    view! {
        <CreatePage
            hooks=hooks
            form=category_form(parents)
            initial={json!({ "position": 0, "visible": true, "active": true })}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::PaginationMeta;

    #[test]
    fn test_parent_options_exclude_self() {
        let owner = Owner::new();
        owner.with(|| {
            let visible = QueryState::<Paginated<Category>>::new();
            visible.data.set(Some(Paginated {
                items: vec![
                    Category { id: 1, name: "Shoes".into(), ..Default::default() },
                    Category { id: 2, name: "Boots".into(), parent_id: Some(1), ..Default::default() },
                ],
                pagination: PaginationMeta::new(2, 1, 100),
            }));

            let options = parent_options(visible, Some(2));
            assert_eq!(options.get_untracked(), vec![("1".to_string(), "Shoes".to_string())]);
        });
    }
}
