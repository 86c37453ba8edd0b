//! Field-list driven edit form.
//!
//! A [`FormSpec`] lists the inputs of an entity's edit form. The form state is
//! loosely typed (text and flags, as the inputs produce them) and turned into
//! an API payload later by the entity's payload schema.

use crate::shared::api::ApiError;
use crate::shared::query::QueryState;
use contracts::domain::common::{Entity, Paginated};
use leptos::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    TextArea,
    Checkbox,
    Select,
}

/// `(value, label)`
pub type SelectOption = (String, String);

#[derive(Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
    pub placeholder: &'static str,
    pub options: Option<Signal<Vec<SelectOption>>>,
    /// Caller-owned value signal, for inputs other fields depend on
    pub bound: Option<RwSignal<String>>,
}

impl FormField {
    fn new(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: "",
            options: None,
            bound: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Text)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Email)
    }

    pub fn password(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Password)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Number)
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Date)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::TextArea)
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Checkbox)
    }

    /// Select with an empty "—" choice first
    pub fn select(name: &'static str, label: &'static str, options: Signal<Vec<SelectOption>>) -> Self {
        Self {
            options: Some(options),
            ..Self::new(name, label, InputKind::Select)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn bind(mut self, value: RwSignal<String>) -> Self {
        self.bound = Some(value);
        self
    }
}

/// Inputs of an edit form, in display order
#[derive(Clone, Default)]
pub struct FormSpec {
    pub fields: Vec<FormField>,
}

/// Raw value of one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Text(String),
    Flag(bool),
}

impl FormSpec {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// Input values for `record` (the entity's form state); missing fields start empty
    pub fn inputs_from(&self, record: &Value) -> BTreeMap<&'static str, FormInput> {
        self.fields
            .iter()
            .map(|f| {
                let value = record.get(f.name).unwrap_or(&Value::Null);
                let input = match f.kind {
                    InputKind::Checkbox => FormInput::Flag(value_to_flag(value)),
                    InputKind::Date => FormInput::Text(value_to_text(value).chars().take(10).collect()),
                    InputKind::Password => FormInput::Text(String::new()),
                    _ => FormInput::Text(value_to_text(value)),
                };
                (f.name, input)
            })
            .collect()
    }

    /// Form state handed to the submit handler
    pub fn to_json(inputs: &BTreeMap<&'static str, FormInput>) -> Value {
        let map: Map<String, Value> = inputs
            .iter()
            .map(|(name, input)| {
                let value = match input {
                    FormInput::Text(s) => Value::String(s.clone()),
                    FormInput::Flag(b) => Value::Bool(*b),
                };
                (name.to_string(), value)
            })
            .collect();
        Value::Object(map)
    }
}

/// Select choices from a list query: `(id, display name)` per record
pub fn select_options<E: Entity>(query: QueryState<Paginated<E>>) -> Signal<Vec<SelectOption>> {
    Signal::derive(move || {
        query.data.with(|page| {
            page.as_ref()
                .map(|p| p.items.iter().map(|e| (e.id().to_string(), e.display_name())).collect())
                .unwrap_or_default()
        })
    })
}

/// Fixed select choices where value and label are the same
pub fn static_options(values: &[&str]) -> Signal<Vec<SelectOption>> {
    let options: Vec<SelectOption> = values.iter().map(|v| (v.to_string(), v.to_string())).collect();
    Signal::derive(move || options.clone())
}

pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

pub fn value_to_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        _ => false,
    }
}

#[derive(Clone, Copy)]
enum FieldSignal {
    Text(RwSignal<String>),
    Flag(RwSignal<bool>),
}

/// Reactive form state: one signal per input
#[derive(Clone, Copy)]
pub struct FormValues {
    signals: StoredValue<BTreeMap<&'static str, FieldSignal>>,
}

impl FormValues {
    pub fn new(spec: &FormSpec) -> Self {
        let signals = spec
            .fields
            .iter()
            .map(|f| {
                let signal = match f.kind {
                    InputKind::Checkbox => FieldSignal::Flag(RwSignal::new(false)),
                    _ => FieldSignal::Text(f.bound.unwrap_or_else(|| RwSignal::new(String::new()))),
                };
                (f.name, signal)
            })
            .collect();
        Self {
            signals: StoredValue::new(signals),
        }
    }

    /// Load the inputs of `record`
    pub fn reset(&self, spec: &FormSpec, record: &Value) {
        let inputs = spec.inputs_from(record);
        self.signals.with_value(|signals| {
            for (name, input) in inputs {
                match (signals.get(name), input) {
                    (Some(FieldSignal::Text(s)), FormInput::Text(v)) => s.set(v),
                    (Some(FieldSignal::Flag(s)), FormInput::Flag(v)) => s.set(v),
                    _ => {}
                }
            }
        });
    }

    pub fn text(&self, name: &str) -> Option<RwSignal<String>> {
        self.signals.with_value(|s| match s.get(name) {
            Some(FieldSignal::Text(sig)) => Some(*sig),
            _ => None,
        })
    }

    pub fn flag(&self, name: &str) -> Option<RwSignal<bool>> {
        self.signals.with_value(|s| match s.get(name) {
            Some(FieldSignal::Flag(sig)) => Some(*sig),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Value {
        let inputs = self.signals.with_value(|signals| {
            signals
                .iter()
                .map(|(name, signal)| {
                    let input = match signal {
                        FieldSignal::Text(s) => FormInput::Text(s.get_untracked()),
                        FieldSignal::Flag(s) => FormInput::Flag(s.get_untracked()),
                    };
                    (*name, input)
                })
                .collect()
        });
        FormSpec::to_json(&inputs)
    }
}

/// Renders every field of `spec`; 422 messages from `error` appear under their field.
#[component]
pub fn EntityForm(
    spec: FormSpec,
    values: FormValues,
    #[prop(into)]
    error: Signal<Option<ApiError>>,
    #[prop(into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    spec.fields
        .into_iter()
        .map(|field| {
            let name = field.name;
            let field_error = move || error.with(|e| e.as_ref().and_then(|e| e.field_error(name)));
            let label = if field.required {
                format!("{} *", field.label)
            } else {
                field.label.to_string()
            };

            let input = match field.kind {
                InputKind::Checkbox => match values.flag(name) {
                    Some(checked) => view! { <Checkbox checked=checked label=label.clone() /> }.into_any(),
                    None => view! { <></> }.into_any(),
                },
                InputKind::TextArea => match values.text(name) {
                    Some(value) => view! {
                        <Textarea value=value resize=TextareaResize::Vertical disabled=disabled />
                    }
                    .into_any(),
                    None => view! { <></> }.into_any(),
                },
                InputKind::Select => match (values.text(name), field.options) {
                    (Some(value), Some(options)) => view! {
                        <Select value=value disabled=disabled>
                            <option value="">"—"</option>
                            {move || {
                                options
                                    .get()
                                    .into_iter()
                                    .map(|(v, l)| view! { <option value=v>{l}</option> })
                                    .collect_view()
                            }}
                        </Select>
                    }
                    .into_any(),
                    _ => view! { <></> }.into_any(),
                },
                kind => match values.text(name) {
                    Some(value) => {
                        let input_type = match kind {
                            InputKind::Email => InputType::Email,
                            InputKind::Password => InputType::Password,
                            InputKind::Number => InputType::Number,
                            InputKind::Date => InputType::Date,
                            _ => InputType::Text,
                        };
                        view! {
                            <Input
                                value=value
                                input_type=input_type
                                placeholder=field.placeholder
                                disabled=disabled
                            />
                        }
                        .into_any()
                    }
                    None => view! { <></> }.into_any(),
                },
            };

            let show_label = field.kind != InputKind::Checkbox;
            view! {
                <div class="form-group" class:form-group--invalid=move || field_error().is_some()>
                    {show_label.then(|| view! { <label class="form-label">{label}</label> })}
                    {input}
                    {move || field_error().map(|e| view! { <div class="form-error">{e}</div> })}
                </div>
            }
        })
        .collect_view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> FormSpec {
        FormSpec::new(vec![
            FormField::text("name", "Name").required(),
            FormField::number("stock", "Stock"),
            FormField::checkbox("active", "Active"),
            FormField::date("issue_date", "Issue date"),
            FormField::password("password", "Password"),
            FormField::text("tags", "Tags"),
        ])
    }

    #[test]
    fn test_inputs_from_record() {
        let record = json!({
            "name": "Boots",
            "stock": 12,
            "active": 1,
            "issue_date": "2024-05-01T10:00:00Z",
            "password": "hash",
            "tags": ["a", "b"]
        });

        let inputs = spec().inputs_from(&record);

        assert_eq!(inputs["name"], FormInput::Text("Boots".into()));
        assert_eq!(inputs["stock"], FormInput::Text("12".into()));
        assert_eq!(inputs["active"], FormInput::Flag(true));
        assert_eq!(inputs["issue_date"], FormInput::Text("2024-05-01".into()));
        assert_eq!(inputs["password"], FormInput::Text(String::new()));
        assert_eq!(inputs["tags"], FormInput::Text("a, b".into()));
    }

    #[test]
    fn test_missing_fields_start_empty() {
        let inputs = spec().inputs_from(&json!({}));
        assert_eq!(inputs["name"], FormInput::Text(String::new()));
        assert_eq!(inputs["active"], FormInput::Flag(false));
    }

    #[test]
    fn test_to_json() {
        let inputs = spec().inputs_from(&json!({"name": "Boots", "active": true}));
        let form = FormSpec::to_json(&inputs);
        assert_eq!(form["name"], json!("Boots"));
        assert_eq!(form["active"], json!(true));
        assert_eq!(form["stock"], json!(""));
    }

    #[test]
    fn test_value_to_flag() {
        assert!(value_to_flag(&json!("yes")));
        assert!(value_to_flag(&json!(2)));
        assert!(!value_to_flag(&json!("0")));
        assert!(!value_to_flag(&Value::Null));
    }

    #[test]
    fn test_bound_field_shares_the_caller_signal() {
        Owner::new().with(|| {
            let parent = RwSignal::new(String::new());
            let spec = FormSpec::new(vec![
                FormField::select("category_group", "Category group", static_options(&["1", "2"])).bind(parent),
                FormField::text("name", "Name"),
            ]);
            let values = FormValues::new(&spec);

            values.reset(&spec, &json!({"category_group": "2", "name": "Boots"}));
            assert_eq!(parent.get_untracked(), "2");

            parent.set("1".to_string());
            assert_eq!(values.to_json()["category_group"], json!("1"));
        });
    }
}
