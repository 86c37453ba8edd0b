//! Form state → API payload coercion.
//!
//! Forms hold loosely typed values (strings from inputs, booleans from
//! checkboxes, numbers read back from the API). Before every write the form
//! state is passed through [`transform_for_api`] with the entity's schema so the
//! server always receives the same shapes.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// How a single payload field is coerced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Trimmed string, empty becomes `null`
    Text,
    /// Trimmed string, missing becomes `""`
    RequiredText,
    /// Trimmed string, left out of the payload when empty
    OptionalText,
    /// Boolean cast with a fallback for missing/unparsable input
    Bool { default: bool },
    /// Foreign-key style integer, empty/zero/invalid becomes `null`
    Id,
    /// Integer with a fallback (`None` means `null`)
    Integer { default: Option<i64> },
    /// Decimal number, comma accepted as separator, empty/invalid becomes `null`
    Decimal,
    /// List of trimmed non-empty strings, comma-separated text accepted
    TextList,
}

/// Named payload field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    pub const fn required(name: &'static str) -> Self {
        Self { name, kind: FieldKind::RequiredText }
    }

    /// Sent only when filled in (e.g. a password that keeps its value when blank)
    pub const fn optional(name: &'static str) -> Self {
        Self { name, kind: FieldKind::OptionalText }
    }

    pub const fn flag(name: &'static str, default: bool) -> Self {
        Self { name, kind: FieldKind::Bool { default } }
    }

    pub const fn id(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Id }
    }

    pub const fn integer(name: &'static str, default: Option<i64>) -> Self {
        Self { name, kind: FieldKind::Integer { default } }
    }

    pub const fn decimal(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Decimal }
    }

    pub const fn list(name: &'static str) -> Self {
        Self { name, kind: FieldKind::TextList }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("Required fields are empty: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// Build the API payload for `form` according to `schema`.
///
/// Only schema fields are emitted; empty `OptionalText` fields are left out.
/// The transform is idempotent:
/// `transform_for_api(s, &transform_for_api(s, x)) == transform_for_api(s, x)`.
pub fn transform_for_api(schema: &[FieldSpec], form: &Value) -> Value {
    let mut out = Map::new();
    for field in schema {
        let raw = form.get(field.name).unwrap_or(&Value::Null);
        let value = coerce(field.kind, raw);
        if field.kind == FieldKind::OptionalText && value.is_null() {
            continue;
        }
        out.insert(field.name.to_string(), value);
    }
    Value::Object(out)
}

/// Client-side check of `RequiredText` fields, run before submitting.
pub fn validate_required(schema: &[FieldSpec], form: &Value) -> Result<(), PayloadError> {
    let missing: Vec<String> = schema
        .iter()
        .filter(|f| f.kind == FieldKind::RequiredText)
        .filter(|f| {
            form.get(f.name)
                .and_then(as_text)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|f| f.name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PayloadError::MissingFields(missing))
    }
}

fn coerce(kind: FieldKind, raw: &Value) -> Value {
    match kind {
        FieldKind::Text | FieldKind::OptionalText => match as_text(raw) {
            Some(s) if !s.trim().is_empty() => Value::String(s.trim().to_string()),
            _ => Value::Null,
        },
        FieldKind::RequiredText => {
            Value::String(as_text(raw).map(|s| s.trim().to_string()).unwrap_or_default())
        }
        FieldKind::Bool { default } => Value::Bool(parse_bool(raw).unwrap_or(default)),
        FieldKind::Id => match parse_int(raw) {
            Some(n) if n > 0 => Value::Number(n.into()),
            _ => Value::Null,
        },
        FieldKind::Integer { default } => parse_int(raw)
            .or(default)
            .map(|n| Value::Number(n.into()))
            .unwrap_or(Value::Null),
        FieldKind::Decimal => parse_decimal(raw).map(number_value).unwrap_or(Value::Null),
        FieldKind::TextList => Value::Array(
            parse_list(raw)
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
    }
}

fn as_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Boolean cast accepting the spellings HTML forms and PHP backends produce
pub fn parse_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Integer parse of numbers and numeric strings ("12", " 7 ", 3.0)
pub fn parse_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.fract() == 0.0 && v.is_finite())
                .map(|v| v as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.fract() == 0.0 && v.is_finite())
                    .map(|v| v as i64)
            })
        }
        _ => None,
    }
}

fn parse_decimal(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

// Integral values are emitted as integers so `19` and `"19.00"` end up identical.
fn number_value(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
        Value::Number((v as i64).into())
    } else {
        Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn parse_list(raw: &Value) -> Vec<String> {
    let parts: Vec<String> = match raw {
        Value::Array(items) => items.iter().filter_map(as_text).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    parts
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &[FieldSpec] = &[
        FieldSpec::required("name"),
        FieldSpec::text("description"),
        FieldSpec::flag("active", true),
        FieldSpec::id("parent_id"),
        FieldSpec::integer("position", Some(0)),
        FieldSpec::decimal("price"),
        FieldSpec::list("permissions"),
    ];

    #[test]
    fn test_coerces_form_strings() {
        let form = json!({
            "name": "  Shoes ",
            "description": "   ",
            "active": "0",
            "parent_id": "12",
            "position": "3",
            "price": "19,95",
            "permissions": "products.view, products.edit,,",
        });

        let payload = transform_for_api(SCHEMA, &form);

        assert_eq!(
            payload,
            json!({
                "name": "Shoes",
                "description": null,
                "active": false,
                "parent_id": 12,
                "position": 3,
                "price": 19.95,
                "permissions": ["products.view", "products.edit"],
            })
        );
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let payload = transform_for_api(SCHEMA, &json!({}));

        assert_eq!(payload["name"], json!(""));
        assert_eq!(payload["description"], Value::Null);
        assert_eq!(payload["active"], json!(true));
        assert_eq!(payload["parent_id"], Value::Null);
        assert_eq!(payload["position"], json!(0));
        assert_eq!(payload["price"], Value::Null);
        assert_eq!(payload["permissions"], json!([]));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let payload = transform_for_api(SCHEMA, &json!({"name": "x", "created_at": "2024-01-01"}));
        assert!(payload.get("created_at").is_none());
    }

    #[test]
    fn test_zero_and_garbage_ids_become_null() {
        for raw in [json!(0), json!(""), json!("abc"), json!(-4), json!(null)] {
            let payload = transform_for_api(&[FieldSpec::id("id_category")], &json!({ "id_category": raw }));
            assert_eq!(payload["id_category"], Value::Null);
        }
    }

    #[test]
    fn test_bool_spellings() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!("on"), true),
            (json!("Yes"), true),
            (json!(false), false),
            (json!("off"), false),
            (json!("maybe"), true),
        ] {
            assert_eq!(coerce(FieldKind::Bool { default: true }, &raw), Value::Bool(expected));
        }
    }

    #[test]
    fn test_transform_is_idempotent_on_read_back_record() {
        // A record as the API returns it, fed back unmodified.
        let record = json!({
            "id": 4,
            "name": "Shoes",
            "description": null,
            "active": 1,
            "parent_id": 2,
            "position": 5,
            "price": "19.00",
            "permissions": ["products.view"],
        });

        let once = transform_for_api(SCHEMA, &record);
        let twice = transform_for_api(SCHEMA, &once);

        assert_eq!(once, twice);
        assert_eq!(once["price"], json!(19));
        assert_eq!(once["active"], json!(true));
    }

    #[test]
    fn test_optional_text_is_left_out_when_empty() {
        let schema = &[FieldSpec::required("email"), FieldSpec::optional("password")];

        for raw in [json!(""), json!("   "), json!(null)] {
            let payload = transform_for_api(schema, &json!({ "email": "a@x.es", "password": raw }));
            assert!(payload.get("password").is_none());
            assert_eq!(transform_for_api(schema, &payload), payload);
        }

        let payload = transform_for_api(schema, &json!({ "email": "a@x.es", "password": " s3cret " }));
        assert_eq!(payload["password"], json!("s3cret"));
        assert_eq!(transform_for_api(schema, &payload), payload);
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required(SCHEMA, &json!({"name": "ok"})).is_ok());
        assert_eq!(
            validate_required(SCHEMA, &json!({"name": "  "})),
            Err(PayloadError::MissingFields(vec!["name".to_string()]))
        );
    }
}
