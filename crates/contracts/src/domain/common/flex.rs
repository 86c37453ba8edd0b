//! Lenient deserializers for API fields.
//!
//! The API is not consistent about scalar encodings: flags arrive as `true`,
//! `1` or `"1"`, decimals as numbers or strings. Use with
//! `#[serde(default, deserialize_with = "flex::...")]`.

use super::payload::{parse_bool, parse_int};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(parse_bool(&v).unwrap_or(false))
}

pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(parse_int(&v).unwrap_or(0))
}

pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(parse_int(&v))
}

pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(opt_decimal(d)?.unwrap_or(0.0))
}

pub fn opt_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::flag")]
        active: bool,
        #[serde(default, deserialize_with = "super::decimal")]
        price: f64,
        #[serde(default, deserialize_with = "super::opt_int")]
        parent_id: Option<i64>,
    }

    #[test]
    fn test_lenient_scalars() {
        let row: Row = serde_json::from_value(json!({"active": "1", "price": "12.50", "parent_id": "4"})).unwrap();
        assert!(row.active);
        assert_eq!(row.price, 12.5);
        assert_eq!(row.parent_id, Some(4));
    }

    #[test]
    fn test_missing_and_null() {
        let row: Row = serde_json::from_value(json!({"parent_id": null})).unwrap();
        assert!(!row.active);
        assert_eq!(row.price, 0.0);
        assert_eq!(row.parent_id, None);
    }
}
