//! Conversion between [`DataElement`] and [`serde_json::Value`].

use crate::error::{JsonError, Result};
use serde_json::{Map, Number, Value};
use std::str::FromStr;
use toth_core::{DataElement, DataList, DataMap, DataNumber};

/// Converts a parsed `serde_json` value into a data tree.
///
/// Numbers keep their source text as [`DataNumber::Lexical`].
pub fn from_value(value: Value) -> DataElement {
    match value {
        Value::Null => DataElement::Null,
        Value::Bool(b) => DataElement::Boolean(b),
        Value::Number(n) => DataElement::Number(DataNumber::lexical(n.to_string())),
        Value::String(s) => DataElement::String(s),
        Value::Array(values) => DataElement::List(values.into_iter().map(from_value).collect()),
        Value::Object(entries) => DataElement::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, from_value(value)))
                .collect(),
        ),
    }
}

/// Converts a data tree into a `serde_json` value.
///
/// # Errors
///
/// Returns [`JsonError::NonFiniteNumber`] for NaN or infinite floats and
/// [`JsonError::InvalidNumberLiteral`] for lexical numbers outside the JSON
/// grammar.
pub fn to_value(element: &DataElement) -> Result<Value> {
    Ok(match element {
        DataElement::Null => Value::Null,
        DataElement::Boolean(b) => Value::Bool(*b),
        DataElement::Number(n) => Value::Number(to_number(n)?),
        DataElement::String(s) => Value::String(s.clone()),
        DataElement::List(list) => Value::Array(list_values(list)?),
        DataElement::Map(map) => Value::Object(map_values(map)?),
    })
}

fn list_values(list: &DataList) -> Result<Vec<Value>> {
    list.iter().map(to_value).collect()
}

fn map_values(map: &DataMap) -> Result<Map<String, Value>> {
    map.iter()
        .map(|(key, value)| Ok((key.to_string(), to_value(value)?)))
        .collect()
}

fn to_number(number: &DataNumber) -> Result<Number> {
    let non_finite = |kind: &'static str, value: f64| JsonError::NonFiniteNumber {
        kind,
        value: if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        },
    };
    match number {
        DataNumber::I32(v) => Ok(Number::from(*v)),
        DataNumber::I64(v) => Ok(Number::from(*v)),
        DataNumber::F32(v) => {
            Number::from_f64(f64::from(*v)).ok_or_else(|| non_finite("float", f64::from(*v)))
        }
        DataNumber::F64(v) => Number::from_f64(*v).ok_or_else(|| non_finite("double", *v)),
        DataNumber::Lexical(text) => {
            Number::from_str(text).map_err(|_| JsonError::InvalidNumberLiteral {
                literal: text.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let element = from_value(json!({
            "name": "toth",
            "tags": ["a", null, true],
            "size": 12
        }));
        let map = element.as_map().unwrap();
        assert_eq!(map.get("name"), Some(&DataElement::from("toth")));
        assert_eq!(map.get("size"), Some(&DataElement::from(12)));
        let tags = map.get("tags").and_then(DataElement::as_list).unwrap();
        assert_eq!(tags.len(), 3);
        assert!(tags.get(1).is_some_and(DataElement::is_null));
    }

    #[test]
    fn test_to_value() {
        let mut map = DataMap::new();
        map.insert("pi", 3.5);
        map.insert("list", DataList::from(vec![DataElement::from(1), DataElement::Null]));
        map.insert("big", DataNumber::lexical("12345678901234567890"));

        let value = to_value(&DataElement::Map(map)).unwrap();
        assert_eq!(value["pi"], json!(3.5));
        assert_eq!(value["list"], json!([1, null]));
        assert!(value["big"].is_number());
    }

    #[test]
    fn test_to_value_rejects_non_finite() {
        let err = to_value(&DataElement::from(f64::NAN)).unwrap_err();
        assert_eq!(err.to_string(), "double with value NaN is not valid in json!");

        let err = to_value(&DataElement::from(f32::NEG_INFINITY)).unwrap_err();
        assert_eq!(err.to_string(), "float with value -Infinity is not valid in json!");
    }

    #[test]
    fn test_to_value_rejects_bad_literal() {
        let err = to_value(&DataElement::Number(DataNumber::lexical("1.2.3"))).unwrap_err();
        assert!(matches!(err, JsonError::InvalidNumberLiteral { .. }));
    }
}
