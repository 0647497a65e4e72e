//! JSON conversion for [`Value`].
//!
//! Serialization follows `JSON.stringify`: members holding `undefined`, a
//! function, or a symbol are dropped from objects and written as `null`
//! inside lists. Non-finite numbers become `null`, and integral numbers are
//! written without a fractional part.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::TypeError;
use crate::handle::List;
use crate::value::{Map, Value};

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Value {
    /// Returns `true` for values JSON cannot carry as an object member.
    pub fn is_json_omitted(&self) -> bool {
        matches!(
            self,
            Value::Undefined | Value::Function(_) | Value::Symbol(_)
        )
    }

    /// Convert to a `serde_json::Value`. Returns `None` for values JSON
    /// cannot represent at the top level (`undefined`, functions, symbols).
    pub fn to_json(&self) -> Option<serde_json::Value> {
        if self.is_json_omitted() {
            return None;
        }
        serde_json::to_value(self).ok()
    }

    /// Parse JSON text. Every array becomes a freshly allocated list.
    pub fn from_json_str(text: &str) -> Result<Value, TypeError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| TypeError::InvalidJson(e.to_string()))?;
        Ok(Value::from(json))
    }

    /// Render as compact JSON text.
    pub fn to_json_string(&self) -> Result<String, TypeError> {
        serde_json::to_string(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect::<List>())
            }
            serde_json::Value::Object(members) => Value::Map(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !n.is_finite() {
        serializer.serialize_unit()
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null | Value::Function(_) | Value::Symbol(_) => {
                serializer.serialize_unit()
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for item in list.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(None)?;
        for (key, value) in self.iter().filter(|(_, v)| !v.is_json_omitted()) {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handle::{Function, Symbol};

    #[test]
    fn from_json_builds_maps_and_lists() {
        let value = Value::from(json!({"person": {"age": 45, "tags": ["a", "b"]}}));
        let person = value.get("person");
        assert_eq!(person.get("age"), &Value::from(45));
        assert_eq!(person.get("tags").as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn json_arrays_are_fresh_lists() {
        let json = json!([1, 2, 3]);
        let a = Value::from(&json);
        let b = Value::from(&json);
        assert!(!a.strict_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn serialization_drops_unrepresentable_members() {
        let mut map = Map::new();
        map.insert("count", Value::from(3));
        map.insert("handler", Value::from(Function::new("noop", |_| Value::Undefined)));
        map.insert("token", Value::from(Symbol::new("t")));

        let json = serde_json::to_value(Value::Map(map)).unwrap();
        assert_eq!(json, json!({"count": 3}));
    }

    #[test]
    fn unrepresentable_list_items_become_null() {
        let list = Value::from(vec![
            Value::from(1),
            Value::Undefined,
            Value::from(Function::new("f", |_| Value::Null)),
        ]);
        assert_eq!(list.to_json(), Some(json!([1, null, null])));
    }

    #[test]
    fn numbers_serialize_like_javascript() {
        assert_eq!(Value::from(42).to_json_string().unwrap(), "42");
        assert_eq!(Value::from(1.5).to_json_string().unwrap(), "1.5");
        assert_eq!(Value::from(f64::NAN).to_json_string().unwrap(), "null");
        assert_eq!(Value::from(f64::INFINITY).to_json_string().unwrap(), "null");
    }

    #[test]
    fn top_level_undefined_has_no_json() {
        assert_eq!(Value::Undefined.to_json(), None);
        assert_eq!(Value::Null.to_json(), Some(serde_json::Value::Null));
    }

    #[test]
    fn parse_text() {
        let value = Value::from_json_str(r#"{"name": "Jim"}"#).unwrap();
        assert_eq!(value.get("name").as_str(), Some("Jim"));

        let err = Value::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TypeError::InvalidJson(_)));
    }
}
