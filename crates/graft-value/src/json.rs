//! Conversion between value graphs and `serde_json` trees.
//!
//! Building a graph from JSON always yields a fresh, acyclic, unaliased
//! graph. Converting back follows the usual JSON serialization rules:
//! `undefined`, functions and symbols are dropped from objects and rendered as
//! `null` inside sequences, sets render as arrays, and maps render as objects
//! when every key is a string.

use serde_json::{Map, Number};

use crate::ancestors::Ancestors;
use crate::error::{ValueError, ValueResult};
use crate::value::Value;

// Largest integer an f64 holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>())
            }
            serde_json::Value::Object(map) => {
                Value::object_from(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

impl Value {
    /// Convert an acyclic graph to a JSON tree.
    ///
    /// Shared subtrees are duplicated in the output. A cycle fails with
    /// [`ValueError::Cyclic`].
    pub fn to_json(&self) -> ValueResult<serde_json::Value> {
        to_json_inner(self, &Ancestors::new())
    }
}

fn to_json_inner(value: &Value, path: &Ancestors) -> ValueResult<serde_json::Value> {
    if path.contains(value) {
        return Err(ValueError::Cyclic);
    }
    match value {
        Value::Undefined | Value::Null | Value::Symbol(_) | Value::Function(_) => {
            Ok(serde_json::Value::Null)
        }
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => number_to_json(*n).map(serde_json::Value::Number),
        Value::BigInt(n) => bigint_to_json(*n).map(serde_json::Value::Number),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Array(_) | Value::Set(_) => {
            let path = path.extended(value);
            value
                .elements()
                .iter()
                .map(|item| to_json_inner(item, &path))
                .collect::<ValueResult<Vec<_>>>()
                .map(serde_json::Value::Array)
        }
        Value::Object(_) => {
            let path = path.extended(value);
            let mut out = Map::new();
            for (key, item) in value.own_entries() {
                if omitted_from_objects(&item) {
                    continue;
                }
                let name = key.as_name().unwrap_or_default();
                out.insert(name, to_json_inner(&item, &path)?);
            }
            Ok(serde_json::Value::Object(out))
        }
        Value::Map(_) => {
            let path = path.extended(value);
            let mut out = Map::new();
            for (key, item) in value.map_entries() {
                let Value::String(name) = key else {
                    return Err(ValueError::Unsupported(format!(
                        "map key of type {} has no JSON form",
                        key.type_name()
                    )));
                };
                if omitted_from_objects(&item) {
                    continue;
                }
                out.insert(name, to_json_inner(&item, &path)?);
            }
            Ok(serde_json::Value::Object(out))
        }
    }
}

fn omitted_from_objects(value: &Value) -> bool {
    matches!(
        value,
        Value::Undefined | Value::Symbol(_) | Value::Function(_)
    )
}

fn number_to_json(n: f64) -> ValueResult<Number> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        // Integral values render as JSON integers so `1.0` round-trips to `1`.
        return Ok(if n >= 0.0 {
            Number::from(n as u64)
        } else {
            Number::from(n as i64)
        });
    }
    Number::from_f64(n).ok_or_else(|| ValueError::Unsupported(format!("number {n}")))
}

fn bigint_to_json(n: i128) -> ValueResult<Number> {
    if let Ok(v) = i64::try_from(n) {
        return Ok(Number::from(v));
    }
    u64::try_from(n)
        .map(Number::from)
        .map_err(|_| ValueError::Unsupported(format!("bigint {n} exceeds 64 bits")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip_plain_json() {
        let doc = json!({
            "name": "foo",
            "age": 42,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "address": {"city": "bar", "zip": null},
            "active": true
        });
        let value = Value::from(doc.clone());
        assert_eq!(value.to_json().unwrap(), doc);
    }

    #[test]
    fn non_data_values_are_dropped_or_nulled() {
        let obj = Value::object_from([
            ("f", Value::function("callback")),
            ("u", Value::Undefined),
            ("list", Value::from(vec![Value::symbol("s"), Value::from(1)])),
        ]);
        assert_eq!(obj.to_json().unwrap(), json!({"list": [null, 1]}));
    }

    #[test]
    fn sets_and_string_keyed_maps() {
        let set = Value::set_from([Value::from(1), Value::from("x")]);
        assert_eq!(set.to_json().unwrap(), json!([1, "x"]));

        let map = Value::map_from([(Value::from("k"), Value::from(true))]);
        assert_eq!(map.to_json().unwrap(), json!({"k": true}));

        let bad = Value::map_from([(Value::from(1), Value::from(true))]);
        assert!(matches!(bad.to_json(), Err(ValueError::Unsupported(_))));
    }

    #[test]
    fn bigints_render_as_integers() {
        assert_eq!(Value::from(12i128).to_json().unwrap(), json!(12));
        assert!(Value::from(i128::MAX).to_json().is_err());
    }

    #[test]
    fn non_finite_numbers_are_unsupported() {
        assert!(Value::from(f64::NAN).to_json().is_err());
        assert!(Value::from(f64::INFINITY).to_json().is_err());
    }

    #[test]
    fn cycles_are_rejected() {
        let obj = Value::new_object();
        obj.set("me", obj.clone());
        assert_eq!(obj.to_json(), Err(ValueError::Cyclic));
        obj.clear();
    }

    #[test]
    fn shared_subtrees_are_not_cycles() {
        let shared = Value::object_from([("x", Value::from(1))]);
        let root = Value::object_from([("a", shared.clone()), ("b", shared)]);
        assert_eq!(
            root.to_json().unwrap(),
            json!({"a": {"x": 1}, "b": {"x": 1}})
        );
    }
}
