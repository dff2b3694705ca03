//! JSON interop.
//!
//! Serialization follows JSON text conventions: record members holding
//! `Absent`, functions or symbols are skipped, the same values inside a
//! sequence become `null`, and symbol keys and named sequence properties are
//! dropped. Sets serialize as arrays, maps as arrays of `[key, value]` pairs.

use crate::{Record, Result, Sequence, Value};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Integers up to 2^53 round-trip through `f64` exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Value {
    /// Parses JSON text into a value.
    pub fn from_json_str(text: &str) -> Result<Value> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(json.into())
    }

    /// Converts the value into a `serde_json::Value`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect::<Sequence>())
            }
            serde_json::Value::Object(members) => Value::Record(
                members
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Record>(),
            ),
        }
    }
}

/// Values with no JSON text representation inside a container.
fn is_unrepresentable(value: &Value) -> bool {
    matches!(value, Value::Absent | Value::Function(_) | Value::Symbol(_))
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if !n.is_finite() {
        serializer.serialize_unit()
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Absent | Value::Null | Value::Symbol(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Function(f) => Err(S::Error::custom(format!(
                "cannot serialize function `{}`",
                f.name()
            ))),
            Value::Opaque(o) => Err(S::Error::custom(format!(
                "cannot serialize opaque value of type `{}`",
                o.type_name()
            ))),
            Value::Record(record) => {
                let members: Vec<_> = record
                    .entries()
                    .into_iter()
                    .filter(|(_, value)| !is_unrepresentable(value))
                    .filter_map(|(key, value)| key.as_str().map(|k| (k.to_owned(), value)))
                    .collect();
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in &members {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Sequence(sequence) => {
                let len = sequence.len();
                let mut entries = sequence.entries().into_iter().peekable();
                let mut seq = serializer.serialize_seq(Some(len))?;
                for index in 0..len {
                    match entries.next_if(|(at, _)| *at == index) {
                        Some((_, value)) if !is_unrepresentable(&value) => {
                            seq.serialize_element(&value)?;
                        }
                        _ => seq.serialize_element(&Value::Null)?,
                    }
                }
                seq.end()
            }
            Value::Set(set) => {
                let values = set.values().map_err(S::Error::custom)?;
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in &values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let entries = map.entries().map_err(S::Error::custom)?;
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for (key, value) in &entries {
                    seq.serialize_element(&(key, value))?;
                }
                seq.end()
            }
        }
    }
}
