//! JSON claims serialization for PASETO tokens.
//!
//! JSON is the standard PASETO payload encoding. [`JsonSerializer`] converts
//! [`Claims`] to and from a JSON object using [`serde_json`].
//!
//! When using a JSON footer, you should be aware of the risks of parsing user provided JSON.
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/02-Implementation-Guide/01-Payload-Processing.md#storing-json-in-the-footer>.
//!
//! [`serde_json`] by default offers a stack-overflow protection limit on parsing JSON.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use paseto_core::PasetoError;
use paseto_core::claims::{ClaimValue, Claims, format_timestamp};
use paseto_core::encodings::{ClaimsDeserializer, ClaimsSerializer};
use serde_json::{Map, Number, Value};

pub use serde_json;

/// The default claims encoding: a single JSON object.
///
/// Timestamps are written as RFC 3339 strings with a `+00:00` offset. Integers
/// that fit in an `i64` are read back as integers, other numbers as floats.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer;

impl ClaimsSerializer for JsonSerializer {
    fn serialize(&self, claims: &Claims) -> Result<Vec<u8>, PasetoError> {
        let object = claims
            .iter()
            .map(|(name, value)| Ok((name.to_owned(), to_json(value)?)))
            .collect::<Result<Map<String, Value>, PasetoError>>()?;

        serde_json::to_vec(&Value::Object(object)).map_err(|e| PasetoError::Serialization(e.to_string()))
    }
}

impl ClaimsDeserializer for JsonSerializer {
    fn deserialize(&self, bytes: &[u8]) -> Result<Claims, PasetoError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| PasetoError::Serialization(format!("invalid JSON: {e}")))?;

        match value {
            Value::Object(object) => Ok(Claims::from_map(
                object
                    .into_iter()
                    .map(|(name, value)| (name, from_json(value)))
                    .collect(),
            )),
            other => Err(PasetoError::Serialization(format!(
                "expected a JSON object, found {}",
                json_type(&other)
            ))),
        }
    }
}

fn to_json(value: &ClaimValue) -> Result<Value, PasetoError> {
    Ok(match value {
        ClaimValue::Null => Value::Null,
        ClaimValue::Bool(b) => Value::Bool(*b),
        ClaimValue::Integer(i) => Value::Number((*i).into()),
        ClaimValue::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
            PasetoError::Serialization(format!("{f} cannot be represented in JSON"))
        })?,
        ClaimValue::String(s) => Value::String(s.clone()),
        ClaimValue::Timestamp(ts) => Value::String(format_timestamp(*ts)),
        ClaimValue::Array(values) => {
            Value::Array(values.iter().map(to_json).collect::<Result<_, _>>()?)
        }
        ClaimValue::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), to_json(v)?)))
                .collect::<Result<_, PasetoError>>()?,
        ),
    })
}

fn from_json(value: Value) -> ClaimValue {
    match value {
        Value::Null => ClaimValue::Null,
        Value::Bool(b) => ClaimValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ClaimValue::Integer(i),
            // u64 above i64::MAX, or a fractional number
            None => ClaimValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => ClaimValue::String(s),
        Value::Array(values) => ClaimValue::Array(values.into_iter().map(from_json).collect()),
        Value::Object(object) => ClaimValue::Object(
            object
                .into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
