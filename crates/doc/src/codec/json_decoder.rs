//! Decoder for `application/json` bodies.
//!
//! Only top-level keys of a JSON object become pairs. Nested values are not
//! walked; they are flattened to their compact JSON text. String values lose
//! their quotes, so `{"y":"z"}` yields the value `z`.
//!
//! This decoder never fails: a body that is not JSON, or JSON whose top level
//! is not an object, simply yields no pairs.

use crate::codec::RawPair;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn decode(&self, body: &[u8]) -> Vec<RawPair> {
        let value = match serde_json::from_slice::<Value>(body) {
            Ok(value) => value,
            Err(e) => {
                debug!(cause = %e, "body is not valid json, no attributes");
                return vec![];
            }
        };

        match value {
            Value::Object(map) => map.into_iter().map(|(key, value)| RawPair::text(key, stringify(value))).collect(),
            other => {
                debug!(kind = json_kind(&other), "json body is not an object, no attributes");
                vec![]
            }
        }
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
