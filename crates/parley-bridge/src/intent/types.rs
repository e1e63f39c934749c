//! Intent result and parameter value types.

use serde::Serialize;
use serde_json::Value;

/// One extracted (name, value) pair.
///
/// `value` is only set when the backend reported a string; it is omitted
/// from the wire form otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Entity {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The outcome of resolving one user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    /// Backend-assigned intent name. Empty when nothing matched.
    pub name: String,
    /// Backend-reported confidence, passed through unvalidated.
    pub confidence: f64,
    pub entities: Vec<Entity>,
}

/// A typed parameter value as reported by the NLU backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Null,
    Number(f64),
    String(String),
    Bool(bool),
    List(Vec<ParameterValue>),
    Struct(Vec<(String, ParameterValue)>),
}

/// Protobuf `Value` variant keys, as produced by the gRPC JSON mapping.
const VARIANT_KEYS: [&str; 6] = [
    "nullValue",
    "numberValue",
    "stringValue",
    "boolValue",
    "listValue",
    "structValue",
];

impl ParameterValue {
    /// The string payload, if this is the string variant.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Decode a parameter value.
    ///
    /// Accepts both the plain JSON encoding used by the REST API and the
    /// tagged protobuf encoding (`{"stringValue": "Paris", "kind": "stringValue"}`).
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => match tagged_variant(map) {
                Some((key, inner)) => Self::from_tagged(key, inner),
                None => Self::Struct(
                    map.iter()
                        .map(|(k, v)| (k.clone(), Self::from_json(v)))
                        .collect(),
                ),
            },
        }
    }

    fn from_tagged(key: &str, inner: &Value) -> Self {
        match (key, inner) {
            ("stringValue", Value::String(s)) => Self::String(s.clone()),
            ("numberValue", Value::Number(n)) => Self::Number(n.as_f64().unwrap_or_default()),
            ("boolValue", Value::Bool(b)) => Self::Bool(*b),
            ("listValue", v) => Self::List(
                v.get("values")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().map(Self::from_json).collect())
                    .unwrap_or_default(),
            ),
            ("structValue", v) => Self::Struct(struct_fields(v)),
            _ => Self::Null,
        }
    }
}

/// Identify the active variant of a protobuf-tagged value object.
fn tagged_variant(map: &serde_json::Map<String, Value>) -> Option<(&str, &Value)> {
    if let Some(kind) = map.get("kind").and_then(Value::as_str) {
        if VARIANT_KEYS.contains(&kind) {
            return Some((kind, map.get(kind).unwrap_or(&Value::Null)));
        }
    }
    if map.len() == 1 {
        let (key, inner) = map.iter().next()?;
        if VARIANT_KEYS.contains(&key.as_str()) {
            return Some((key.as_str(), inner));
        }
    }
    None
}

/// Whether `value` is a protobuf `Value` object such as `{"stringValue": ..}`.
pub(crate) fn is_tagged_value(value: &Value) -> bool {
    value.as_object().and_then(tagged_variant).is_some()
}

/// Entries of a protobuf `Struct` (`{"fields": {...}}`), in backend order.
pub(crate) fn struct_fields(value: &Value) -> Vec<(String, ParameterValue)> {
    value
        .get("fields")
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .map(|(k, v)| (k.clone(), ParameterValue::from_json(v)))
                .collect()
        })
        .unwrap_or_default()
}

/// The slice of a detectIntent reply the resolver depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub intent_display_name: String,
    pub confidence: f64,
    /// Parameters in the order the backend listed them.
    pub parameters: Vec<(String, ParameterValue)>,
}
