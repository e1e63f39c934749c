//! Dialogue backend trace events.

use serde::Deserialize;
use serde_json::Value;

/// One event in the dialogue backend's reply to a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum Trace {
    Text(String),
    Speak(String),
    End,
    /// Any other trace kind (visuals, choices, debug, ...), ignored.
    Other(String),
}

#[derive(Deserialize)]
struct RawTrace {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl Trace {
    /// Decode a response body, which must be a JSON array of traces.
    ///
    /// Decoding stops at the first `end` trace; whatever follows it is
    /// never inspected.
    pub fn parse_batch(body: &Value) -> Result<Vec<Self>, String> {
        let items = body
            .as_array()
            .ok_or_else(|| "response body is not a trace array".to_string())?;
        let mut batch = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let trace = Self::from_json(item).map_err(|e| format!("trace {i}: {e}"))?;
            let end = trace == Self::End;
            batch.push(trace);
            if end {
                break;
            }
        }
        Ok(batch)
    }

    pub fn from_json(value: &Value) -> Result<Self, String> {
        let raw = RawTrace::deserialize(value).map_err(|e| e.to_string())?;
        match raw.kind.as_str() {
            "text" => message(&raw.payload).map(Self::Text),
            "speak" => message(&raw.payload).map(Self::Speak),
            "end" => Ok(Self::End),
            _ => Ok(Self::Other(raw.kind)),
        }
    }
}

fn message(payload: &Value) -> Result<String, String> {
    payload
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| "missing payload.message".to_string())
}
