//! Outbound dialogue requests.

use serde::Serialize;

use crate::intent::{Entity, IntentResult};

/// One conversational turn sent to the dialogue backend.
///
/// Serializes as `{"type":"launch"}` or
/// `{"type":"intent","payload":{"intent":{"name":..},"entities":[..],"confidence":..}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Launch,
    Intent { payload: IntentPayload },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentPayload {
    pub intent: IntentName,
    pub entities: Vec<Entity>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentName {
    pub name: String,
}

impl Action {
    pub fn intent(result: IntentResult) -> Self {
        Self::Intent {
            payload: IntentPayload {
                intent: IntentName { name: result.name },
                entities: result.entities,
                confidence: result.confidence,
            },
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Intent { .. } => "intent",
        }
    }
}

/// Request envelope: `{"request": action}`.
#[derive(Debug, Serialize)]
pub(crate) struct InteractRequest<'a> {
    pub request: &'a Action,
}
