//! Backend bridge for Parley.
//!
//! Two translation layers sit between the conversation loop and the
//! network:
//! - [`IntentResolver`] turns user text into an [`IntentResult`] through an
//!   [`NluClient`] (Dialogflow ES in production).
//! - [`DialogueBridge`] sends an [`Action`] through a [`DialogueTransport`]
//!   (Voiceflow general runtime in production) and interprets the returned
//!   trace batch into printed messages and a continue/stop signal.
//!
//! Both backends are reached through traits so either side can be replaced
//! by a test double.

pub mod dialogflow;
pub mod dialogue;
pub mod intent;
pub mod voiceflow;

pub use dialogflow::{DialogflowClient, DialogflowConfig};
pub use dialogue::{
    interpret_traces, Action, DialogueBridge, DialogueTransport, MessageSink, Trace,
};
pub use intent::{
    DetectIntentQuery, Entity, IntentResolver, IntentResult, NluClient, ParameterValue,
    QueryResult,
};
pub use voiceflow::{VoiceflowClient, VoiceflowConfig};

/// Keep at most `max` characters of a backend body for error diagnostics.
pub(crate) fn truncate_body(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}
