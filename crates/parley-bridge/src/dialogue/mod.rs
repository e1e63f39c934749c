//! Dialogue side of the bridge: actions out, traces in.

mod action;
mod bridge;
mod trace;

pub use action::{Action, IntentName, IntentPayload};
pub(crate) use action::InteractRequest;
pub use bridge::{interpret_traces, DialogueBridge, DialogueTransport, MessageSink};
pub use trace::Trace;
