//! `DialogueBridge`: sends actions and turns trace batches into control flow.

use async_trait::async_trait;
use parley_common::{Result, SessionId};
use tracing::debug;

use super::action::Action;
use super::trace::Trace;

/// A dialogue-management backend.
#[async_trait]
pub trait DialogueTransport: Send + Sync {
    /// Deliver one action and return the complete trace batch it produced.
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// all reported as `BridgeError::InteractionFailed`.
    async fn interact(&self, session: &SessionId, action: &Action) -> Result<Vec<Trace>>;
}

/// Destination for user-visible dialogue output.
pub trait MessageSink {
    fn emit(&mut self, message: &str) -> std::io::Result<()>;
}

impl MessageSink for Vec<String> {
    fn emit(&mut self, message: &str) -> std::io::Result<()> {
        self.push(message.to_string());
        Ok(())
    }
}

pub struct DialogueBridge {
    transport: Box<dyn DialogueTransport>,
}

impl DialogueBridge {
    pub fn new(transport: Box<dyn DialogueTransport>) -> Self {
        Self { transport }
    }

    /// Send one action. Returns `false` once the backend ends the dialogue.
    pub async fn send(
        &self,
        session: &SessionId,
        action: &Action,
        sink: &mut (dyn MessageSink + Send),
    ) -> Result<bool> {
        let traces = self.transport.interact(session, action).await?;
        debug!(
            session = %session,
            action = action.kind(),
            traces = traces.len(),
            "Dialogue traces received"
        );
        interpret_traces(&traces, sink)
    }
}

/// Walk a trace batch in order, emitting text and speech.
///
/// An `End` trace stops the walk immediately and yields `false`; later
/// traces are never looked at. A batch without `End` yields `true`.
pub fn interpret_traces(traces: &[Trace], sink: &mut (dyn MessageSink + Send)) -> Result<bool> {
    for trace in traces {
        match trace {
            Trace::Text(message) | Trace::Speak(message) => sink.emit(message)?,
            Trace::End => return Ok(false),
            Trace::Other(kind) => debug!(kind = %kind, "Ignoring trace"),
        }
    }
    Ok(true)
}
