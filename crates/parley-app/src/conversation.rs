//! The turn-taking loop that drives both backends.
//!
//! ```text
//! name prompt -> Launch -> [Running] -> input prompt -> resolve -> Intent -> ...
//!                   \                                                  /
//!                    `---------- End trace -> [Terminated] <----------'
//! ```

#[cfg(test)]
mod tests;

use parley_bridge::{Action, DialogueBridge, IntentResolver, MessageSink};
use parley_common::{Result, SessionId};
use parley_config::ConversationConfig;
use tracing::{debug, info};

use crate::console::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

impl LoopState {
    fn after(continues: bool) -> Self {
        if continues {
            Self::Running
        } else {
            Self::Terminated
        }
    }
}

pub struct ConversationLoop<C: Console> {
    resolver: IntentResolver,
    bridge: DialogueBridge,
    console: C,
    texts: ConversationConfig,
    language_code: String,
}

impl<C: Console> ConversationLoop<C> {
    pub fn new(resolver: IntentResolver, bridge: DialogueBridge, console: C) -> Self {
        Self {
            resolver,
            bridge,
            console,
            texts: ConversationConfig::default(),
            language_code: "en".to_string(),
        }
    }

    pub fn with_texts(mut self, texts: ConversationConfig) -> Self {
        self.texts = texts;
        self
    }

    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }

    /// Run one conversation to completion and return its session.
    ///
    /// Any backend or console failure ends the conversation immediately and
    /// is returned to the caller; the farewell is only shown after an
    /// orderly end.
    pub async fn run(&mut self) -> Result<SessionId> {
        let name = self.console.prompt(&self.texts.name_prompt).await?;
        let session = SessionId::new(name);
        info!(session = %session, "Conversation starting");

        let continues = self
            .bridge
            .send(&session, &Action::Launch, &mut self.console)
            .await?;
        let mut state = LoopState::after(continues);

        while state == LoopState::Running {
            state = self.turn(&session).await?;
        }

        info!(session = %session, "Conversation ended");
        if !self.texts.farewell.is_empty() {
            self.console.emit(&self.texts.farewell)?;
        }
        Ok(session)
    }

    /// One user turn: read, resolve, forward.
    async fn turn(&mut self, session: &SessionId) -> Result<LoopState> {
        let text = self.console.prompt(&self.texts.input_prompt).await?;

        let intent = self
            .resolver
            .resolve(&self.language_code, &text, session)
            .await?;
        debug!(intent = %intent.name, "Forwarding intent");

        let continues = self
            .bridge
            .send(session, &Action::intent(intent), &mut self.console)
            .await?;
        Ok(LoopState::after(continues))
    }

    #[cfg(test)]
    pub(crate) fn console(&self) -> &C {
        &self.console
    }
}
