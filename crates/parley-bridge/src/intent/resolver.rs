//! `IntentResolver`: the translation layer in front of the NLU backend.

use async_trait::async_trait;
use parley_common::{Result, SessionId};
use tracing::debug;

use super::types::{Entity, IntentResult, ParameterValue, QueryResult};

/// One detectIntent query.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectIntentQuery {
    pub project_id: String,
    pub session_id: SessionId,
    pub text: String,
    pub language_code: String,
}

impl DetectIntentQuery {
    /// Backend session path, `projects/{project}/agent/sessions/{session}`.
    pub fn session_path(&self) -> String {
        format!(
            "projects/{}/agent/sessions/{}",
            self.project_id, self.session_id
        )
    }
}

/// A natural-language-understanding backend.
#[async_trait]
pub trait NluClient: Send + Sync {
    /// Run a single query and return the backend's decoded result.
    ///
    /// Any transport or service failure is reported as
    /// `BridgeError::BackendUnavailable`.
    async fn detect_intent(&self, query: &DetectIntentQuery) -> Result<QueryResult>;
}

pub struct IntentResolver {
    client: Box<dyn NluClient>,
    project_id: String,
}

impl IntentResolver {
    pub fn new(client: Box<dyn NluClient>, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
        }
    }

    /// Resolve one user turn.
    pub async fn resolve(
        &self,
        language_code: &str,
        text: &str,
        session: &SessionId,
    ) -> Result<IntentResult> {
        if text.trim().is_empty() {
            debug!(session = %session, "forwarding blank input to NLU backend");
        }

        let query = DetectIntentQuery {
            project_id: self.project_id.clone(),
            session_id: session.clone(),
            text: text.to_string(),
            language_code: language_code.to_string(),
        };

        let result = self.client.detect_intent(&query).await?;
        let entities = flatten_parameters(&result.parameters);

        debug!(
            intent = %result.intent_display_name,
            confidence = result.confidence,
            entities = entities.len(),
            "Intent resolved"
        );

        Ok(IntentResult {
            name: result.intent_display_name,
            confidence: result.confidence,
            entities,
        })
    }
}

/// Flatten a parameter map into entities, one per key, in backend order.
/// Only the string variant carries a value.
pub fn flatten_parameters(parameters: &[(String, ParameterValue)]) -> Vec<Entity> {
    parameters
        .iter()
        .map(|(name, value)| Entity::new(name.clone(), value.as_string().map(String::from)))
        .collect()
}
