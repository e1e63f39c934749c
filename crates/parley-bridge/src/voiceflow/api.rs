//! DialogueTransport trait implementation for VoiceflowClient.

use async_trait::async_trait;
use parley_common::{BridgeError, Result, SessionId};
use tracing::debug;

use crate::dialogue::{Action, DialogueTransport, Trace};
use crate::truncate_body;

use super::client::VoiceflowClient;

#[async_trait]
impl DialogueTransport for VoiceflowClient {
    async fn interact(&self, session: &SessionId, action: &Action) -> Result<Vec<Trace>> {
        let url = self.interact_url(session);
        let body = Self::build_request_body(action);

        debug!(session = %session, action = action.kind(), "Voiceflow interact request");

        let response = self
            .http
            .post(&url)
            .headers(self.auth_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| BridgeError::interaction_failed(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| BridgeError::InteractionFailed {
            status: Some(status.as_u16()),
            detail: format!("failed to read body: {e}"),
        })?;

        if !status.is_success() {
            return Err(BridgeError::InteractionFailed {
                status: Some(status.as_u16()),
                detail: truncate_body(&text, 500),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| BridgeError::InteractionFailed {
                status: Some(status.as_u16()),
                detail: format!("malformed response: {e}: {}", truncate_body(&text, 200)),
            })?;

        Self::parse_response(&json)
    }
}
