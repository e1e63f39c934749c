//! NluClient trait implementation for DialogflowClient.

use async_trait::async_trait;
use parley_common::{BridgeError, Result};
use tracing::debug;

use crate::intent::{DetectIntentQuery, NluClient, QueryResult};
use crate::truncate_body;

use super::client::DialogflowClient;

#[async_trait]
impl NluClient for DialogflowClient {
    async fn detect_intent(&self, query: &DetectIntentQuery) -> Result<QueryResult> {
        let token = self.tokens.access_token().await?;
        let body = Self::build_request_body(query);
        let url = self.api_url(query);

        debug!(session = %query.session_path(), "Dialogflow detectIntent request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| BridgeError::backend_unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BridgeError::BackendUnavailable {
                status: Some(status.as_u16()),
                detail: truncate_body(&text, 500),
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BridgeError::backend_unavailable(format!("malformed response: {e}")))?;

        Self::parse_response(&json)
    }
}
