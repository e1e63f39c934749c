//! Voiceflow client struct, request building, and response parsing.

use parley_common::{BridgeError, ConfigError, Result, SessionId};

use crate::dialogue::{Action, InteractRequest, Trace};

use super::config::VoiceflowConfig;

/// Header names are case-insensitive; Voiceflow documents it as `versionID`.
pub(crate) const VERSION_HEADER: &str = "versionid";

/// Voiceflow general-runtime `interact` client.
pub struct VoiceflowClient {
    pub(crate) config: VoiceflowConfig,
    pub(crate) http: reqwest::Client,
}

impl VoiceflowClient {
    pub fn new(config: VoiceflowConfig) -> std::result::Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ConfigError::ParseError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// `{runtime}/state/user/{session}/interact`
    pub(crate) fn interact_url(&self, session: &SessionId) -> String {
        format!(
            "{}/state/user/{}/interact",
            self.config.runtime_url.trim_end_matches('/'),
            urlencoding::encode(session.as_str()),
        )
    }

    pub(crate) fn auth_headers(&self) -> Result<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();
        let key = self
            .config
            .api_key
            .parse()
            .map_err(|_| ConfigError::ValidationError("API key is not a valid header value".into()))?;
        headers.insert(reqwest::header::AUTHORIZATION, key);

        if let Some(version) = &self.config.version_id {
            let value = version.parse().map_err(|_| {
                ConfigError::ValidationError("version id is not a valid header value".into())
            })?;
            headers.insert(VERSION_HEADER, value);
        }
        Ok(headers)
    }

    pub(crate) fn build_request_body(action: &Action) -> InteractRequest<'_> {
        InteractRequest { request: action }
    }

    /// Decode the trace array of a successful response.
    pub(crate) fn parse_response(json: &serde_json::Value) -> Result<Vec<Trace>> {
        Trace::parse_batch(json).map_err(|detail| BridgeError::InteractionFailed {
            status: None,
            detail: format!("malformed response: {detail}"),
        })
    }
}
