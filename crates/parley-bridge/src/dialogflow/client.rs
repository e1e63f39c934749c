//! Dialogflow client struct, request building, and response parsing.

use parley_common::{BridgeError, ConfigError, Result};
use serde_json::Value;

use crate::intent::{is_tagged_value, struct_fields, DetectIntentQuery, ParameterValue, QueryResult};

use super::auth::TokenSource;
use super::config::DialogflowConfig;

/// Dialogflow ES `detectIntent` client.
pub struct DialogflowClient {
    pub(crate) config: DialogflowConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) tokens: TokenSource,
}

impl DialogflowClient {
    /// Build the client. An unreadable service-account key is a
    /// configuration error surfaced at startup.
    pub fn new(config: DialogflowConfig) -> std::result::Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ConfigError::ParseError(format!("failed to build HTTP client: {e}")))?;
        let tokens = TokenSource::new(
            http.clone(),
            config.token_uri.clone(),
            config.credentials.client_email.clone(),
            &config.credentials.private_key,
        )?;
        Ok(Self {
            config,
            http,
            tokens,
        })
    }

    pub fn project_id(&self) -> &str {
        self.config.project_id()
    }

    pub(crate) fn api_url(&self, query: &DetectIntentQuery) -> String {
        format!(
            "{}/projects/{}/agent/sessions/{}:detectIntent",
            self.config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&query.project_id),
            urlencoding::encode(query.session_id.as_str()),
        )
    }

    pub(crate) fn build_request_body(query: &DetectIntentQuery) -> Value {
        serde_json::json!({
            "queryInput": {
                "text": {
                    "text": query.text,
                    "languageCode": query.language_code,
                }
            }
        })
    }

    /// Parse a detectIntent response body.
    pub(crate) fn parse_response(json: &Value) -> Result<QueryResult> {
        let result = json
            .get("queryResult")
            .filter(|r| r.is_object())
            .ok_or_else(|| BridgeError::backend_unavailable("no queryResult in response"))?;

        // No intent object at all means nothing matched.
        let intent_display_name = result["intent"]["displayName"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        let confidence = result["intentDetectionConfidence"].as_f64().unwrap_or(0.0);

        Ok(QueryResult {
            intent_display_name,
            confidence,
            parameters: parameters_from_json(result.get("parameters")),
        })
    }
}

/// Decode `queryResult.parameters` in either the REST (plain object) or
/// protobuf `Struct` (`{"fields": {...}}`) encoding.
///
/// The protobuf form is only assumed when `fields` is the sole key and every
/// entry under it is a tagged `Value`. A REST parameter literally named
/// `fields` holding an empty object is still read as an empty `Struct`.
fn parameters_from_json(parameters: Option<&Value>) -> Vec<(String, ParameterValue)> {
    let Some(value) = parameters else {
        return Vec::new();
    };
    let Some(map) = value.as_object() else {
        return Vec::new();
    };
    let is_struct = map.len() == 1
        && map
            .get("fields")
            .and_then(Value::as_object)
            .is_some_and(|fields| fields.values().all(is_tagged_value));
    if is_struct {
        return struct_fields(value);
    }
    map.iter()
        .map(|(k, v)| (k.clone(), ParameterValue::from_json(v)))
        .collect()
}
