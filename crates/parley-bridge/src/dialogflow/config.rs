//! Dialogflow client configuration.

use parley_config::{NluConfig, ServiceAccountCredentials};

/// `credentials` redacts its own private key in `Debug`.
#[derive(Debug, Clone)]
pub struct DialogflowConfig {
    /// Base URL of the v2 REST API.
    pub endpoint: String,
    pub token_uri: String,
    pub credentials: ServiceAccountCredentials,
}

impl DialogflowConfig {
    pub fn new(credentials: ServiceAccountCredentials) -> Self {
        let defaults = NluConfig::default();
        Self {
            endpoint: defaults.endpoint,
            token_uri: defaults.token_uri,
            credentials,
        }
    }

    /// Build from the `[nlu]` config section.
    pub fn from_settings(settings: &NluConfig, credentials: ServiceAccountCredentials) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            token_uri: settings.token_uri.clone(),
            credentials,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.credentials.project_id
    }
}
