//! TOML config schema. Every section has defaults so a missing or partial
//! file still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    pub nlu: NluConfig,
    pub dialogue: DialogueConfig,
    pub conversation: ConversationConfig,
}

/// NLU backend (Dialogflow ES) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NluConfig {
    /// Base URL of the Dialogflow v2 REST API.
    pub endpoint: String,
    /// OAuth2 token endpoint used to exchange the service-account assertion.
    pub token_uri: String,
    /// Locale tag sent with every detectIntent query.
    pub language_code: String,
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://dialogflow.googleapis.com/v2".into(),
            token_uri: "https://oauth2.googleapis.com/token".into(),
            language_code: "en".into(),
        }
    }
}

/// Dialogue backend (Voiceflow general runtime) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    pub runtime_url: String,
    /// Pins the interaction to a specific project version when set.
    pub version_id: Option<String>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            runtime_url: "https://general-runtime.voiceflow.com".into(),
            version_id: None,
        }
    }
}

/// Prompt and farewell texts shown by the conversation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    pub name_prompt: String,
    pub input_prompt: String,
    pub farewell: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            name_prompt: "What is your name?".into(),
            input_prompt: "Say something".into(),
            farewell: "The end! Start me again with `parley`".into(),
        }
    }
}
