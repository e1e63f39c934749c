//! Voiceflow runtime client configuration.

use std::fmt;

use parley_config::DialogueConfig;

#[derive(Clone)]
pub struct VoiceflowConfig {
    /// Dialogue API key, sent verbatim in the `Authorization` header.
    pub api_key: String,
    pub runtime_url: String,
    pub version_id: Option<String>,
}

impl fmt::Debug for VoiceflowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceflowConfig")
            .field("api_key", &"[REDACTED]")
            .field("runtime_url", &self.runtime_url)
            .field("version_id", &self.version_id)
            .finish()
    }
}

impl VoiceflowConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        let defaults = DialogueConfig::default();
        Self {
            api_key: api_key.into(),
            runtime_url: defaults.runtime_url,
            version_id: defaults.version_id,
        }
    }

    /// Build from the `[dialogue]` config section.
    pub fn from_settings(settings: &DialogueConfig, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            runtime_url: settings.runtime_url.clone(),
            version_id: settings.version_id.clone(),
        }
    }

    pub fn with_runtime_url(mut self, url: impl Into<String>) -> Self {
        self.runtime_url = url.into();
        self
    }

    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = VoiceflowConfig::new("VF.DM.secret");
        let out = format!("{config:?}");
        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains("VF.DM.secret"));
    }
}
