//! Configuration validation. Collects every problem into one `ConfigError`.

use crate::schema::ParleyConfig;
use parley_common::ConfigError;

pub fn validate(config: &ParleyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_url(&mut errors, "nlu.endpoint", &config.nlu.endpoint);
    validate_url(&mut errors, "nlu.token_uri", &config.nlu.token_uri);
    validate_url(&mut errors, "dialogue.runtime_url", &config.dialogue.runtime_url);

    validate_non_empty(&mut errors, "nlu.language_code", &config.nlu.language_code);
    validate_non_empty(
        &mut errors,
        "conversation.name_prompt",
        &config.conversation.name_prompt,
    );
    validate_non_empty(
        &mut errors,
        "conversation.input_prompt",
        &config.conversation.input_prompt,
    );

    if let Some(version) = &config.dialogue.version_id {
        validate_non_empty(&mut errors, "dialogue.version_id", version);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_url(errors: &mut Vec<String>, name: &str, value: &str) {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        errors.push(format!("{name} = {value:?} must be an http(s) URL"));
    }
}

fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}
