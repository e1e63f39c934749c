//! Parley configuration.
//!
//! Non-secret settings come from an optional TOML file with per-field
//! defaults, overridable through `PARLEY_*` environment variables. Backend
//! secrets (`CREDENTIALS`, `API_KEY`) are only ever read from the
//! environment, which may be seeded from a `.env` file.
//!
//! ```rust,no_run
//! parley_config::load_dotenv();
//! let config = parley_config::load_config(None).expect("failed to load config");
//! let secrets = parley_config::Secrets::from_env().expect("missing secrets");
//! println!("{} / {:?}", config.dialogue.runtime_url, secrets);
//! ```

pub mod credentials;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use credentials::{Secrets, ServiceAccountCredentials};
pub use schema::{ConversationConfig, DialogueConfig, NluConfig, ParleyConfig};

use std::path::Path;

use parley_common::ConfigError;

pub const RUNTIME_URL_VAR: &str = "PARLEY_RUNTIME_URL";
pub const VERSION_ID_VAR: &str = "PARLEY_VERSION_ID";
pub const LANGUAGE_CODE_VAR: &str = "PARLEY_LANGUAGE_CODE";

/// Seed the process environment from a `.env` file in the working
/// directory or any parent. Variables already set are left untouched.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("failed to read .env: {e}"),
    }
}

/// Load, override and validate the configuration.
///
/// `path` selects an explicit TOML file; `None` uses the platform default
/// location, falling back to built-in defaults when that file is absent.
pub fn load_config(path: Option<&Path>) -> Result<ParleyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validation::validate(&config)?;
    Ok(config)
}

/// Apply `PARLEY_*` overrides on top of file values.
pub fn apply_env_overrides(config: &mut ParleyConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(RUNTIME_URL_VAR) {
        config.dialogue.runtime_url = url;
    }
    if let Some(version) = lookup(VERSION_ID_VAR) {
        config.dialogue.version_id = Some(version);
    }
    if let Some(code) = lookup(LANGUAGE_CODE_VAR) {
        config.nlu.language_code = code;
    }
}
