//! Backend secrets loaded from the process environment.
//!
//! `CREDENTIALS` holds the Google service-account JSON for the NLU backend,
//! `API_KEY` the dialogue backend key. Both are read once at startup.

use std::fmt;

use parley_common::ConfigError;
use serde::Deserialize;

pub const CREDENTIALS_VAR: &str = "CREDENTIALS";
pub const API_KEY_VAR: &str = "API_KEY";

/// The subset of a service-account key file the NLU client needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl ServiceAccountCredentials {
    /// Parse a service-account JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let creds: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(format!("{CREDENTIALS_VAR}: {e}")))?;

        for (field, value) in [
            ("project_id", &creds.project_id),
            ("private_key", &creds.private_key),
            ("client_email", &creds.client_email),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(format!(
                    "{CREDENTIALS_VAR}.{field} is empty"
                )));
            }
        }
        Ok(creds)
    }
}

/// Everything secret the two backends need.
#[derive(Clone)]
pub struct Secrets {
    pub credentials: ServiceAccountCredentials,
    pub api_key: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("credentials", &self.credentials)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Secrets {
    /// Read secrets from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read secrets through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(CREDENTIALS_VAR)
            .ok_or_else(|| ConfigError::Missing(format!("{CREDENTIALS_VAR} is not set")))?;
        let credentials = ServiceAccountCredentials::from_json(&raw)?;

        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing(format!("{API_KEY_VAR} is not set")))?;

        Ok(Self {
            credentials,
            api_key,
        })
    }
}
