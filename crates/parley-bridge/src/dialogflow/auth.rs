//! Service-account OAuth2 for the Dialogflow API.
//!
//! A signed RS256 JWT assertion is exchanged at the token endpoint for a
//! short-lived bearer token, which is cached until shortly before expiry.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use parley_common::{BridgeError, ConfigError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::truncate_body;

pub(crate) const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

pub(crate) struct TokenSource {
    http: reqwest::Client,
    token_uri: String,
    client_email: String,
    key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    /// Fails with a configuration error when the private key is not valid PEM.
    pub(crate) fn new(
        http: reqwest::Client,
        token_uri: impl Into<String>,
        client_email: impl Into<String>,
        private_key_pem: &str,
    ) -> std::result::Result<Self, ConfigError> {
        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| ConfigError::ParseError(format!("invalid service account key: {e}")))?;
        Ok(Self {
            http,
            token_uri: token_uri.into(),
            client_email: client_email.into(),
            key,
            cached: Mutex::new(None),
        })
    }

    /// Return a valid bearer token, minting a new one when needed.
    pub(crate) async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.fetch().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    /// Build the signed assertion for a given issue time (seconds since epoch).
    pub(crate) fn assertion(&self, issued_at: u64) -> Result<String> {
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: CLOUD_PLATFORM_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| BridgeError::backend_unavailable(format!("failed to sign assertion: {e}")))
    }

    async fn fetch(&self) -> Result<CachedToken> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let assertion = self.assertion(now)?;

        debug!(token_uri = %self.token_uri, "Requesting access token");

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| BridgeError::backend_unavailable(format!("token exchange: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BridgeError::BackendUnavailable {
                status: Some(status.as_u16()),
                detail: format!("token exchange rejected: {}", truncate_body(&text, 200)),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            BridgeError::backend_unavailable(format!("malformed token response: {e}"))
        })?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}
