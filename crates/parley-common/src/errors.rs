/// Startup-time configuration failures. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(String),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The NLU backend could not be reached or rejected the query.
    #[error("nlu backend unavailable{}: {detail}", status_suffix(.status))]
    BackendUnavailable { status: Option<u16>, detail: String },

    /// The dialogue backend call failed (transport, non-2xx status, or bad body).
    #[error("dialogue interaction failed{}: {detail}", status_suffix(.status))]
    InteractionFailed { status: Option<u16>, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("input closed before the conversation ended")]
    InputClosed,
}

impl BridgeError {
    pub fn backend_unavailable(detail: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            status: None,
            detail: detail.into(),
        }
    }

    pub fn interaction_failed(detail: impl Into<String>) -> Self {
        Self::InteractionFailed {
            status: None,
            detail: detail.into(),
        }
    }

    /// HTTP status reported by the failing backend, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BackendUnavailable { status, .. } | Self::InteractionFailed { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}
