use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// Non-2xx answer from an upstream inference service.
    #[error("{provider} {status}: {body}")]
    Upstream {
        provider: String,
        status: u16,
        body: String,
    },

    /// Failure that is reported to the caller as a 502.
    #[error("{error}: {details}")]
    Gateway { error: String, details: String },

    /// Failure that is reported to the caller as a 500 with details.
    #[error("{error}: {details}")]
    Service { error: String, details: String },

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VoiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn gateway(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Gateway { error: error.into(), details: details.into() }
    }

    pub fn service(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Service { error: error.into(), details: details.into() }
    }

    /// The part of the error worth showing as diagnostic detail. For upstream
    /// failures this is the response body rather than the formatted message.
    pub fn detail(&self) -> String {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}
