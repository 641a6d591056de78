use thiserror::Error;

/// Failure talking to the completion endpoint.
///
/// The variants only matter for logs; callers surface every one of them as a
/// single error string.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured for {provider}")]
    MissingApiKey { provider: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("could not parse provider response: {0}")]
    Parse(String),

    #[error("provider response contained no choices")]
    EmptyChoices,
}

impl LlmError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Network(format!("request timeout: {}", err))
        } else if err.is_connect() {
            LlmError::Network(format!("connection failed: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }

    /// HTTP status code, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
