//! Error types for the Gemini adapter

use persevan_application::GatewayError;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("API key not found (set {0})")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey(var) => {
                GatewayError::AuthenticationFailed(format!("missing {var}"))
            }
            GeminiError::Client(e) => GatewayError::Other(e.to_string()),
            GeminiError::Transport(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Transport(e) => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Http { status, message } => match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    GatewayError::AuthenticationFailed(message)
                }
                StatusCode::TOO_MANY_REQUESTS => GatewayError::QuotaExceeded(message),
                StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(message),
                _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), message)),
            },
            GeminiError::Decode(msg) => GatewayError::Other(msg),
        }
    }
}
