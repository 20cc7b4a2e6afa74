//! LLM Gateway port
//!
//! Defines the interface for invoking the hosted model.

use async_trait::async_trait;
use persevan_domain::ModelRequest;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Short, detail-free category name suitable for logs and transcripts.
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::ConnectionError(_) => "connection",
            GatewayError::AuthenticationFailed(_) => "authentication",
            GatewayError::QuotaExceeded(_) => "quota",
            GatewayError::ModelNotAvailable(_) => "model_unavailable",
            GatewayError::RequestFailed(_) => "request_failed",
            GatewayError::Timeout => "timeout",
            GatewayError::Cancelled => "cancelled",
            GatewayError::Other(_) => "other",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}

/// Gateway for model invocation
///
/// Each call is stateless: the request carries everything the model sees.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and return the reply text.
    ///
    /// An empty string is a valid success value.
    async fn generate(&self, request: &ModelRequest) -> Result<String, GatewayError>;
}
