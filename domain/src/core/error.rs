//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Invalid attachment kind: {0}")]
    InvalidAttachmentKind(String),

    #[error("Nothing to send: prompt is empty and no attachments are buffered")]
    EmptySubmission,
}
