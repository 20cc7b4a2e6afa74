//! Application layer for persevan
//!
//! This crate contains the session controller use case, port definitions,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_REQUEST_TIMEOUT, SessionConfig};
pub use ports::{
    attachment_reader::{AttachmentError, AttachmentReaderPort, DecodedAttachment},
    conversation_logger::{
        ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
    },
    llm_gateway::{GatewayError, LlmGateway},
};
pub use use_cases::session_controller::{
    CANCELLED_MESSAGE, EMPTY_RESPONSE_FALLBACK, FAILURE_MESSAGE, SessionController, SessionError,
    SessionPhase, SubmitOutcome, SubmitRejection, TurnOutcome, TurnSummary,
};
