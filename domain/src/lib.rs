//! Domain layer for persevan
//!
//! This crate contains the core conversation model: messages, the
//! attachment buffer, request composition and response interpretation.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Mode
//!
//! - **Study** (default): mentor profile
//! - **Interview**: staff-engineer review profile, replies may carry an
//!   insights block
//!
//! ## Turn
//!
//! A [`Message`] appended to the [`MessageStore`]. Turns are immutable and
//! the store is append-only.

pub mod core;
pub mod prompt;
pub mod request;
pub mod response;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, mode::ConsoleMode, model::Model};
pub use prompt::{DEFAULT_ANALYSIS_PROMPT, PromptTemplate};
pub use request::{GenerationParams, ModelRequest, RequestBuilder};
pub use response::{INSIGHTS_MARKER, InterpretedResponse, ResponseInterpreter};
pub use session::{
    attachment::{AttachedFile, AttachedImage, AttachmentBuffer, AttachmentKind, AttachmentSnapshot},
    entities::{ContentPart, Message, MessageContent, MessageId, Role},
    store::MessageStore,
};
