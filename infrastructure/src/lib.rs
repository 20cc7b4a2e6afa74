//! Infrastructure layer for persevan
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod attachments;
pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use attachments::LocalAttachmentReader;
pub use config::{
    ConfigLoader, ConfigValidationError, DEFAULT_GREETING, FileConfig, FileGeminiConfig,
    FileLoggingConfig, FileModelConfig, FileOutputConfig, FileReplConfig, FileSessionConfig,
};
pub use gemini::{GeminiError, GeminiGateway, GeminiSettings};
pub use logging::JsonlConversationLogger;
