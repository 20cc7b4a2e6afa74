//! Gemini REST adapter
//!
//! Implements [`LlmGateway`](persevan_application::LlmGateway) by calling
//! the `generateContent` endpoint directly over HTTPS.

pub mod error;
pub mod gateway;
mod wire;

pub use error::GeminiError;
pub use gateway::{GeminiGateway, GeminiSettings};
