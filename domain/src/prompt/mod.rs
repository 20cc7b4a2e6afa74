//! Prompt domain
//!
//! System directives and the file-context block attached to outbound requests.

mod template;

pub use template::{DEFAULT_ANALYSIS_PROMPT, FILE_CONTEXT_HEADER, PromptTemplate};
