//! Outbound request composition.
//!
//! [`RequestBuilder`] turns the prompt, the captured mode and the buffered
//! attachments into a self-contained [`ModelRequest`]. No conversation
//! history is carried: every request stands alone.

mod builder;

pub use builder::{GenerationParams, ModelRequest, RequestBuilder};
