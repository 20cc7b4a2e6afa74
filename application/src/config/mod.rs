//! Application-level configuration.
//!
//! - [`SessionConfig`] - model, initial mode, timeout and mode-switch policy

pub mod session_config;

pub use session_config::{DEFAULT_REQUEST_TIMEOUT, SessionConfig};
