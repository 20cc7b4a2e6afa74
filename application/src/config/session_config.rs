//! Session parameters: controller behavior.
//!
//! [`SessionConfig`] groups the static parameters that control the
//! [`SessionController`](crate::use_cases::session_controller::SessionController).
//! Sampling parameters are not here: they are fixed in the domain.

use persevan_domain::{ConsoleMode, Model};
use std::time::Duration;

/// Default upper bound on a single model call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Session controller parameters.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model every request in this session targets.
    pub model: Model,
    /// Mode the session starts in.
    pub initial_mode: ConsoleMode,
    /// Upper bound on a single model call. `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// Allow mode switches while a request is outstanding.
    ///
    /// The in-flight request keeps the mode it was built with either way.
    pub allow_mode_switch_while_pending: bool,
    /// Assistant message appended when the session starts.
    pub greeting: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            initial_mode: ConsoleMode::default(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            allow_mode_switch_while_pending: false,
            greeting: None,
        }
    }
}

impl SessionConfig {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_initial_mode(mut self, mode: ConsoleMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_relaxed_mode_switch(mut self, allow: bool) -> Self {
        self.allow_mode_switch_while_pending = allow;
        self
    }

    /// Set the greeting; blank text disables it.
    pub fn with_greeting(mut self, greeting: Option<String>) -> Self {
        self.greeting = greeting.filter(|g| !g.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = SessionConfig::default();
        assert_eq!(config.model, Model::Gemini3Pro);
        assert_eq!(config.initial_mode, ConsoleMode::Study);
        assert_eq!(config.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
        assert!(!config.allow_mode_switch_while_pending);
        assert!(config.greeting.is_none());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::default()
            .with_model(Model::Gemini25Flash)
            .with_initial_mode(ConsoleMode::Interview)
            .with_request_timeout(None)
            .with_relaxed_mode_switch(true)
            .with_greeting(Some("Online.".to_string()));

        assert_eq!(config.model, Model::Gemini25Flash);
        assert_eq!(config.initial_mode, ConsoleMode::Interview);
        assert!(config.request_timeout.is_none());
        assert!(config.allow_mode_switch_while_pending);
        assert_eq!(config.greeting.as_deref(), Some("Online."));
    }

    #[test]
    fn test_blank_greeting_disabled() {
        let config = SessionConfig::default().with_greeting(Some("   ".to_string()));
        assert!(config.greeting.is_none());
    }
}
