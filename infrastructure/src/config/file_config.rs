//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use persevan_application::SessionConfig;
use persevan_domain::{ConsoleMode, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Greeting shown as the first assistant turn unless overridden.
pub const DEFAULT_GREETING: &str = "Cognitive Core Alpha Online. Intelligence parity reached. I am Persevan Pro. Upload your architecture, code, or queries to begin.";

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("gemini.api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Raw model configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier sent to the provider
    pub name: Model,
}

/// Raw Gemini provider configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// REST base URL (without the `/models/...` suffix)
    pub base_url: String,
    /// TCP connect timeout in seconds
    pub connect_timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            connect_timeout_seconds: 30,
        }
    }
}

/// Raw session configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Mode the console starts in
    pub default_mode: ConsoleMode,
    /// Upper bound on a single model call; `0` waits forever
    pub timeout_seconds: u64,
    /// Allow mode switches while a request is outstanding
    pub allow_mode_switch_while_pending: bool,
    /// First assistant message; empty disables it
    pub greeting: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            default_mode: ConsoleMode::Study,
            timeout_seconds: 300,
            allow_mode_switch_while_pending: false,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the reasoning spinner while a request is pending
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log file (tracing output)
    pub file: Option<String>,
    /// JSONL conversation transcript
    pub conversation_log: Option<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub model: FileModelConfig,
    pub gemini: FileGeminiConfig,
    pub session: FileSessionConfig,
    pub repl: FileReplConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.name.as_str().trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.gemini.api_key_env.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiKeyEnv);
        }

        Ok(())
    }

    /// Per-request deadline; `timeout_seconds = 0` disables it
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.session.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Convert into the application's session parameters
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_model(self.model.name.clone())
            .with_initial_mode(self.session.default_mode)
            .with_request_timeout(self.request_timeout())
            .with_relaxed_mode_switch(self.session.allow_mode_switch_while_pending)
            .with_greeting(Some(self.session.greeting.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[model]
name = "gemini-2.5-pro"

[gemini]
api_key_env = "MY_KEY"
base_url = "http://localhost:8080/v1beta"
connect_timeout_seconds = 5

[session]
default_mode = "interview"
timeout_seconds = 120
allow_mode_switch_while_pending = true
greeting = ""

[repl]
show_progress = false
history_file = "~/.local/share/persevan/history.txt"

[output]
color = false

[logging]
conversation_log = "/tmp/persevan.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.name, Model::Gemini25Pro);
        assert_eq!(config.gemini.api_key_env, "MY_KEY");
        assert_eq!(config.gemini.connect_timeout_seconds, 5);
        assert_eq!(config.session.default_mode, ConsoleMode::Interview);
        assert_eq!(config.session.timeout_seconds, 120);
        assert!(config.session.allow_mode_switch_while_pending);
        assert!(!config.repl.show_progress);
        assert!(!config.output.color);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("/tmp/persevan.jsonl")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[session]
default_mode = "interview"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.default_mode, ConsoleMode::Interview);
        assert_eq!(config.model.name, Model::default());
        assert_eq!(config.session.timeout_seconds, 300);
        assert_eq!(config.session.greeting, DEFAULT_GREETING);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let toml_str = r#"
[session]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.request_timeout().is_none());
        assert!(config.session_config().request_timeout.is_none());
    }

    #[test]
    fn test_absent_timeout_uses_default_deadline() {
        let config: FileConfig = toml::from_str("[session]\ndefault_mode = \"study\"").unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[model]
name = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_empty_api_key_env() {
        let mut config = FileConfig::default();
        config.gemini.api_key_env = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyApiKeyEnv)
        ));
    }

    #[test]
    fn test_session_config_conversion() {
        let mut config = FileConfig::default();
        config.session.timeout_seconds = 0;
        config.session.greeting = String::new();
        config.session.default_mode = ConsoleMode::Interview;

        let session = config.session_config();
        assert_eq!(session.initial_mode, ConsoleMode::Interview);
        assert!(session.request_timeout.is_none());
        assert!(session.greeting.is_none());
        assert_eq!(session.model, Model::Gemini3Pro);
    }

    #[test]
    fn test_default_greeting_enabled() {
        let session = FileConfig::default().session_config();
        assert_eq!(session.greeting.as_deref(), Some(DEFAULT_GREETING));
        assert_eq!(session.request_timeout, Some(Duration::from_secs(300)));
    }
}
