//! Configuration file loading for persevan
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PERSEVAN_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./persevan.toml` or `./.persevan.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/persevan/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_GREETING, FileConfig, FileGeminiConfig, FileLoggingConfig,
    FileModelConfig, FileOutputConfig, FileReplConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
