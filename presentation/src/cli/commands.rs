//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot replies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered reply with the insights block
    #[default]
    Text,
    /// JSON object with the reply split into main text and insights
    Json,
}

/// CLI arguments for persevan
#[derive(Parser, Debug)]
#[command(name = "persevan")]
#[command(author, version, about = "Technical study and interview-prep console backed by Gemini")]
#[command(long_about = r#"
Persevan is a single-conversation technical console.

Two modes shape every answer:
  study      Patient mentor: first principles, analogies, exercises
  interview  Staff-engineer review: trade-offs, failure modes, and a
             STAFF-ENGINEER INTELLIGENCE block with hiring signals

Attach source files or images and they are sent with your next question.
Without a prompt, persevan starts an interactive chat.

Configuration files are loaded from (in priority order):
1. PERSEVAN_* environment variables
2. --config <path>     Explicit config file
3. ./persevan.toml     Project-level config
4. ~/.config/persevan/config.toml   Global config

Example:
  persevan "Explain Rust's Pin and why self-referential futures need it"
  persevan --mode interview --attach src/lib.rs "Review this design"
  persevan --attach diagram.png
"#)]
pub struct Cli {
    /// The prompt to submit (starts chat mode when omitted)
    pub prompt: Option<String>,

    /// Console mode for this session (study or interview)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Model identifier (e.g. gemini-3-pro-preview)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Files or images to attach (can be specified multiple times)
    #[arg(short, long, value_name = "PATH")]
    pub attach: Vec<PathBuf>,

    /// Output format for one-shot replies
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// One-shot mode runs when a prompt or attachments are given.
    pub fn is_one_shot(&self) -> bool {
        self.prompt.is_some() || !self.attach.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_with_prompt_and_attachments() {
        let cli = Cli::parse_from([
            "persevan",
            "--mode",
            "interview",
            "--attach",
            "a.rs",
            "-a",
            "b.png",
            "Review this",
        ]);
        assert_eq!(cli.prompt.as_deref(), Some("Review this"));
        assert_eq!(cli.mode.as_deref(), Some("interview"));
        assert_eq!(cli.attach.len(), 2);
        assert!(cli.is_one_shot());
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_chat_mode_without_prompt() {
        let cli = Cli::parse_from(["persevan", "-vv", "--no-color"]);
        assert!(!cli.is_one_shot());
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_attachments_alone_are_one_shot() {
        let cli = Cli::parse_from(["persevan", "--attach", "diagram.png", "-o", "json"]);
        assert!(cli.is_one_shot());
        assert_eq!(cli.output, OutputFormat::Json);
    }
}
