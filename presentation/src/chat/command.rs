//! Slash command parsing for the chat REPL

use persevan_domain::{AttachmentKind, ConsoleMode};
use std::path::PathBuf;

/// A parsed `/command` line.
///
/// Indices are 1-based as typed by the user; they are converted before
/// reaching the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    SetMode(ConsoleMode),
    /// `/mode` without an argument
    ToggleMode,
    Attach(Vec<PathBuf>),
    Files,
    Preview(usize),
    Remove(AttachmentKind, usize),
    History,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a line starting with `/`. The error is a user-facing message.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match name {
            "/study" => Ok(ReplCommand::SetMode(ConsoleMode::Study)),
            "/interview" => Ok(ReplCommand::SetMode(ConsoleMode::Interview)),
            "/mode" => match args.first() {
                None => Ok(ReplCommand::ToggleMode),
                Some(arg) => arg
                    .parse::<ConsoleMode>()
                    .map(ReplCommand::SetMode)
                    .map_err(|e| e.to_string()),
            },
            "/attach" | "/a" => {
                if args.is_empty() {
                    return Err("Usage: /attach <path>...".to_string());
                }
                Ok(ReplCommand::Attach(args.iter().map(PathBuf::from).collect()))
            }
            "/files" | "/ls" => Ok(ReplCommand::Files),
            "/preview" => {
                let n = args
                    .first()
                    .ok_or_else(|| "Usage: /preview <n>".to_string())?;
                Ok(ReplCommand::Preview(Self::parse_index(n)?))
            }
            "/remove" | "/rm" => {
                let (Some(kind), Some(n)) = (args.first(), args.get(1)) else {
                    return Err("Usage: /remove file|image <n>".to_string());
                };
                let kind = kind.parse::<AttachmentKind>().map_err(|e| e.to_string())?;
                Ok(ReplCommand::Remove(kind, Self::parse_index(n)?))
            }
            "/history" => Ok(ReplCommand::History),
            "/help" | "/h" | "/?" => Ok(ReplCommand::Help),
            "/quit" | "/exit" | "/q" => Ok(ReplCommand::Quit),
            _ => Err(format!(
                "Unknown command: {}\nType /help for available commands",
                name
            )),
        }
    }

    /// 1-based user index to 0-based position
    fn parse_index(raw: &str) -> Result<usize, String> {
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("Expected a positive number, got '{}'", raw)),
        }
    }

    pub fn help_text() -> &'static str {
        "Commands:
  /study, /interview       - Switch console mode
  /mode [study|interview]  - Toggle or set the mode
  /attach <path>...        - Attach files or images to the next message
  /files                   - List pending attachments
  /preview <n>             - Show pending file n
  /remove file|image <n>   - Drop a pending attachment
  /history                 - Show the conversation so far
  /help, /h, /?            - Show this help
  /quit, /exit, /q         - Exit chat"
    }
}
