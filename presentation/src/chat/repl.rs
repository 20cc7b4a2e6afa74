//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::ReplCommand;
use crate::config::ReplConfig;
use crate::{ConsoleFormatter, ReasoningSpinner};
use colored::Colorize;
use persevan_application::{
    AttachmentReaderPort, DecodedAttachment, SessionController, SessionError, SubmitOutcome,
    SubmitRejection,
};
use persevan_domain::{AttachmentKind, ConsoleMode};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Lines of a pending file shown by `/preview`.
const PREVIEW_LINES: usize = 40;

/// Submit the session's draft, cancelling the request on Ctrl-C.
pub async fn submit_interruptible(
    controller: &SessionController,
    spinner: Option<&ReasoningSpinner>,
) -> SubmitOutcome {
    let token = CancellationToken::new();
    let submit = controller.submit_with_cancellation(token.clone());
    tokio::pin!(submit);

    loop {
        tokio::select! {
            outcome = &mut submit => return outcome,
            signal = tokio::signal::ctrl_c(), if !token.is_cancelled() => {
                if let Err(e) = signal {
                    warn!("Could not listen for Ctrl-C: {}", e);
                    return submit.await;
                }
                debug!("Ctrl-C received; cancelling pending request");
                if let Some(spinner) = spinner {
                    spinner.cancelling();
                }
                token.cancel();
            }
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: Arc<SessionController>,
    reader: Arc<dyn AttachmentReaderPort>,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: Arc<SessionController>, reader: Arc<dyn AttachmentReaderPort>) -> Self {
        Self {
            controller,
            reader,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let prompt = format!("{} >>> ", self.controller.mode());
            let readline = rl.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        if self.controller.pending_attachment_count() > 0 {
                            self.process_prompt("").await;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    self.process_prompt(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       Persevan Pro - Technical Console      │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.controller.model());
        println!("Mode:  {}", ConsoleFormatter::format_mode(self.controller.mode()));
        println!();
        println!("{}", ReplCommand::help_text());
        println!();

        for message in self.controller.messages() {
            println!("{}", ConsoleFormatter::format_message(&message));
        }
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, line: &str) -> bool {
        let command = match ReplCommand::parse(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                return false;
            }
        };

        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help_text());
                println!();
            }
            ReplCommand::SetMode(mode) => self.switch_mode(mode),
            ReplCommand::ToggleMode => self.switch_mode(self.controller.mode().toggled()),
            ReplCommand::Attach(paths) => self.attach(&paths).await,
            ReplCommand::Files => {
                print!(
                    "{}",
                    ConsoleFormatter::format_attachments(
                        &self.controller.pending_files(),
                        &self.controller.pending_images()
                    )
                );
            }
            ReplCommand::Preview(index) => {
                match self.controller.pending_files().get(index) {
                    Some(file) => {
                        print!("{}", ConsoleFormatter::format_file_preview(file, PREVIEW_LINES))
                    }
                    None => println!("No pending file #{}", index + 1),
                }
            }
            ReplCommand::Remove(kind, index) => {
                match self.controller.remove_attachment(kind, index) {
                    Some(name) => println!("Removed {} {}", kind, name),
                    None => println!("No pending {} #{}", kind, index + 1),
                }
            }
            ReplCommand::History => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_history(&self.controller.messages())
                );
            }
        }
        false
    }

    fn switch_mode(&self, mode: ConsoleMode) {
        match self.controller.set_mode(mode) {
            Ok(()) => println!("{}", ConsoleFormatter::format_mode(mode)),
            Err(SessionError::ModeLocked) => {
                println!("{}", "Mode is locked while a request is pending".yellow())
            }
        }
    }

    async fn attach(&self, paths: &[PathBuf]) {
        for (path, result) in paths.iter().zip(self.reader.read_all(paths).await) {
            match result {
                Ok(attachment) => {
                    let kind = match &attachment {
                        DecodedAttachment::File(_) => AttachmentKind::File,
                        DecodedAttachment::Image(_) => AttachmentKind::Image,
                    };
                    println!("{} {} {}", "+".green(), kind, attachment.name());
                    self.controller.attach(attachment);
                }
                Err(e) => {
                    warn!("Attachment {} rejected: {}", path.display(), e);
                    println!("{} {}", "x".red(), e);
                }
            }
        }
    }

    async fn process_prompt(&self, text: &str) {
        println!();
        self.controller.set_prompt(text);

        let spinner = ReasoningSpinner::new(self.controller.mode(), self.config.show_progress);
        let outcome = submit_interruptible(&self.controller, Some(&spinner)).await;

        match outcome {
            SubmitOutcome::Completed(summary) => {
                spinner.finish(summary.outcome);
                if let Some(message) = self.controller.message(summary.assistant_message) {
                    println!();
                    println!("{}", ConsoleFormatter::format_message(&message));
                }
            }
            SubmitOutcome::Rejected(rejection) => {
                spinner.clear();
                match rejection {
                    SubmitRejection::NothingToSend => println!("Nothing to send."),
                    SubmitRejection::RequestInFlight => {
                        println!("A request is already pending.")
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use persevan_application::{AttachmentError, GatewayError, LlmGateway, SessionConfig};
    use persevan_domain::{AttachedFile, ModelRequest};
    use std::path::Path;

    struct EchoGateway;

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn generate(&self, request: &ModelRequest) -> Result<String, GatewayError> {
            Ok(format!("echo: {}", request.text().unwrap_or_default()))
        }
    }

    struct FakeReader;

    #[async_trait]
    impl AttachmentReaderPort for FakeReader {
        async fn read(&self, path: &Path) -> Result<DecodedAttachment, AttachmentError> {
            if path.extension().is_some_and(|ext| ext == "bin") {
                return Err(AttachmentError::NotText(path.to_path_buf()));
            }
            let name = path.display().to_string();
            Ok(DecodedAttachment::File(AttachedFile::new(name, "content")))
        }
    }

    fn repl() -> ChatRepl {
        let controller = Arc::new(SessionController::new(
            Arc::new(EchoGateway),
            SessionConfig::default(),
        ));
        ChatRepl::new(controller, Arc::new(FakeReader)).with_progress(false)
    }

    #[tokio::test]
    async fn test_submit_interruptible_completes() {
        let repl = repl();
        repl.controller.set_prompt("ping");

        let outcome = submit_interruptible(&repl.controller, None).await;
        let summary = outcome.summary().unwrap();
        let reply = repl.controller.message(summary.assistant_message).unwrap();
        assert_eq!(reply.content().as_text(), Some("echo: ping"));
    }

    #[tokio::test]
    async fn test_attach_skips_failures() {
        let repl = repl();
        repl.attach(&[PathBuf::from("a.rs"), PathBuf::from("b.bin")])
            .await;

        let files = repl.controller.pending_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.rs");
    }

    #[tokio::test]
    async fn test_commands_drive_session() {
        let repl = repl();

        assert!(!repl.handle_command("/interview").await);
        assert_eq!(repl.controller.mode(), ConsoleMode::Interview);
        assert!(!repl.handle_command("/mode").await);
        assert_eq!(repl.controller.mode(), ConsoleMode::Study);

        assert!(!repl.handle_command("/attach x.rs y.rs").await);
        assert!(!repl.handle_command("/remove file 1").await);
        assert_eq!(repl.controller.pending_files()[0].name, "y.rs");

        assert!(!repl.handle_command("/bogus").await);
        assert!(repl.handle_command("/quit").await);
    }

    #[tokio::test]
    async fn test_attachment_only_prompt_uses_default_instruction() {
        let repl = repl();
        repl.handle_command("/attach notes.md").await;
        repl.process_prompt("").await;

        let messages = repl.controller.messages();
        let user = messages.iter().find(|m| m.is_user()).unwrap();
        assert_eq!(
            user.content().as_text(),
            Some(persevan_domain::DEFAULT_ANALYSIS_PROMPT)
        );
        assert_eq!(repl.controller.pending_attachment_count(), 0);
    }
}
