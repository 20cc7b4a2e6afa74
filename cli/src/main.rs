//! CLI entrypoint for persevan
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use persevan_application::{
    AttachmentReaderPort, ConversationLogger, NoConversationLogger, SessionController,
    SubmitOutcome, SubmitRejection,
};
use persevan_domain::{ConsoleMode, Model};
use persevan_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, GeminiSettings, JsonlConversationLogger,
    LocalAttachmentReader,
};
use persevan_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormat, ReasoningSpinner, ReplConfig,
    submit_interruptible,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        if let Ok(config) = ConfigLoader::load(cli.config.as_ref()) {
            println!();
            print!("{}", ConfigLoader::render(&config));
        }
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli)?;
    config.validate().context("Invalid configuration")?;

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from));
    let _log_guard = init_tracing(cli.verbose, log_file.as_deref())?;

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    info!("Starting persevan");

    // === Dependency Injection ===
    let settings = GeminiSettings {
        base_url: config.gemini.base_url.clone(),
        api_key_env: config.gemini.api_key_env.clone(),
        connect_timeout: Duration::from_secs(config.gemini.connect_timeout_seconds),
    };
    let gateway = Arc::new(GeminiGateway::from_env(&settings)?);
    let reader: Arc<dyn AttachmentReaderPort> = Arc::new(LocalAttachmentReader::new());

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log.as_deref() {
            Some(path) => match JsonlConversationLogger::new(path) {
                Ok(logger) => {
                    info!("Conversation transcript: {}", logger.path().display());
                    Arc::new(logger)
                }
                Err(e) => {
                    warn!("Could not open conversation log {}: {}", path, e);
                    Arc::new(NoConversationLogger)
                }
            },
            None => Arc::new(NoConversationLogger),
        };

    let mut session_config = config.session_config();
    if cli.is_one_shot() {
        session_config = session_config.with_greeting(None);
    }
    let controller = Arc::new(
        SessionController::new(gateway, session_config)
            .with_conversation_logger(conversation_logger),
    );

    if !cli.is_one_shot() {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.clone(),
        };
        let repl = ChatRepl::new(controller, reader).with_config(repl_config);
        repl.run().await?;
        return Ok(());
    }

    run_one_shot(&cli, &controller, reader.as_ref()).await
}

/// Submit a single prompt (plus attachments) and print the reply.
async fn run_one_shot(
    cli: &Cli,
    controller: &SessionController,
    reader: &dyn AttachmentReaderPort,
) -> Result<()> {
    for result in reader.read_all(&cli.attach).await {
        controller.attach(result?);
    }
    controller.set_prompt(cli.prompt.clone().unwrap_or_default());

    let show_progress = !cli.quiet && std::io::stderr().is_terminal();
    let spinner = ReasoningSpinner::new(controller.mode(), show_progress);
    let outcome = submit_interruptible(controller, Some(&spinner)).await;

    let summary = match outcome {
        SubmitOutcome::Completed(summary) => summary,
        SubmitOutcome::Rejected(SubmitRejection::NothingToSend) => {
            spinner.clear();
            bail!("Nothing to send: provide a prompt or --attach a file.");
        }
        SubmitOutcome::Rejected(SubmitRejection::RequestInFlight) => {
            spinner.clear();
            bail!("A request is already in flight.");
        }
    };
    spinner.finish(summary.outcome);

    let Some(reply) = controller.message(summary.assistant_message) else {
        bail!("Reply {} missing from the session", summary.assistant_message);
    };

    match cli.output {
        OutputFormat::Text => println!("{}", ConsoleFormatter::format_message(&reply)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&reply, &summary)),
    }

    if !summary.outcome.is_success() {
        bail!("Request did not complete ({:?})", summary.outcome);
    }
    Ok(())
}

/// Fold command-line flags into the loaded configuration.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) -> Result<()> {
    if let Some(mode) = &cli.mode {
        config.session.default_mode = mode.parse::<ConsoleMode>()?;
    }
    if let Some(model) = &cli.model {
        let Ok(model) = model.parse::<Model>();
        config.model.name = model;
    }
    Ok(())
}

/// Initialize tracing: stderr at the verbosity level, or a file sink.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;
    let Some(file_name) = path.file_name() else {
        bail!("Log file path has no file name: {}", path.display());
    };

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
