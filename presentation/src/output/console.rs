//! Console output formatter for session messages

use colored::Colorize;
use persevan_application::TurnSummary;
use persevan_domain::{
    AttachedFile, AttachedImage, ConsoleMode, Message, ResponseInterpreter, Role,
};

const INSIGHTS_TITLE: &str = "STAFF-ENGINEER INTELLIGENCE";

/// Formats conversation turns for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one turn: a labelled header, then the body.
    ///
    /// Assistant turns are interpreted with the mode they were produced
    /// under, so an interview reply keeps its insights block after the
    /// session switches back to study.
    pub fn format_message(message: &Message) -> String {
        let mut output = String::new();
        output.push_str(&Self::message_header(message));
        output.push('\n');

        match message.role() {
            Role::User => {
                output.push_str(&message.content().text_content());
                output.push('\n');
            }
            Role::Assistant => {
                let interpreted = ResponseInterpreter::interpret_message(message);
                output.push_str(&interpreted.main);
                output.push('\n');
                if let Some(insights) = &interpreted.insights {
                    output.push('\n');
                    output.push_str(&Self::insights_block(insights));
                }
            }
        }

        output
    }

    /// Format the whole transcript in display order
    pub fn format_history(messages: &[Message]) -> String {
        if messages.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }

        messages
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// JSON rendering of an assistant turn for scripted use
    pub fn format_json(message: &Message, summary: &TurnSummary) -> String {
        let interpreted = ResponseInterpreter::interpret_message(message);
        let value = serde_json::json!({
            "id": message.id().to_string(),
            "mode": message.mode(),
            "outcome": format!("{:?}", summary.outcome),
            "main": interpreted.main,
            "insights": interpreted.insights,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// List pending attachments with 1-based indices
    pub fn format_attachments(files: &[AttachedFile], images: &[AttachedImage]) -> String {
        if files.is_empty() && images.is_empty() {
            return format!("{}\n", "No pending attachments.".dimmed());
        }

        let mut output = String::new();
        if !files.is_empty() {
            output.push_str(&format!("{}\n", "Files:".cyan().bold()));
            for (i, file) in files.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} {}\n",
                    i + 1,
                    file.name,
                    format!("({} bytes)", file.content.len()).dimmed()
                ));
            }
        }
        if !images.is_empty() {
            output.push_str(&format!("{}\n", "Images:".cyan().bold()));
            for (i, image) in images.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} {}\n",
                    i + 1,
                    image.name,
                    format!("({})", image.mime_type).dimmed()
                ));
            }
        }
        output
    }

    /// Show the content of one pending file, capped at `max_lines`
    pub fn format_file_preview(file: &AttachedFile, max_lines: usize) -> String {
        let total = file.content.lines().count();
        let mut output = format!("{}\n", format!("── {} ──", file.name).yellow().bold());
        output.push_str(&Self::indent(
            &file
                .content
                .lines()
                .take(max_lines)
                .collect::<Vec<_>>()
                .join("\n"),
            "  ",
        ));
        output.push('\n');
        if total > max_lines {
            output.push_str(&format!(
                "{}\n",
                format!("  ... {} more line(s)", total - max_lines).dimmed()
            ));
        }
        output
    }

    /// Banner line announcing the active mode
    pub fn format_mode(mode: ConsoleMode) -> String {
        format!(
            "{} {}",
            format!("[{}]", mode.directive_label()).bold(),
            mode.short_description().dimmed()
        )
    }

    fn message_header(message: &Message) -> String {
        let time = message.timestamp().format("%H:%M:%S");
        let label = match message.role() {
            Role::User => format!("── YOU · {} ──", message.mode().directive_label())
                .green()
                .bold(),
            Role::Assistant => format!("── PERSEVAN · {} ──", message.mode().directive_label())
                .cyan()
                .bold(),
        };
        format!("{} {}", label, time.to_string().dimmed())
    }

    fn insights_block(insights: &str) -> String {
        let mut output = format!("{}\n", format!("╭─ {} ", INSIGHTS_TITLE).magenta().bold());
        output.push_str(&Self::indent(insights, &format!("{} ", "│".magenta())));
        output.push('\n');
        output.push_str(&format!("{}\n", "╰─".magenta()));
        output
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
