//! Prompt templates for the console

use crate::core::mode::ConsoleMode;
use crate::response::INSIGHTS_MARKER;
use crate::session::attachment::AttachedFile;

/// Instruction substituted for an empty prompt when attachments are present.
pub const DEFAULT_ANALYSIS_PROMPT: &str =
    "Provide a comprehensive technical analysis of the current context.";

/// Header of the synthesized file-context block.
pub const FILE_CONTEXT_HEADER: &str = "SYSTEM CONTEXT - SOURCE FILES:";

const CORE_DIRECTIVE: &str = r#"You are PERSEVAN-PRO, an omni-capable Technical Intelligence.
Your primary directive is to provide objectively perfect, highly performant, and architecturally sound technical advice.

OPERATING MODES:
1. STUDY: Act as a world-class mentor. Simplify complexity without sacrificing technical depth. Use advanced analogies and explain the 'first principles' of any tech.
2. INTERVIEW: Act as a Staff Engineer from a top-tier tech company. Be critical, concise, and professional. Look for hidden signals: scalability, security, observability, and maintainability.

VISION PROTOCOL:
- When an image is provided (screenshot, diagram, error log), perform a pixel-perfect scan.
- Identify bugs, UI inconsistencies, or architectural patterns.
- Explicitly mention specific elements seen in the image.

REASONING:
- You have a massive thinking budget. Use it to simulate edge cases before responding.
- Your response must be the 'one true perfect answer' that a senior lead would approve.
- Always steer non-technical queries back to the tech stack."#;

/// Templates for the system directive and request text
pub struct PromptTemplate;

impl PromptTemplate {
    /// Shared preamble of every system directive
    pub fn core_directive() -> &'static str {
        CORE_DIRECTIVE
    }

    /// Full system directive for the given mode
    pub fn system_directive(mode: ConsoleMode) -> String {
        let mut directive = format!(
            "{}\nACTIVE MODE: {}",
            CORE_DIRECTIVE,
            mode.directive_label()
        );
        if mode.expects_insights() {
            directive.push_str(&format!(
                "\n\nOUTPUT FORMAT:\n- Write the main answer first.\n- Then emit a line containing exactly {} followed by the staff-engineer signals you would report to a hiring committee.",
                INSIGHTS_MARKER
            ));
        }
        directive
    }

    /// Labeled context block for buffered files, `None` when there are none
    pub fn file_context(files: &[AttachedFile]) -> Option<String> {
        if files.is_empty() {
            return None;
        }
        let sections = files
            .iter()
            .map(|f| format!("FILE [{}]:\n{}", f.name, f.content))
            .collect::<Vec<_>>()
            .join("\n\n");
        Some(format!("{}\n{}\n\n", FILE_CONTEXT_HEADER, sections))
    }
}
