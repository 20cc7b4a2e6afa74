//! Splits raw model text into display-ready structure.

use crate::core::mode::ConsoleMode;
use crate::session::entities::{Message, MessageContent, Role};
use serde::{Deserialize, Serialize};

/// Delimiter between the main answer and the insights block.
pub const INSIGHTS_MARKER: &str = "---INSIGHTS---";

/// Display-ready reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedResponse {
    pub main: String,
    pub insights: Option<String>,
}

impl InterpretedResponse {
    pub fn has_insights(&self) -> bool {
        self.insights.is_some()
    }
}

/// Pure, infallible interpreter of raw response text.
pub struct ResponseInterpreter;

impl ResponseInterpreter {
    /// Interpret `text` under the mode that was active when it was requested.
    ///
    /// Only the first marker splits; later markers stay inside `insights`.
    pub fn interpret(text: &str, mode: ConsoleMode) -> InterpretedResponse {
        if mode.expects_insights()
            && let Some((main, insights)) = text.split_once(INSIGHTS_MARKER)
        {
            return InterpretedResponse {
                main: main.trim().to_string(),
                insights: Some(insights.trim().to_string()),
            };
        }

        InterpretedResponse {
            main: text.trim().to_string(),
            insights: None,
        }
    }

    /// Interpret a stored turn with the mode it was created under.
    ///
    /// User turns are never split.
    pub fn interpret_message(message: &Message) -> InterpretedResponse {
        let mode = match message.role() {
            Role::Assistant => message.mode(),
            Role::User => ConsoleMode::Study,
        };
        match message.content() {
            MessageContent::Text(text) => Self::interpret(text, mode),
            MessageContent::Parts(_) => Self::interpret(&message.content().text_content(), mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_splits_on_marker() {
        let result = ResponseInterpreter::interpret("A---INSIGHTS---B", ConsoleMode::Interview);
        assert_eq!(result.main, "A");
        assert_eq!(result.insights.as_deref(), Some("B"));
    }

    #[test]
    fn test_study_ignores_marker() {
        let raw = "  A---INSIGHTS---B \n";
        let result = ResponseInterpreter::interpret(raw, ConsoleMode::Study);
        assert_eq!(result.main, "A---INSIGHTS---B");
        assert!(!result.has_insights());
    }

    #[test]
    fn test_parts_are_trimmed() {
        let raw = "\n  The design holds.  \n---INSIGHTS---\n\n  Signals: idempotency.\n";
        let result = ResponseInterpreter::interpret(raw, ConsoleMode::Interview);
        assert_eq!(result.main, "The design holds.");
        assert_eq!(result.insights.as_deref(), Some("Signals: idempotency."));
    }

    #[test]
    fn test_only_first_marker_is_significant() {
        let raw = "main---INSIGHTS---one---INSIGHTS---two";
        let result = ResponseInterpreter::interpret(raw, ConsoleMode::Interview);
        assert_eq!(result.main, "main");
        assert_eq!(result.insights.as_deref(), Some("one---INSIGHTS---two"));
    }

    #[test]
    fn test_missing_marker_in_interview() {
        let result = ResponseInterpreter::interpret(" plain answer ", ConsoleMode::Interview);
        assert_eq!(result.main, "plain answer");
        assert_eq!(result.insights, None);
    }

    #[test]
    fn test_marker_at_edges() {
        let result = ResponseInterpreter::interpret("---INSIGHTS---", ConsoleMode::Interview);
        assert_eq!(result.main, "");
        assert_eq!(result.insights.as_deref(), Some(""));
    }

    #[test]
    fn test_interpret_message_uses_captured_mode() {
        let mut store = crate::session::store::MessageStore::new();
        let interview = store
            .append(Role::Assistant, "a---INSIGHTS---b", ConsoleMode::Interview)
            .clone();
        let study = store
            .append(Role::Assistant, "a---INSIGHTS---b", ConsoleMode::Study)
            .clone();
        let user = store
            .append(Role::User, "a---INSIGHTS---b", ConsoleMode::Interview)
            .clone();

        assert!(ResponseInterpreter::interpret_message(&interview).has_insights());
        assert!(!ResponseInterpreter::interpret_message(&study).has_insights());
        assert!(!ResponseInterpreter::interpret_message(&user).has_insights());
    }

    #[test]
    fn test_deterministic() {
        let raw = "x---INSIGHTS---y";
        assert_eq!(
            ResponseInterpreter::interpret(raw, ConsoleMode::Interview),
            ResponseInterpreter::interpret(raw, ConsoleMode::Interview)
        );
    }
}
