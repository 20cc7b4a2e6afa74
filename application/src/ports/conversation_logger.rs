//! Port for the session transcript.
//!
//! [`ConversationLogger`] records session events (user turns, assistant
//! turns, failed requests, mode switches) in a machine-readable form.
//! `tracing` carries the human-readable diagnostics; this port carries the
//! transcript. The transcript is write-only and never reloaded.

use serde_json::Value;
use std::fmt;

/// What a transcript record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEventKind {
    UserTurn,
    AssistantTurn,
    /// Carries only the error category, never provider detail.
    RequestFailed,
    ModeSwitch,
}

impl ConversationEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationEventKind::UserTurn => "user_turn",
            ConversationEventKind::AssistantTurn => "assistant_turn",
            ConversationEventKind::RequestFailed => "request_failed",
            ConversationEventKind::ModeSwitch => "mode_switch",
        }
    }
}

impl fmt::Display for ConversationEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript record: a kind plus an event-specific JSON payload.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub kind: ConversationEventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: ConversationEventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    /// Wire name written to the `type` field.
    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Sink for transcript records.
///
/// `log` is synchronous and infallible from the caller's view; a sink that
/// cannot write drops the record.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Transcript disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let event = ConversationEvent::new(
            ConversationEventKind::RequestFailed,
            serde_json::json!({ "category": "quota" }),
        );
        assert_eq!(event.event_type(), "request_failed");
        assert_eq!(ConversationEventKind::ModeSwitch.to_string(), "mode_switch");
    }
}
