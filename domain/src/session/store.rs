//! Append-only message log.

use super::entities::{Message, MessageContent, MessageId, Role};
use crate::core::mode::ConsoleMode;
use chrono::{DateTime, Utc};

/// Ordered, append-only log of conversation turns.
///
/// Insertion order is display order and chronological order. Ids are
/// assigned monotonically and timestamps never decrease, even if the wall
/// clock steps backwards between two appends.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn stamped with the current time.
    pub fn append(
        &mut self,
        role: Role,
        content: impl Into<MessageContent>,
        mode: ConsoleMode,
    ) -> &Message {
        self.append_at(role, content, mode, Utc::now())
    }

    /// Append a turn with an explicit creation instant.
    ///
    /// The instant is clamped to the previous message's timestamp.
    pub fn append_at(
        &mut self,
        role: Role,
        content: impl Into<MessageContent>,
        mode: ConsoleMode,
        at: DateTime<Utc>,
    ) -> &Message {
        let timestamp = match self.messages.last() {
            Some(last) if last.timestamp() > at => last.timestamp(),
            _ => at,
        };
        self.next_id += 1;
        let message = Message::new(
            MessageId::new(self.next_id),
            role,
            content.into(),
            mode,
            timestamp,
        );
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
