//! Append-only chat log of a room.

use super::{
    entity::ChatMessage,
    value_object::{ClientId, MessageContent, MessageId, Timestamp},
};

/// Append-only list of messages, ordered by creation timestamp.
///
/// Timestamps are clamped like canvas commits so the order never regresses.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    last_timestamp: Timestamp,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        id: MessageId,
        from: ClientId,
        content: MessageContent,
        now: Timestamp,
    ) -> ChatMessage {
        let timestamp = now.max(self.last_timestamp);
        self.last_timestamp = timestamp;
        let message = ChatMessage::new(id, from, content, timestamp);
        self.messages.push(message.clone());
        message
    }

    /// Last `limit` messages, oldest first
    pub fn recent(&self, limit: usize) -> Vec<ChatMessage> {
        let start = self.messages.len().saturating_sub(limit);
        self.messages[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
