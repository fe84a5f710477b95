//! Room aggregate: metadata, participants, canvas and chat log.

use super::{
    canvas::Canvas,
    chat_log::ChatLog,
    entity::{ChatMessage, Participant, PixelWrite, Room},
    error::DomainError,
    value_object::{ClientId, Color, MessageContent, MessageId, Timestamp},
};

/// Default maximum number of participants per room
pub const DEFAULT_PARTICIPANT_CAPACITY: usize = 100;

/// Everything the store holds for one room
#[derive(Debug, Clone)]
pub struct RoomState {
    pub room: Room,
    participants: Vec<Participant>,
    participant_capacity: usize,
    canvas: Canvas,
    chat: ChatLog,
}

impl RoomState {
    pub fn with_capacity(room: Room, participant_capacity: usize) -> Self {
        let canvas = Canvas::new(room.size);
        Self {
            room,
            participants: Vec::new(),
            participant_capacity,
            canvas,
            chat: ChatLog::new(),
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn add_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        if self.participants.iter().any(|p| p.id == participant.id) {
            return Err(DomainError::DuplicateParticipant(
                participant.id.into_string(),
            ));
        }
        if self.participants.len() >= self.participant_capacity {
            return Err(DomainError::RoomFull(self.participant_capacity));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Returns whether the participant was present.
    pub fn remove_participant(&mut self, client_id: &ClientId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| &p.id != client_id);
        self.participants.len() != before
    }

    pub fn place_pixel(
        &mut self,
        x: i64,
        y: i64,
        color: Color,
        author: ClientId,
        now: Timestamp,
    ) -> Result<PixelWrite, DomainError> {
        self.canvas.place(x, y, color, author, now)
    }

    pub fn post_message(
        &mut self,
        id: MessageId,
        from: ClientId,
        content: MessageContent,
        now: Timestamp,
    ) -> ChatMessage {
        self.chat.append(id, from, content, now)
    }
}
