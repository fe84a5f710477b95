//! Identifier factories.

use uuid::Uuid;

use super::value_object::{MessageId, RoomId};

/// Generates fresh room identifiers
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a new random RoomId (UUID v4)
    pub fn generate() -> RoomId {
        RoomId::from(Uuid::new_v4())
    }
}

/// Generates fresh chat message identifiers
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn generate() -> MessageId {
        MessageId::new(Uuid::new_v4().to_string())
    }
}
