//! Domain errors.

use thiserror::Error;

/// Errors raised by value objects and entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid room id: '{0}'")]
    InvalidRoomId(String),

    #[error("Invalid client id: '{0}'")]
    InvalidClientId(String),

    #[error("Invalid room name: {0}")]
    InvalidRoomName(String),

    #[error("Invalid room description: {0}")]
    InvalidDescription(String),

    #[error("Invalid canvas dimensions {width}x{height}: both must be within {min}..={max}")]
    InvalidDimensions {
        width: i64,
        height: i64,
        min: u32,
        max: u32,
    },

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Client '{0}' is already in the room")]
    DuplicateParticipant(String),

    #[error("Room is full (capacity {0})")]
    RoomFull(usize),
}

/// Errors raised by repository implementations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Room '{0}' already exists")]
    DuplicateRoom(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Errors raised by message pusher implementations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not subscribed")]
    ClientNotFound(String),

    #[error("Subscriber '{0}' is overloaded and was dropped")]
    SubscriberOverloaded(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
