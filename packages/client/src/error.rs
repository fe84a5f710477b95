//! Error types for the pixelroom client.

use pixelroom_shared::protocol::ErrorKind;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client ID is already in use in the room
    #[error("Client ID '{0}' is already connected")]
    DuplicateClientId(String),

    /// The room does not exist
    #[error("Room '{0}' not found")]
    UnknownRoom(String),

    /// The room admits no more participants
    #[error("Room '{0}' is full")]
    RoomFull(String),

    /// The client ID was rejected by the server
    #[error("Invalid client ID '{0}'")]
    InvalidClientId(String),

    /// The server dropped this subscriber for falling behind
    #[error("Disconnected by server: {0}")]
    SubscriberOverloaded(String),

    /// A command that needs an open room was issued while disconnected
    #[error("Not viewing a room")]
    NotViewing,

    /// Error reported by the HTTP API
    #[error("{kind}: {message}")]
    Api { kind: ErrorKind, message: String },

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::ConnectionError(error.to_string())
    }
}
