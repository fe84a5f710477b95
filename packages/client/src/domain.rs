//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

const MAX_CLIENT_ID_LEN: usize = 32;

/// Check if the client should exit immediately based on the error type.
///
/// Retrying cannot fix a taken client id, a missing room or a malformed id.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::DuplicateClientId(_)
            | ClientError::UnknownRoom(_)
            | ClientError::InvalidClientId(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

/// Map the HTTP status of a rejected WebSocket handshake to a client error.
pub fn handshake_error(status: u16, room_id: &str, client_id: &str) -> ClientError {
    match status {
        400 => ClientError::InvalidClientId(client_id.to_string()),
        404 => ClientError::UnknownRoom(room_id.to_string()),
        409 => ClientError::DuplicateClientId(client_id.to_string()),
        503 => ClientError::RoomFull(room_id.to_string()),
        other => ClientError::ConnectionError(format!("Handshake rejected with HTTP {}", other)),
    }
}

/// Check a client id locally before it is put into a URL.
///
/// Same rule the server applies: 1 to 32 ASCII letters, digits, `_` or `-`.
pub fn validate_client_id(client_id: &str) -> Result<(), ClientError> {
    let valid = (1..=MAX_CLIENT_ID_LEN).contains(&client_id.len())
        && client_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ClientError::InvalidClientId(client_id.to_string()))
    }
}
