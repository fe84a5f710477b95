//! Request handlers.

mod http;
mod websocket;

pub use http::{
    create_room, get_recent_messages, get_room_detail, get_rooms, get_snapshot, health_check,
    place_pixel, post_message,
};
pub use websocket::websocket_handler;

use crate::domain::RoomId;

use super::error::ApiError;

/// Path parameter → RoomId. A malformed id cannot name an existing room.
fn parse_room_id(raw: String) -> Result<RoomId, ApiError> {
    RoomId::try_from(raw.clone()).map_err(|_| ApiError::unknown_room(&raw))
}
