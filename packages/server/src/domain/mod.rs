//! Domain layer: entities, value objects and the interfaces the outer
//! layers implement.

pub mod canvas;
pub mod chat_log;
pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod room_state;
pub mod value_object;

pub use canvas::Canvas;
pub use chat_log::ChatLog;
pub use entity::{CanvasSnapshot, ChatMessage, Participant, PixelWrite, Room, RoomSummary};
pub use error::{DomainError, MessagePushError, RepositoryError};
pub use factory::{MessageIdFactory, RoomIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel, RoomEvent};
pub use repository::RoomRepository;
pub use room_state::{DEFAULT_PARTICIPANT_CAPACITY, RoomState};
pub use value_object::{
    CanvasSize, ClientId, Color, DimensionLimits, MessageContent, MessageId, PixelPosition,
    RoomDescription, RoomId, RoomName, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
