//! Conversion logic from domain entities to wire DTOs.

use pixelroom_shared::protocol as dto;

use crate::domain::{
    CanvasSnapshot, ChatMessage, Participant, PixelWrite, Room, RoomEvent, RoomSummary,
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Room> for dto::RoomInfo {
    fn from(model: Room) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.as_str().to_string(),
            description: model.description.as_str().to_string(),
            width: model.size.width(),
            height: model.size.height(),
            created_at: model.created_at.value(),
        }
    }
}

impl From<RoomSummary> for dto::RoomSummaryInfo {
    fn from(model: RoomSummary) -> Self {
        Self {
            room: model.room.into(),
            participant_count: model.participant_count,
        }
    }
}

impl From<Participant> for dto::ParticipantInfo {
    fn from(model: Participant) -> Self {
        Self {
            client_id: model.id.into_string(),
            connected_at: model.connected_at.value(),
        }
    }
}

impl From<PixelWrite> for dto::PixelInfo {
    fn from(model: PixelWrite) -> Self {
        Self {
            x: model.position.x(),
            y: model.position.y(),
            color: model.color.into_string(),
            author: model.author.into_string(),
            timestamp: model.timestamp.value(),
            seq: model.seq,
        }
    }
}

impl From<CanvasSnapshot> for dto::SnapshotInfo {
    fn from(model: CanvasSnapshot) -> Self {
        Self {
            width: model.size.width(),
            height: model.size.height(),
            seq: model.seq,
            pixels: model.pixels.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ChatMessage> for dto::ChatMessageInfo {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.into_string(),
            client_id: model.from.into_string(),
            content: model.content.into_string(),
            timestamp: model.timestamp.value(),
        }
    }
}

impl From<RoomEvent> for dto::ServerMessage {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::PixelPlaced(write) => dto::ServerMessage::PixelPlaced(write.into()),
            RoomEvent::MessagePosted(message) => dto::ServerMessage::Chat(message.into()),
            RoomEvent::ParticipantJoined(participant) => {
                dto::ServerMessage::ParticipantJoined(participant.into())
            }
            RoomEvent::ParticipantLeft {
                client_id,
                disconnected_at,
            } => dto::ServerMessage::ParticipantLeft {
                client_id: client_id.into_string(),
                disconnected_at: disconnected_at.value(),
            },
        }
    }
}
