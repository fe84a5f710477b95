//! Entities.

use super::value_object::{
    CanvasSize, ClientId, Color, MessageContent, MessageId, PixelPosition, RoomDescription,
    RoomId, RoomName, Timestamp,
};

/// Room metadata. Dimensions never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    pub description: RoomDescription,
    pub size: CanvasSize,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(
        id: RoomId,
        name: RoomName,
        description: RoomDescription,
        size: CanvasSize,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            size,
            created_at,
        }
    }
}

/// A room as listed, with how many clients are viewing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: Room,
    pub participant_count: usize,
}

/// A client currently viewing a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ClientId,
    pub connected_at: Timestamp,
}

impl Participant {
    pub fn new(id: ClientId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}

/// A chat message appended to a room's log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub from: ClientId,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(id: MessageId, from: ClientId, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            id,
            from,
            content,
            timestamp,
        }
    }
}

/// A committed pixel write: the live value of one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelWrite {
    pub position: PixelPosition,
    pub color: Color,
    pub author: ClientId,
    pub timestamp: Timestamp,
    /// Room revision at which this write was committed
    pub seq: u64,
}

impl PixelWrite {
    /// Whether this write wins over `other` under last-write-wins.
    ///
    /// Writes are ordered by timestamp, ties broken by commit sequence.
    pub fn supersedes(&self, other: &PixelWrite) -> bool {
        (self.timestamp, self.seq) > (other.timestamp, other.seq)
    }
}

/// Full grid state of a room at revision `seq`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSnapshot {
    pub size: CanvasSize,
    pub seq: u64,
    /// Painted cells sorted by `(y, x)`
    pub pixels: Vec<PixelWrite>,
}

impl CanvasSnapshot {
    pub fn color_at(&self, x: u32, y: u32) -> Option<&Color> {
        self.pixels
            .iter()
            .find(|p| p.position.x() == x && p.position.y() == y)
            .map(|p| &p.color)
    }
}
