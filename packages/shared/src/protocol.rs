//! Wire protocol shared by the pixelroom server and client.
//!
//! WebSocket frames are JSON objects tagged by `type` (kebab-case). HTTP
//! request/response bodies are plain JSON objects.

use serde::{Deserialize, Serialize};

/// WebSocket close code sent when a subscriber is evicted for falling behind.
pub const CLOSE_CODE_OVERLOADED: u16 = 1013;

/// Kinds of errors reported to callers, over HTTP and WebSocket alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    UnknownRoom,
    OutOfBounds,
    InvalidDimensions,
    SubscriberOverloaded,
    InvalidColor,
    InvalidRoomName,
    InvalidMessage,
    InvalidClientId,
    DuplicateClientId,
    RoomFull,
    InvalidRequest,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownRoom => "UnknownRoom",
            ErrorKind::OutOfBounds => "OutOfBounds",
            ErrorKind::InvalidDimensions => "InvalidDimensions",
            ErrorKind::SubscriberOverloaded => "SubscriberOverloaded",
            ErrorKind::InvalidColor => "InvalidColor",
            ErrorKind::InvalidRoomName => "InvalidRoomName",
            ErrorKind::InvalidMessage => "InvalidMessage",
            ErrorKind::InvalidClientId => "InvalidClientId",
            ErrorKind::DuplicateClientId => "DuplicateClientId",
            ErrorKind::RoomFull => "RoomFull",
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Payloads
// ========================================

/// Room metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    /// Unix timestamp (milliseconds)
    pub created_at: i64,
}

/// Participant information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub client_id: String,
    /// Unix timestamp (milliseconds)
    pub connected_at: i64,
}

/// A committed pixel write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelInfo {
    pub x: u32,
    pub y: u32,
    pub color: String,
    pub author: String,
    /// Unix timestamp (milliseconds) assigned at commit
    pub timestamp: i64,
    /// Room revision at which the write was committed
    pub seq: u64,
}

/// Full canvas state at revision `seq` (painted cells only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub width: u32,
    pub height: u32,
    pub seq: u64,
    pub pixels: Vec<PixelInfo>,
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageInfo {
    pub id: String,
    pub client_id: String,
    pub content: String,
    /// Unix timestamp (milliseconds)
    pub timestamp: i64,
}

/// Error report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    /// Cell the failed request targeted, if it was a pixel placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
}

// ========================================
// WebSocket
// ========================================

/// Server → client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// First frame after subscribing: everything needed to render the room
    RoomConnected {
        room: RoomInfo,
        snapshot: SnapshotInfo,
        messages: Vec<ChatMessageInfo>,
        participants: Vec<ParticipantInfo>,
    },
    PixelPlaced(PixelInfo),
    Chat(ChatMessageInfo),
    ParticipantJoined(ParticipantInfo),
    ParticipantLeft {
        client_id: String,
        disconnected_at: i64,
    },
    Error(ErrorInfo),
}

/// Client → server commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    PlacePixel { x: i64, y: i64, color: String },
    Chat { content: String },
}

// ========================================
// HTTP
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: i64,
    pub height: i64,
}

/// Entry of the room list: metadata plus how many clients are online
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryInfo {
    #[serde(flatten)]
    pub room: RoomInfo,
    pub participant_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetail {
    #[serde(flatten)]
    pub room: RoomInfo,
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePixelRequest {
    pub x: i64,
    pub y: i64,
    pub color: String,
    pub author_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorKind,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_placed_is_tagged_in_kebab_case() {
        // テスト項目: pixel-placed イベントが type タグ付きの JSON になる
        // given (前提条件):
        let msg = ServerMessage::PixelPlaced(PixelInfo {
            x: 3,
            y: 4,
            color: "#ff0000".to_string(),
            author: "alice".to_string(),
            timestamp: 1000,
            seq: 7,
        });

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "pixel-placed");
        assert_eq!(json["x"], 3);
        assert_eq!(json["seq"], 7);
    }

    #[test]
    fn test_client_message_parses_place_pixel_with_negative_coordinate() {
        // テスト項目: 負の座標を含む place-pixel コマンドをパースできる（範囲検証はサーバー側）
        // given (前提条件):
        let text = r##"{"type":"place-pixel","x":-1,"y":0,"color":"#00ff00"}"##;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            msg,
            ClientMessage::PlacePixel {
                x: -1,
                y: 0,
                color: "#00ff00".to_string()
            }
        );
    }

    #[test]
    fn test_error_info_omits_missing_coordinates() {
        // テスト項目: 座標を持たないエラーは x, y を出力しない
        // given (前提条件):
        let msg = ServerMessage::Error(ErrorInfo {
            kind: ErrorKind::InvalidMessage,
            message: "empty".to_string(),
            x: None,
            y: None,
        });

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "error");
        assert_eq!(json["kind"], "InvalidMessage");
        assert!(json.get("x").is_none());
    }

    #[test]
    fn test_room_detail_flattens_room_fields() {
        // テスト項目: RoomDetail は room のフィールドをトップレベルに展開する
        // given (前提条件):
        let detail = RoomDetail {
            room: RoomInfo {
                id: "r1".to_string(),
                name: "Test".to_string(),
                description: String::new(),
                width: 100,
                height: 100,
                created_at: 1,
            },
            participants: vec![],
        };

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&detail).unwrap();

        // then (期待する結果):
        assert_eq!(json["id"], "r1");
        assert_eq!(json["width"], 100);
        assert!(json["participants"].as_array().unwrap().is_empty());
    }
}
