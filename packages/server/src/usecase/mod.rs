//! UseCase 層
//!
//! アプリケーションのビジネスロジックを実装します。
//! Repository と MessagePusher の trait にのみ依存し、具体的な実装は知りません。

pub mod connect_participant;
pub mod create_room;
pub mod disconnect_participant;
pub mod error;
pub mod get_recent_messages;
pub mod get_room_detail;
pub mod get_rooms;
pub mod get_snapshot;
pub mod place_pixel;
pub mod post_message;
pub mod write_gate;

use std::sync::Arc;

use pixelroom_shared::time::Clock;

use crate::{
    config::ServerConfig,
    domain::{ClientId, MessagePusher, RoomEvent, RoomId, RoomRepository},
};

pub use connect_participant::{ConnectParticipantUseCase, RoomConnection};
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    ConnectError, CreateRoomError, DisconnectError, PlacePixelError, PostMessageError,
    RoomQueryError,
};
pub use get_recent_messages::GetRecentMessagesUseCase;
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use get_rooms::GetRoomsUseCase;
pub use get_snapshot::GetSnapshotUseCase;
pub use place_pixel::PlacePixelUseCase;
pub use post_message::PostMessageUseCase;
pub use write_gate::RoomWriteGate;

/// 全ユースケースの束（UI 層の State が保持する）
pub struct UseCases {
    pub create_room: CreateRoomUseCase,
    pub get_rooms: GetRoomsUseCase,
    pub get_room_detail: GetRoomDetailUseCase,
    pub get_snapshot: GetSnapshotUseCase,
    pub place_pixel: PlacePixelUseCase,
    pub post_message: PostMessageUseCase,
    pub get_recent_messages: GetRecentMessagesUseCase,
    pub connect_participant: ConnectParticipantUseCase,
    pub disconnect_participant: DisconnectParticipantUseCase,
    /// UI 層がエラー応答を個別に送るために使う
    pub message_pusher: Arc<dyn MessagePusher>,
}

impl UseCases {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        config: &ServerConfig,
    ) -> Self {
        let gate = Arc::new(RoomWriteGate::new());

        Self {
            create_room: CreateRoomUseCase::new(
                repository.clone(),
                clock.clone(),
                config.dimension_limits,
                config.max_participants,
            ),
            get_rooms: GetRoomsUseCase::new(repository.clone()),
            get_room_detail: GetRoomDetailUseCase::new(repository.clone()),
            get_snapshot: GetSnapshotUseCase::new(repository.clone()),
            place_pixel: PlacePixelUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                gate.clone(),
            ),
            post_message: PostMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                gate.clone(),
            ),
            get_recent_messages: GetRecentMessagesUseCase::new(
                repository.clone(),
                config.max_recent_messages,
            ),
            connect_participant: ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                gate.clone(),
                config.max_recent_messages,
            ),
            disconnect_participant: DisconnectParticipantUseCase::new(
                repository,
                message_pusher.clone(),
                clock,
                gate,
            ),
            message_pusher,
        }
    }
}

/// イベントを購読者に配信する
///
/// 書き込みはコミット済みのため、配信の失敗はログに残すだけにする。
/// キューが溢れた購読者は pusher 側で切り離され、接続は UI 層が閉じる。
async fn fan_out(
    message_pusher: &dyn MessagePusher,
    room_id: &RoomId,
    targets: Vec<ClientId>,
    event: &RoomEvent,
) {
    match message_pusher.broadcast(room_id, targets, event).await {
        Ok(overloaded) => {
            for client_id in overloaded {
                tracing::warn!(
                    "SubscriberOverloaded: client '{}' dropped from room {}",
                    client_id.as_str(),
                    room_id
                );
            }
        }
        Err(e) => {
            tracing::error!("Failed to broadcast to room {}: {}", room_id, e);
        }
    }
}
