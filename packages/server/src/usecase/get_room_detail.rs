//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{Participant, Room, RoomId, RoomRepository};

use super::error::RoomQueryError;

/// ルームのメタデータと参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub room: Room,
    /// client_id 順
    pub participants: Vec<Participant>,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<RoomDetail, RoomQueryError> {
        let room = self.repository.get_room(room_id).await?;
        let mut participants = self.repository.get_participants(room_id).await?;

        // Sort by client_id for consistent ordering
        participants.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        Ok(RoomDetail { room, participants })
    }
}
