//! UseCase: ルーム作成処理

use std::sync::Arc;

use pixelroom_shared::time::Clock;

use crate::domain::{
    CanvasSize, DimensionLimits, Room, RoomDescription, RoomIdFactory, RoomName,
    RoomRepository, Timestamp,
};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
    /// キャンバスの幅・高さの許容範囲
    limits: DimensionLimits,
    /// ルームごとの参加者の上限
    participant_capacity: usize,
}

impl CreateRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        limits: DimensionLimits,
        participant_capacity: usize,
    ) -> Self {
        Self {
            repository,
            clock,
            limits,
            participant_capacity,
        }
    }

    /// ルームを作成
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 作成されたルーム
    /// * `Err(CreateRoomError)` - 名前・説明・サイズの検証に失敗
    pub async fn execute(
        &self,
        name: String,
        description: String,
        width: i64,
        height: i64,
    ) -> Result<Room, CreateRoomError> {
        let name =
            RoomName::new(name).map_err(|e| CreateRoomError::InvalidRoomName(e.to_string()))?;
        let description = RoomDescription::new(description)
            .map_err(|e| CreateRoomError::InvalidDescription(e.to_string()))?;
        let size = CanvasSize::new(width, height, self.limits)
            .map_err(|e| CreateRoomError::InvalidDimensions(e.to_string()))?;

        let room = Room::new(
            RoomIdFactory::generate(),
            name,
            description,
            size,
            Timestamp::new(self.clock.now_millis()),
        );

        self.repository
            .insert_room(room.clone(), self.participant_capacity)
            .await
            .map_err(|e| CreateRoomError::StoreFailed(e.to_string()))?;

        tracing::info!(
            "Room '{}' ({}x{}) created as {}",
            room.name.as_str(),
            width,
            height,
            room.id
        );
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryRoomRepository;
    use pixelroom_shared::time::FixedClock;

    fn create_usecase() -> (CreateRoomUseCase, Arc<InMemoryRoomRepository>) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = CreateRoomUseCase::new(
            repository.clone(),
            Arc::new(FixedClock::new(1_000)),
            DimensionLimits::default(),
            100,
        );
        (usecase, repository)
    }

    #[tokio::test]
    async fn test_create_room_success() {
        // テスト項目: 100x100 のルームが作成され、一覧に現れる
        // given (前提条件):
        let (usecase, repository) = create_usecase();

        // when (操作):
        let room = usecase
            .execute("Sketch".to_string(), "for fun".to_string(), 100, 100)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(room.size.width(), 100);
        assert_eq!(room.size.height(), 100);
        assert_eq!(room.created_at, Timestamp::new(1_000));
        let rooms = repository.list_rooms().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room, room);
        assert_eq!(rooms[0].participant_count, 0);
    }

    #[tokio::test]
    async fn test_create_room_zero_width_fails() {
        // テスト項目: 幅 0 のルームは InvalidDimensions で拒否される
        // given (前提条件):
        let (usecase, repository) = create_usecase();

        // when (操作):
        let result = usecase
            .execute("Sketch".to_string(), String::new(), 0, 100)
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(CreateRoomError::InvalidDimensions(_))));
        assert!(repository.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_room_blank_name_fails() {
        // テスト項目: 空白のみの名前は InvalidRoomName で拒否される
        // given (前提条件):
        let (usecase, _repository) = create_usecase();

        // when (操作):
        let result = usecase
            .execute("   ".to_string(), String::new(), 20, 20)
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(CreateRoomError::InvalidRoomName(_))));
    }
}
