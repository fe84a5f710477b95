//! UseCase: 直近メッセージ取得

use std::sync::Arc;

use crate::domain::{ChatMessage, RoomId, RoomRepository};

use super::error::RoomQueryError;

/// 直近メッセージ取得のユースケース
pub struct GetRecentMessagesUseCase {
    repository: Arc<dyn RoomRepository>,
    /// `limit` の上限
    max_limit: usize,
}

impl GetRecentMessagesUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, max_limit: usize) -> Self {
        Self {
            repository,
            max_limit,
        }
    }

    /// 直近 `limit` 件を古い順に返す（`limit` は上限で切り詰める）
    pub async fn execute(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RoomQueryError> {
        let limit = limit.min(self.max_limit);
        Ok(self.repository.recent_messages(room_id, limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            CanvasSize, ClientId, DimensionLimits, MessageContent, MessageIdFactory, Room,
            RoomDescription, RoomIdFactory, RoomName, Timestamp,
        },
        infrastructure::repository::InMemoryRoomRepository,
    };

    async fn repository_with_messages(count: usize) -> (Arc<InMemoryRoomRepository>, RoomId) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let room = Room::new(
            RoomIdFactory::generate(),
            RoomName::new("Chat".to_string()).unwrap(),
            RoomDescription::default(),
            CanvasSize::new(10, 10, DimensionLimits::default()).unwrap(),
            Timestamp::new(0),
        );
        let room_id = room.id.clone();
        repository.insert_room(room, 10).await.unwrap();
        for i in 0..count {
            repository
                .add_message(
                    &room_id,
                    MessageIdFactory::generate(),
                    ClientId::new("alice".to_string()).unwrap(),
                    MessageContent::new(format!("message {i}")).unwrap(),
                    Timestamp::new(i as i64),
                )
                .await
                .unwrap();
        }
        (repository, room_id)
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        // テスト項目: limit は上限で切り詰められ、古い順に返る
        // given (前提条件):
        let (repository, room_id) = repository_with_messages(5).await;
        let usecase = GetRecentMessagesUseCase::new(repository, 3);

        // when (操作):
        let messages = usecase.execute(&room_id, 100).await.unwrap();

        // then (期待する結果):
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["message 2", "message 3", "message 4"]);
    }

    #[tokio::test]
    async fn test_zero_limit_returns_empty() {
        // テスト項目: limit = 0 は空のリストを返す
        // given (前提条件):
        let (repository, room_id) = repository_with_messages(2).await;
        let usecase = GetRecentMessagesUseCase::new(repository, 200);

        // when (操作):
        let messages = usecase.execute(&room_id, 0).await.unwrap();

        // then (期待する結果):
        assert!(messages.is_empty());
    }
}
