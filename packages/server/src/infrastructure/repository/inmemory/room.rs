//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロックの粒度
//!
//! - ルーム一覧: `RwLock<HashMap<..>>`（作成時のみ write）
//! - ルームごと: `Mutex<RoomState>`（同一ルームへの書き込みはここで直列化される）
//!
//! 異なるルームへの操作は互いにブロックしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{
    CanvasSnapshot, ChatMessage, ClientId, Color, MessageContent, MessageId, Participant,
    PixelWrite, RepositoryError, Room, RoomId, RoomRepository, RoomState, RoomSummary, Timestamp,
};

#[derive(Default)]
struct Rooms {
    by_id: HashMap<RoomId, Arc<Mutex<RoomState>>>,
    /// 作成順（一覧の同時刻タイブレーク用）
    insertion_order: Vec<RoomId>,
}

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<Rooms>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    async fn room_state(&self, room_id: &RoomId) -> Result<Arc<Mutex<RoomState>>, RepositoryError> {
        let rooms = self.rooms.read().await;
        rooms
            .by_id
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(
        &self,
        room: Room,
        participant_capacity: usize,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.write().await;
        if rooms.by_id.contains_key(&room.id) {
            return Err(RepositoryError::DuplicateRoom(room.id.into_string()));
        }
        let room_id = room.id.clone();
        rooms.by_id.insert(
            room_id.clone(),
            Arc::new(Mutex::new(RoomState::with_capacity(
                room,
                participant_capacity,
            ))),
        );
        rooms.insertion_order.push(room_id);
        Ok(())
    }

    async fn list_rooms(&self) -> Vec<RoomSummary> {
        let states: Vec<Arc<Mutex<RoomState>>> = {
            let rooms = self.rooms.read().await;
            rooms
                .insertion_order
                .iter()
                .rev()
                .filter_map(|id| rooms.by_id.get(id).cloned())
                .collect()
        };

        let mut list = Vec::with_capacity(states.len());
        for state in states {
            let state = state.lock().await;
            list.push(RoomSummary {
                room: state.room.clone(),
                participant_count: state.participants().len(),
            });
        }
        // stable: equal created_at keeps newest-inserted first
        list.sort_by(|a, b| b.room.created_at.cmp(&a.room.created_at));
        list
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let room = state.lock().await.room.clone();
        Ok(room)
    }

    async fn add_participant(
        &self,
        room_id: &RoomId,
        client_id: ClientId,
        timestamp: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let participant = Participant::new(client_id, timestamp);
        state.lock().await.add_participant(participant.clone())?;
        Ok(participant)
    }

    async fn remove_participant(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<bool, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let removed = state.lock().await.remove_participant(client_id);
        Ok(removed)
    }

    async fn get_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let participants = state.lock().await.participants().to_vec();
        Ok(participants)
    }

    async fn get_all_connected_client_ids(
        &self,
        room_id: &RoomId,
    ) -> Result<Vec<ClientId>, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let ids = state
            .lock()
            .await
            .participants()
            .iter()
            .map(|p| p.id.clone())
            .collect();
        Ok(ids)
    }

    async fn place_pixel(
        &self,
        room_id: &RoomId,
        x: i64,
        y: i64,
        color: Color,
        author: ClientId,
        timestamp: Timestamp,
    ) -> Result<PixelWrite, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let write = state
            .lock()
            .await
            .place_pixel(x, y, color, author, timestamp)?;
        Ok(write)
    }

    async fn get_snapshot(&self, room_id: &RoomId) -> Result<CanvasSnapshot, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let snapshot = state.lock().await.canvas().snapshot();
        Ok(snapshot)
    }

    async fn add_message(
        &self,
        room_id: &RoomId,
        id: MessageId,
        from: ClientId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let message = state
            .lock()
            .await
            .post_message(id, from, content, timestamp);
        Ok(message)
    }

    async fn recent_messages(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.room_state(room_id).await?;
        let messages = state.lock().await.chat().recent(limit);
        Ok(messages)
    }
}
