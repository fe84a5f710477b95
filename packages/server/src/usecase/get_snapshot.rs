//! UseCase: キャンバスのスナップショット取得
//!
//! 書き込みゲートを通らないため、並行する書き込みを取りこぼすことがあります。
//! 取りこぼした書き込みは購読経由で届きます。

use std::sync::Arc;

use crate::domain::{CanvasSnapshot, RoomId, RoomRepository};

use super::error::RoomQueryError;

/// スナップショット取得のユースケース
pub struct GetSnapshotUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetSnapshotUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<CanvasSnapshot, RoomQueryError> {
        Ok(self.repository.get_snapshot(room_id).await?)
    }
}
