//! UseCase: ピクセル書き込み処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlacePixelUseCase::execute() メソッド
//! - コミットされた書き込みの配信（書き込んだ本人も含む全購読者）
//!
//! ### なぜこのテストが必要か
//! - 後勝ちの結果が全購読者に同じ順序で届くことを保証する
//! - 失敗した書き込みが配信されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：書き込みとブロードキャスト
//! - 異常系：範囲外座標、存在しないルーム
//! - エッジケース：同じセルへの連続した書き込み

use std::sync::Arc;

use pixelroom_shared::time::Clock;

use crate::domain::{
    ClientId, Color, MessagePusher, PixelWrite, RoomEvent, RoomId, RoomRepository, Timestamp,
};

use super::{error::PlacePixelError, fan_out, write_gate::RoomWriteGate};

/// ピクセル書き込みのユースケース
pub struct PlacePixelUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    gate: Arc<RoomWriteGate>,
}

impl PlacePixelUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        gate: Arc<RoomWriteGate>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            gate,
        }
    }

    /// ピクセルを書き込み、ルームの全購読者に配信する
    ///
    /// # Returns
    ///
    /// * `Ok(PixelWrite)` - コミットされた書き込み（timestamp と seq を含む）
    /// * `Err(PlacePixelError)` - ルームが存在しない、または範囲外
    pub async fn execute(
        &self,
        room_id: &RoomId,
        x: i64,
        y: i64,
        color: Color,
        author: ClientId,
    ) -> Result<PixelWrite, PlacePixelError> {
        self.repository.get_room(room_id).await?;
        let _gate = self.gate.enter(room_id).await;

        let now = Timestamp::new(self.clock.now_millis());
        let write = self
            .repository
            .place_pixel(room_id, x, y, color, author, now)
            .await?;

        let targets = self.repository.get_all_connected_client_ids(room_id).await?;
        fan_out(
            self.message_pusher.as_ref(),
            room_id,
            targets,
            &RoomEvent::PixelPlaced(write.clone()),
        )
        .await;

        Ok(write)
    }
}
