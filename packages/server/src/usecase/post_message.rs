//! UseCase: チャットメッセージ投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostMessageUseCase::execute() メソッド
//! - メッセージ履歴への追加と、送信者を含む全購読者への配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ投稿とブロードキャスト
//! - 異常系：存在しないルーム
//! - エッジケース：時計が巻き戻ってもタイムスタンプは減らない

use std::sync::Arc;

use pixelroom_shared::time::Clock;

use crate::domain::{
    ChatMessage, ClientId, MessageContent, MessageIdFactory, MessagePusher, RoomEvent, RoomId,
    RoomRepository, Timestamp,
};

use super::{error::PostMessageError, fan_out, write_gate::RoomWriteGate};

/// メッセージ投稿のユースケース
pub struct PostMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    gate: Arc<RoomWriteGate>,
}

impl PostMessageUseCase {
    /// 新しい PostMessageUseCase を作成
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

    /// メッセージ投稿を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 投稿先のルーム
    /// * `from` - メッセージ送信者のクライアント ID（Domain Model）
    /// * `content` - メッセージ内容（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 追加されたメッセージ
    /// * `Err(PostMessageError)` - 投稿失敗
    pub async fn execute(
        &self,
        room_id: &RoomId,
        from: ClientId,
        content: MessageContent,
    ) -> Result<ChatMessage, PostMessageError> {
        self.repository.get_room(room_id).await?;
        let _gate = self.gate.enter(room_id).await;

        // 1. Repository 経由でメッセージをルームに追加
        let now = Timestamp::new(self.clock.now_millis());
        let message = self
            .repository
            .add_message(room_id, MessageIdFactory::generate(), from, content, now)
            .await?;

        // 2. 送信者を含む全ての購読者にブロードキャスト
        let targets = self.repository.get_all_connected_client_ids(room_id).await?;
        fan_out(
            self.message_pusher.as_ref(),
            room_id,
            targets,
            &RoomEvent::MessagePosted(message.clone()),
        )
        .await;

        Ok(message)
    }
}
