//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 参加者の接続処理（重複チェック、定員チェック、購読開始）
//!
//! ### なぜこのテストが必要か
//! - 重複接続・定員超過を防ぐ
//! - 接続時のスナップショットと、その後に届く書き込みが重複も欠落もしないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続、既存参加者への join 通知
//! - 異常系：重複した client_id、存在しないルーム
//! - エッジケース：ルームの定員超過

use std::sync::Arc;

use pixelroom_shared::time::Clock;

use crate::domain::{
    CanvasSnapshot, ChatMessage, ClientId, MessagePusher, Participant, PusherChannel, Room,
    RoomEvent, RoomId, RoomRepository, Timestamp,
};

use super::{error::ConnectError, fan_out, write_gate::RoomWriteGate};

/// 接続直後のクライアントに渡すルームの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomConnection {
    pub room: Room,
    pub participant: Participant,
    /// 購読開始時点までのコミットをちょうど反映したスナップショット
    pub snapshot: CanvasSnapshot,
    pub messages: Vec<ChatMessage>,
    /// client_id 順
    pub participants: Vec<Participant>,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    gate: Arc<RoomWriteGate>,
    /// 接続時に渡すメッセージ履歴の件数
    history_limit: usize,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        gate: Arc<RoomWriteGate>,
        history_limit: usize,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            gate,
            history_limit,
        }
    }

    /// 参加者接続を実行
    ///
    /// 参加者の追加・購読登録・スナップショット取得を書き込みゲートの中で行う。
    /// 以降の書き込みは `sender` に、スナップショットより後のものだけが届く。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続先のルーム
    /// * `client_id` - 接続するクライアントの ID（Domain Model）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(RoomConnection)` - 接続成功
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        room_id: &RoomId,
        client_id: ClientId,
        sender: PusherChannel,
    ) -> Result<RoomConnection, ConnectError> {
        let room = self.repository.get_room(room_id).await?;
        let _gate = self.gate.enter(room_id).await;

        // 1. Repository に参加者を追加（重複・定員はここで検証される）
        let connected_at = Timestamp::new(self.clock.now_millis());
        let participant = self
            .repository
            .add_participant(room_id, client_id.clone(), connected_at)
            .await?;

        // 2. MessagePusher にクライアントを登録
        self.message_pusher
            .register_client(room_id, &client_id, sender)
            .await;

        // 3. 購読開始時点の状態を取得
        let snapshot = self.repository.get_snapshot(room_id).await?;
        let messages = self
            .repository
            .recent_messages(room_id, self.history_limit)
            .await?;
        let mut participants = self.repository.get_participants(room_id).await?;
        participants.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        // 4. 既存の参加者に join を通知
        let targets: Vec<ClientId> = participants
            .iter()
            .map(|p| p.id.clone())
            .filter(|id| id != &client_id)
            .collect();
        fan_out(
            self.message_pusher.as_ref(),
            room_id,
            targets,
            &RoomEvent::ParticipantJoined(participant.clone()),
        )
        .await;

        tracing::info!(
            "Client '{}' joined room {} at revision {}",
            client_id.as_str(),
            room_id,
            snapshot.seq
        );

        Ok(RoomConnection {
            room,
            participant,
            snapshot,
            messages,
            participants,
        })
    }
}
