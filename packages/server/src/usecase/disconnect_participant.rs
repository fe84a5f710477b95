//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の切断処理（購読解除、参加者削除、残りの参加者への通知）
//!
//! ### なぜこのテストが必要か
//! - 切断後は配信が即座に止まることを保証
//! - 切断時に他の参加者に通知されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象なし）
//! - 異常系：存在しない参加者の切断試行

use std::sync::Arc;

use pixelroom_shared::time::Clock;

use crate::domain::{ClientId, MessagePusher, RoomEvent, RoomId, RoomRepository, Timestamp};

use super::{error::DisconnectError, fan_out, write_gate::RoomWriteGate};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    gate: Arc<RoomWriteGate>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
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

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ClientId>)` - left を通知したクライアント ID リスト（Domain Model）
    /// * `Err(DisconnectError)` - 切断失敗（参加者が存在しない場合）
    pub async fn execute(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<Vec<ClientId>, DisconnectError> {
        let _gate = self.gate.enter(room_id).await;

        // 1. MessagePusher からクライアントを登録解除（以降の配信を止める）
        self.message_pusher
            .unregister_client(room_id, client_id)
            .await;

        // 2. Repository 経由で参加者を削除
        if !self.repository.remove_participant(room_id, client_id).await? {
            return Err(DisconnectError::NotConnected(
                client_id.as_str().to_string(),
            ));
        }

        // 3. 残りの参加者に left を通知
        let notify_targets = self.repository.get_all_connected_client_ids(room_id).await?;
        let event = RoomEvent::ParticipantLeft {
            client_id: client_id.clone(),
            disconnected_at: Timestamp::new(self.clock.now_millis()),
        };
        fan_out(
            self.message_pusher.as_ref(),
            room_id,
            notify_targets.clone(),
            &event,
        )
        .await;

        tracing::info!(
            "Client '{}' left room {} ({} remaining)",
            client_id.as_str(),
            room_id,
            notify_targets.len()
        );

        Ok(notify_targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            CanvasSize, DimensionLimits, MockMessagePusher, Room, RoomDescription, RoomIdFactory,
            RoomName,
        },
        infrastructure::repository::InMemoryRoomRepository,
    };
    use pixelroom_shared::time::FixedClock;

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    async fn create_test_repository(members: &[&str]) -> (Arc<InMemoryRoomRepository>, RoomId) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let room = Room::new(
            RoomIdFactory::generate(),
            RoomName::new("Canvas".to_string()).unwrap(),
            RoomDescription::default(),
            CanvasSize::new(10, 10, DimensionLimits::default()).unwrap(),
            Timestamp::new(0),
        );
        let room_id = room.id.clone();
        repository.insert_room(room, 10).await.unwrap();
        for id in members {
            repository
                .add_participant(&room_id, client(id), Timestamp::new(0))
                .await
                .unwrap();
        }
        (repository, room_id)
    }

    fn create_usecase(
        repository: Arc<InMemoryRoomRepository>,
        pusher: MockMessagePusher,
    ) -> DisconnectParticipantUseCase {
        DisconnectParticipantUseCase::new(
            repository,
            Arc::new(pusher),
            Arc::new(FixedClock::new(9_000)),
            Arc::new(RoomWriteGate::new()),
        )
    }

    #[tokio::test]
    async fn test_disconnect_participant_success() {
        // テスト項目: 参加者が正常に切断され、残りの参加者に通知される
        // given (前提条件):
        let (repository, room_id) = create_test_repository(&["alice", "bob"]).await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().times(1).return_const(());
        pusher
            .expect_broadcast()
            .withf(|_, targets, event| {
                targets == &vec![ClientId::new("bob".to_string()).unwrap()]
                    && matches!(
                        event,
                        RoomEvent::ParticipantLeft { client_id, disconnected_at }
                            if client_id.as_str() == "alice" && disconnected_at.value() == 9_000
                    )
            })
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));
        let usecase = create_usecase(repository.clone(), pusher);

        // when (操作):
        let result = usecase.execute(&room_id, &client("alice")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![client("bob")]));
        let participants = repository.get_participants(&room_id).await.unwrap();
        assert_eq!(participants.len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_last_participant() {
        // テスト項目: 最後の参加者が切断した場合、通知対象は空
        // given (前提条件):
        let (repository, room_id) = create_test_repository(&["alice"]).await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().return_const(());
        pusher
            .expect_broadcast()
            .withf(|_, targets, _| targets.is_empty())
            .returning(|_, _, _| Ok(Vec::new()));
        let usecase = create_usecase(repository.clone(), pusher);

        // when (操作):
        let result = usecase.execute(&room_id, &client("alice")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_disconnect_unknown_participant() {
        // テスト項目: 存在しない参加者の切断はエラーになり、通知されない
        // given (前提条件):
        let (repository, room_id) = create_test_repository(&["alice"]).await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().return_const(());
        pusher.expect_broadcast().times(0);
        let usecase = create_usecase(repository, pusher);

        // when (操作):
        let result = usecase.execute(&room_id, &client("ghost")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(DisconnectError::NotConnected("ghost".to_string()))
        );
    }
}
