//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket 接続ごとの送信キュー（`PusherChannel`）を管理
//! - ルームの購読者へのイベント送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `PusherChannel` を受け取り、メッセージ送信に使用します。
//!
//! 送信は `try_send` のみで行い、書き込み側を決してブロックしません。
//! キューが満杯の購読者はその場で登録解除されます。送信キューの最後の
//! sender が破棄されるため、UI 層の送信ループは接続を閉じて終了します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ClientId, MessagePushError, MessagePusher, PusherChannel, RoomEvent, RoomId},
    infrastructure::dto::ServerMessage,
};

type Subscribers = HashMap<RoomId, HashMap<ClientId, PusherChannel>>;

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// let (tx, rx) = tokio::sync::mpsc::channel(256);
/// pusher.register_client(&room_id, &client_id, tx).await;
/// pusher.broadcast(&room_id, vec![client_id], &event).await?;
/// ```
#[derive(Default, Clone)]
pub struct WebSocketMessagePusher {
    /// ルームごとの購読者の送信キュー
    subscribers: Arc<Mutex<Subscribers>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームの購読者数を取得
    pub async fn subscriber_count(&self, room_id: &RoomId) -> usize {
        let subscribers = self.subscribers.lock().await;
        subscribers.get(room_id).map_or(0, HashMap::len)
    }

    fn evict(subscribers: &mut Subscribers, room_id: &RoomId, client_id: &ClientId) {
        if let Some(room) = subscribers.get_mut(room_id) {
            room.remove(client_id);
            if room.is_empty() {
                subscribers.remove(room_id);
            }
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, room_id: &RoomId, client_id: &ClientId, sender: PusherChannel) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers
            .entry(room_id.clone())
            .or_default()
            .insert(client_id.clone(), sender);
        tracing::debug!(
            "Client '{}' subscribed to room '{}'",
            client_id.as_str(),
            room_id.as_str()
        );
    }

    async fn unregister_client(&self, room_id: &RoomId, client_id: &ClientId) {
        let mut subscribers = self.subscribers.lock().await;
        Self::evict(&mut subscribers, room_id, client_id);
        tracing::debug!(
            "Client '{}' unsubscribed from room '{}'",
            client_id.as_str(),
            room_id.as_str()
        );
    }

    async fn push_to(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let mut subscribers = self.subscribers.lock().await;

        let sender = subscribers
            .get(room_id)
            .and_then(|room| room.get(client_id))
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.as_str().to_string()))?;

        match sender.try_send(content.to_string()) {
            Ok(()) => {
                tracing::debug!("Pushed message to client '{}'", client_id.as_str());
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                Self::evict(&mut subscribers, room_id, client_id);
                tracing::warn!(
                    "Client '{}' queue is full, dropping subscriber",
                    client_id.as_str()
                );
                Err(MessagePushError::SubscriberOverloaded(
                    client_id.as_str().to_string(),
                ))
            }
            Err(TrySendError::Closed(_)) => {
                Self::evict(&mut subscribers, room_id, client_id);
                Err(MessagePushError::PushFailed(format!(
                    "channel of '{}' is closed",
                    client_id.as_str()
                )))
            }
        }
    }

    async fn broadcast(
        &self,
        room_id: &RoomId,
        targets: Vec<ClientId>,
        event: &RoomEvent,
    ) -> Result<Vec<ClientId>, MessagePushError> {
        let content = serde_json::to_string(&ServerMessage::from(event.clone()))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;

        let mut subscribers = self.subscribers.lock().await;
        let mut overloaded = Vec::new();

        for target in targets {
            let Some(sender) = subscribers.get(room_id).and_then(|room| room.get(&target)) else {
                tracing::warn!(
                    "Client '{}' not found during broadcast, skipping",
                    target.as_str()
                );
                continue;
            };

            // ブロードキャストでは一部の送信失敗を許容
            match sender.try_send(content.clone()) {
                Ok(()) => {
                    tracing::debug!("Broadcasted message to client '{}'", target.as_str());
                }
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Client '{}' queue is full, dropping subscriber",
                        target.as_str()
                    );
                    Self::evict(&mut subscribers, room_id, &target);
                    overloaded.push(target);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!(
                        "Client '{}' channel is closed, dropping subscriber",
                        target.as_str()
                    );
                    Self::evict(&mut subscribers, room_id, &target);
                }
            }
        }

        Ok(overloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CanvasSize, Color, DimensionLimits, Participant, PixelWrite, RoomIdFactory, Timestamp,
    };
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の送信機能とバックプレッシャー処理
    //
    // 【なぜこのテストが必要か】
    // - 遅い購読者が書き込み側を止めないことを保証する
    // - ルームをまたいだ配信が起きないことを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功・失敗ケース
    // 2. broadcast の成功ケース（JSON にシリアライズされる）
    // 3. キュー満杯の購読者の切り離し
    // 4. 登録解除後の配信停止
    // ========================================

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    fn pixel_event() -> RoomEvent {
        let size = CanvasSize::new(10, 10, DimensionLimits::default()).unwrap();
        RoomEvent::PixelPlaced(PixelWrite {
            position: size.position(1, 2).unwrap(),
            color: Color::new("#ff0000".to_string()).unwrap(),
            author: client("alice"),
            timestamp: Timestamp::new(1000),
            seq: 1,
        })
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room_id = RoomIdFactory::generate();
        let (tx, mut rx) = mpsc::channel(8);
        pusher.register_client(&room_id, &client("alice"), tx).await;

        // when (操作):
        let result = pusher.push_to(&room_id, &client("alice"), "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room_id = RoomIdFactory::generate();

        // when (操作):
        let result = pusher.push_to(&room_id, &client("nobody"), "Hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_serializes_event() {
        // テスト項目: ブロードキャストは ServerMessage の JSON を全対象に届ける
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room_id = RoomIdFactory::generate();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        pusher.register_client(&room_id, &client("alice"), tx1).await;
        pusher.register_client(&room_id, &client("bob"), tx2).await;

        // when (操作):
        let overloaded = pusher
            .broadcast(&room_id, vec![client("alice"), client("bob")], &pixel_event())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(overloaded.is_empty());
        for rx in [&mut rx1, &mut rx2] {
            let json: serde_json::Value =
                serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
            assert_eq!(json["type"], "pixel-placed");
            assert_eq!(json["x"], 1);
            assert_eq!(json["y"], 2);
        }
    }

    #[tokio::test]
    async fn test_broadcast_drops_overloaded_subscriber() {
        // テスト項目: キューが満杯の購読者は切り離され、他の購読者には届き続ける
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room_id = RoomIdFactory::generate();
        let (slow_tx, mut slow_rx) = mpsc::channel(1);
        let (fast_tx, mut fast_rx) = mpsc::channel(8);
        pusher.register_client(&room_id, &client("slow"), slow_tx).await;
        pusher.register_client(&room_id, &client("fast"), fast_tx).await;
        let targets = vec![client("slow"), client("fast")];

        // when (操作): slow は 1 件目を読まないまま 2 件目が届く
        pusher
            .broadcast(&room_id, targets.clone(), &pixel_event())
            .await
            .unwrap();
        let overloaded = pusher
            .broadcast(&room_id, targets, &pixel_event())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(overloaded, vec![client("slow")]);
        assert_eq!(pusher.subscriber_count(&room_id).await, 1);
        assert!(fast_rx.recv().await.is_some());
        assert!(fast_rx.recv().await.is_some());
        // slow のキューは 1 件残して閉じられる
        assert!(slow_rx.recv().await.is_some());
        assert_eq!(slow_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_push_to_full_queue_reports_overloaded() {
        // テスト項目: push_to でキューが満杯なら SubscriberOverloaded を返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room_id = RoomIdFactory::generate();
        let (tx, _rx) = mpsc::channel(1);
        pusher.register_client(&room_id, &client("alice"), tx).await;
        pusher.push_to(&room_id, &client("alice"), "first").await.unwrap();

        // when (操作):
        let result = pusher.push_to(&room_id, &client("alice"), "second").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::SubscriberOverloaded("alice".to_string()))
        );
        assert_eq!(pusher.subscriber_count(&room_id).await, 0);
    }

    #[tokio::test]
    async fn test_unregistered_client_receives_nothing() {
        // テスト項目: 登録解除したクライアントには配信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room_id = RoomIdFactory::generate();
        let (tx, mut rx) = mpsc::channel(8);
        pusher.register_client(&room_id, &client("alice"), tx).await;

        // when (操作):
        pusher.unregister_client(&room_id, &client("alice")).await;
        let event = RoomEvent::ParticipantJoined(Participant::new(client("bob"), Timestamp::new(1)));
        pusher
            .broadcast(&room_id, vec![client("alice")], &event)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_broadcast_is_scoped_to_room() {
        // テスト項目: 別ルームの購読者にはブロードキャストされない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room_a = RoomIdFactory::generate();
        let room_b = RoomIdFactory::generate();
        let (tx, mut rx) = mpsc::channel(8);
        pusher.register_client(&room_b, &client("alice"), tx).await;

        // when (操作):
        pusher
            .broadcast(&room_a, vec![client("alice")], &pixel_event())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(rx.try_recv().is_err());
    }
}
