//! MessagePusher trait 定義
//!
//! ルームの購読者へイベントを届けるためのインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatMessage, ClientId, MessagePushError, Participant, PixelWrite, RoomId, Timestamp};

/// 購読者ごとの送信キュー（容量付き）
///
/// 容量を超えた購読者は切り離される。書き込み側は決して待たない。
pub type PusherChannel = mpsc::Sender<String>;

/// Events fanned out to the subscribers of a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    PixelPlaced(PixelWrite),
    MessagePosted(ChatMessage),
    ParticipantJoined(Participant),
    ParticipantLeft {
        client_id: ClientId,
        disconnected_at: Timestamp,
    },
}

/// MessagePusher trait
///
/// 購読者の登録・解除と、イベントの送信を抽象化する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 購読者を登録
    async fn register_client(&self, room_id: &RoomId, client_id: &ClientId, sender: PusherChannel);

    /// 購読者を登録解除（以降の配信は即座に止まる）
    async fn unregister_client(&self, room_id: &RoomId, client_id: &ClientId);

    /// 特定の購読者にエンコード済みのペイロードを送信
    async fn push_to(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数の購読者にイベントを送信
    ///
    /// 一部の送信失敗は許容する。キューが溢れて切り離された購読者の ID を返す。
    async fn broadcast(
        &self,
        room_id: &RoomId,
        targets: Vec<ClientId>,
        event: &RoomEvent,
    ) -> Result<Vec<ClientId>, MessagePushError>;
}
