//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    CanvasSnapshot, ChatMessage, ClientId, Color, MessageContent, MessageId, Participant,
    PixelWrite, RepositoryError, Room, RoomId, RoomSummary, Timestamp,
};

/// Room Repository trait
///
/// 全ルームのメタデータ・参加者・キャンバス・チャットログへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// 同一ルームへの書き込みは実装側で直列化されること（セル単位でアトミック）。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを追加
    async fn insert_room(
        &self,
        room: Room,
        participant_capacity: usize,
    ) -> Result<(), RepositoryError>;

    /// 全ルームを作成日時の新しい順に、接続中の参加者数と共に取得
    async fn list_rooms(&self) -> Vec<RoomSummary>;

    /// ルームのメタデータを取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 参加者を追加
    async fn add_participant(
        &self,
        room_id: &RoomId,
        client_id: ClientId,
        timestamp: Timestamp,
    ) -> Result<Participant, RepositoryError>;

    /// 参加者を削除（存在した場合 true）
    async fn remove_participant(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<bool, RepositoryError>;

    /// ルームの参加者リストを取得
    async fn get_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>, RepositoryError>;

    /// ルームに接続中の全てのクライアント ID を取得
    async fn get_all_connected_client_ids(
        &self,
        room_id: &RoomId,
    ) -> Result<Vec<ClientId>, RepositoryError>;

    /// ピクセルを書き込む（後勝ち）
    async fn place_pixel(
        &self,
        room_id: &RoomId,
        x: i64,
        y: i64,
        color: Color,
        author: ClientId,
        timestamp: Timestamp,
    ) -> Result<PixelWrite, RepositoryError>;

    /// キャンバス全体のスナップショットを取得
    async fn get_snapshot(&self, room_id: &RoomId) -> Result<CanvasSnapshot, RepositoryError>;

    /// メッセージをルームのチャットログに追加
    async fn add_message(
        &self,
        room_id: &RoomId,
        id: MessageId,
        from: ClientId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, RepositoryError>;

    /// 直近 `limit` 件のメッセージを古い順に取得
    async fn recent_messages(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;
}
