//! ルームごとの書き込みゲート
//!
//! 同一ルームへの「コミット → 配信」を 1 本の列に並べます。
//! ゲートの中で配信まで済ませるため、購読者への配信順はコミット順と一致します。
//! 購読開始（登録 + スナップショット取得）も同じゲートの中で行われます。

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RoomId;

/// ルームごとの書き込みゲート
#[derive(Default)]
pub struct RoomWriteGate {
    gates: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomWriteGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームのゲートに入る（ガードを drop すると抜ける）
    pub async fn enter(&self, room_id: &RoomId) -> OwnedMutexGuard<()> {
        let gate = {
            let mut gates = self.gates.lock().await;
            gates.entry(room_id.clone()).or_default().clone()
        };
        gate.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomIdFactory;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_room_is_serialized() {
        // テスト項目: 同じルームのゲートは同時に 1 つしか入れない
        // given (前提条件):
        let gate = Arc::new(RoomWriteGate::new());
        let room_id = RoomIdFactory::generate();
        let guard = gate.enter(&room_id).await;

        // when (操作):
        let second = {
            let gate = gate.clone();
            let room_id = room_id.clone();
            tokio::spawn(async move {
                let _guard = gate.enter(&room_id).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // then (期待する結果):
        assert!(!second.is_finished());
        drop(guard);
        second.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_rooms_do_not_block() {
        // テスト項目: 異なるルームのゲートは互いにブロックしない
        // given (前提条件):
        let gate = RoomWriteGate::new();
        let _guard = gate.enter(&RoomIdFactory::generate()).await;

        // when (操作):
        let other = tokio::time::timeout(
            Duration::from_millis(100),
            gate.enter(&RoomIdFactory::generate()),
        )
        .await;

        // then (期待する結果):
        assert!(other.is_ok());
    }
}
