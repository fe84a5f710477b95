//! Local copy of a room's canvas with an overlay of unconfirmed writes.
//!
//! Authoritative pixels come from the server (snapshot, then `pixel-placed`
//! events). An event is applied only if its `(timestamp, seq)` is newer than
//! what the cell holds, so duplicated or reordered deliveries converge.
//!
//! Pending writes are queued per cell in placement order. The server handles
//! one client's commands in order, so each confirmation or error for a cell
//! answers the oldest pending write there.

use std::collections::{HashMap, VecDeque};

use pixelroom_shared::protocol::{PixelInfo, SnapshotInfo};

/// Local canvas of one room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCanvas {
    width: u32,
    height: u32,
    /// Highest revision seen
    seq: u64,
    cells: HashMap<(u32, u32), PixelInfo>,
    /// Colors placed by this client and not yet confirmed, oldest first
    pending: HashMap<(i64, i64), VecDeque<String>>,
}

impl LocalCanvas {
    pub fn from_snapshot(snapshot: SnapshotInfo) -> Self {
        let cells = snapshot
            .pixels
            .into_iter()
            .map(|pixel| ((pixel.x, pixel.y), pixel))
            .collect();
        Self {
            width: snapshot.width,
            height: snapshot.height,
            seq: snapshot.seq,
            cells,
            pending: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn painted_count(&self) -> usize {
        self.cells.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(VecDeque::len).sum()
    }

    /// Apply an authoritative write. Returns whether the cell changed.
    ///
    /// A newer write authored by `client_id` confirms the oldest pending
    /// write for the cell. Writes by others leave the overlay alone: anything
    /// still pending commits after them.
    pub fn apply(&mut self, pixel: PixelInfo, client_id: &str) -> bool {
        self.seq = self.seq.max(pixel.seq);

        let key = (pixel.x, pixel.y);
        let newer = self
            .cells
            .get(&key)
            .is_none_or(|held| (pixel.timestamp, pixel.seq) > (held.timestamp, held.seq));
        if !newer {
            return false;
        }
        if pixel.author == client_id {
            self.pop_pending(i64::from(pixel.x), i64::from(pixel.y));
        }
        self.cells.insert(key, pixel);
        true
    }

    /// Record an optimistic write
    pub fn place_pending(&mut self, x: i64, y: i64, color: String) {
        self.pending.entry((x, y)).or_default().push_back(color);
    }

    /// Drop the oldest optimistic write for a cell, returning its color
    pub fn rollback(&mut self, x: i64, y: i64) -> Option<String> {
        self.pop_pending(x, y)
    }

    fn pop_pending(&mut self, x: i64, y: i64) -> Option<String> {
        let queue = self.pending.get_mut(&(x, y))?;
        let color = queue.pop_front();
        if queue.is_empty() {
            self.pending.remove(&(x, y));
        }
        color
    }

    /// Color shown for a cell: the latest pending color if any, else the authoritative one
    pub fn color_at(&self, x: i64, y: i64) -> Option<&str> {
        if let Some(color) = self.pending.get(&(x, y)).and_then(VecDeque::back) {
            return Some(color);
        }
        let key = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        self.cells.get(&key).map(|pixel| pixel.color.as_str())
    }

    /// Authoritative write held for a cell
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<&PixelInfo> {
        self.cells.get(&(x, y))
    }

    pub fn is_pending(&self, x: i64, y: i64) -> bool {
        self.pending.contains_key(&(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: &str = "alice";

    fn pixel(x: u32, y: u32, color: &str, timestamp: i64, seq: u64) -> PixelInfo {
        PixelInfo {
            x,
            y,
            color: color.to_string(),
            author: "alice".to_string(),
            timestamp,
            seq,
        }
    }

    fn empty_canvas() -> LocalCanvas {
        LocalCanvas::from_snapshot(SnapshotInfo {
            width: 10,
            height: 10,
            seq: 0,
            pixels: Vec::new(),
        })
    }

    #[test]
    fn test_from_snapshot() {
        // テスト項目: スナップショットの内容がそのまま反映される
        // given (前提条件):
        let snapshot = SnapshotInfo {
            width: 20,
            height: 10,
            seq: 2,
            pixels: vec![pixel(0, 0, "#111111", 1, 1), pixel(3, 4, "#222222", 2, 2)],
        };

        // when (操作):
        let canvas = LocalCanvas::from_snapshot(snapshot);

        // then (期待する結果):
        assert_eq!((canvas.width(), canvas.height(), canvas.seq()), (20, 10, 2));
        assert_eq!(canvas.color_at(3, 4), Some("#222222"));
        assert_eq!(canvas.color_at(5, 5), None);
    }

    #[test]
    fn test_older_write_is_ignored_regardless_of_delivery_order() {
        // テスト項目: 後から届いた古い書き込みは無視され、最終色は新しい方になる
        // given (前提条件):
        let mut canvas = empty_canvas();

        // when (操作): t2 の書き込みが先に届き、t1 が後から届く
        let applied_new = canvas.apply(pixel(1, 1, "#00ff00", 2_000, 2), ME);
        let applied_old = canvas.apply(pixel(1, 1, "#ff0000", 1_000, 1), ME);

        // then (期待する結果):
        assert!(applied_new);
        assert!(!applied_old);
        assert_eq!(canvas.color_at(1, 1), Some("#00ff00"));
    }

    #[test]
    fn test_duplicate_delivery_is_idempotent() {
        // テスト項目: 同じ書き込みが 2 回届いても結果は変わらない
        // given (前提条件):
        let mut canvas = empty_canvas();
        let write = pixel(2, 2, "#123456", 1_000, 1);

        // when (操作):
        canvas.apply(write.clone(), ME);
        let second = canvas.apply(write, ME);

        // then (期待する結果):
        assert!(!second);
        assert_eq!(canvas.painted_count(), 1);
    }

    #[test]
    fn test_equal_timestamp_broken_by_seq() {
        // テスト項目: 同じタイムスタンプなら seq の大きい方が勝つ
        // given (前提条件):
        let mut canvas = empty_canvas();
        canvas.apply(pixel(0, 0, "#aaaaaa", 1_000, 5), ME);

        // when (操作):
        let applied = canvas.apply(pixel(0, 0, "#bbbbbb", 1_000, 4), ME);

        // then (期待する結果):
        assert!(!applied);
        assert_eq!(canvas.color_at(0, 0), Some("#aaaaaa"));
    }

    #[test]
    fn test_pending_overlay_is_cleared_by_own_confirmation() {
        // テスト項目: 保留中の書き込みは自分の確定イベントで消え、確定色が表示される
        // given (前提条件):
        let mut canvas = empty_canvas();
        canvas.place_pending(4, 4, "#ff00ff".to_string());
        assert_eq!(canvas.color_at(4, 4), Some("#ff00ff"));

        // when (操作):
        canvas.apply(pixel(4, 4, "#ff00ff", 1_000, 1), ME);

        // then (期待する結果):
        assert!(!canvas.is_pending(4, 4));
        assert_eq!(canvas.color_at(4, 4), Some("#ff00ff"));
    }

    #[test]
    fn test_write_by_other_keeps_pending_overlay() {
        // テスト項目: 他の参加者の書き込みでは保留中の書き込みは消えない
        // given (前提条件):
        let mut canvas = empty_canvas();
        canvas.place_pending(4, 4, "#ff00ff".to_string());

        // when (操作):
        let mut other = pixel(4, 4, "#00ffff", 1_000, 1);
        other.author = "bob".to_string();
        canvas.apply(other, ME);

        // then (期待する結果):
        assert!(canvas.is_pending(4, 4));
        assert_eq!(canvas.color_at(4, 4), Some("#ff00ff"));
    }

    #[test]
    fn test_repeated_placement_on_same_cell() {
        // テスト項目: 同じセルに連続して置いた場合、最初の確定後も 2 つ目の色が保留表示される
        // given (前提条件):
        let mut canvas = empty_canvas();
        canvas.place_pending(3, 3, "#111111".to_string());
        canvas.place_pending(3, 3, "#222222".to_string());

        // when (操作):
        canvas.apply(pixel(3, 3, "#111111", 1_000, 1), ME);

        // then (期待する結果):
        assert!(canvas.is_pending(3, 3));
        assert_eq!(canvas.pending_count(), 1);
        assert_eq!(canvas.color_at(3, 3), Some("#222222"));

        // when (操作): 2 つ目も確定
        canvas.apply(pixel(3, 3, "#222222", 1_001, 2), ME);

        // then (期待する結果):
        assert_eq!(canvas.pending_count(), 0);
        assert_eq!(canvas.color_at(3, 3), Some("#222222"));
    }

    #[test]
    fn test_rollback_restores_authoritative_color() {
        // テスト項目: エラー応答で保留中の書き込みが取り消される
        // given (前提条件):
        let mut canvas = empty_canvas();
        canvas.apply(pixel(1, 2, "#000000", 1_000, 1), ME);
        canvas.place_pending(1, 2, "#ffffff".to_string());

        // when (操作):
        let rolled_back = canvas.rollback(1, 2);

        // then (期待する結果):
        assert_eq!(rolled_back, Some("#ffffff".to_string()));
        assert_eq!(canvas.color_at(1, 2), Some("#000000"));
        assert_eq!(canvas.pending_count(), 0);
    }
}
