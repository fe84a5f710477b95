//! Per-room pixel grid with last-write-wins commits.

use std::collections::HashMap;

use super::{
    entity::{CanvasSnapshot, PixelWrite},
    error::DomainError,
    value_object::{CanvasSize, ClientId, Color, PixelPosition, Timestamp},
};

/// Pixel grid of one room.
///
/// Only painted cells are stored. Every commit bumps `seq`, and commit
/// timestamps never go backwards: a clock reading older than the previous
/// commit is clamped to it, so commit order and `(timestamp, seq)` order agree.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: CanvasSize,
    cells: HashMap<PixelPosition, PixelWrite>,
    seq: u64,
    last_timestamp: Timestamp,
}

impl Canvas {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            cells: HashMap::new(),
            seq: 0,
            last_timestamp: Timestamp::default(),
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Current revision (number of commits so far)
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Commit a write. Replaces any prior value of the cell.
    ///
    /// Bounds are checked before anything is touched, so a rejected write
    /// leaves the grid and the revision unchanged.
    pub fn place(
        &mut self,
        x: i64,
        y: i64,
        color: Color,
        author: ClientId,
        now: Timestamp,
    ) -> Result<PixelWrite, DomainError> {
        let position = self.size.position(x, y)?;

        let timestamp = now.max(self.last_timestamp);
        self.seq += 1;
        self.last_timestamp = timestamp;

        let write = PixelWrite {
            position,
            color,
            author,
            timestamp,
            seq: self.seq,
        };
        self.cells.insert(position, write.clone());
        Ok(write)
    }

    pub fn get(&self, position: PixelPosition) -> Option<&PixelWrite> {
        self.cells.get(&position)
    }

    pub fn painted_count(&self) -> usize {
        self.cells.len()
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        let mut pixels: Vec<PixelWrite> = self.cells.values().cloned().collect();
        pixels.sort_by_key(|p| (p.position.y(), p.position.x()));
        CanvasSnapshot {
            size: self.size,
            seq: self.seq,
            pixels,
        }
    }
}
