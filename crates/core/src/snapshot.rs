use arrayvec::ArrayVec;
use serde::Serialize;

use crate::piece::Piece;
use crate::types::{Offset, TileId, Variant, MAX_PIECE_CELLS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub variant: Variant,
    pub position: Offset,
    /// Absolute board coordinates
    pub cells: ArrayVec<Offset, MAX_PIECE_CELLS>,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            variant: piece.variant,
            position: piece.position,
            cells: piece.absolute_cells().collect(),
        }
    }
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionSnapshot {
    pub left: i32,
    pub bottom: i32,
    pub width: i32,
    pub height: i32,
    /// Row-major tiles, bottom row first. Includes the active piece.
    pub cells: Vec<Option<TileId>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<Offset>,
    pub next: Option<Variant>,
    pub score: u32,
    pub game_over: bool,
    pub started: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.left = 0;
        self.bottom = 0;
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.active = None;
        self.ghost = None;
        self.next = None;
        self.score = 0;
        self.game_over = false;
        self.started = false;
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<TileId> {
        let col = x - self.left;
        let row = y - self.bottom;
        if col < 0 || col >= self.width || row < 0 || row >= self.height {
            return None;
        }
        self.cells[(row * self.width + col) as usize]
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }
}
