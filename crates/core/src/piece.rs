//! Active piece module - movement, rotation and wall kicks
//!
//! A [`Piece`] owns a private copy of its catalog offsets so rotation can
//! rewrite them freely. Movement is a single primitive, [`Piece::try_move`],
//! which every other operation (soft drop, hard drop, kick probing) builds on.
//!
//! Once a piece freezes it is handed to the [`PieceStore`], which keeps it
//! alive until line clears have removed every one of its cells.

use arrayvec::ArrayVec;
use rustc_hash::FxHashMap;

use crate::board::Board;
use crate::pieces::{shape_data, RotationClass};
use crate::types::{Offset, Spin, TileId, Variant, DOWN, LEFT, MAX_PIECE_CELLS, RIGHT};

/// Handle from a board cell to the piece that placed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// Maximum number of wall-kick offsets for any variant
pub const MAX_KICKS: usize = 7;

/// A falling (or frozen) piece
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub variant: Variant,
    pub tile: TileId,
    pub position: Offset,
    pub frozen: bool,
    cells: ArrayVec<Offset, MAX_PIECE_CELLS>,
    rotation_class: RotationClass,
    live_cells: u8,
}

impl Piece {
    /// Create a piece at `spawn` with a fresh copy of the catalog shape
    pub fn new(id: PieceId, variant: Variant, spawn: Offset) -> Self {
        let data = shape_data(variant);
        let cells: ArrayVec<Offset, MAX_PIECE_CELLS> = data.cells.iter().copied().collect();
        let live_cells = cells.len() as u8;
        Self {
            id,
            variant,
            tile: data.tile,
            position: spawn,
            frozen: false,
            cells,
            rotation_class: data.rotation,
            live_cells,
        }
    }

    /// Local cell offsets in the current orientation
    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    /// Board coordinates covered by the piece at `position`
    pub fn cells_at(&self, position: Offset) -> impl Iterator<Item = Offset> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| (position.0 + dx, position.1 + dy))
    }

    /// Board coordinates covered by the piece at its current position
    pub fn absolute_cells(&self) -> impl Iterator<Item = Offset> + '_ {
        self.cells_at(self.position)
    }

    pub fn live_cells(&self) -> u8 {
        self.live_cells
    }

    pub fn is_depleted(&self) -> bool {
        self.live_cells == 0
    }

    /// Translate the piece if the destination is valid
    pub fn try_move(&mut self, board: &Board, translation: Offset) -> bool {
        if self.frozen {
            return false;
        }
        let candidate = (
            self.position.0 + translation.0,
            self.position.1 + translation.1,
        );
        if board.is_position_valid(self, candidate) {
            self.position = candidate;
            true
        } else {
            false
        }
    }

    /// Drop until blocked, then freeze. Returns the number of rows travelled.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let mut rows = 0;
        while self.try_move(board, DOWN) {
            rows += 1;
        }
        self.frozen = true;
        rows
    }

    /// Whether the piece could still move one row down
    pub fn can_fall(&self, board: &Board) -> bool {
        let below = (self.position.0 + DOWN.0, self.position.1 + DOWN.1);
        board.is_position_valid(self, below)
    }

    /// Rotate 90° with wall-kick fallback
    ///
    /// Returns the translation that made the rotation fit (`(0, 0)` when it
    /// fit in place) or `None` when every kick failed, in which case cells and
    /// position are exactly as before the call.
    pub fn rotate(&mut self, board: &Board, spin: Spin) -> Option<Offset> {
        if self.frozen {
            return None;
        }

        let original = self.cells.clone();
        self.apply_rotation(spin);

        if board.is_position_valid(self, self.position) {
            return Some((0, 0));
        }

        for kick in wall_kicks(self.variant) {
            if self.try_move(board, kick) {
                return Some(kick);
            }
        }

        self.cells = original;
        None
    }

    /// Rotate every local offset by 90° in `spin` direction
    fn apply_rotation(&mut self, spin: Spin) {
        // cos(±90°) = 0, sin(±90°) = ±1
        let sin = spin.sign() as f32;
        let half_offset = self.rotation_class == RotationClass::HalfOffset;

        for cell in self.cells.iter_mut() {
            let (mut x, mut y) = (cell.0 as f32, cell.1 as f32);
            if half_offset {
                x -= 0.5;
                y -= 0.5;
            }

            let rx = -y * sin;
            let ry = x * sin;

            *cell = if half_offset {
                (rx.ceil() as i32, ry.ceil() as i32)
            } else {
                (rx.round() as i32, ry.round() as i32)
            };
        }
    }

    /// Decrement the live-cell count; returns true when nothing is left
    fn release_cell(&mut self) -> bool {
        self.live_cells = self.live_cells.saturating_sub(1);
        self.live_cells == 0
    }
}

/// Ordered wall-kick translations tried after a blocked rotation
pub fn wall_kicks(variant: Variant) -> ArrayVec<Offset, MAX_KICKS> {
    let mut kicks = ArrayVec::new();
    kicks.push(LEFT);
    kicks.push(RIGHT);
    kicks.push(DOWN);
    kicks.push((-1, -1));
    kicks.push((1, -1));
    if variant == Variant::I {
        kicks.push((-2, 0));
        kicks.push((2, 0));
    }
    kicks
}

/// Owner of frozen pieces until their last cell is cleared
#[derive(Debug, Clone, Default)]
pub struct PieceStore {
    pieces: FxHashMap<PieceId, Piece>,
    next_id: u32,
}

impl PieceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh id. Ids are never reused by the same store.
    pub fn allocate_id(&mut self) -> PieceId {
        self.next_id = self.next_id.wrapping_add(1);
        PieceId(self.next_id)
    }

    /// Take ownership of a frozen piece
    pub fn absorb(&mut self, piece: Piece) {
        debug_assert!(piece.frozen, "only frozen pieces are absorbed");
        if piece.is_depleted() {
            return;
        }
        self.pieces.insert(piece.id, piece);
    }

    /// Account for one of the piece's cells being cleared.
    ///
    /// Returns true when that was the last cell and the piece was dropped.
    pub fn release_cell(&mut self, id: PieceId) -> bool {
        let Some(piece) = self.pieces.get_mut(&id) else {
            return false;
        };
        if piece.release_cell() {
            self.pieces.remove(&id);
            return true;
        }
        false
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.pieces.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Drop every stored piece
    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}
