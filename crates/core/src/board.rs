//! Board module - manages the game grid
//!
//! The board is a `width x height` grid centred on the origin, y pointing up.
//! Bounds are `[left, right) x [bottom, top)`; a 10x20 board spans columns
//! `-5..5` and rows `-10..10`.
//!
//! Cells are stored in a flat row-major vector, row 0 being the bottom row.
//! Each occupied cell remembers the piece that placed it (a [`PieceId`]
//! handle, not a reference) so line clears can tell the [`PieceStore`] which
//! pieces lost cells. Cells without an owner are fixtures: pre-baked tiles or
//! tiles that outlived their piece bookkeeping.

use crate::piece::{Piece, PieceId, PieceStore};
use crate::types::TileId;

/// Content of an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub owner: Option<PieceId>,
    pub tile: TileId,
}

pub type Cell = Option<Occupant>;

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    left: i32,
    bottom: i32,
    /// Row-major cells, `(y - bottom) * width + (x - left)`
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            left: -(width / 2),
            bottom: -(height / 2),
            cells: vec![None; (width * height) as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let col = (x - self.left) as usize;
        let row = (y - self.bottom) as usize;
        Some(row * self.width as usize + col)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Exclusive top edge
    pub fn top(&self) -> i32 {
        self.bottom + self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.bottom && y < self.top()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<TileId> {
        self.get(x, y).flatten().map(|occ| occ.tile)
    }

    pub fn owner_at(&self, x: i32, y: i32) -> Option<PieceId> {
        self.get(x, y).flatten().and_then(|occ| occ.owner)
    }

    /// Place an ownerless tile
    pub fn place_fixture(&mut self, x: i32, y: i32, tile: TileId) -> bool {
        self.set(x, y, Some(Occupant { owner: None, tile }))
    }

    /// Check whether `piece` fits with its origin at `candidate`
    ///
    /// Cells owned by the piece itself do not block it.
    pub fn is_position_valid(&self, piece: &Piece, candidate: (i32, i32)) -> bool {
        piece.cells_at(candidate).all(|(x, y)| match self.get(x, y) {
            None => false,
            Some(None) => true,
            Some(Some(occ)) => occ.owner == Some(piece.id),
        })
    }

    /// Write the piece's current footprint
    pub fn commit(&mut self, piece: &Piece) {
        let occupant = Occupant {
            owner: Some(piece.id),
            tile: piece.tile,
        };
        for (x, y) in piece.absolute_cells() {
            self.set(x, y, Some(occupant));
        }
    }

    /// Erase the piece's current footprint
    ///
    /// Only cells still owned by this piece are touched.
    pub fn clear(&mut self, piece: &Piece) {
        for (x, y) in piece.absolute_cells() {
            if self.owner_at(x, y) == Some(piece.id) {
                self.set(x, y, None);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Erase a row, telling the store about every piece cell removed
    pub fn clear_row(&mut self, y: i32, store: &mut PieceStore) {
        let Some(start) = self.index(self.left, y) else {
            return;
        };
        let end = start + self.width as usize;
        for cell in &mut self.cells[start..end] {
            if let Some(Occupant { owner: Some(id), .. }) = cell.take() {
                store.release_cell(id);
            }
        }
    }

    /// Move every row above `from_row` down by one, emptying the top row
    pub fn shift_rows_down(&mut self, from_row: i32) {
        if from_row < self.bottom || from_row >= self.top() {
            return;
        }
        let width = self.width as usize;
        let dst_start = (from_row - self.bottom) as usize * width;
        let src_start = dst_start + width;

        // copy_within handles the overlap
        self.cells.copy_within(src_start.., dst_start);

        let top_start = self.cells.len() - width;
        for cell in &mut self.cells[top_start..] {
            *cell = None;
        }
    }

    /// Clear every full row and compact the stack
    ///
    /// Scans bottom to top; a cleared row is immediately filled by the row
    /// above it, so the same index is checked again before moving on.
    /// Returns the number of rows cleared.
    pub fn evaluate_and_resolve_lines(&mut self, store: &mut PieceStore) -> u32 {
        let mut cleared = 0;
        let mut y = self.bottom;
        while y < self.top() {
            if self.is_row_full(y) {
                self.clear_row(y, store);
                self.shift_rows_down(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Forget piece ownership but keep every tile
    pub fn orphan_all(&mut self) {
        for occ in self.cells.iter_mut().flatten() {
            occ.owner = None;
        }
    }

    /// Clear the entire board
    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        let start = self.index(self.left, y)?;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// All cells, bottom row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Variant, DOWN};

    fn fill_row(board: &mut Board, y: i32, tile: u8) {
        for x in board.left()..board.right() {
            board.place_fixture(x, y, TileId(tile));
        }
    }

    #[test]
    fn test_board_bounds() {
        let board = Board::new(10, 20);
        assert_eq!(board.left(), -5);
        assert_eq!(board.right(), 5);
        assert_eq!(board.bottom(), -10);
        assert_eq!(board.top(), 10);
        assert!(board.in_bounds(-5, -10));
        assert!(board.in_bounds(4, 9));
        assert!(!board.in_bounds(5, 0));
        assert!(!board.in_bounds(0, 10));
    }

    #[test]
    fn test_odd_dimensions_keep_full_width() {
        let board = Board::new(7, 5);
        assert_eq!(board.right() - board.left(), 7);
        assert_eq!(board.top() - board.bottom(), 5);
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(-5, -10), Some(0));
        assert_eq!(board.index(4, -10), Some(9));
        assert_eq!(board.index(-5, -9), Some(10));
        assert_eq!(board.index(4, 9), Some(199));
        assert_eq!(board.index(-6, 0), None);
        assert_eq!(board.index(0, 10), None);
    }

    #[test]
    fn test_commit_and_clear_footprint() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(PieceId(3), Variant::T, (0, 0));

        board.commit(&piece);
        assert_eq!(board.occupied_count(), 4);
        assert_eq!(board.owner_at(0, 1), Some(PieceId(3)));
        assert_eq!(board.tile_at(-1, 0), Some(piece.tile));

        board.clear(&piece);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_clear_leaves_other_owners() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(PieceId(3), Variant::O, (0, 0));
        board.commit(&piece);
        board.place_fixture(0, 0, TileId(7));

        board.clear(&piece);
        assert_eq!(board.tile_at(0, 0), Some(TileId(7)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_own_cells_do_not_block() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(PieceId(1), Variant::I, (0, 0));
        board.commit(&piece);
        assert!(board.is_position_valid(&piece, (1, 0)));

        let other = Piece::new(PieceId(2), Variant::I, (0, 0));
        assert!(!board.is_position_valid(&other, (1, 0)));
        assert!(board.is_position_valid(&other, (0, 5)));
    }

    #[test]
    fn test_position_out_of_bounds_invalid() {
        let board = Board::new(10, 20);
        let piece = Piece::new(PieceId(1), Variant::O, (0, 0));
        assert!(!board.is_position_valid(&piece, (4, 0)));
        assert!(!board.is_position_valid(&piece, (-6, 0)));
        assert!(!board.is_position_valid(&piece, (0, 9)));
        assert!(!board.is_position_valid(&piece, (0, -11)));
        assert!(board.is_position_valid(&piece, (3, 8)));
    }

    #[test]
    fn test_is_row_full() {
        let mut board = Board::new(4, 4);
        assert!(!board.is_row_full(-2));
        fill_row(&mut board, -2, 1);
        assert!(board.is_row_full(-2));
        board.set(1, -2, None);
        assert!(!board.is_row_full(-2));
        assert!(!board.is_row_full(100));
    }

    #[test]
    fn test_clear_row_releases_piece_cells() {
        let mut board = Board::new(4, 4);
        let mut store = PieceStore::new();
        let id = store.allocate_id();
        // I lies flat on row 1 relative to origin: place origin at (-1, -3)
        let mut piece = Piece::new(id, Variant::I, (-1, -3));
        board.commit(&piece);
        piece.frozen = true;
        store.absorb(piece);

        assert!(board.is_row_full(-2));
        board.clear_row(-2, &mut store);
        assert_eq!(board.occupied_count(), 0);
        assert!(!store.contains(id));
    }

    #[test]
    fn test_shift_rows_down() {
        let mut board = Board::new(4, 4);
        board.place_fixture(0, -1, TileId(1));
        board.place_fixture(1, 1, TileId(2));
        board.place_fixture(-2, -2, TileId(3));

        board.shift_rows_down(-2);
        assert_eq!(board.tile_at(0, -2), Some(TileId(1)));
        assert_eq!(board.tile_at(1, 0), Some(TileId(2)));
        assert_eq!(board.tile_at(1, 1), None);
        // Row -2 itself is overwritten by the row above
        assert_eq!(board.tile_at(-2, -2), None);
        assert!(board.row(1).unwrap().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_resolve_single_line() {
        let mut board = Board::new(4, 4);
        let mut store = PieceStore::new();
        fill_row(&mut board, -1, 1);
        board.place_fixture(0, -2, TileId(5));
        board.place_fixture(1, 0, TileId(6));
        board.place_fixture(-2, 1, TileId(7));

        assert_eq!(board.evaluate_and_resolve_lines(&mut store), 1);
        assert_eq!(board.tile_at(0, -2), Some(TileId(5)));
        assert_eq!(board.tile_at(1, -1), Some(TileId(6)));
        assert_eq!(board.tile_at(-2, 0), Some(TileId(7)));
        assert_eq!(board.occupied_count(), 3);
    }

    #[test]
    fn test_resolve_non_adjacent_lines() {
        let mut board = Board::new(4, 6);
        let mut store = PieceStore::new();
        // rows -3..3
        fill_row(&mut board, -3, 1);
        board.place_fixture(0, -2, TileId(2));
        fill_row(&mut board, -1, 1);
        board.place_fixture(1, 0, TileId(3));

        assert_eq!(board.evaluate_and_resolve_lines(&mut store), 2);
        assert_eq!(board.tile_at(0, -3), Some(TileId(2)));
        assert_eq!(board.tile_at(1, -2), Some(TileId(3)));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_resolve_four_stacked_lines() {
        let mut board = Board::new(4, 6);
        let mut store = PieceStore::new();
        for y in -3..1 {
            fill_row(&mut board, y, 1);
        }
        board.place_fixture(0, 1, TileId(9));
        assert_eq!(board.evaluate_and_resolve_lines(&mut store), 4);
        assert_eq!(board.tile_at(0, -3), Some(TileId(9)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_orphan_all_keeps_tiles() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(PieceId(4), Variant::S, (0, 0));
        board.commit(&piece);
        board.orphan_all();
        assert_eq!(board.occupied_count(), 4);
        assert!(piece.absolute_cells().all(|(x, y)| board.owner_at(x, y).is_none()));
    }

    #[test]
    fn test_falling_onto_stack() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, -10, 1);
        let mut piece = Piece::new(PieceId(1), Variant::O, (0, 0));
        while piece.try_move(&board, DOWN) {}
        assert_eq!(piece.position, (0, -9));
    }
}
