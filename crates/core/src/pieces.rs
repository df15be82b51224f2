//! Pieces module - shape catalog
//!
//! Static cell offsets for every [`Variant`], relative to the piece origin
//! with y pointing up. The catalog is never mutated; active pieces take a deep
//! copy of their shape and rotate that copy.

use crate::types::{Offset, TileId, Variant};

/// How a shape's cells are rounded back onto the grid after rotating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationClass {
    /// Pivot on the origin, round to nearest
    Centered,
    /// Pivot on (0.5, 0.5), round with ceiling (I and O)
    HalfOffset,
}

/// Static data for one catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeData {
    pub variant: Variant,
    pub cells: &'static [Offset],
    pub tile: TileId,
    pub rotation: RotationClass,
}

const I_CELLS: [Offset; 4] = [(-1, 1), (0, 1), (1, 1), (2, 1)];
const O_CELLS: [Offset; 4] = [(0, 1), (1, 1), (0, 0), (1, 0)];
const T_CELLS: [Offset; 4] = [(0, 1), (-1, 0), (0, 0), (1, 0)];
const J_CELLS: [Offset; 4] = [(-1, 1), (-1, 0), (0, 0), (1, 0)];
const L_CELLS: [Offset; 4] = [(1, 1), (-1, 0), (0, 0), (1, 0)];
const S_CELLS: [Offset; 4] = [(0, 1), (1, 1), (-1, 0), (0, 0)];
const Z_CELLS: [Offset; 4] = [(-1, 1), (0, 1), (0, 0), (1, 0)];
// Five cells: the bonus "C" opens to the top.
const C_CELLS: [Offset; 5] = [(-1, 1), (1, 1), (-1, 0), (0, 0), (1, 0)];

/// Look up the catalog entry for a variant
pub fn shape_data(variant: Variant) -> ShapeData {
    let (cells, rotation): (&'static [Offset], RotationClass) = match variant {
        Variant::I => (&I_CELLS, RotationClass::HalfOffset),
        Variant::O => (&O_CELLS, RotationClass::HalfOffset),
        Variant::T => (&T_CELLS, RotationClass::Centered),
        Variant::J => (&J_CELLS, RotationClass::Centered),
        Variant::L => (&L_CELLS, RotationClass::Centered),
        Variant::S => (&S_CELLS, RotationClass::Centered),
        Variant::Z => (&Z_CELLS, RotationClass::Centered),
        Variant::C => (&C_CELLS, RotationClass::Centered),
    };
    ShapeData {
        variant,
        cells,
        tile: tile_for(variant),
        rotation,
    }
}

/// Cell offsets of a variant in spawn orientation
pub fn get_shape(variant: Variant) -> &'static [Offset] {
    shape_data(variant).cells
}

/// Tile id used when rendering cells of this variant
pub fn tile_for(variant: Variant) -> TileId {
    TileId(variant.index() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_PIECE_CELLS;

    #[test]
    fn test_tetromino_cell_counts() {
        for v in Variant::ALL {
            let expected = if v == Variant::C { 5 } else { 4 };
            assert_eq!(get_shape(v).len(), expected, "{:?}", v);
            assert!(get_shape(v).len() <= MAX_PIECE_CELLS);
        }
    }

    #[test]
    fn test_cells_are_distinct() {
        for v in Variant::ALL {
            let cells = get_shape(v);
            for (i, a) in cells.iter().enumerate() {
                assert!(!cells[i + 1..].contains(a), "{:?} repeats {:?}", v, a);
            }
        }
    }

    #[test]
    fn test_rotation_classes() {
        assert_eq!(shape_data(Variant::I).rotation, RotationClass::HalfOffset);
        assert_eq!(shape_data(Variant::O).rotation, RotationClass::HalfOffset);
        assert_eq!(shape_data(Variant::T).rotation, RotationClass::Centered);
        assert_eq!(shape_data(Variant::C).rotation, RotationClass::Centered);
    }

    #[test]
    fn test_tiles_unique_per_variant() {
        let tiles: Vec<TileId> = Variant::ALL.iter().map(|&v| tile_for(v)).collect();
        for (i, t) in tiles.iter().enumerate() {
            assert!(!tiles[i + 1..].contains(t));
        }
    }
}
