//! Core types module - shared data structures and constants
//!
//! This module defines the plain data shared between the engine and whatever
//! presentation layer drives it. Nothing here carries behaviour beyond parsing
//! and small conversions.
//!
//! # Coordinates
//!
//! The board is centred on the origin with y pointing **up**:
//!
//! - A 10x20 board spans columns `-5..5` and rows `-10..10`
//! - "Down" is `(0, -1)`
//! - The default spawn position is `(-1, 8)`, two rows below the top edge
//!
//! # Timing
//!
//! Gravity is driven by `Session::tick(dt)` with `dt` in seconds. One row is
//! dropped each time the accumulated time reaches the drop interval
//! (`DEFAULT_DROP_INTERVAL_SECS`, 0.5s unless configured).
//!
//! # Scoring
//!
//! | Lines | Points |
//! |-------|--------|
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 500 |
//! | 4 | 800 |
//! | 5 (bonus) | 4269 |
//!
//! # Examples
//!
//! ```
//! use tilefall_types::{Command, Variant, BAG_SIZE};
//!
//! assert_eq!(Variant::from_str("t"), Some(Variant::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(Variant::ALL.len(), BAG_SIZE);
//! ```

use serde::{Deserialize, Serialize};

/// Integer `(x, y)` pair used for cell offsets, positions and translations.
pub type Offset = (i32, i32);

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: i32 = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: i32 = 20;

/// Default spawn origin for new pieces
pub const DEFAULT_SPAWN: Offset = (-1, 8);

/// Default gravity interval (seconds per row)
pub const DEFAULT_DROP_INTERVAL_SECS: f32 = 0.5;

/// Number of distinct variants in one shuffled bag
pub const BAG_SIZE: usize = 8;

/// Largest cell count of any catalog shape (the five-cell `C`)
pub const MAX_PIECE_CELLS: usize = 5;

/// Points for clearing N lines in one resolution pass (index = N)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Line count reserved for the fixed-sequence completion bonus
pub const BONUS_LINES: u32 = 5;

/// Points awarded for the completion bonus
pub const BONUS_SCORE: u32 = 4269;

pub const LEFT: Offset = (-1, 0);
pub const RIGHT: Offset = (1, 0);
pub const DOWN: Offset = (0, -1);

/// Piece shape identifier
///
/// The seven canonical tetrominoes plus `C`, a five-cell custom shape that
/// doubles as the bonus piece of fixed-sequence mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
    C,
}

impl Variant {
    /// Every variant in catalog order; also the contents of a fresh bag.
    pub const ALL: [Variant; BAG_SIZE] = [
        Variant::I,
        Variant::O,
        Variant::T,
        Variant::J,
        Variant::L,
        Variant::S,
        Variant::Z,
        Variant::C,
    ];

    /// Shape that triggers the fixed-sequence completion bonus
    pub const BONUS: Variant = Variant::C;

    /// Parse variant from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::Variant;
    ///
    /// assert_eq!(Variant::from_str("I"), Some(Variant::I));
    /// assert_eq!(Variant::from_str("c"), Some(Variant::C));
    /// assert_eq!(Variant::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(Variant::I),
            "o" => Some(Variant::O),
            "t" => Some(Variant::T),
            "j" => Some(Variant::J),
            "l" => Some(Variant::L),
            "s" => Some(Variant::S),
            "z" => Some(Variant::Z),
            "c" => Some(Variant::C),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::I => "i",
            Variant::O => "o",
            Variant::T => "t",
            Variant::J => "j",
            Variant::L => "l",
            Variant::S => "s",
            Variant::Z => "z",
            Variant::C => "c",
        }
    }

    /// Position in [`Variant::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Visual tile identifier handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u8);

/// Rotation direction
///
/// Counter-clockwise is the positive angle (+90°), clockwise the negative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

impl Spin {
    /// Sign of the rotation angle: `-1` for clockwise, `+1` otherwise
    pub fn sign(&self) -> i32 {
        match self {
            Spin::Clockwise => -1,
            Spin::CounterClockwise => 1,
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Spin::Clockwise => Spin::CounterClockwise,
            Spin::CounterClockwise => Spin::Clockwise,
        }
    }
}

/// Discrete commands accepted by a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; never locks on its own
    SoftDrop,
    /// Drop to the lowest valid position and lock immediately
    HardDrop,
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
}

impl Command {
    /// Parse command from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECCW"), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
        }
    }
}
