//! Configuration errors
//!
//! Gameplay never fails with an error: blocked moves return `false`, a full
//! spawn point or an exhausted sequence ends the game. Only a malformed
//! configuration is rejected, before the session accepts any tick.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveDimension { width: i32, height: i32 },

    #[error("board of {width}x{height} cells is too large")]
    BoardTooLarge { width: i32, height: i32 },

    #[error("spawn position ({x}, {y}) lies outside the board")]
    SpawnOutOfBounds { x: i32, y: i32 },

    #[error("drop interval must be a positive number of seconds, got {0}")]
    InvalidDropInterval(f32),

    #[error("fixed-sequence mode needs at least one variant")]
    EmptySequence,

    #[error("a pre-baked layout requires fixed-sequence mode")]
    LayoutWithoutSequence,

    #[error("fixture ({x}, {y}) lies outside the board")]
    FixtureOutOfBounds { x: i32, y: i32 },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
