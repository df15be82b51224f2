//! Session configuration
//!
//! Every option has a default matching the stock game: a 10x20 board,
//! spawn at (-1, 8), one row of gravity every half second, shuffled bag.
//!
//! ```
//! use tilefall_core::{SessionConfig, SupplyMode};
//!
//! let config = SessionConfig::from_json_str(
//!     r#"{ "width": 8, "supply": { "mode": "plain-random" }, "seed": 7 }"#,
//! )
//! .unwrap();
//! assert_eq!(config.width, 8);
//! assert_eq!(config.height, 20);
//! assert_eq!(config.supply, SupplyMode::PlainRandom);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::supply::SupplyMode;
use crate::types::{
    Offset, TileId, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_DROP_INTERVAL_SECS,
    DEFAULT_SPAWN,
};

/// Upper bound on `width * height`
pub const MAX_BOARD_CELLS: i32 = 1 << 20;

/// A pre-baked tile of a fixed-sequence puzzle board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub x: i32,
    pub y: i32,
    pub tile: TileId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: i32,
    pub height: i32,
    pub spawn: Offset,
    pub drop_interval_secs: f32,
    pub supply: SupplyMode,
    pub seed: u64,
    /// Tiles present before the first piece spawns (fixed-sequence only)
    pub layout: Vec<Fixture>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            spawn: DEFAULT_SPAWN,
            drop_interval_secs: DEFAULT_DROP_INTERVAL_SECS,
            supply: SupplyMode::default(),
            seed: 0,
            layout: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Parse from JSON and validate
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_board(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_spawn(mut self, spawn: Offset) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_drop_interval(mut self, secs: f32) -> Self {
        self.drop_interval_secs = secs;
        self
    }

    pub fn with_supply(mut self, supply: SupplyMode) -> Self {
        self.supply = supply;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_layout(mut self, layout: Vec<Fixture>) -> Self {
        self.layout = layout;
        self
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::NonPositiveDimension {
                width: self.width,
                height: self.height,
            });
        }

        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_BOARD_CELLS => {}
            _ => {
                return Err(ConfigError::BoardTooLarge {
                    width: self.width,
                    height: self.height,
                })
            }
        }

        if !(self.drop_interval_secs.is_finite() && self.drop_interval_secs > 0.0) {
            return Err(ConfigError::InvalidDropInterval(self.drop_interval_secs));
        }

        match &self.supply {
            SupplyMode::FixedSequence(seq) if seq.is_empty() => {
                return Err(ConfigError::EmptySequence);
            }
            SupplyMode::FixedSequence(_) => {}
            _ if !self.layout.is_empty() => return Err(ConfigError::LayoutWithoutSequence),
            _ => {}
        }

        let (x, y) = self.spawn;
        if !self.in_bounds(x, y) {
            return Err(ConfigError::SpawnOutOfBounds { x, y });
        }
        if let Some(f) = self.layout.iter().find(|f| !self.in_bounds(f.x, f.y)) {
            return Err(ConfigError::FixtureOutOfBounds { x: f.x, y: f.y });
        }

        Ok(())
    }

    /// Same edges as `Board::new` would give these dimensions
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        let left = -(self.width / 2);
        let bottom = -(self.height / 2);
        x >= left && x < left + self.width && y >= bottom && y < bottom + self.height
    }
}
