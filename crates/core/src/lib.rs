//! Core game logic module - deterministic falling-block puzzle engine
//!
//! This crate contains the rules, the board and the session state machine.
//! It has no UI, networking or I/O of its own: a presentation layer calls
//! [`Session::tick`] every frame, forwards player [`Command`](types::Command)s
//! to [`Session::handle_command`] and renders a [`SessionSnapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: origin-centred grid with piece ownership and line resolution
//! - [`pieces`]: static shape catalog for the eight variants
//! - [`piece`]: active piece movement, rotation, wall kicks and the piece store
//! - [`supply`]: plain random, shuffled bag and fixed-sequence generators
//! - [`scoring`]: line-clear table and the sequence completion bonus
//! - [`session`]: lifecycle, gravity timer, command dispatch and events
//! - [`config`]: session options, JSON loading and validation
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use tilefall_core::{Session, SessionConfig, SupplyMode};
//! use tilefall_core::types::{Command, Variant};
//!
//! let config = SessionConfig::default()
//!     .with_supply(SupplyMode::FixedSequence(vec![Variant::I, Variant::O]));
//! let mut session = Session::new(config).unwrap();
//! session.start();
//!
//! session.handle_command(Command::MoveRight);
//! session.handle_command(Command::HardDrop);
//!
//! assert_eq!(session.active().map(|p| p.variant), Some(Variant::O));
//! assert_eq!(session.score(), 0);
//! ```
//!
//! # Determinism
//!
//! Randomness comes from a seeded `StdRng` (see [`SessionConfig::seed`]), so
//! the same configuration and input sequence always produce the same game.

pub mod board;
pub mod config;
pub mod error;
pub mod piece;
pub mod pieces;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod supply;

pub use tilefall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Occupant};
pub use config::{Fixture, SessionConfig, MAX_BOARD_CELLS};
pub use error::ConfigError;
pub use piece::{wall_kicks, Piece, PieceId, PieceStore};
pub use pieces::{get_shape, tile_for};
pub use scoring::{lock_score, score_for_lines};
pub use session::{Session, SessionEvent, MAX_PENDING_EVENTS};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
pub use supply::{Draw, PieceSupply, SupplyMode};
