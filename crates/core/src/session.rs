//! Session module - game lifecycle, gravity and command dispatch
//!
//! A [`Session`] owns the board, the piece store, the supply and the active
//! piece. It is driven from outside: `tick(dt)` once per frame for gravity and
//! `handle_command` for player input. Every call completes its state change
//! before returning, so the board is consistent between calls.
//!
//! Lifecycle: `new` (not started) → `start` → running → game over (top-out or
//! exhausted sequence) → `set_game_over(false)` → running again with score 0.
//!
//! Events queue up until [`Session::take_events`] drains them. A host that
//! never drains loses the oldest ones once [`MAX_PENDING_EVENTS`] are queued.

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::board::Board;
use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::piece::{Piece, PieceStore};
use crate::scoring::lock_score;
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::supply::{Draw, PieceSupply};
use crate::types::{Command, Offset, Spin, Variant, DOWN, LEFT, RIGHT};

/// Capacity of the undrained event queue
pub const MAX_PENDING_EVENTS: usize = 256;

/// Notifications for the presentation layer, drained with
/// [`Session::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PieceSpawned {
        variant: Variant,
    },
    PieceLocked {
        variant: Variant,
        lines_cleared: u32,
        score_delta: u32,
        bonus: bool,
    },
    ScoreChanged {
        score: u32,
    },
    GameOverChanged {
        game_over: bool,
    },
    /// The fixed sequence ran out of pieces
    SupplyExhausted,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    store: PieceStore,
    supply: PieceSupply,
    active: Option<Piece>,
    score: u32,
    game_over: bool,
    started: bool,
    drop_timer: f32,
    events: VecDeque<SessionEvent>,
}

impl Session {
    /// Build a session from a validated configuration
    ///
    /// The session is idle until [`start`](Self::start) is called.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut board = Board::new(config.width, config.height);
        for fixture in &config.layout {
            board.place_fixture(fixture.x, fixture.y, fixture.tile);
        }
        let supply = PieceSupply::new(&config.supply, config.seed);

        debug!(
            "session created: {}x{} board, {} supply, seed {}",
            config.width,
            config.height,
            config.supply.as_str(),
            config.seed
        );

        Ok(Self {
            config,
            board,
            store: PieceStore::new(),
            supply,
            active: None,
            score: 0,
            game_over: false,
            started: false,
            drop_timer: 0.0,
            events: VecDeque::new(),
        })
    }

    /// Begin the first game. Later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.set_game_over(false);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &PieceStore {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Variant the next spawn will use, if it can be known
    pub fn next_preview(&self) -> Option<Variant> {
        self.supply.peek()
    }

    /// Where the active piece would land if hard-dropped now
    pub fn ghost_position(&self) -> Option<Offset> {
        let mut ghost = self.active.clone()?;
        ghost.hard_drop(&self.board);
        Some(ghost.position)
    }

    /// Drain pending events, oldest first
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    /// Number of events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn emit(&mut self, event: SessionEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Advance gravity by `dt` seconds
    ///
    /// Returns true when a gravity step ran (the piece fell or locked).
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        self.drop_timer += dt;
        if self.drop_timer < self.config.drop_interval_secs {
            return false;
        }
        self.drop_timer = 0.0;

        self.board.clear(piece);
        let moved = piece.try_move(&self.board, DOWN);
        self.board.commit(piece);

        if !moved {
            piece.frozen = true;
            self.lock_active();
        }
        true
    }

    /// Apply one player command to the active piece
    ///
    /// Returns whether the command changed anything. Commands are ignored
    /// before start, after game over and while no piece is active.
    pub fn handle_command(&mut self, command: Command) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if piece.frozen {
            return false;
        }

        self.board.clear(piece);
        let changed = match command {
            Command::MoveLeft => piece.try_move(&self.board, LEFT),
            Command::MoveRight => piece.try_move(&self.board, RIGHT),
            Command::SoftDrop => piece.try_move(&self.board, DOWN),
            Command::HardDrop => {
                piece.hard_drop(&self.board);
                true
            }
            Command::RotateCw => piece.rotate(&self.board, Spin::Clockwise).is_some(),
            Command::RotateCcw => piece.rotate(&self.board, Spin::CounterClockwise).is_some(),
        };
        self.board.commit(piece);

        if piece.frozen {
            self.lock_active();
        }
        changed
    }

    /// Draw the next variant and place it at the spawn point
    ///
    /// Ends the game when the supply is exhausted or the spawn cells are
    /// blocked; in both cases nothing is placed and false is returned.
    pub fn spawn_piece(&mut self) -> bool {
        if let Some(mut previous) = self.active.take() {
            // Replaced pieces stay on the board as locked cells
            previous.frozen = true;
            self.store.absorb(previous);
        }

        let variant = match self.supply.next() {
            Draw::Piece(variant) => variant,
            Draw::Exhausted => {
                warn!("fixed sequence exhausted, ending game");
                self.emit(SessionEvent::SupplyExhausted);
                self.set_game_over(true);
                return false;
            }
        };

        let piece = Piece::new(self.store.allocate_id(), variant, self.config.spawn);
        if !self.board.is_position_valid(&piece, piece.position) {
            info!("spawn blocked for {:?} at {:?}, game over", variant, piece.position);
            self.set_game_over(true);
            return false;
        }

        self.board.commit(&piece);
        debug!("spawned {:?} as {:?}", variant, piece.id);
        self.emit(SessionEvent::PieceSpawned { variant });
        self.active = Some(piece);
        true
    }

    /// Add to the score (saturating)
    pub fn change_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
        self.emit(SessionEvent::ScoreChanged { score: self.score });
    }

    /// Enter or leave the game-over state
    ///
    /// Leaving it zeroes the score first, then resets the session. A session
    /// that was never started counts as over, so this also starts a game.
    pub fn set_game_over(&mut self, game_over: bool) {
        if !game_over {
            self.score = 0;
            self.change_score(0);
        }

        let fresh_game = !game_over && (self.game_over || !self.started);
        if self.game_over != game_over {
            info!("game over: {}", game_over);
        }
        self.game_over = game_over;
        self.emit(SessionEvent::GameOverChanged { game_over });

        if fresh_game {
            self.started = true;
            self.reset_session();
        }
    }

    /// Discard all pieces and spawn a fresh one
    ///
    /// Normally reached through `set_game_over(false)`. In fixed-sequence mode
    /// the board tiles are left in place (they become ownerless), everywhere
    /// else the board is emptied. The active piece is removed in both cases.
    pub fn reset_session(&mut self) {
        // The falling piece never becomes part of a kept layout
        if let Some(active) = self.active.take() {
            self.board.clear(&active);
        }
        self.store.clear();
        if self.supply.is_fixed_sequence() {
            self.board.orphan_all();
        } else {
            self.board.clear_all();
        }
        self.supply.reset();
        self.drop_timer = 0.0;
        info!("session reset ({} supply)", self.config.supply.as_str());

        self.spawn_piece();
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.left = self.board.left();
        out.bottom = self.board.bottom();
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells
            .extend(self.board.cells().iter().map(|c| c.map(|occ| occ.tile)));
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.ghost = self.ghost_position();
        out.next = self.next_preview();
        out.score = self.score;
        out.game_over = self.game_over;
        out.started = self.started;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Absorb the frozen active piece, resolve lines, score, spawn the next
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let variant = piece.variant;
        self.store.absorb(piece);

        let lines_cleared = self.board.evaluate_and_resolve_lines(&mut self.store);
        let bonus = self.supply.bonus_pending();
        let score_delta = lock_score(lines_cleared, bonus);
        debug!(
            "locked {:?}: {} lines, +{}{}",
            variant,
            lines_cleared,
            score_delta,
            if bonus { " (bonus)" } else { "" }
        );

        self.emit(SessionEvent::PieceLocked {
            variant,
            lines_cleared,
            score_delta,
            bonus,
        });
        self.change_score(score_delta);
        self.spawn_piece();
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
