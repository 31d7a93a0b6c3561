//! Session module - the frame-driven game state machine
//!
//! A session owns the field, the active and queued pieces, the score and the
//! pause flag. The external loop feeds it discrete [`Command`]s and a per-frame
//! elapsed time, and reads a [`Snapshot`] back for rendering.
//!
//! The piece lifecycle is modelled by [`Phase`]:
//!
//! - `Falling`: an active piece is under gravity and player control.
//! - `Clearing`: full rows were detected after a placement; they stay on the
//!   field for a fixed number of ticks, gravity is suspended and there is no
//!   active piece. When the countdown ends the rows are removed and the next
//!   piece spawns.
//! - `GameOver`: a freshly promoted piece did not fit at its spawn position.
//!   Only a restart leaves this phase.
//!
//! `paused` is orthogonal to the phase and freezes both gravity and the clear
//! countdown.

use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::field::Field;
use crate::piece::Piece;
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::line_clear_score;
use crate::snapshot::{ClearingSnapshot, Snapshot};
use crate::types::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Falling { active: Piece },
    Clearing { rows: Vec<usize>, remaining: u32 },
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Session<S = UniformSource> {
    config: GameConfig,
    field: Field,
    phase: Phase,
    next: Piece,
    source: S,
    score: u32,
    /// Time since the last gravity step. Keeps running across placements and
    /// the clear animation.
    fall_timer_ms: u32,
    paused: bool,
}

impl Session<UniformSource> {
    /// Canonical 10x20 session with a seeded uniform piece source.
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), UniformSource::new(seed))
    }
}

impl Default for Session<UniformSource> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> Session<S> {
    /// Session with a custom configuration and piece source.
    pub fn try_new(config: GameConfig, source: S) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected game configuration");
            return Err(err);
        }
        Ok(Self::build(config, source))
    }

    fn build(config: GameConfig, mut source: S) -> Self {
        let field = Field::new(config.width, config.height);
        let (phase, next) = Self::deal(&field, &mut source);
        Self {
            config,
            field,
            phase,
            next,
            source,
            score: 0,
            fall_timer_ms: 0,
            paused: false,
        }
    }

    /// Draw the first active piece and the queued one.
    fn deal(field: &Field, source: &mut S) -> (Phase, Piece) {
        let active = Piece::spawn(source.next_kind(), field.width());
        let next = Piece::spawn(source.next_kind(), field.width());
        let phase = if active.is_valid(field) {
            Phase::Falling { active }
        } else {
            Phase::GameOver
        };
        (phase, next)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn active(&self) -> Option<Piece> {
        match self.phase {
            Phase::Falling { active } => Some(active),
            _ => None,
        }
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Discard the field, pieces and score and deal a new game.
    ///
    /// The piece source is kept, so its sequence continues. The pause flag is
    /// left as it is: restarting while paused yields a paused new game.
    pub fn restart(&mut self) {
        self.field = Field::new(self.config.width, self.config.height);
        let (phase, next) = Self::deal(&self.field, &mut self.source);
        self.phase = phase;
        self.next = next;
        self.score = 0;
        self.fall_timer_ms = 0;
        info!(paused = self.paused, "session restarted");
    }

    /// Apply one input command. Returns whether anything changed.
    ///
    /// `TogglePause` is accepted in every state, including game over.
    /// `Restart` only acts once the game is over. Piece commands are ignored
    /// while paused, while rows are clearing and after game over.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
                true
            }
            Command::Restart => {
                if self.game_over() {
                    self.restart();
                    true
                } else {
                    false
                }
            }
            command if self.paused && command.moves_piece() => false,
            Command::MoveLeft => self.update_active(|piece, field| piece.try_move(-1, 0, field)),
            Command::MoveRight => self.update_active(|piece, field| piece.try_move(1, 0, field)),
            Command::SoftDrop => self.update_active(|piece, field| piece.try_move(0, 1, field)),
            Command::Rotate => self.update_active(|piece, field| piece.try_rotate(field)),
            Command::HardDrop => self.hard_drop(),
        }
    }

    fn update_active(&mut self, step: impl FnOnce(&Piece, &Field) -> Option<Piece>) -> bool {
        let Phase::Falling { active } = &mut self.phase else {
            return false;
        };
        match step(&*active, &self.field) {
            Some(piece) => {
                *active = piece;
                true
            }
            None => false,
        }
    }

    fn hard_drop(&mut self) -> bool {
        let Phase::Falling { active } = self.phase else {
            return false;
        };
        let landed = active.hard_drop(&self.field);
        self.place(landed);
        true
    }

    /// Advance time by one frame. Returns whether a gravity or clear step ran.
    ///
    /// Elapsed time accumulates whenever the session is neither paused nor
    /// over, and the active piece falls one row once the time since the last
    /// gravity step exceeds the fall interval. While rows are clearing each
    /// call counts down one animation tick, whatever `elapsed_ms` is; time
    /// spent there still counts toward the next fall.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused {
            return false;
        }
        match self.phase {
            Phase::GameOver => false,
            Phase::Clearing { .. } => {
                self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
                self.advance_clear();
                true
            }
            Phase::Falling { .. } => {
                self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
                if self.fall_timer_ms <= self.config.fall_interval_ms {
                    return false;
                }
                self.fall_timer_ms = 0;
                self.gravity_step();
                true
            }
        }
    }

    fn advance_clear(&mut self) {
        let Phase::Clearing { rows, remaining } = &mut self.phase else {
            return;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return;
        }
        let rows = std::mem::take(rows);
        self.field.remove_rows(&rows);
        debug!(?rows, "rows removed");
        self.spawn_next();
    }

    fn gravity_step(&mut self) {
        let Phase::Falling { active } = self.phase else {
            return;
        };
        match active.try_move(0, 1, &self.field) {
            Some(lower) => self.phase = Phase::Falling { active: lower },
            None => self.place(active),
        }
    }

    /// Commit a landed piece, score any full rows and move on.
    fn place(&mut self, piece: Piece) {
        self.field
            .commit(&piece.shape, piece.x, piece.y, piece.color());
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "piece placed");

        let rows = self.field.full_rows();
        if rows.is_empty() {
            self.spawn_next();
            return;
        }

        let gained = line_clear_score(rows.len(), self.config.line_score);
        self.score = self.score.saturating_add(gained);
        debug!(?rows, gained, score = self.score, "full rows detected");
        self.phase = Phase::Clearing {
            rows,
            remaining: self.config.clear_ticks,
        };
    }

    /// Promote the queued piece and draw a new one.
    fn spawn_next(&mut self) {
        let fresh = Piece::spawn(self.source.next_kind(), self.field.width());
        let active = std::mem::replace(&mut self.next, fresh);

        if active.is_valid(&self.field) {
            debug!(kind = active.kind.as_str(), "piece spawned");
            self.phase = Phase::Falling { active };
        } else {
            info!(score = self.score, kind = active.kind.as_str(), "game over: spawn blocked");
            self.phase = Phase::GameOver;
        }
    }

    /// Refill `out` with the current state, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.width = self.field.width();
        out.height = self.field.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.field.cells());
        out.active = self.active();
        out.next = self.next;
        out.score = self.score;
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.clearing = match &self.phase {
            Phase::Clearing { rows, remaining } => Some(ClearingSnapshot {
                rows: rows.clone(),
                progress: *remaining as f32 / self.config.clear_ticks as f32,
            }),
            _ => None,
        };
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut out = Snapshot {
            width: 0,
            height: 0,
            cells: Vec::with_capacity(self.field.cells().len()),
            active: None,
            next: self.next,
            score: 0,
            paused: false,
            game_over: false,
            clearing: None,
        };
        self.snapshot_into(&mut out);
        out
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.phase = Phase::Falling { active: piece };
    }
}
