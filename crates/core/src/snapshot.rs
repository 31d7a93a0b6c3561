use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::Cell;

/// Rows detected as full but not yet removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearingSnapshot {
    pub rows: Vec<usize>,
    /// remaining / total animation ticks, in (0, 1]
    pub progress: f32,
}

/// Read-only view of a session for one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major settled cells
    pub cells: Vec<Cell>,
    /// Falling piece; absent while rows clear and after game over
    pub active: Option<Piece>,
    pub next: Piece,
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
    pub clearing: Option<ClearingSnapshot>,
}

impl Snapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.cells[y * self.width as usize + x]
    }

    pub fn is_clearing_row(&self, y: usize) -> bool {
        self.clearing
            .as_ref()
            .is_some_and(|clearing| clearing.rows.contains(&y))
    }

    /// Whether the session currently reacts to piece commands and time.
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
