//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond parsing and naming, so they
//! can be shared by the rule engine, the terminal view and any out-of-process
//! renderer that consumes snapshots as JSON.
//!
//! # Field Dimensions
//!
//! Canonical playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame interval used by the terminal runner (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Gravity interval (constant, no levels) |
//! | `CLEAR_ANIMATION_TICKS` | 10 | Ticks between detecting and removing full rows |
//! | `LINE_SCORE` | 100 | Flat points per cleared row |
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{Command, ShapeKind, BlockColor, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert_eq!(kind.color(), BlockColor::Magenta);
//!
//! let cmd = Command::from_str("hardDrop").unwrap();
//! assert_eq!(cmd, Command::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Field width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Field height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest supported field edge. Coordinates are `i8`, so anything above this
/// would overflow origin arithmetic.
pub const MAX_BOARD_EDGE: u8 = 64;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval: the active piece falls one row once more than this much
/// time has accumulated.
pub const FALL_INTERVAL_MS: u32 = 500;

/// Number of ticks full rows stay on the field before they are removed.
pub const CLEAR_ANIMATION_TICKS: u32 = 10;

/// Points awarded per full row (no multi-line bonus).
pub const LINE_SCORE: u32 = 100;

/// The seven tetromino shape kinds
///
/// The declaration order is the draw order used by the uniform piece source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// All kinds, in draw order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }

    /// Fixed palette color for this kind.
    pub fn color(&self) -> BlockColor {
        match self {
            ShapeKind::I => BlockColor::Cyan,
            ShapeKind::O => BlockColor::Yellow,
            ShapeKind::T => BlockColor::Magenta,
            ShapeKind::L => BlockColor::Orange,
            ShapeKind::J => BlockColor::Blue,
            ShapeKind::S => BlockColor::Green,
            ShapeKind::Z => BlockColor::Red,
        }
    }
}

/// Opaque color token stored in settled field cells.
///
/// Renderers decide what each token looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Cyan,
    Yellow,
    Magenta,
    Orange,
    Blue,
    Green,
    Red,
}

/// A cell on the field
///
/// - `None`: empty
/// - `Some(color)`: settled block of that color
pub type Cell = Option<BlockColor>;

/// Discrete commands forwarded by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; never locks
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop piece to its lowest legal row and place it
    HardDrop,
    /// Flip the pause flag (accepted in every state)
    TogglePause,
    /// Start over (honored once the game is over)
    Restart,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("TOGGLEPAUSE"), Some(Command::TogglePause));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "togglepause" => Some(Command::TogglePause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
            Command::Restart => "restart",
        }
    }

    /// Whether the command tries to change the active piece.
    pub fn moves_piece(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::Rotate
                | Command::HardDrop
        )
    }
}
