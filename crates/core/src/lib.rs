//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-blocks game and nothing else. It
//! has no dependency on terminals or the clock: time arrives as elapsed
//! milliseconds and input as [`Command`](types::Command) values, which makes
//! every game reproducible from a seed and a command log.
//!
//! # Module Structure
//!
//! - [`shape`]: the seven tetromino matrices and clockwise rotation
//! - [`field`]: the settled-cell grid, collision checks and row removal
//! - [`piece`]: a positioned shape with validated moves
//! - [`rng`]: injectable piece sources (uniform draws, scripted sequences)
//! - [`session`]: the phase machine driving gravity, clears and game over
//! - [`snapshot`]: read-only per-frame view handed to renderers
//!
//! # Rules
//!
//! - Pieces spawn on row 0, horizontally centered.
//! - Gravity moves the active piece one row each time more than 500ms has
//!   accumulated; a piece that cannot fall is placed.
//! - Rotation is clockwise about the matrix origin, with no kicks.
//! - Every full row scores 100 points when detected. The rows stay visible
//!   for 10 ticks before they are removed and the next piece spawns.
//! - The game ends when a promoted piece does not fit at its spawn.
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::Session;
//! use falling_blocks_types::Command;
//!
//! let mut session = Session::new(12345);
//! session.apply_command(Command::MoveRight);
//! session.apply_command(Command::HardDrop);
//! session.tick(16);
//!
//! let snap = session.snapshot();
//! assert_eq!(snap.score, 0);
//! assert!(snap.active.is_some());
//! ```

pub mod config;
pub mod field;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use falling_blocks_types as types;

pub use config::{ConfigError, GameConfig};
pub use field::Field;
pub use piece::Piece;
pub use rng::{PieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use scoring::line_clear_score;
pub use session::{Phase, Session};
pub use shape::Shape;
pub use snapshot::{ClearingSnapshot, Snapshot};
