//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders a session [`Snapshot`](core::Snapshot) into a plain
//! framebuffer that is then flushed to the terminal.
//!
//! - [`game_view`] is pure: snapshot in, framebuffer out.
//! - [`renderer`] owns the terminal (raw mode, alternate screen) and only
//!   rewrites the cells that changed since the last frame.
//! - Field cells are drawn 2 columns wide to keep blocks roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{block_rgb, AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
