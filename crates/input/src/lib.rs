//! Terminal input module.
//!
//! Maps `crossterm` key events into [`Command`](types::Command) values. It has
//! no notion of timing: every key press yields at most one command, and the
//! session decides whether that command applies in its current state.

pub mod map;

pub use falling_blocks_types as types;

pub use map::{handle_key_event, should_quit};
