//! Falling blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the runner, integration
//! tests and benches can use `falling_blocks::{core,input,term,types}`.

pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;
