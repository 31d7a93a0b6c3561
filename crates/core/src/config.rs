//! Game configuration
//!
//! The canonical rules are compile-time constants; [`GameConfig`] bundles them
//! so tests can build sessions on small synthetic fields. A configuration is
//! checked once, when a session is constructed.

use thiserror::Error;

use crate::shape::Shape;
use crate::types::{
    ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, CLEAR_ANIMATION_TICKS, FALL_INTERVAL_MS, LINE_SCORE,
    MAX_BOARD_EDGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub fall_interval_ms: u32,
    pub clear_ticks: u32,
    pub line_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            fall_interval_ms: FALL_INTERVAL_MS,
            clear_ticks: CLEAR_ANIMATION_TICKS,
            line_score: LINE_SCORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field dimensions {width}x{height} must be between 1 and {max}")]
    FieldSize { width: u8, height: u8, max: u8 },
    #[error("{kind:?} shape ({cols}x{rows}) does not fit a {width}x{height} field")]
    ShapeTooLarge {
        kind: ShapeKind,
        cols: u8,
        rows: u8,
        width: u8,
        height: u8,
    },
    #[error("clear animation needs at least one tick")]
    NoClearTicks,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |edge: u8| (1..=MAX_BOARD_EDGE).contains(&edge);
        if !in_range(self.width) || !in_range(self.height) {
            return Err(ConfigError::FieldSize {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_EDGE,
            });
        }

        for kind in ShapeKind::ALL {
            let shape = Shape::of(kind);
            if shape.cols() > self.width || shape.rows() > self.height {
                return Err(ConfigError::ShapeTooLarge {
                    kind,
                    cols: shape.cols(),
                    rows: shape.rows(),
                    width: self.width,
                    height: self.height,
                });
            }
        }

        if self.clear_ticks == 0 {
            return Err(ConfigError::NoClearTicks);
        }
        Ok(())
    }
}
