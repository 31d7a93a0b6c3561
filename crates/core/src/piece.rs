//! Piece engine - the falling tetromino as a value type
//!
//! A [`Piece`] never changes in place. Moves and rotations return a new
//! piece when the result is a legal placement on the [`Field`] and `None`
//! otherwise; rejection is an ordinary outcome, not an error.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::shape::Shape;
use crate::types::{BlockColor, ShapeKind};

/// A tetromino instance: shape matrix plus the field position of its
/// top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Place a fresh piece of `kind` on row 0, horizontally centered on a
    /// field `field_width` columns wide (`W/2 - shape_width/2`).
    pub fn spawn(kind: ShapeKind, field_width: u8) -> Self {
        let shape = Shape::of(kind);
        let x = (field_width / 2) as i8 - (shape.cols() / 2) as i8;
        Self { kind, shape, x, y: 0 }
    }

    pub fn color(&self) -> BlockColor {
        self.kind.color()
    }

    /// Whether this placement is legal on `field`.
    pub fn is_valid(&self, field: &Field) -> bool {
        field.is_valid_position(&self.shape, self.x, self.y)
    }

    /// Absolute field coordinates of every solid cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Shift by (dx, dy) if the result is legal.
    pub fn try_move(&self, dx: i8, dy: i8, field: &Field) -> Option<Piece> {
        let x = self.x.checked_add(dx)?;
        let y = self.y.checked_add(dy)?;
        field
            .is_valid_position(&self.shape, x, y)
            .then_some(Piece { x, y, ..*self })
    }

    /// Rotate 90° clockwise around the same origin.
    ///
    /// No kick offsets are tried: if the rotated matrix does not fit where
    /// it stands, the rotation is rejected.
    pub fn try_rotate(&self, field: &Field) -> Option<Piece> {
        let shape = self.shape.rotated_cw();
        field
            .is_valid_position(&shape, self.x, self.y)
            .then_some(Piece { shape, ..*self })
    }

    /// Lowest legal position straight below. Does not commit.
    pub fn hard_drop(&self, field: &Field) -> Piece {
        let mut piece = *self;
        while let Some(lower) = piece.try_move(0, 1, field) {
            piece = lower;
        }
        piece
    }
}
