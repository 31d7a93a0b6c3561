//! Shape module - tetromino matrices and naive rotation
//!
//! A shape is a small boolean matrix (at most 4x4) sized exactly to its
//! bounding box. Rotation recomputes the matrix; there is no fixed table of
//! rotation states and no wall-kick search.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::ShapeKind;

/// Largest edge of a shape matrix.
pub const MAX_SHAPE_EDGE: usize = 4;

/// Offset of a single solid cell relative to the shape's top-left corner,
/// as `(dx, dy)` = `(column, row)`.
pub type CellOffset = (i8, i8);

/// Boolean occupancy matrix of a piece.
///
/// Cells outside `rows x cols` are always `false`, so derived equality
/// compares shapes by content and dimensions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_EDGE]; MAX_SHAPE_EDGE],
}

impl Shape {
    /// Build from row masks, where bit 3 (`0b1000`) is column 0.
    const fn from_masks(rows: u8, cols: u8, masks: [u8; MAX_SHAPE_EDGE]) -> Self {
        let mut bits = [[false; MAX_SHAPE_EDGE]; MAX_SHAPE_EDGE];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                bits[r][c] = masks[r] & (0b1000 >> c) != 0;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, bits }
    }

    /// Spawn matrix for a shape kind.
    pub const fn of(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::I => Self::from_masks(1, 4, [0b1111, 0, 0, 0]),
            ShapeKind::O => Self::from_masks(2, 2, [0b1100, 0b1100, 0, 0]),
            ShapeKind::T => Self::from_masks(2, 3, [0b1110, 0b0100, 0, 0]),
            ShapeKind::L => Self::from_masks(2, 3, [0b1110, 0b1000, 0, 0]),
            ShapeKind::J => Self::from_masks(2, 3, [0b1110, 0b0010, 0, 0]),
            ShapeKind::S => Self::from_masks(2, 3, [0b1100, 0b0110, 0, 0]),
            ShapeKind::Z => Self::from_masks(2, 3, [0b0110, 0b1100, 0, 0]),
        }
    }

    /// Build a shape from row slices of `0`/non-zero values.
    ///
    /// Returns `None` for empty, ragged or oversized input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_EDGE || width == 0 || width > MAX_SHAPE_EDGE {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut bits = [[false; MAX_SHAPE_EDGE]; MAX_SHAPE_EDGE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at (row, col) is solid. Out-of-range is empty.
    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Offsets of all solid cells, row by row.
    pub fn cells(&self) -> ArrayVec<CellOffset, 16> {
        let mut out = ArrayVec::new();
        for r in 0..self.rows as usize {
            for c in 0..self.cols as usize {
                if self.is_solid(r, c) {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: reverse the row order, then transpose.
    ///
    /// `new[c][r] = old[rows - 1 - r][c]`
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let mut bits = [[false; MAX_SHAPE_EDGE]; MAX_SHAPE_EDGE];
        for r in 0..rows {
            for c in 0..self.cols as usize {
                bits[c][r] = self.bits[rows - 1 - r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}
