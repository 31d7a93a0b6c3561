//! Field module - the settled-block grid
//!
//! The field is a W x H grid where each cell is empty or holds the color of
//! the piece that settled there. Storage is a flat row-major vector owned
//! exclusively by the field; dimensions are fixed at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom
//! (row 0 is the top row).

use crate::shape::Shape;
use crate::types::{BlockColor, Cell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || (x as u8) >= self.width || y < 0 || (y as u8) >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at (x, y); `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Whether every solid cell of `shape` anchored at (x, y) lands inside the
    /// field on an empty cell.
    ///
    /// Out-of-bounds and overlap are reported the same way.
    pub fn is_valid_position(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().iter().all(|&(dx, dy)| {
            match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(px), Some(py)) => self.is_valid(px, py),
                _ => false,
            }
        })
    }

    /// Stamp `color` into every cell covered by `shape` at (x, y).
    ///
    /// The caller must have checked [`Field::is_valid_position`] first;
    /// nothing is re-validated here.
    pub fn commit(&mut self, shape: &Shape, x: i8, y: i8, color: BlockColor) {
        for &(dx, dy) in shape.cells().iter() {
            self.set(x.wrapping_add(dx), y.wrapping_add(dy), Some(color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Indices of full rows, top to bottom.
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Delete the given rows and insert as many empty rows at the top.
    ///
    /// Remaining rows keep their relative order. Rows are compacted from the
    /// bottom up with a single write pointer, so removals never shift an index
    /// that is still pending. Out-of-range and duplicate indices are ignored.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let height = self.height as usize;
        let width = self.width as usize;

        let mut removed = vec![false; height];
        for &y in rows {
            if y < height {
                removed[y] = true;
            }
        }

        let mut write_y = height;
        for read_y in (0..height).rev() {
            if removed[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }
    }

    /// Cells of row `y`, or `None` if out of range.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build from rows of cells (tests and fixtures).
    ///
    /// Returns `None` if the rows are empty or ragged.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = u8::try_from(rows.len()).ok()?;
        let width = u8::try_from(rows.first()?.len()).ok()?;
        if width == 0 || rows.iter().any(|row| row.len() != width as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Rows as nested vectors (tests and fixtures).
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
    use proptest::prelude::*;

    const C: Cell = Some(BlockColor::Cyan);

    fn fill_row(field: &mut Field, y: i8) {
        for x in 0..field.width() as i8 {
            field.set(x, y, C);
        }
    }

    /// Reference compaction: filter out the rows, prepend blanks.
    fn remove_rows_by_filter(field: &Field, rows: &[usize]) -> Field {
        let width = field.width() as usize;
        let kept: Vec<Vec<Cell>> = field
            .to_rows()
            .into_iter()
            .enumerate()
            .filter(|(y, _)| !rows.contains(y))
            .map(|(_, row)| row)
            .collect();
        let mut out = vec![vec![None; width]; field.height() as usize - kept.len()];
        out.extend(kept);
        Field::from_rows(out).unwrap()
    }

    #[test]
    fn test_index_calculation() {
        let field = Field::default();
        assert_eq!(field.index(0, 0), Some(0));
        assert_eq!(field.index(9, 0), Some(9));
        assert_eq!(field.index(0, 1), Some(10));
        assert_eq!(field.index(9, 19), Some(199));
        assert_eq!(field.index(-1, 0), None);
        assert_eq!(field.index(10, 0), None);
        assert_eq!(field.index(0, 20), None);
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = Field::default();
        assert_eq!(field.width(), BOARD_WIDTH);
        assert_eq!(field.height(), BOARD_HEIGHT);
        assert!(field.cells().iter().all(|c| c.is_none()));
        assert!(field.full_rows().is_empty());
    }

    #[test]
    fn test_valid_position_exhaustive_small_grid() {
        // 4x5 grid with two occupied cells; check every origin against a
        // direct per-cell evaluation.
        let mut field = Field::new(4, 5);
        field.set(1, 3, C);
        field.set(3, 4, C);

        for kind in ShapeKind::ALL {
            let mut shape = Shape::of(kind);
            for _ in 0..4 {
                for oy in -5i8..=6 {
                    for ox in -5i8..=5 {
                        let expected = shape.cells().iter().all(|&(dx, dy)| {
                            let (px, py) = (ox + dx, oy + dy);
                            (0..4).contains(&px)
                                && (0..5).contains(&py)
                                && !(px == 1 && py == 3)
                                && !(px == 3 && py == 4)
                        });
                        assert_eq!(
                            field.is_valid_position(&shape, ox, oy),
                            expected,
                            "{:?} at ({}, {})",
                            kind,
                            ox,
                            oy
                        );
                    }
                }
                shape = shape.rotated_cw();
            }
        }
    }

    #[test]
    fn test_valid_position_extreme_origin() {
        let field = Field::default();
        let i = Shape::of(ShapeKind::I);
        assert!(!field.is_valid_position(&i, i8::MAX, 0));
        assert!(!field.is_valid_position(&i, 0, i8::MIN));
    }

    #[test]
    fn test_commit_writes_color() {
        let mut field = Field::default();
        let o = Shape::of(ShapeKind::O);
        field.commit(&o, 3, 5, BlockColor::Yellow);

        assert_eq!(field.get(3, 5), Some(Some(BlockColor::Yellow)));
        assert_eq!(field.get(4, 5), Some(Some(BlockColor::Yellow)));
        assert_eq!(field.get(3, 6), Some(Some(BlockColor::Yellow)));
        assert_eq!(field.get(4, 6), Some(Some(BlockColor::Yellow)));
        assert_eq!(field.cells().iter().filter(|c| c.is_some()).count(), 4);
    }

    #[test]
    fn test_full_rows_none() {
        let mut field = Field::default();
        for x in 0..9 {
            field.set(x, 19, C);
        }
        assert!(field.full_rows().is_empty());
    }

    #[test]
    fn test_full_rows_one_after_commit() {
        let mut field = Field::default();
        for x in 0..6 {
            field.set(x, 19, C);
        }
        field.commit(&Shape::of(ShapeKind::I), 6, 19, BlockColor::Cyan);
        assert_eq!(field.full_rows(), vec![19]);
    }

    #[test]
    fn test_full_rows_all() {
        let mut field = Field::default();
        for y in 0..BOARD_HEIGHT as i8 {
            fill_row(&mut field, y);
        }
        assert_eq!(field.full_rows(), (0..BOARD_HEIGHT as usize).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove_middle_row() {
        let mut field = Field::default();
        field.set(0, 9, Some(BlockColor::Red));
        fill_row(&mut field, 10);
        field.set(0, 11, Some(BlockColor::Blue));

        field.remove_rows(&[10]);

        assert_eq!(field.height(), BOARD_HEIGHT);
        assert_eq!(field.get(0, 10), Some(Some(BlockColor::Red)));
        assert_eq!(field.get(0, 11), Some(Some(BlockColor::Blue)));
        assert!(field.row(0).unwrap().iter().all(|c| c.is_none()));
        assert!(field.full_rows().is_empty());
    }

    #[test]
    fn test_remove_top_row() {
        let mut field = Field::default();
        fill_row(&mut field, 0);
        field.set(2, 1, Some(BlockColor::Green));

        field.remove_rows(&[0]);

        assert!(field.row(0).unwrap().iter().all(|c| c.is_none()));
        assert_eq!(field.get(2, 1), Some(Some(BlockColor::Green)));
    }

    #[test]
    fn test_remove_bottom_row() {
        let mut field = Field::default();
        fill_row(&mut field, 19);
        field.set(4, 18, Some(BlockColor::Orange));

        field.remove_rows(&[19]);

        assert_eq!(field.get(4, 19), Some(Some(BlockColor::Orange)));
        assert_eq!(field.get(4, 18), Some(None));
        assert!(field.full_rows().is_empty());
    }

    #[test]
    fn test_remove_non_adjacent_rows() {
        let mut field = Field::default();
        fill_row(&mut field, 15);
        fill_row(&mut field, 18);
        field.set(0, 14, Some(BlockColor::Red));
        field.set(0, 16, Some(BlockColor::Green));
        field.set(0, 17, Some(BlockColor::Blue));
        field.set(0, 19, Some(BlockColor::Yellow));

        field.remove_rows(&[15, 18]);

        assert_eq!(field.get(0, 19), Some(Some(BlockColor::Yellow)));
        assert_eq!(field.get(0, 18), Some(Some(BlockColor::Blue)));
        assert_eq!(field.get(0, 17), Some(Some(BlockColor::Green)));
        assert_eq!(field.get(0, 16), Some(Some(BlockColor::Red)));
        assert!(field.row(0).unwrap().iter().all(|c| c.is_none()));
        assert!(field.row(1).unwrap().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_remove_ignores_duplicates_and_out_of_range() {
        let mut field = Field::default();
        fill_row(&mut field, 19);
        field.set(1, 18, C);
        let expected = remove_rows_by_filter(&field, &[19]);

        field.remove_rows(&[19, 19, 42]);
        assert_eq!(field, expected);
    }

    #[test]
    fn test_rows_roundtrip() {
        let mut rows = vec![vec![None; 10]; 20];
        rows[5][3] = Some(BlockColor::Yellow);
        rows[10][7] = Some(BlockColor::Orange);

        let field = Field::from_rows(rows.clone()).unwrap();
        assert_eq!(field.to_rows(), rows);
    }

    fn arb_field() -> impl Strategy<Value = Field> {
        (1u8..=8, 1u8..=10).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<bool>(), w as usize * h as usize).prop_map(
                move |bits| {
                    let rows = bits
                        .chunks(w as usize)
                        .map(|row| row.iter().map(|&b| if b { C } else { None }).collect())
                        .collect();
                    Field::from_rows(rows).unwrap()
                },
            )
        })
    }

    proptest! {
        #[test]
        fn remove_in_place_matches_filter_rebuild(
            field in arb_field(),
            picks in proptest::collection::vec(0usize..12, 0..6),
        ) {
            let rows: Vec<usize> = picks
                .into_iter()
                .filter(|&y| y < field.height() as usize)
                .collect();
            let expected = remove_rows_by_filter(&field, &rows);

            let mut actual = field.clone();
            actual.remove_rows(&rows);

            prop_assert_eq!(actual.height(), field.height());
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn full_rows_are_exactly_the_filled_rows(field in arb_field()) {
            let expected: Vec<usize> = field
                .to_rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| row.iter().all(|c| c.is_some()))
                .map(|(y, _)| y)
                .collect();
            prop_assert_eq!(field.full_rows(), expected);
        }
    }
}
