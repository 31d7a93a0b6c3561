//! Styled character grid the game view draws into.
//!
//! All writes clip silently at the edges, so drawing code never has to check
//! the viewport size first.

use std::fmt::Write as _;

use arrayvec::ArrayString;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear mix toward `other`; `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    /// Light grey on black, no attributes.
    pub const PLAIN: CellStyle = CellStyle {
        fg: Rgb::new(220, 220, 220),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: false,
    };
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::PLAIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: CellStyle::PLAIN,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Change dimensions, reusing the allocation. Contents are left in an
    /// unspecified arrangement; callers repaint after resizing.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, Cell::BLANK);
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Returns false when (x, y) is off the grid.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn glyph(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` left to right from (x, y). Returns the column after the
    /// last character.
    pub fn text(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            if !self.set(cx, y, Cell { ch, style }) {
                break;
            }
            cx += 1;
        }
        cx
    }

    /// Decimal rendering of `value`, without allocating.
    pub fn number(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        let mut digits = ArrayString::<10>::new();
        // u32::MAX has 10 digits, so this cannot overflow the buffer.
        let _ = write!(digits, "{value}");
        self.text(x, y, &digits, style)
    }

    pub fn rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.glyph(col, row, ch, style);
            }
        }
    }

    /// Characters of row `y`.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .collect()
    }
}
