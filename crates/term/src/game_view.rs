//! GameView: maps a session [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Piece, Snapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::BlockColor;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAYFIELD_BG: Rgb = Rgb::new(50, 54, 62);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK_GLYPH: char = '█';

/// Terminal color of a settled or falling block.
pub fn block_rgb(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Cyan => Rgb::new(0, 255, 255),
        BlockColor::Yellow => Rgb::new(255, 255, 0),
        BlockColor::Magenta => Rgb::new(255, 0, 255),
        BlockColor::Orange => Rgb::new(255, 165, 0),
        BlockColor::Blue => Rgb::new(0, 0, 255),
        BlockColor::Green => Rgb::new(0, 255, 0),
        BlockColor::Red => Rgb::new(255, 0, 0),
    }
}

/// A lightweight terminal renderer for the falling-blocks game.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen position of the field frame's top-left corner.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered field in terminal cells.
    pub fn frame_size(&self, snap: &Snapshot) -> (u16, u16) {
        (
            snap.width as u16 * self.cell_w + 2,
            snap.height as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Cell::BLANK);

        let (frame_w, frame_h) = self.frame_size(snap);
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: PANEL_BG,
            bold: false,
            dim: false,
        };
        self.draw_border(fb, origin, frame_w, frame_h, border);

        // Settled cells, fading out the rows that are being cleared.
        for y in 0..snap.height as usize {
            let fade = snap
                .clearing
                .as_ref()
                .filter(|_| snap.is_clearing_row(y))
                .map(|clearing| clearing.progress);
            for x in 0..snap.width as usize {
                match snap.cell(x, y) {
                    Some(color) => {
                        let style = match fade {
                            Some(progress) => fading_style(color, progress),
                            None => block_style(color),
                        };
                        self.fill_field_cell(fb, origin, x as u16, y as u16, BLOCK_GLYPH, style);
                    }
                    None => self.draw_empty_cell(fb, origin, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = snap.active {
            let style = block_style(active.color());
            for (x, y) in active.cells() {
                if x >= 0 && (x as u8) < snap.width && y >= 0 && (y as u8) < snap.height {
                    self.fill_field_cell(fb, origin, x as u16, y as u16, BLOCK_GLYPH, style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if !snap.playable() {
            if snap.game_over {
                let lines = ["GAME OVER", "", "Press R to restart"];
                self.draw_overlay(fb, origin, frame_w, frame_h, &lines, Some(snap.score));
            } else {
                let lines = ["PAUSED", "", "Press P to resume"];
                self.draw_overlay(fb, origin, frame_w, frame_h, &lines, None);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, at: Origin, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (x, y) = (at.x, at.y);

        fb.glyph(x, y, '┌', style);
        fb.glyph(x + w - 1, y, '┐', style);
        fb.glyph(x, y + h - 1, '└', style);
        fb.glyph(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.glyph(x + dx, y, '─', style);
            fb.glyph(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.glyph(x, y + dy, '│', style);
            fb.glyph(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, at: Origin, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 94, 104),
            bg: PLAYFIELD_BG,
            bold: false,
            dim: true,
        };
        self.fill_field_cell(fb, at, x, y, '·', style);
    }

    fn fill_field_cell(
        &self,
        fb: &mut FrameBuffer,
        at: Origin,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = at.x + 1 + cell_x * self.cell_w;
        let py = at.y + 1 + cell_y * self.cell_h;
        fb.rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &Snapshot,
        viewport: Viewport,
        at: Origin,
        frame_w: u16,
    ) {
        let panel_x = at.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: PANEL_BG,
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            bold: false,
            ..label
        };

        let mut y = at.y;
        fb.text(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.number(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.text(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, &snap.next, panel_x, y);
        y = y.saturating_add(3);

        let hint = CellStyle { dim: true, ..value };
        for line in ["←→ move", "↑ rotate", "↓ soft drop", "SPC drop", "P pause", "Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.text(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    /// Next piece in its spawn orientation, always one terminal row per cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: &Piece, x: u16, y: u16) {
        let style = CellStyle {
            bg: PANEL_BG,
            ..block_style(piece.color())
        };
        for (dx, dy) in piece.shape.cells() {
            let px = x + dx as u16 * self.cell_w;
            fb.rect(px, y + dy as u16, self.cell_w, 1, BLOCK_GLYPH, style);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        at: Origin,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
        final_score: Option<u32>,
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: PANEL_BG,
            bold: true,
            dim: false,
        };
        let total = lines.len() as u16 + u16::from(final_score.is_some());
        let mut y = at.y.saturating_add(frame_h.saturating_sub(total) / 2);
        let centered = |width: u16| at.x.saturating_add(frame_w.saturating_sub(width) / 2);

        for line in lines {
            if line.is_empty() {
                // The blank line is where the final score goes, if any.
                if let Some(score) = final_score {
                    y = y.saturating_add(1);
                    let label = "Final Score: ";
                    let x = centered(label.len() as u16 + digit_count(score));
                    let end = fb.text(x, y, label, style);
                    fb.number(end, y, score, style);
                }
            } else {
                fb.text(centered(line.chars().count() as u16), y, line, style);
            }
            y = y.saturating_add(1);
        }
    }
}

fn block_style(color: BlockColor) -> CellStyle {
    CellStyle {
        fg: block_rgb(color),
        bg: PLAYFIELD_BG,
        bold: true,
        dim: false,
    }
}

/// Style for a row being cleared. `progress` runs from 1.0 down toward 0.0;
/// the block fades into the background and is dimmed past the halfway mark.
fn fading_style(color: BlockColor, progress: f32) -> CellStyle {
    CellStyle {
        fg: block_rgb(color).mix(PLAYFIELD_BG, 1.0 - progress),
        bg: PLAYFIELD_BG,
        bold: false,
        dim: progress < 0.5,
    }
}

fn digit_count(n: u32) -> u16 {
    n.checked_ilog10().map_or(1, |log| log as u16 + 1)
}
