//! Puts frames on the real terminal.
//!
//! The renderer remembers what the screen shows and only rewrites cells that
//! differ. The first frame, a frame of a new size, or one after
//! [`TerminalRenderer::invalidate`] clears the screen and writes everything.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Owns stdout while the game runs in raw mode on the alternate screen.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Copy of the last presented frame; `None` means the screen is unknown.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen, e.g. after the terminal was resized.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.out.clear();
        let on_screen = self.shown.as_ref().filter(|shown| shown.same_size(frame));
        if paint(on_screen, frame, &mut self.out)? > 0 {
            self.flush()?;
        }
        match &mut self.shown {
            Some(shown) => shown.clone_from(frame),
            None => self.shown = Some(frame.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queue the commands that turn `on_screen` into `frame` and return how many
/// cells were written. Without a known screen everything is repainted.
fn paint(
    on_screen: Option<&FrameBuffer>,
    frame: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<usize> {
    if on_screen.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }
    let mut painter = Painter::new(out);
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let Some(cell) = frame.get(x, y) else {
                continue;
            };
            if on_screen.and_then(|shown| shown.get(x, y)) == Some(cell) {
                continue;
            }
            painter.cell(x, y, cell)?;
        }
    }
    painter.finish()
}

/// Tracks the terminal cursor and pen so consecutive cells of one style
/// cost a single character each.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    pen: Option<CellStyle>,
    written: usize,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            pen: None,
            written: 0,
        }
    }

    fn cell(&mut self, x: u16, y: u16, cell: Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        if self.pen != Some(cell.style) {
            self.pick_up(cell.style)?;
        }
        self.out.queue(Print(cell.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        self.written += 1;
        Ok(())
    }

    // SGR reset also clears colors, so it goes first.
    fn pick_up(&mut self, style: CellStyle) -> io::Result<()> {
        self.out
            .queue(SetAttribute(Attribute::Reset))?
            .queue(SetForegroundColor(truecolor(style.fg)))?
            .queue(SetBackgroundColor(truecolor(style.bg)))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.pen = Some(style);
        Ok(())
    }

    fn finish(self) -> io::Result<usize> {
        if self.written > 0 {
            self.out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(self.written)
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
