//! Terminal output for the lander screen.
//!
//! A frame is sent whole the first time and after every size change. From
//! then on only the changed runs of each row go out: in flight that is the
//! craft outline, the flame, a few meteors and the HUD digits.

use std::io::{self, Write};
use std::mem;

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Current terminal size in cells.
pub fn terminal_size() -> Result<(u16, u16)> {
    terminal::size().context("failed to query terminal size")
}

/// Owns the alternate screen and the last frame it showed.
pub struct TerminalRenderer {
    stdout: io::Stdout,
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
            out: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("failed to leave raw mode")
    }

    /// Forget what is on screen; the next frame is sent whole.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previous frame in its place.
    ///
    /// The game keeps a single `FrameBuffer` and redraws it every tick; after
    /// this call it holds the older frame, ready to be overwritten.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                encode_diff_into(&shown, fb, &mut self.out)?;
                shown
            }
            Some(mut shown) => {
                encode_full_into(fb, &mut self.out)?;
                shown.resize(fb.width(), fb.height());
                shown
            }
            None => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush()?;

        mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Emits cells and only switches colours when the style changes.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            self.out
                .queue(SetForegroundColor(rgb_to_color(cell.style.fg)))?
                .queue(SetBackgroundColor(rgb_to_color(cell.style.bg)))?
                .queue(SetAttribute(Attribute::Reset))?;
            if cell.style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Clear the screen and write every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;
    let mut pen = Pen::new(out);
    for y in 0..fb.height() {
        if y > 0 {
            pen.out.queue(Print("\r\n"))?;
        }
        for x in 0..fb.width() {
            pen.cell(fb.get(x, y).unwrap_or_default())?;
        }
    }
    pen.finish()
}

/// Write only the cells of `next` that differ from `prev` into `out`.
///
/// Both frames must have the same size; [`TerminalRenderer::draw_swap`] sends
/// a full frame otherwise.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new(out);
    for y in 0..next.height() {
        for (start, len) in changed_runs(prev, next, y) {
            pen.out.queue(cursor::MoveTo(start, y))?;
            for x in start..start + len {
                pen.cell(next.get(x, y).unwrap_or_default())?;
            }
        }
    }
    pen.finish()
}

/// `(start, len)` of each run of differing cells on row `y`.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<(u16, u16)> {
    let differs = |x: u16| prev.get(x, y) != next.get(x, y);
    let mut runs = Vec::new();
    let mut x = 0;
    while x < next.width() {
        if !differs(x) {
            x += 1;
            continue;
        }
        let start = x;
        while x < next.width() && differs(x) {
            x += 1;
        }
        runs.push((start, x - start));
    }
    runs
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(out: &[u8]) -> String {
        String::from_utf8_lossy(out).into_owned()
    }

    #[test]
    fn test_full_redraw_prints_every_glyph() {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::fg(Rgb::GREEN);
        fb.set(0, 0, Cell { ch: '▄', style });
        fb.set(2, 1, Cell { ch: '█', style });

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = as_text(&out);
        assert!(text.contains('▄'));
        assert!(text.contains('█'));
        assert_eq!(text.matches("\r\n").count(), 1);
    }

    #[test]
    fn test_diff_only_writes_changed_cells() {
        let style = CellStyle::default();
        let prev = FrameBuffer::new(6, 2);
        let mut next = prev.clone();
        next.set(4, 1, Cell { ch: '▚', style });

        let mut out = Vec::new();
        encode_diff_into(&prev, &next, &mut out).unwrap();
        let text = as_text(&out);
        assert!(text.contains('▚'));
        assert_eq!(text.matches(' ').count(), 0);

        let mut out = Vec::new();
        encode_diff_into(&next, &next, &mut out).unwrap();
        assert!(!as_text(&out).contains('▚'));
    }

    #[test]
    fn test_style_conversion_is_truecolor() {
        assert_eq!(
            rgb_to_color(Rgb::RED),
            Color::Rgb {
                r: Rgb::RED.r,
                g: Rgb::RED.g,
                b: Rgb::RED.b
            }
        );
    }

    #[test]
    fn test_changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(8, 1);
        let mut b = FrameBuffer::new(8, 1);
        for x in [1, 2, 3, 6] {
            b.set(x, 0, Cell { ch: '*', style });
        }
        assert_eq!(changed_runs(&a, &b, 0), vec![(1, 3), (6, 1)]);
        assert!(changed_runs(&b, &b, 0).is_empty());
    }
}
