//! Terminal presenter
//!
//! Writes a canvas to a crossterm terminal with true-color escapes. The
//! guard returned by `TerminalGuard::enter` restores the terminal when it is
//! dropped, including on early return and panic unwinding.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, warn};
use visage_core::Color;

use crate::Canvas;

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}

/// Raw mode + alternate screen for the lifetime of the guard
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        debug!("terminal entered");
        Ok(TerminalGuard { active: true })
    }

    /// Restore the terminal now instead of on drop
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut stdout = io::stdout();
        execute!(stdout, ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        debug!("terminal restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Current terminal size as (columns, rows)
pub fn terminal_size() -> io::Result<(u16, u16)> {
    terminal::size()
}

/// Canvas writer
pub struct Presenter<W: Write> {
    out: W,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Presenter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw the full canvas. Color escapes are emitted only when they change.
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let mut fg: Option<Color> = None;
        let mut bg: Option<Color> = None;

        for (y, row) in canvas.rows().enumerate() {
            queue!(self.out, MoveTo(0, y as u16))?;
            for cell in row {
                if bg != Some(cell.bg) {
                    queue!(self.out, SetBackgroundColor(term_color(cell.bg)))?;
                    bg = Some(cell.bg);
                }
                if cell.ch != ' ' && fg != Some(cell.fg) {
                    queue!(self.out, SetForegroundColor(term_color(cell.fg)))?;
                    fg = Some(cell.fg);
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_writes_glyphs_and_colors() {
        let mut canvas = Canvas::new(4, 2, Color::white());
        canvas.put_str(0, 0, "ok", Color::from_rgb8(0xDC, 0x26, 0x26));

        let mut presenter = Presenter::new(Vec::new());
        presenter.present(&canvas).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();

        assert!(out.contains("ok"));
        // 24-bit foreground and background
        assert!(out.contains("38;2;220;38;38"));
        assert!(out.contains("48;2;255;255;255"));
        // One background escape for a uniform canvas
        assert_eq!(out.matches("48;2;").count(), 1);
    }
}
