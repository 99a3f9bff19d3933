//! Differential renderer for fullscreen mode.
//!
//! Compares the visible window of the current frame to the previous one and
//! rewrites only the rows that changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each visible row: skip if identical to the previous frame's row,
//!    otherwise move to it, clear it and queue its spans
//! 3. Clear rows left over from a taller previous window
//! 4. Flush once and keep the window for the next comparison

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::queue;
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use super::ansi;
use super::frame::{Frame, Line};

/// Differential renderer for fullscreen mode.
pub struct LineDiffRenderer<W: Write = Stdout> {
    out: W,
    previous: Option<Vec<Line>>,
}

impl LineDiffRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineDiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
        }
    }

    /// Render the rows `[top, top + rows)` of `frame`.
    ///
    /// Returns the number of rows rewritten.
    pub fn render(&mut self, frame: &Frame, top: u16, rows: u16) -> io::Result<usize> {
        let window = frame.window(top, rows);
        let previous = self.previous.take();

        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut changed = 0;
        for (y, line) in window.iter().enumerate() {
            let unchanged = previous
                .as_ref()
                .and_then(|prev| prev.get(y))
                .is_some_and(|prev| prev == line);
            if unchanged {
                continue;
            }
            queue!(self.out, MoveTo(0, y as u16), Clear(ClearType::CurrentLine))?;
            ansi::queue_line(&mut self.out, line)?;
            changed += 1;
        }

        let stale = previous.as_ref().map_or(0, |prev| prev.len());
        for y in window.len()..stale {
            queue!(self.out, MoveTo(0, y as u16), Clear(ClearType::CurrentLine))?;
            changed += 1;
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(window.to_vec());
        Ok(changed)
    }

    /// Forget the previous window; the next render redraws every row.
    ///
    /// Use after a resize or when the screen is corrupted.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter the alternate screen with mouse capture.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            EnterAlternateScreen,
            Hide,
            EnableMouseCapture,
            Clear(ClearType::All)
        )?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, DisableMouseCapture, Show, LeaveAlternateScreen)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Leave fullscreen and raw mode on stdout without a renderer at hand.
///
/// Used from the panic hook, where the renderer is borrowed by the unwinding
/// frame.
pub fn restore_terminal() -> io::Result<()> {
    let mut out = io::stdout();
    queue!(out, DisableMouseCapture, Show, LeaveAlternateScreen)?;
    out.flush()?;
    terminal::disable_raw_mode()
}

// =============================================================================
// Tests
// =============================================================================
