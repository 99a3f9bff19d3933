//! Inline renderer - Print a whole frame into the normal scrollback.

use std::io::{self, Stdout, Write};

use crossterm::queue;
use crossterm::style::Print;

use super::ansi;
use super::frame::Frame;

/// Writes every line of a frame, styled or plain.
pub struct InlineRenderer<W: Write = Stdout> {
    out: W,
    styled: bool,
}

impl InlineRenderer<Stdout> {
    pub fn stdout(styled: bool) -> Self {
        Self::new(io::stdout(), styled)
    }
}

impl<W: Write> InlineRenderer<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    pub fn render(&mut self, frame: &Frame) -> io::Result<()> {
        if self.styled {
            for line in &frame.lines {
                ansi::queue_line(&mut self.out, line)?;
                queue!(self.out, Print("\n"))?;
            }
        } else {
            for line in frame.plain_lines() {
                writeln!(self.out, "{line}")?;
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
