//! Frame - The rendered page for one tick.
//!
//! A frame is a list of styled lines, each exactly `width` cells wide, plus
//! the row/column region every component occupied.

use std::collections::HashMap;

use crate::types::{Attr, Rgba};

use super::measure::string_width;

/// Paint style of a run of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: CellStyle,
}

/// One terminal row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// A row of `width` spaces.
    pub fn blank(width: u16, style: CellStyle) -> Self {
        let mut line = Line::default();
        line.push(&" ".repeat(width as usize), style);
        line
    }

    /// Append text, merging with the last span when the style matches.
    pub fn push(&mut self, text: &str, style: CellStyle) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(Span {
            text: text.to_string(),
            style,
        });
    }

    /// Append every span of another line.
    pub fn extend(&mut self, other: Line) {
        for span in other.spans {
            self.push(&span.text, span.style);
        }
    }

    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> u16 {
        self.spans.iter().map(|s| string_width(&s.text)).sum()
    }
}

/// Rows and columns a component occupied in the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub top: u16,
    pub left: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn bottom(&self) -> u16 {
        self.top + self.height
    }

    /// True if any row of the region falls inside `[top, top + rows)`.
    pub fn intersects_rows(&self, top: u16, rows: u16) -> bool {
        self.height > 0 && self.top < top.saturating_add(rows) && self.bottom() > top
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.bottom()
    }

    pub(crate) fn offset(self, dy: u16, dx: u16) -> Self {
        Self {
            top: self.top + dy,
            left: self.left + dx,
            ..self
        }
    }
}

/// The rendered page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: u16,
    pub lines: Vec<Line>,
    pub regions: HashMap<usize, Region>,
}

impl Frame {
    pub fn height(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }

    /// Lines without styling, trailing spaces trimmed.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| l.plain().trim_end().to_string())
            .collect()
    }

    /// Whole frame as plain text.
    pub fn text(&self) -> String {
        self.plain_lines().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.plain().contains(needle))
    }

    pub fn region(&self, index: usize) -> Option<Region> {
        self.regions.get(&index).copied()
    }

    /// Slice of lines visible in a viewport scrolled to `top`.
    pub fn window(&self, top: u16, rows: u16) -> &[Line] {
        let start = (top as usize).min(self.lines.len());
        let end = (start + rows as usize).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Largest useful scroll offset for a viewport of `rows`.
    pub fn max_scroll(&self, rows: u16) -> u16 {
        self.height().saturating_sub(rows)
    }
}
