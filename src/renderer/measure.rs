//! Text measurement by terminal display width.
//!
//! Widths come from `unicode-width`, so CJK and emoji take two cells and
//! combining marks take none.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

fn char_width(c: char) -> u16 {
    UnicodeWidthChar::width(c).unwrap_or(0) as u16
}

/// Wrap text into lines no wider than `width`.
///
/// Breaks at spaces where possible and hard-breaks words longer than a line.
/// Explicit newlines are kept, so empty paragraphs produce empty lines.
/// Paragraphs that already fit are kept verbatim, inner spacing included.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: u16, lines: &mut Vec<String>) {
    if paragraph.trim().is_empty() {
        lines.push(String::new());
        return;
    }
    // Rows that fit keep their spacing (scene art relies on it).
    let row = paragraph.trim_end();
    if string_width(row) <= width {
        lines.push(row.to_string());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0u16;

    for word in paragraph.split_whitespace() {
        let word_width = string_width(word);
        let separator = if current.is_empty() { 0 } else { 1 };

        if current_width.saturating_add(separator).saturating_add(word_width) <= width {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width = current_width.saturating_add(separator + word_width);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        // Word longer than a line: split by characters
        for c in word.chars() {
            let w = char_width(c);
            if current_width.saturating_add(w) > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width = current_width.saturating_add(w);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
}

/// Cut text to at most `width` cells.
pub fn truncate_text(text: &str, width: u16) -> String {
    let mut out = String::new();
    let mut used = 0u16;
    for c in text.chars() {
        let w = char_width(c);
        if used.saturating_add(w) > width {
            break;
        }
        out.push(c);
        used = used.saturating_add(w);
    }
    out
}
