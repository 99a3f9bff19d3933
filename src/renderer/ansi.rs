//! Styled output through crossterm commands.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::types::{Attr, Rgba};

use super::frame::{CellStyle, Line};

/// Map a color to crossterm; terminal default and transparent become `Reset`.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() || color.is_transparent() {
        return Color::Reset;
    }
    Color::Rgb {
        r: color.r as u8,
        g: color.g as u8,
        b: color.b as u8,
    }
}

fn queue_attrs<W: Write>(out: &mut W, attrs: Attr) -> io::Result<()> {
    let table = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
    ];
    for (flag, attribute) in table {
        if attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_color(style.fg)),
        SetBackgroundColor(to_color(style.bg))
    )?;
    queue_attrs(out, style.attrs)
}

/// Queue one line, switching style only between spans that differ.
pub fn queue_line<W: Write>(out: &mut W, line: &Line) -> io::Result<()> {
    let mut current: Option<CellStyle> = None;
    for span in &line.spans {
        if current != Some(span.style) {
            queue_style(out, span.style)?;
            current = Some(span.style);
        }
        queue!(out, Print(&span.text))?;
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)
}
