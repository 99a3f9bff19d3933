//! Tree rendering - Component arrays to a [`Frame`].
//!
//! A single top-down pass. Every node is rendered into a block exactly as
//! wide as the space its parent gave it:
//!
//! 1. Text wraps to the available width and aligns inside it
//! 2. Boxes stack visible children (column) or split the width between them
//!    (row), then add padding, border and fixed height
//! 3. Each block records the regions of the nodes inside it, shifted as
//!    blocks are placed into their parents
//!
//! Foreground and background are inherited down the tree. A node whose
//! reveal flag is still false renders dimmed, together with its subtree.

use std::collections::HashMap;

use crate::engine::arrays;
use crate::types::{Attr, BorderStyle, ComponentType, Rgba, TextAlign};

use super::frame::{CellStyle, Frame, Line, Region};
use super::measure::{string_width, truncate_text, wrap_text};

/// Paint inherited from the enclosing boxes.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    fg: Rgba,
    bg: Rgba,
    dim: bool,
}

impl Default for Inherited {
    fn default() -> Self {
        Self {
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            dim: false,
        }
    }
}

impl Inherited {
    fn fill(&self) -> CellStyle {
        CellStyle {
            fg: self.fg,
            bg: self.bg,
            attrs: if self.dim { Attr::DIM } else { Attr::NONE },
        }
    }
}

/// Rendered node: lines plus the regions inside them.
#[derive(Default)]
struct Block {
    lines: Vec<Line>,
    regions: Vec<(usize, Region)>,
}

impl Block {
    fn height(&self) -> u16 {
        self.lines.len() as u16
    }

    /// Move this block's content into `target` at the given offset.
    fn place_into(self, target: &mut Vec<(usize, Region)>, dy: u16, dx: u16) -> Vec<Line> {
        target.extend(self.regions.into_iter().map(|(i, r)| (i, r.offset(dy, dx))));
        self.lines
    }
}

/// Render every root component into a frame `width` cells wide.
pub fn render_tree(width: u16) -> Frame {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut regions = Vec::new();

    for root in arrays::root_indices() {
        if let Some(block) = render_node(root, width, Inherited::default()) {
            let top = lines.len() as u16;
            lines.extend(block.place_into(&mut regions, top, 0));
        }
    }

    Frame {
        width,
        lines,
        regions: regions.into_iter().collect::<HashMap<_, _>>(),
    }
}

fn is_visible(index: usize) -> bool {
    arrays::visible(index).map(|v| v.get()).unwrap_or(true)
}

fn render_node(index: usize, width: u16, inherited: Inherited) -> Option<Block> {
    if !is_visible(index) {
        return None;
    }

    let mut inherited = inherited;
    if let Some(revealed) = arrays::revealed(index) {
        if !revealed.get() {
            inherited.dim = true;
        }
    }

    let mut block = match arrays::component_type(index) {
        ComponentType::Text => render_text(index, width, inherited),
        ComponentType::Box => render_box(index, width, inherited),
        ComponentType::None => return None,
    };

    block.regions.push((
        index,
        Region {
            top: 0,
            left: 0,
            width,
            height: block.height(),
        },
    ));
    Some(block)
}

// =============================================================================
// Text
// =============================================================================

fn render_text(index: usize, width: u16, inherited: Inherited) -> Block {
    let style = arrays::style(index);
    let content = arrays::content(index).map(|c| c.get()).unwrap_or_default();

    let mut attrs = style.attrs.map(|a| a.get()).unwrap_or(Attr::NONE);
    if inherited.dim {
        attrs |= Attr::DIM;
    }
    let text_style = CellStyle {
        fg: style.fg.map(|f| f.get()).unwrap_or(inherited.fg),
        bg: style.bg.unwrap_or(inherited.bg),
        attrs,
    };
    let fill = CellStyle {
        attrs: Attr::NONE,
        ..text_style
    };

    let lines = wrap_text(&content, width)
        .into_iter()
        .map(|row| align_row(&row, width, style.align, text_style, fill))
        .collect();

    Block {
        lines,
        regions: Vec::new(),
    }
}

fn align_row(row: &str, width: u16, align: TextAlign, style: CellStyle, fill: CellStyle) -> Line {
    let row = truncate_text(row, width);
    let free = width.saturating_sub(string_width(&row));
    let (left, right) = match align {
        TextAlign::Left => (0, free),
        TextAlign::Center => (free / 2, free - free / 2),
        TextAlign::Right => (free, 0),
    };

    let mut line = Line::default();
    line.push(&" ".repeat(left as usize), fill);
    line.push(&row, style);
    line.push(&" ".repeat(right as usize), fill);
    line
}

// =============================================================================
// Box
// =============================================================================

fn render_box(index: usize, width: u16, inherited: Inherited) -> Block {
    let style = arrays::style(index);
    let border = style.border.as_ref().map(|b| b.get()).unwrap_or_default();
    let thickness = border.thickness();

    let paint = Inherited {
        fg: style.fg.as_ref().map(|f| f.get()).unwrap_or(inherited.fg),
        bg: style.bg.unwrap_or(inherited.bg),
        dim: inherited.dim,
    };
    let fill = paint.fill();

    let inset_x = thickness + style.padding_x;
    let inset_y = thickness + style.padding_y;
    let inner_width = width.saturating_sub(inset_x * 2);

    // 1. CHILDREN
    let mut regions = Vec::new();
    let mut body: Vec<Line> = Vec::new();
    if inner_width > 0 {
        let children: Vec<usize> = arrays::children_of(index);
        if style.direction.is_row() {
            body = layout_row(&children, inner_width, style.gap, paint, &mut regions, inset_y, inset_x);
        } else {
            body = layout_column(&children, inner_width, style.gap, paint, &mut regions, inset_y, inset_x);
        }
    }

    // 2. PADDING
    let mut lines = Vec::new();
    for _ in 0..style.padding_y {
        lines.push(Line::blank(width.saturating_sub(thickness * 2), fill));
    }
    for row in body {
        let mut line = Line::default();
        line.push(&" ".repeat(style.padding_x as usize), fill);
        line.extend(row);
        line.push(&" ".repeat(style.padding_x as usize), fill);
        lines.push(line);
    }
    for _ in 0..style.padding_y {
        lines.push(Line::blank(width.saturating_sub(thickness * 2), fill));
    }

    // 3. FIXED HEIGHT (border rows included)
    if let Some(height) = style.height.as_ref().map(|h| h.get()) {
        let inner_rows = height.saturating_sub(thickness * 2) as usize;
        lines.resize_with(inner_rows, || {
            Line::blank(width.saturating_sub(thickness * 2), fill)
        });
        let limit = inner_rows as u16 + thickness;
        regions.retain(|(_, r)| r.top < limit);
        for (_, r) in regions.iter_mut() {
            if r.bottom() > limit {
                r.height = limit - r.top;
            }
        }
    }

    // 4. BORDER
    if thickness > 0 {
        lines = draw_border(lines, width, border, style.border_color.unwrap_or(paint.fg), fill);
    }

    Block { lines, regions }
}

fn layout_column(
    children: &[usize],
    width: u16,
    gap: u16,
    paint: Inherited,
    regions: &mut Vec<(usize, Region)>,
    dy: u16,
    dx: u16,
) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut placed = 0;

    for &child in children {
        let Some(block) = render_node(child, width, paint) else {
            continue;
        };
        if placed > 0 {
            for _ in 0..gap {
                lines.push(Line::blank(width, paint.fill()));
            }
        }
        let top = dy + lines.len() as u16;
        lines.extend(block.place_into(regions, top, dx));
        placed += 1;
    }

    lines
}

/// Split `width` between `count` cells separated by `gap`.
///
/// Leftover cells go to the first columns.
pub fn split_width(width: u16, count: usize, gap: u16) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }
    let gaps = gap.saturating_mul(count as u16 - 1);
    let usable = width.saturating_sub(gaps);
    let base = usable / count as u16;
    let extra = (usable % count as u16) as usize;
    (0..count)
        .map(|i| base + if i < extra { 1 } else { 0 })
        .collect()
}

fn layout_row(
    children: &[usize],
    width: u16,
    gap: u16,
    paint: Inherited,
    regions: &mut Vec<(usize, Region)>,
    dy: u16,
    dx: u16,
) -> Vec<Line> {
    let visible: Vec<usize> = children.iter().copied().filter(|&c| is_visible(c)).collect();
    let widths = split_width(width, visible.len(), gap);
    let fill = paint.fill();

    let mut columns: Vec<(u16, Vec<Line>)> = Vec::new();
    let mut left = 0u16;
    for (child, child_width) in visible.into_iter().zip(widths) {
        if child_width == 0 {
            continue;
        }
        if let Some(block) = render_node(child, child_width, paint) {
            let lines = block.place_into(regions, dy, dx + left);
            columns.push((child_width, lines));
        }
        left += child_width + gap;
    }

    let height = columns.iter().map(|(_, l)| l.len()).max().unwrap_or(0);
    let used: u16 = columns.iter().map(|(w, _)| *w).sum::<u16>()
        + gap.saturating_mul(columns.len().saturating_sub(1) as u16);

    (0..height)
        .map(|row| {
            let mut line = Line::default();
            for (i, (column_width, lines)) in columns.iter().enumerate() {
                if i > 0 {
                    line.push(&" ".repeat(gap as usize), fill);
                }
                match lines.get(row) {
                    Some(cell) => line.extend(cell.clone()),
                    None => line.extend(Line::blank(*column_width, fill)),
                }
            }
            line.push(&" ".repeat(width.saturating_sub(used) as usize), fill);
            line
        })
        .collect()
}

fn draw_border(
    inner: Vec<Line>,
    width: u16,
    border: BorderStyle,
    color: Rgba,
    fill: CellStyle,
) -> Vec<Line> {
    let (horizontal, vertical, top_left, top_right, bottom_right, bottom_left) = border.chars();
    let edge = CellStyle {
        fg: color,
        ..fill
    };
    let span = width.saturating_sub(2) as usize;

    let mut lines = Vec::with_capacity(inner.len() + 2);

    let mut top = Line::default();
    top.push(&format!("{top_left}{}{top_right}", horizontal.to_string().repeat(span)), edge);
    lines.push(top);

    for row in inner {
        let mut line = Line::default();
        line.push(&vertical.to_string(), edge);
        line.extend(row);
        line.push(&vertical.to_string(), edge);
        lines.push(line);
    }

    let mut bottom = Line::default();
    bottom.push(
        &format!("{bottom_left}{}{bottom_right}", horizontal.to_string().repeat(span)),
        edge,
    );
    lines.push(bottom);

    lines
}
