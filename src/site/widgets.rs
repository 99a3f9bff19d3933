//! Shared building blocks for the sections.

use crate::engine::get_index;
use crate::pipeline::reveal_once;
use crate::primitives::{box_primitive, text, BoxProps, Cleanup, TextProps};
use crate::types::{Attr, BorderStyle, FlexDirection, Rgba, TextAlign};

use super::palette::Palette;

/// Full-width band with an id that reveals once it scrolls into view.
pub fn section(id: &str, background: Rgba, children: impl FnOnce() + 'static) -> Cleanup {
    padded_section(id, background, 2, children)
}

/// [`section`] with a custom horizontal padding.
pub fn padded_section(
    id: &str,
    background: Rgba,
    padding_x: u16,
    children: impl FnOnce() + 'static,
) -> Cleanup {
    let cleanup = box_primitive(BoxProps {
        id: Some(id.to_string()),
        bg: Some(background),
        padding_x: Some(padding_x),
        padding_y: Some(1),
        gap: Some(1),
        children: Some(Box::new(children)),
        ..Default::default()
    });
    if let Some(index) = get_index(id) {
        reveal_once(index);
    }
    cleanup
}

/// Bold, centered section title.
pub fn heading(content: &str, color: Rgba) -> Cleanup {
    text(TextProps {
        content: content.into(),
        fg: Some(color.into()),
        attrs: Some(Attr::BOLD.into()),
        align: Some(TextAlign::Center),
        ..Default::default()
    })
}

pub fn label(content: &str, color: Rgba) -> Cleanup {
    text(TextProps {
        content: content.into(),
        fg: Some(color.into()),
        ..Default::default()
    })
}

pub fn strong(content: &str, color: Rgba) -> Cleanup {
    text(TextProps {
        content: content.into(),
        fg: Some(color.into()),
        attrs: Some(Attr::BOLD.into()),
        ..Default::default()
    })
}

/// Rounded card with the palette's border color.
pub fn card(id: Option<String>, palette: &Palette, children: impl FnOnce() + 'static) -> Cleanup {
    box_primitive(BoxProps {
        id,
        border: Some(BorderStyle::Rounded.into()),
        border_color: Some(palette.border),
        padding_x: Some(1),
        children: Some(Box::new(children)),
        ..Default::default()
    })
}

/// Columns that fit `width`: one below 60 cells, two below 100, else `max`.
pub fn columns_for(width: u16, max: usize) -> usize {
    let fit = match width {
        0..60 => 1,
        60..100 => 2,
        _ => max,
    };
    fit.clamp(1, max.max(1))
}

/// Lay `items` out as rows of `columns` cells.
pub fn grid<T: 'static>(
    items: Vec<T>,
    columns: usize,
    gap: u16,
    cell: impl Fn(usize, T) + Clone + 'static,
) -> Cleanup {
    box_primitive(BoxProps {
        gap: Some(gap / 2),
        children: Some(Box::new(move || {
            let mut items = items.into_iter().enumerate().peekable();
            while items.peek().is_some() {
                let chunk: Vec<(usize, T)> = items.by_ref().take(columns.max(1)).collect();
                let cell = cell.clone();
                let fillers = columns.max(1) - chunk.len();
                box_primitive(BoxProps {
                    direction: Some(FlexDirection::Row),
                    gap: Some(gap),
                    children: Some(Box::new(move || {
                        for (i, item) in chunk {
                            cell(i, item);
                        }
                        // Keep the last row's cells as wide as the others
                        for _ in 0..fillers {
                            box_primitive(BoxProps::default());
                        }
                    })),
                    ..Default::default()
                });
            }
        })),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_for_breakpoints() {
        assert_eq!(columns_for(40, 3), 1);
        assert_eq!(columns_for(80, 3), 2);
        assert_eq!(columns_for(120, 3), 3);
        assert_eq!(columns_for(120, 0), 1);
    }
}
