//! Portfolio - Project cards that tilt under the pointer.
//!
//! The tilt follows the pointer position inside the card:
//!
//! ```text
//! rotate_x = (y - height / 2) / -25
//! rotate_y = (x - width / 2) / 25
//! scale    = 1.02 while hovered, 1.0 at rest
//! ```
//!
//! A terminal cannot rotate a box, so a tilted card is drawn with a bold
//! border and the angles are kept for anything that wants them.

use std::fmt;

use spark_signals::{signal, Signal};

use crate::engine::get_index;
use crate::primitives::{box_primitive, text, BoxProps, Cleanup, PropValue, TextProps};
use crate::renderer::{Frame, Region};
use crate::types::{Attr, BorderStyle};

use super::content::SiteContent;
use super::palette::Palette;
use super::widgets::{columns_for, grid, heading, section};

/// Rows of a project card, border included.
pub const CARD_ROWS: u16 = 6;

const TILT_DIVISOR: f32 = 25.0;
const HOVER_SCALE: f32 = 1.02;

// =============================================================================
// Tilt
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Degrees around the horizontal axis.
    pub rotate_x: f32,
    /// Degrees around the vertical axis.
    pub rotate_y: f32,
    pub scale: f32,
}

impl Tilt {
    pub const REST: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Tilt for a pointer at page cell (`x`, `y`) over a card at `rect`.
    pub fn from_pointer(rect: Region, x: u16, y: u16) -> Self {
        let local_x = x as f32 - rect.left as f32;
        let local_y = y as f32 - rect.top as f32;
        let center_x = rect.width as f32 / 2.0;
        let center_y = rect.height as f32 / 2.0;
        Self {
            rotate_x: (local_y - center_y) / -TILT_DIVISOR,
            rotate_y: (local_x - center_x) / TILT_DIVISOR,
            scale: HOVER_SCALE,
        }
    }

    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}

impl Default for Tilt {
    fn default() -> Self {
        Self::REST
    }
}

impl fmt::Display for Tilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotateX({}deg) rotateY({}deg) scale({})",
            self.rotate_x, self.rotate_y, self.scale
        )
    }
}

// =============================================================================
// Gallery
// =============================================================================

/// Tilt state of every project card.
#[derive(Clone)]
pub struct Gallery {
    tilts: Vec<Signal<Tilt>>,
}

impl Gallery {
    pub fn new(cards: usize) -> Self {
        Self {
            tilts: (0..cards).map(|_| signal(Tilt::REST)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tilts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tilts.is_empty()
    }

    pub fn tilt(&self, card: usize) -> Tilt {
        self.tilts.get(card).map(|t| t.get()).unwrap_or_default()
    }

    /// Card under the pointer, if any.
    pub fn hovered(&self) -> Option<usize> {
        self.tilts.iter().position(|t| !t.get().is_rest())
    }

    /// Pointer moved to page cell (`x`, `y`); tilt the card under it and reset
    /// the others.
    ///
    /// Returns `true` if any tilt changed.
    pub fn pointer_move(&self, frame: &Frame, x: u16, y: u16) -> bool {
        let mut changed = false;
        for (card, tilt) in self.tilts.iter().enumerate() {
            let region = get_index(&card_id(card)).and_then(|index| frame.region(index));
            let next = match region {
                Some(rect) if rect.contains(x, y) => Tilt::from_pointer(rect, x, y),
                _ => Tilt::REST,
            };
            if tilt.get() != next {
                tilt.set(next);
                changed = true;
            }
        }
        changed
    }

    /// Pointer left the page.
    pub fn reset(&self) {
        for tilt in &self.tilts {
            if !tilt.get().is_rest() {
                tilt.set(Tilt::REST);
            }
        }
    }

    fn signal(&self, card: usize) -> Option<Signal<Tilt>> {
        self.tilts.get(card).cloned()
    }
}

pub fn card_id(card: usize) -> String {
    format!("project-{card}")
}

// =============================================================================
// Section
// =============================================================================

pub fn portfolio(content: &SiteContent, palette: &Palette, gallery: &Gallery, width: u16) -> Cleanup {
    let projects = content.projects.clone();
    let palette = *palette;
    let gallery = gallery.clone();
    let columns = columns_for(width, 3);

    section("projects", palette.surface_deep, move || {
        heading("Featured Projects", palette.text);
        grid(projects, columns, 2, move |i, project| {
            let border = match gallery.signal(i) {
                Some(tilt) => PropValue::getter(move || {
                    if tilt.get().is_rest() {
                        BorderStyle::Rounded
                    } else {
                        BorderStyle::Bold
                    }
                }),
                None => BorderStyle::Rounded.into(),
            };

            box_primitive(BoxProps {
                id: Some(card_id(i)),
                height: Some(CARD_ROWS.into()),
                border: Some(border),
                border_color: Some(palette.border),
                padding_x: Some(1),
                gap: Some(1),
                children: Some(Box::new(move || {
                    text(TextProps {
                        content: format!("( {} )", project.tag).into(),
                        fg: Some(palette.text_muted.into()),
                        ..Default::default()
                    });
                    text(TextProps {
                        content: project.title.into(),
                        fg: Some(palette.text.into()),
                        attrs: Some(Attr::BOLD.into()),
                        ..Default::default()
                    });
                })),
                ..Default::default()
            });
        });
    })
}
