//! Text Primitive - Display text with styling.
//!
//! A pure display component. Cannot have children.
//!
//! # Reactivity
//!
//! Content can be a static string, signal, or getter. The renderer reads it on
//! every frame, so changes show up on the next tick.
//!
//! ```ignore
//! use glowfolio::primitives::{text, PropValue, TextProps};
//! use spark_signals::signal;
//!
//! let name = signal(String::new());
//! let name_clone = name.clone();
//! text(TextProps {
//!     content: PropValue::getter(move || format!("Hello, {}", name_clone.get())),
//!     ..Default::default()
//! });
//!
//! name.set("Fajri".to_string());
//! ```

use crate::engine::arrays::{self, NodeStyle};
use crate::engine::{allocate_index, release_index};
use crate::types::ComponentType;

use super::types::{Cleanup, TextProps};

/// Create a text display component.
///
/// Returns a cleanup function that releases the component.
pub fn text(props: TextProps) -> Cleanup {
    let index = allocate_index(props.id.as_deref());

    arrays::set_component_type(index, ComponentType::Text);
    if let Some(visible) = props.visible {
        arrays::set_visible(index, visible);
    }
    arrays::set_content(index, props.content);

    // Align falls back to the nearest box at render time when unset.
    let inherited_align = arrays::parent_of(index)
        .map(|p| arrays::style(p).align)
        .unwrap_or_default();

    arrays::set_style(
        index,
        NodeStyle {
            fg: props.fg,
            bg: props.bg,
            attrs: props.attrs,
            align: props.align.unwrap_or(inherited_align),
            ..Default::default()
        },
    );

    Box::new(move || release_index(index))
}
