//! Box Primitive - Container component.
//!
//! The fundamental container. Holds children stacked in a column or a row,
//! with optional border, padding, background and fixed height.
//!
//! # Example
//!
//! ```ignore
//! use glowfolio::primitives::{box_primitive, text, BoxProps, TextProps};
//! use spark_signals::signal;
//!
//! let rows = signal(8u16);
//!
//! let cleanup = box_primitive(BoxProps {
//!     height: Some(rows.clone().into()),
//!     children: Some(Box::new(|| {
//!         text(TextProps { content: "Hello!".into(), ..Default::default() });
//!     })),
//!     ..Default::default()
//! });
//!
//! // Grow the box - the next frame picks it up
//! rows.set(12);
//! ```

use crate::engine::arrays::{self, NodeStyle};
use crate::engine::{allocate_index, pop_parent_context, push_parent_context, release_index};
use crate::types::ComponentType;

use super::types::{BoxProps, Cleanup};

/// Create a box container component.
///
/// Returns a cleanup function that releases the box and all its children.
pub fn box_primitive(props: BoxProps) -> Cleanup {
    // 1. ALLOCATE INDEX (attaches to the current parent)
    let index = allocate_index(props.id.as_deref());

    // 2. CORE SETUP
    arrays::set_component_type(index, ComponentType::Box);
    if let Some(visible) = props.visible {
        arrays::set_visible(index, visible);
    }

    // 3. STYLE
    arrays::set_style(
        index,
        NodeStyle {
            fg: props.fg,
            bg: props.bg,
            attrs: None,
            border: props.border,
            border_color: props.border_color,
            padding_x: props.padding_x.unwrap_or(0),
            padding_y: props.padding_y.unwrap_or(0),
            gap: props.gap.unwrap_or(0),
            direction: props.direction.unwrap_or_default(),
            align: props.align.unwrap_or_default(),
            height: props.height,
        },
    );

    // 4. CHILDREN - created with this box as parent
    if let Some(children) = props.children {
        push_parent_context(index);
        children();
        pop_parent_context();
    }

    Box::new(move || release_index(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{get_allocated_count, get_current_parent_index, reset_registry};
    use crate::primitives::{text, TextProps};
    use crate::types::{BorderStyle, FlexDirection};

    #[test]
    fn test_box_creates_component() {
        reset_registry();

        let cleanup = box_primitive(BoxProps {
            id: Some("card".into()),
            border: Some(BorderStyle::Rounded.into()),
            direction: Some(FlexDirection::Row),
            ..Default::default()
        });

        let index = crate::engine::get_index("card").unwrap();
        assert_eq!(arrays::component_type(index), ComponentType::Box);
        assert_eq!(arrays::style(index).direction, FlexDirection::Row);
        assert_eq!(
            arrays::style(index).border.map(|b| b.get()),
            Some(BorderStyle::Rounded)
        );

        cleanup();
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_box_with_children() {
        reset_registry();

        let cleanup = box_primitive(BoxProps {
            id: Some("parent".into()),
            children: Some(Box::new(|| {
                text(TextProps {
                    content: "one".into(),
                    ..Default::default()
                });
                text(TextProps {
                    content: "two".into(),
                    ..Default::default()
                });
            })),
            ..Default::default()
        });

        let parent = crate::engine::get_index("parent").unwrap();
        assert_eq!(arrays::children_of(parent).len(), 2);
        assert_eq!(get_current_parent_index(), None, "parent context restored");

        cleanup();
        assert_eq!(get_allocated_count(), 0, "children released with the box");
    }
}
