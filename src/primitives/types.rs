//! Primitive types - Props and cleanup.
//!
//! Props support static values, signals, and getters for reactivity.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::Signal;

use crate::engine::on_destroy;
use crate::types::{Attr, BorderStyle, FlexDirection, Rgba, TextAlign};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

/// Tie `cleanup` to the lifetime of `parent`.
///
/// The returned cleanup and the parent's destruction share one slot, so the
/// wrapped cleanup runs at most once, whichever comes first.
pub fn bind_to_parent(parent: Option<usize>, cleanup: Cleanup) -> Cleanup {
    let slot: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(Some(cleanup)));

    if let Some(parent) = parent {
        let slot = slot.clone();
        on_destroy(parent, move || {
            let taken = slot.borrow_mut().take();
            if let Some(cleanup) = taken {
                cleanup();
            }
        });
    }

    Box::new(move || {
        let taken = slot.borrow_mut().take();
        if let Some(cleanup) = taken {
            cleanup();
        }
    })
}

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// The engine arrays store the PropValue itself, so the reactive connection
/// survives until the renderer reads it.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal.
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Wrap a getter closure.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// Box Props
// =============================================================================

/// Properties for the Box component.
///
/// # Example
///
/// ```ignore
/// use glowfolio::primitives::{box_primitive, text, BoxProps, TextProps};
/// use glowfolio::types::BorderStyle;
///
/// let cleanup = box_primitive(BoxProps {
///     border: Some(BorderStyle::Rounded.into()),
///     padding_x: Some(2),
///     children: Some(Box::new(|| {
///         text(TextProps { content: "Hello".into(), ..Default::default() });
///     })),
///     ..Default::default()
/// });
/// ```
#[derive(Default)]
pub struct BoxProps {
    /// Optional component ID for lookup.
    pub id: Option<String>,

    /// Whether the component is visible (default: true).
    pub visible: Option<PropValue<bool>>,

    /// Stacking direction for children (default: column).
    pub direction: Option<FlexDirection>,

    /// Fixed number of rows, borders and padding included.
    pub height: Option<PropValue<u16>>,

    /// Horizontal padding in cells.
    pub padding_x: Option<u16>,

    /// Vertical padding in rows.
    pub padding_y: Option<u16>,

    /// Blank cells (row layout) or rows (column layout) between children.
    pub gap: Option<u16>,

    /// Alignment inherited by text children.
    pub align: Option<TextAlign>,

    pub border: Option<PropValue<BorderStyle>>,
    pub border_color: Option<Rgba>,

    /// Foreground inherited by text children.
    pub fg: Option<PropValue<Rgba>>,
    pub bg: Option<Rgba>,

    /// Child components, created with this box as parent.
    pub children: Option<Box<dyn FnOnce()>>,
}

// =============================================================================
// Text Props
// =============================================================================

/// Properties for the Text component.
#[derive(Default)]
pub struct TextProps {
    pub id: Option<String>,

    /// Text content (required). Newlines start new rows.
    pub content: PropValue<String>,

    pub visible: Option<PropValue<bool>>,
    pub fg: Option<PropValue<Rgba>>,
    pub bg: Option<Rgba>,
    pub attrs: Option<PropValue<Attr>>,

    /// Alignment (default: inherited from the parent box).
    pub align: Option<TextAlign>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, release_index, reset_registry};
    use spark_signals::signal;
    use std::cell::Cell;

    #[test]
    fn test_prop_value_get() {
        let s = signal(3u16);
        let from_signal: PropValue<u16> = s.clone().into();
        let from_getter = PropValue::getter(move || 7u16);

        assert_eq!(PropValue::Static(1u16).get(), 1);
        assert_eq!(from_signal.get(), 3);
        s.set(4);
        assert_eq!(from_signal.get(), 4);
        assert_eq!(from_getter.get(), 7);
    }

    #[test]
    fn test_bind_to_parent_runs_once() {
        reset_registry();

        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();

        let parent = allocate_index(None);
        let cleanup = bind_to_parent(
            Some(parent),
            Box::new(move || calls_clone.set(calls_clone.get() + 1)),
        );

        release_index(parent);
        cleanup();
        assert_eq!(calls.get(), 1, "parent release and explicit cleanup share one run");
    }
}
