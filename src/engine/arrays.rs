//! Per-index component arrays.
//!
//! Each component index owns one cell in every array. Cells hold either
//! plain values or [`PropValue`]s, so a signal bound at creation stays
//! connected and is read by the renderer on every frame.

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::Signal;

use crate::primitives::PropValue;
use crate::types::{Attr, BorderStyle, ComponentType, FlexDirection, Rgba, TextAlign};

// =============================================================================
// Node Style
// =============================================================================

/// Layout and paint properties of a single component.
#[derive(Clone, Default)]
pub struct NodeStyle {
    pub fg: Option<PropValue<Rgba>>,
    pub bg: Option<Rgba>,
    pub attrs: Option<PropValue<Attr>>,
    pub border: Option<PropValue<BorderStyle>>,
    pub border_color: Option<Rgba>,
    pub padding_x: u16,
    pub padding_y: u16,
    pub gap: u16,
    pub direction: FlexDirection,
    pub align: TextAlign,
    /// Fixed row count (content is clipped or padded to it).
    pub height: Option<PropValue<u16>>,
}

// =============================================================================
// Arrays
// =============================================================================

#[derive(Default)]
struct Arrays {
    component_type: Vec<ComponentType>,
    parent: Vec<Option<usize>>,
    visible: Vec<Option<PropValue<bool>>>,
    content: Vec<Option<PropValue<String>>>,
    style: Vec<NodeStyle>,
    revealed: Vec<Option<Signal<bool>>>,
    children: HashMap<usize, Vec<usize>>,
    roots: Vec<usize>,
}

thread_local! {
    static ARRAYS: RefCell<Arrays> = RefCell::new(Arrays::default());
}

fn with_arrays<R>(f: impl FnOnce(&mut Arrays) -> R) -> R {
    ARRAYS.with(|arrays| f(&mut arrays.borrow_mut()))
}

/// Grow every array so `index` is addressable.
pub fn ensure_capacity(index: usize) {
    with_arrays(|a| {
        let len = index + 1;
        if a.component_type.len() < len {
            a.component_type.resize(len, ComponentType::None);
            a.parent.resize(len, None);
            a.visible.resize_with(len, || None);
            a.content.resize_with(len, || None);
            a.style.resize_with(len, NodeStyle::default);
            a.revealed.resize_with(len, || None);
        }
    })
}

/// Clear all values stored at `index`.
pub fn clear_at_index(index: usize) {
    with_arrays(|a| {
        if index >= a.component_type.len() {
            return;
        }
        a.component_type[index] = ComponentType::None;
        a.parent[index] = None;
        a.visible[index] = None;
        a.content[index] = None;
        a.style[index] = NodeStyle::default();
        a.revealed[index] = None;
        a.children.remove(&index);
    })
}

pub fn reset_arrays() {
    with_arrays(|a| *a = Arrays::default())
}

// =============================================================================
// Tree Structure
// =============================================================================

/// Record `index` under `parent` (or as a root), in creation order.
pub fn attach(index: usize, parent: Option<usize>) {
    with_arrays(|a| {
        a.parent[index] = parent;
        match parent {
            Some(p) => a.children.entry(p).or_default().push(index),
            None => a.roots.push(index),
        }
    })
}

/// Remove `index` from its parent's child list (or from the roots).
pub fn detach(index: usize) {
    with_arrays(|a| {
        let parent = a.parent.get(index).copied().flatten();
        match parent {
            Some(p) => {
                if let Some(siblings) = a.children.get_mut(&p) {
                    siblings.retain(|&c| c != index);
                }
            }
            None => a.roots.retain(|&r| r != index),
        }
    })
}

pub fn parent_of(index: usize) -> Option<usize> {
    with_arrays(|a| a.parent.get(index).copied().flatten())
}

pub fn children_of(index: usize) -> Vec<usize> {
    with_arrays(|a| a.children.get(&index).cloned().unwrap_or_default())
}

pub fn root_indices() -> Vec<usize> {
    with_arrays(|a| a.roots.clone())
}

// =============================================================================
// Core
// =============================================================================

pub fn set_component_type(index: usize, component_type: ComponentType) {
    with_arrays(|a| a.component_type[index] = component_type)
}

pub fn component_type(index: usize) -> ComponentType {
    with_arrays(|a| a.component_type.get(index).copied().unwrap_or_default())
}

pub fn set_visible(index: usize, visible: PropValue<bool>) {
    with_arrays(|a| a.visible[index] = Some(visible))
}

/// Visibility binding (None = always visible).
pub fn visible(index: usize) -> Option<PropValue<bool>> {
    with_arrays(|a| a.visible.get(index).cloned().flatten())
}

// =============================================================================
// Text
// =============================================================================

pub fn set_content(index: usize, content: PropValue<String>) {
    with_arrays(|a| a.content[index] = Some(content))
}

pub fn content(index: usize) -> Option<PropValue<String>> {
    with_arrays(|a| a.content.get(index).cloned().flatten())
}

// =============================================================================
// Visual
// =============================================================================

pub fn set_style(index: usize, style: NodeStyle) {
    with_arrays(|a| a.style[index] = style)
}

pub fn style(index: usize) -> NodeStyle {
    with_arrays(|a| a.style.get(index).cloned().unwrap_or_default())
}

pub fn set_revealed(index: usize, revealed: Signal<bool>) {
    with_arrays(|a| a.revealed[index] = Some(revealed))
}

/// Reveal signal bound to `index`, if the component reveals on scroll.
pub fn revealed(index: usize) -> Option<Signal<bool>> {
    with_arrays(|a| a.revealed.get(index).cloned().flatten())
}
