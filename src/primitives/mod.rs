//! Primitives - Component building blocks.
//!
//! - [`box_primitive`] - Container with column/row stacking, borders and padding
//! - [`text`] - Text display with styling and wrapping
//! - [`show`] / [`when`] - Conditional and async rendering
//! - [`error_boundary`] - One-shot failure containment
//!
//! # Architecture
//!
//! Components are indices into per-index arrays. Each component:
//! 1. Allocates an index from the registry (attached to the current parent)
//! 2. Stores its props in the arrays, signals included
//! 3. Returns a cleanup function
//!
//! # Reactivity
//!
//! Pass signals and getters straight through; reading them early breaks the
//! connection.
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! text(TextProps { content: name.clone().into(), ..Default::default() });
//!
//! // WRONG - snapshot, never updates
//! text(TextProps { content: name.get().into(), ..Default::default() });
//! ```

mod box_primitive;
mod boundary;
mod control_flow;
mod text;
mod types;

pub use box_primitive::box_primitive;
pub use boundary::{
    contain_panic, current_boundary, error_boundary, panic_is_contained, BoundaryHandle,
    BoundaryState, CaughtError, FailureKind,
};
pub use control_flow::{show, when, AsyncState, WhenOptions};
pub use text::text;
pub use types::*;
