//! Engine - Component registry and per-index arrays.
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Box  (parent=None, children=[1, 2], bg=#1b1f3b, ...)
//! Index 1: Text (parent=0,    content="About Me", attrs=BOLD, ...)
//! Index 2: Box  (parent=0,    children=[3], border=Rounded, ...)
//! ```
//!
//! Primitives write props into the arrays; the renderer walks them from the
//! roots down, reading getters and signals at render time.

mod registry;
pub mod arrays;

pub use registry::*;
