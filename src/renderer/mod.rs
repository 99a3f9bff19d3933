//! Renderer - Component tree to terminal output.
//!
//! - [`render_tree`] lays the tree out into a [`Frame`] of styled lines
//! - [`LineDiffRenderer`] draws a scrolled window of the frame in fullscreen
//!   mode, rewriting only changed rows
//! - [`InlineRenderer`] prints the whole frame once

pub mod ansi;
mod diff;
mod frame;
mod inline;
mod layout;
mod measure;

pub use diff::{restore_terminal, LineDiffRenderer};
pub use frame::{CellStyle, Frame, Line, Region, Span};
pub use inline::InlineRenderer;
pub use layout::{render_tree, split_width};
pub use measure::{string_width, truncate_text, wrap_text};
