//! Pipeline - Scheduling, clocks and the mount lifecycle.
//!
//! # Tick Architecture
//!
//! ```text
//! executor (scene fetch, post-mount tasks) → frame clock (scene draws)
//!     → renderer::render_tree → reveal triggers → output
//! ```
//!
//! Everything runs on one thread. Async work lives on a thread-local
//! `LocalPool` that each tick drives until it stalls; it never blocks the
//! rest of the page.

pub mod clock;
pub mod executor;
pub mod mount;
pub mod reveal;
pub mod viewport;

pub use clock::{advance_frame, frame_count, on_frame};
pub use executor::{run_until_stalled, spawn_local};
pub use mount::{mount, MountHandle, MountOptions};
pub use reveal::{reveal_all, reveal_once, update_reveals};
pub use viewport::{
    detect_viewport_size, scroll_by, scroll_offset, scroll_to, set_viewport_size,
    viewport_height, viewport_width,
};
