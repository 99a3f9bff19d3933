//! Mount API - Page lifecycle and the tick loop.
//!
//! # Example
//!
//! ```ignore
//! use glowfolio::pipeline::{mount, MountOptions};
//!
//! let mut handle = mount(|| site::page(props), MountOptions::default());
//!
//! loop {
//!     let frame = handle.tick();
//!     renderer.render(&frame, scroll_offset(), viewport_height())?;
//! }
//!
//! handle.unmount();
//! ```
//!
//! # Tick order
//!
//! 1. Drive the executor (finished fetches resolve their signals)
//! 2. Advance the frame clock (scenes draw)
//! 3. Drive the executor again (failures reported during the draw tear down)
//! 4. Render the tree and fire reveal triggers for the current viewport
//!
//! [`MountHandle::refresh`] runs steps 3 and 4 only.

use crate::primitives::Cleanup;
use crate::renderer::{render_tree, Frame};

use super::clock::advance_frame;
use super::executor::run_until_stalled;
use super::reveal::update_reveals;
use super::viewport::{scroll_offset, scroll_to, set_viewport_size, viewport_height, viewport_width};

/// Options for [`mount`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MountOptions {
    /// Fixed viewport size instead of the current one (tests, inline output).
    pub size: Option<(u16, u16)>,
}

/// Handle returned by [`mount`]. Dropping it unmounts the page.
pub struct MountHandle {
    cleanup: Option<Cleanup>,
    frame: Frame,
}

impl MountHandle {
    /// Run one tick and return the rendered frame.
    pub fn tick(&mut self) -> Frame {
        run_until_stalled();
        advance_frame();
        self.refresh()
    }

    /// Render again without advancing the frame clock (after input).
    pub fn refresh(&mut self) -> Frame {
        run_until_stalled();

        let mut frame = render_tree(viewport_width());

        let rows = viewport_height();
        scroll_to(scroll_offset(), frame.max_scroll(rows));

        if update_reveals(&frame, scroll_offset(), rows) {
            frame = render_tree(viewport_width());
        }

        self.frame = frame.clone();
        frame
    }

    /// Run `ticks` ticks and return the last frame.
    pub fn settle(&mut self, ticks: usize) -> Frame {
        for _ in 0..ticks.saturating_sub(1) {
            self.tick();
        }
        self.tick()
    }

    /// Frame from the last tick.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn is_mounted(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Release the whole page.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
            tracing::debug!("page unmounted");
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Build the page and flush its post-mount tasks.
///
/// Post-mount work (capability checks) runs before this returns, but scene
/// loads that wait on I/O only finish during later ticks.
pub fn mount(app: impl FnOnce() -> Cleanup, options: MountOptions) -> MountHandle {
    if let Some((width, height)) = options.size {
        set_viewport_size(width, height);
    }

    let cleanup = app();
    run_until_stalled();
    tracing::debug!(width = viewport_width(), height = viewport_height(), "page mounted");

    MountHandle {
        cleanup: Some(cleanup),
        frame: Frame::default(),
    }
}
