//! Viewport - Terminal size and page scroll state.
//!
//! Size and scroll offset are signals so components can read them in getters.

use spark_signals::{signal, Signal};

/// Rows scrolled by the arrow keys.
pub const LINE_SCROLL: u16 = 1;

/// Page Up/Down scrolls this fraction of the viewport.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

thread_local! {
    static WIDTH: Signal<u16> = signal(DEFAULT_WIDTH);
    static HEIGHT: Signal<u16> = signal(DEFAULT_HEIGHT);
    static SCROLL: Signal<u16> = signal(0);
}

pub fn viewport_width() -> u16 {
    WIDTH.with(|w| w.get())
}

pub fn viewport_height() -> u16 {
    HEIGHT.with(|h| h.get())
}

pub fn set_viewport_size(width: u16, height: u16) {
    WIDTH.with(|w| w.set(width.max(1)));
    HEIGHT.with(|h| h.set(height.max(1)));
}

/// Read the real terminal size, falling back to 80x24.
pub fn detect_viewport_size() -> (u16, u16) {
    let (width, height) = crossterm::terminal::size().unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
    set_viewport_size(width, height);
    (width, height)
}

// =============================================================================
// Scroll
// =============================================================================

pub fn scroll_offset() -> u16 {
    SCROLL.with(|s| s.get())
}

/// Set the scroll offset, clamped to `max`.
pub fn scroll_to(offset: u16, max: u16) {
    SCROLL.with(|s| s.set(offset.min(max)));
}

/// Scroll by a delta, clamped to `0..=max`.
///
/// Returns `true` if the offset changed.
pub fn scroll_by(delta: i32, max: u16) -> bool {
    let current = scroll_offset();
    let next = (current as i32 + delta).clamp(0, max as i32) as u16;
    if next == current {
        return false;
    }
    SCROLL.with(|s| s.set(next));
    true
}

/// Rows scrolled by one page.
pub fn page_rows() -> i32 {
    ((viewport_height() as f32 * PAGE_SCROLL_FACTOR) as i32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_by_clamps() {
        scroll_to(0, 0);
        assert!(scroll_by(5, 10));
        assert_eq!(scroll_offset(), 5);
        assert!(scroll_by(20, 10));
        assert_eq!(scroll_offset(), 10);
        assert!(!scroll_by(1, 10), "already at the bottom");
        assert!(scroll_by(-50, 10));
        assert_eq!(scroll_offset(), 0);
    }

    #[test]
    fn test_viewport_size_never_zero() {
        set_viewport_size(0, 0);
        assert_eq!((viewport_width(), viewport_height()), (1, 1));
        set_viewport_size(100, 40);
        assert_eq!(page_rows(), 36);
    }
}
