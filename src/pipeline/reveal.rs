//! Reveal - One-way scroll-in triggers.
//!
//! A component registered with [`reveal_once`] renders dimmed until any of
//! its rows has been inside the viewport. After that its flag stays true,
//! however far the page scrolls away.

use std::cell::RefCell;

use spark_signals::{signal, Signal};

use crate::engine::{arrays, is_allocated};
use crate::renderer::Frame;

thread_local! {
    /// Flags still waiting for their component to scroll into view.
    static PENDING: RefCell<Vec<(usize, Signal<bool>)>> = RefCell::new(Vec::new());
}

/// Make `index` reveal the first time it enters the viewport.
///
/// Calling it again for the same index returns the existing flag.
pub fn reveal_once(index: usize) -> Signal<bool> {
    if let Some(existing) = arrays::revealed(index) {
        return existing;
    }
    let revealed = signal(false);
    arrays::set_revealed(index, revealed.clone());
    PENDING.with(|pending| pending.borrow_mut().push((index, revealed.clone())));
    revealed
}

/// Reveal every pending component whose region intersects the viewport.
///
/// Returns `true` if at least one flag flipped (the frame is stale).
pub fn update_reveals(frame: &Frame, top: u16, rows: u16) -> bool {
    let ready: Vec<Signal<bool>> = PENDING.with(|pending| {
        let mut pending = pending.borrow_mut();
        let mut ready = Vec::new();
        pending.retain(|(index, flag)| {
            if !is_allocated(*index) {
                return false;
            }
            let in_view = frame
                .region(*index)
                .is_some_and(|region| region.intersects_rows(top, rows));
            if in_view {
                ready.push(flag.clone());
            }
            !in_view
        });
        ready
    });

    for flag in &ready {
        flag.set(true);
    }
    !ready.is_empty()
}

/// Reveal everything still pending, regardless of position.
pub fn reveal_all() {
    let ready = PENDING.with(|pending| std::mem::take(&mut *pending.borrow_mut()));
    for (_, flag) in ready {
        flag.set(true);
    }
}

pub fn pending_reveals() -> usize {
    PENDING.with(|pending| pending.borrow().len())
}
