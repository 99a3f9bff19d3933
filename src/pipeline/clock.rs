//! Frame Clock - One shared clock for everything that animates.
//!
//! # Pattern
//!
//! - Subscribers register a callback with [`on_frame`]
//! - Each tick calls [`advance_frame`], which bumps the counter and calls
//!   every subscriber with the new frame number
//! - The returned cleanup unsubscribes
//!
//! The clock does not own a timer; the mount loop decides the pace.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::primitives::Cleanup;

type FrameCallback = Rc<dyn Fn(u64)>;

thread_local! {
    static FRAME: Cell<u64> = const { Cell::new(0) };
    static NEXT_ID: Cell<usize> = const { Cell::new(0) };
    static SUBSCRIBERS: RefCell<Vec<(usize, FrameCallback)>> = RefCell::new(Vec::new());
}

/// Subscribe to frame advances.
///
/// Returns an unsubscribe function.
pub fn on_frame(callback: impl Fn(u64) + 'static) -> Cleanup {
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    SUBSCRIBERS.with(|subs| subs.borrow_mut().push((id, Rc::new(callback))));

    Box::new(move || {
        SUBSCRIBERS.with(|subs| subs.borrow_mut().retain(|(sub_id, _)| *sub_id != id));
    })
}

/// Advance the clock by one frame and notify subscribers.
///
/// Subscribers may unsubscribe (or subscribe) from inside their callback;
/// the set notified is the one present when the frame started.
pub fn advance_frame() -> u64 {
    let frame = FRAME.with(|f| {
        let next = f.get() + 1;
        f.set(next);
        next
    });

    let callbacks: Vec<FrameCallback> =
        SUBSCRIBERS.with(|subs| subs.borrow().iter().map(|(_, cb)| cb.clone()).collect());
    for callback in callbacks {
        callback(frame);
    }

    frame
}

/// Current frame number (0 before the first tick).
pub fn frame_count() -> u64 {
    FRAME.with(|f| f.get())
}

/// Number of live subscribers.
pub fn subscriber_count() -> usize {
    SUBSCRIBERS.with(|subs| subs.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_each_frame() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        let unsubscribe = on_frame(move |frame| seen_clone.borrow_mut().push(frame));
        advance_frame();
        advance_frame();
        unsubscribe();
        advance_frame();

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(frame_count(), 3);
        assert_eq!(subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_from_inside_callback() {
        let slot: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
        let slot_clone = slot.clone();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();

        let unsubscribe = on_frame(move |_| {
            calls_clone.set(calls_clone.get() + 1);
            let taken = slot_clone.borrow_mut().take();
            if let Some(unsubscribe) = taken {
                unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(unsubscribe);

        advance_frame();
        advance_frame();
        assert_eq!(calls.get(), 1);
    }
}
