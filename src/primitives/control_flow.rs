//! Control Flow Primitives - Conditional and async rendering.
//!
//! - [`show`] - Conditional rendering based on a reactive condition
//! - [`when`] - Async handling with pending/then/catch states
//!
//! # Pattern: EffectScope-based Cleanup
//!
//! Both primitives use spark-signals' EffectScope for cleanup:
//! 1. Create an EffectScope to manage the lifetime of child effects/components
//! 2. Run rendering logic inside `scope.run()`
//! 3. Register cleanup with `on_scope_dispose()`
//! 4. Return a cleanup that stops the scope, bound to the parent's lifetime
//!
//! # Pattern: Context Restoration
//!
//! Branches re-render long after the call site returned, so the parent index
//! and the enclosing failure boundary are captured at creation time and
//! restored around every branch render.
//!
//! ```ignore
//! box_primitive(BoxProps {
//!     children: Some(Box::new(|| {
//!         // show() captures parent = this box
//!         show(
//!             move || ready.get(),
//!             || text(TextProps { content: "Ready".into(), ..Default::default() }),
//!             None::<fn() -> Cleanup>,
//!         );
//!     })),
//!     ..Default::default()
//! });
//! ```
//!
//! A branch that panics while re-rendering inside an [`error_boundary`]
//! trips that boundary instead of unwinding through the effect.
//!
//! [`error_boundary`]: super::error_boundary

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, effect_scope, on_scope_dispose};

use crate::engine::{get_current_parent_index, pop_parent_context, push_parent_context};
use crate::primitives::boundary::{current_boundary, guarded};
use crate::primitives::types::bind_to_parent;
use crate::primitives::Cleanup;

/// Conditionally render components based on a reactive condition.
///
/// The then branch renders while `condition` is true, the optional else
/// branch while it is false. A branch is only rebuilt when the condition
/// actually changes.
///
/// # Example
///
/// ```ignore
/// use glowfolio::primitives::{show, text, TextProps};
/// use spark_signals::signal;
///
/// let ready = signal(false);
/// let ready_clone = ready.clone();
///
/// let cleanup = show(
///     move || ready_clone.get(),
///     || text(TextProps { content: "Scene".into(), ..Default::default() }),
///     Some(|| text(TextProps { content: "Placeholder".into(), ..Default::default() })),
/// );
///
/// ready.set(true); // placeholder destroyed, scene created
/// cleanup();
/// ```
pub fn show<ThenF, ElseF, ThenR, ElseR>(
    condition: impl Fn() -> bool + 'static,
    then_fn: ThenF,
    else_fn: Option<ElseF>,
) -> Cleanup
where
    ThenF: Fn() -> ThenR + 'static,
    ElseF: Fn() -> ElseR + 'static,
    ThenR: Into<Cleanup>,
    ElseR: Into<Cleanup>,
{
    let parent_index = get_current_parent_index();
    let boundary = current_boundary();

    let cleanup: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let was_true: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));

    let scope = effect_scope(false);

    let cleanup_for_update = cleanup.clone();
    let cleanup_for_dispose = cleanup.clone();

    let update = move |new_condition: bool| {
        if was_true.get() == Some(new_condition) {
            return;
        }
        was_true.set(Some(new_condition));

        let previous = cleanup_for_update.borrow_mut().take();
        if let Some(previous) = previous {
            previous();
        }

        if let Some(parent) = parent_index {
            push_parent_context(parent);
        }

        let new_cleanup = guarded(boundary.as_ref(), "show", || {
            if new_condition {
                Some(then_fn().into())
            } else {
                else_fn.as_ref().map(|f| f().into())
            }
        })
        .flatten();

        if parent_index.is_some() {
            pop_parent_context();
        }

        *cleanup_for_update.borrow_mut() = new_cleanup;
    };

    scope.run(move || {
        // Initial render happens on the first effect run
        let _effect_cleanup = effect(move || {
            let current = condition();
            update(current);
        });

        on_scope_dispose(move || {
            let taken = cleanup_for_dispose.borrow_mut().take();
            if let Some(cleanup_fn) = taken {
                cleanup_fn();
            }
        });
    });

    bind_to_parent(parent_index, Box::new(move || scope.stop()))
}

// =============================================================================
// when() - Async state rendering
// =============================================================================

/// Async state for when() rendering.
///
/// Async work updates a `Signal<AsyncState<T, E>>`; the UI follows.
#[derive(Clone, Debug, PartialEq)]
pub enum AsyncState<T, E> {
    /// Operation in progress.
    Pending,
    /// Operation completed with a value.
    Resolved(T),
    /// Operation failed.
    Rejected(E),
}

impl<T, E> AsyncState<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncState::Pending)
    }
}

/// Options for when() async rendering.
///
/// ```ignore
/// WhenOptions {
///     pending: Some(|| text(TextProps { content: "Loading...".into(), ..Default::default() })),
///     then_fn: |scene| scene_view(scene),
///     catch_fn: Some(|err| text(TextProps { content: format!("Error: {}", err).into(), ..Default::default() })),
///     _marker: PhantomData,
/// }
/// ```
pub struct WhenOptions<T, E, PendingF, ThenF, CatchF>
where
    T: Clone + 'static,
    E: Clone + std::fmt::Display + 'static,
{
    /// Render function for Pending (nothing rendered if None).
    pub pending: Option<PendingF>,
    /// Render function for Resolved.
    pub then_fn: ThenF,
    /// Render function for Rejected (logged and nothing rendered if None).
    pub catch_fn: Option<CatchF>,
    pub _marker: std::marker::PhantomData<(T, E)>,
}

/// Render based on async state.
///
/// `state_getter` is tracked; every change tears down the previous render
/// and builds the branch for the new state.
pub fn when<T, E, PendingF, ThenF, CatchF, PendingR, ThenR, CatchR>(
    state_getter: impl Fn() -> AsyncState<T, E> + 'static,
    options: WhenOptions<T, E, PendingF, ThenF, CatchF>,
) -> Cleanup
where
    T: Clone + 'static,
    E: Clone + std::fmt::Display + 'static,
    PendingF: Fn() -> PendingR + 'static,
    ThenF: Fn(T) -> ThenR + 'static,
    CatchF: Fn(E) -> CatchR + 'static,
    PendingR: Into<Cleanup>,
    ThenR: Into<Cleanup>,
    CatchR: Into<Cleanup>,
{
    let parent_index = get_current_parent_index();
    let boundary = current_boundary();

    let scope = effect_scope(false);

    let current_cleanup: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let cleanup_for_effect = current_cleanup.clone();
    let cleanup_for_dispose = current_cleanup.clone();

    scope.run(move || {
        let _effect_cleanup = effect(move || {
            let state = state_getter();

            let previous = cleanup_for_effect.borrow_mut().take();
            if let Some(previous) = previous {
                previous();
            }

            if let Some(parent) = parent_index {
                push_parent_context(parent);
            }

            let new_cleanup: Option<Cleanup> = guarded(boundary.as_ref(), "when", || match state {
                AsyncState::Pending => options.pending.as_ref().map(|f| f().into()),
                AsyncState::Resolved(data) => Some((options.then_fn)(data).into()),
                AsyncState::Rejected(err) => match options.catch_fn.as_ref() {
                    Some(catch_fn) => Some(catch_fn(err).into()),
                    None => {
                        tracing::warn!(error = %err, "unhandled rejection in when()");
                        None
                    }
                },
            })
            .flatten();

            if parent_index.is_some() {
                pop_parent_context();
            }

            *cleanup_for_effect.borrow_mut() = new_cleanup;
        });

        on_scope_dispose(move || {
            let taken = cleanup_for_dispose.borrow_mut().take();
            if let Some(cleanup_fn) = taken {
                cleanup_fn();
            }
        });
    });

    bind_to_parent(parent_index, Box::new(move || scope.stop()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        allocate_index, arrays, get_allocated_count, get_index, release_index, reset_registry,
    };
    use crate::primitives::{box_primitive, BoxProps};
    use spark_signals::signal;
    use std::marker::PhantomData;

    /// Helper to create a test component that tracks allocation.
    fn create_test_component() -> Cleanup {
        let index = allocate_index(None);
        Box::new(move || release_index(index))
    }

    #[test]
    fn test_show_renders_then_when_true() {
        reset_registry();

        let condition = signal(true);
        let cond_clone = condition.clone();

        let _cleanup = show(
            move || cond_clone.get(),
            create_test_component,
            None::<fn() -> Cleanup>,
        );

        assert_eq!(get_allocated_count(), 1, "then branch should create one component");
    }

    #[test]
    fn test_show_toggles_components() {
        reset_registry();

        let condition = signal(true);
        let cond_clone = condition.clone();

        let _cleanup = show(
            move || cond_clone.get(),
            create_test_component,
            Some(create_test_component),
        );
        assert_eq!(get_allocated_count(), 1);

        condition.set(false);
        assert_eq!(
            get_allocated_count(),
            1,
            "should still have exactly one component after toggle"
        );

        condition.set(true);
        assert_eq!(get_allocated_count(), 1);
    }

    #[test]
    fn test_show_no_change_no_recreate() {
        reset_registry();

        let renders = Rc::new(Cell::new(0));
        let renders_clone = renders.clone();
        let condition = signal(1u8);
        let cond_clone = condition.clone();

        let _cleanup = show(
            move || cond_clone.get() > 0,
            move || {
                renders_clone.set(renders_clone.get() + 1);
                create_test_component()
            },
            None::<fn() -> Cleanup>,
        );

        condition.set(2);
        condition.set(3);
        assert_eq!(renders.get(), 1, "truthiness unchanged, branch kept");
    }

    #[test]
    fn test_show_cleanup_destroys_all() {
        reset_registry();

        let condition = signal(true);
        let cond_clone = condition.clone();

        let cleanup = show(
            move || cond_clone.get(),
            create_test_component,
            None::<fn() -> Cleanup>,
        );
        assert_eq!(get_allocated_count(), 1);

        cleanup();
        assert_eq!(get_allocated_count(), 0, "cleanup should destroy the component");

        condition.set(false);
        condition.set(true);
        assert_eq!(get_allocated_count(), 0, "stopped show no longer reacts");
    }

    #[test]
    fn test_show_children_keep_parent_after_toggle() {
        reset_registry();

        let condition = signal(false);
        let cond_clone = condition.clone();

        let _cleanup = box_primitive(BoxProps {
            id: Some("slot".into()),
            children: Some(Box::new(move || {
                show(
                    move || cond_clone.get(),
                    || {
                        let index = allocate_index(Some("late"));
                        Box::new(move || release_index(index)) as Cleanup
                    },
                    None::<fn() -> Cleanup>,
                );
            })),
            ..Default::default()
        });

        condition.set(true);
        let slot = get_index("slot").unwrap();
        let late = get_index("late").unwrap();
        assert_eq!(arrays::parent_of(late), Some(slot), "branch created under the captured parent");
    }

    #[test]
    fn test_show_stops_when_parent_released() {
        reset_registry();

        let renders = Rc::new(Cell::new(0));
        let renders_clone = renders.clone();
        let condition = signal(true);
        let cond_clone = condition.clone();

        let cleanup = box_primitive(BoxProps {
            children: Some(Box::new(move || {
                show(
                    move || cond_clone.get(),
                    move || {
                        renders_clone.set(renders_clone.get() + 1);
                        create_test_component()
                    },
                    None::<fn() -> Cleanup>,
                );
            })),
            ..Default::default()
        });

        cleanup();
        condition.set(false);
        condition.set(true);
        assert_eq!(renders.get(), 1);
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_when_follows_state() {
        reset_registry();

        let state: spark_signals::Signal<AsyncState<u32, String>> = signal(AsyncState::Pending);
        let state_clone = state.clone();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let (s1, s2, s3) = (seen.clone(), seen.clone(), seen.clone());

        let _cleanup = when(
            move || state_clone.get(),
            WhenOptions {
                pending: Some(move || {
                    s1.borrow_mut().push("pending".into());
                    create_test_component()
                }),
                then_fn: move |value: u32| {
                    s2.borrow_mut().push(format!("value {value}"));
                    create_test_component()
                },
                catch_fn: Some(move |err: String| {
                    s3.borrow_mut().push(format!("error {err}"));
                    create_test_component()
                }),
                _marker: PhantomData,
            },
        );

        state.set(AsyncState::Resolved(7));
        state.set(AsyncState::Rejected("boom".into()));

        assert_eq!(*seen.borrow(), vec!["pending", "value 7", "error boom"]);
        assert_eq!(get_allocated_count(), 1, "previous renders cleaned up");
    }

    #[test]
    fn test_when_without_pending_renders_nothing() {
        reset_registry();

        let state: spark_signals::Signal<AsyncState<u32, String>> = signal(AsyncState::Pending);
        let state_clone = state.clone();

        let _cleanup = when(
            move || state_clone.get(),
            WhenOptions {
                pending: None::<fn() -> Cleanup>,
                then_fn: |_: u32| create_test_component(),
                catch_fn: None::<fn(String) -> Cleanup>,
                _marker: PhantomData,
            },
        );
        assert_eq!(get_allocated_count(), 0);

        state.set(AsyncState::Rejected("ignored".into()));
        assert_eq!(get_allocated_count(), 0);
    }
}
