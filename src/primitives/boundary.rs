//! Error Boundary - One-shot failure containment for a subtree.
//!
//! A boundary renders its children inside a container box. If the children
//! fail, the container is emptied and the fallback is rendered in its place.
//! Siblings of the boundary never see the failure.
//!
//! # Failure paths
//!
//! - **Synchronous**: `children` returns `Err` or panics while mounting.
//! - **Asynchronous**: a descendant reports later through the handle it
//!   captured with [`current_boundary`] (a rejected load, a draw error on a
//!   frame tick, a panic while a branch re-renders).
//!
//! Asynchronous reports are recorded immediately and torn down on the next
//! executor turn, so a failing effect is never stopped from inside itself.
//!
//! # One-shot
//!
//! The first caught failure moves the handle from `Healthy` to `Failed` and
//! logs one `tracing::error!` event. Later reports are ignored. A tripped
//! handle stays tripped: mounting a new boundary with the same handle goes
//! straight to the fallback.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use spark_signals::{effect, effect_scope, on_scope_dispose, signal, Signal};

use crate::engine::arrays;
use crate::engine::{
    allocate_index, on_destroy, parent_context_depth, pop_parent_context, push_parent_context,
    release_children, release_index, truncate_parent_context,
};
use crate::error::{RenderError, SceneError};
use crate::pipeline::spawn_local;
use crate::types::ComponentType;

use super::types::Cleanup;

// =============================================================================
// Caught Errors
// =============================================================================

/// What went wrong inside the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The asset could not be fetched or parsed.
    Load,
    /// The asset loaded but refused to initialise.
    Init,
    /// A render or draw call returned an error.
    Render,
    /// Something panicked.
    Panic,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::Load => "load",
            FailureKind::Init => "init",
            FailureKind::Render => "render",
            FailureKind::Panic => "panic",
        })
    }
}

impl From<&SceneError> for FailureKind {
    fn from(error: &SceneError) -> Self {
        match error {
            SceneError::UnsupportedScheme(_)
            | SceneError::NotFound(_)
            | SceneError::Parse { .. }
            | SceneError::Spawn(_) => FailureKind::Load,
            SceneError::Init(_) => FailureKind::Init,
            SceneError::Draw { .. } => FailureKind::Render,
        }
    }
}

/// A failure intercepted by a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaughtError {
    pub kind: FailureKind,
    pub message: String,
    /// Stage the failure surfaced in ("mount", "load", "draw", ...).
    pub context: String,
}

impl CaughtError {
    pub fn new(kind: FailureKind, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: context.into(),
        }
    }

    pub fn from_scene(error: &SceneError, context: impl Into<String>) -> Self {
        Self::new(error.into(), error.to_string(), context)
    }

    pub fn from_render(error: &RenderError, context: impl Into<String>) -> Self {
        match error {
            RenderError::Scene(scene) => Self::from_scene(scene, context),
            RenderError::Message(message) => Self::new(FailureKind::Render, message, context),
        }
    }

    pub fn from_panic(payload: &(dyn Any + Send), context: impl Into<String>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::new(FailureKind::Panic, message, context)
    }
}

impl fmt::Display for CaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure during {}: {}", self.kind, self.context, self.message)
    }
}

/// Crash flag of a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    Healthy,
    Failed(CaughtError),
}

// =============================================================================
// Boundary Handle
// =============================================================================

type Reporter = Rc<dyn Fn(&str, &CaughtError)>;

struct BoundaryInner {
    name: String,
    state: RefCell<BoundaryState>,
    /// Flipped on the executor turn after an asynchronous trip.
    tripped: Signal<bool>,
    reporter: RefCell<Option<Reporter>>,
}

/// Shared handle to a boundary's crash flag.
///
/// Cheap to clone. Descendants keep a clone to report failures that happen
/// after mount.
#[derive(Clone)]
pub struct BoundaryHandle {
    inner: Rc<BoundaryInner>,
}

impl fmt::Debug for BoundaryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryHandle")
            .field("name", &self.inner.name)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl BoundaryHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(BoundaryInner {
                name: name.into(),
                state: RefCell::new(BoundaryState::Healthy),
                tripped: signal(false),
                reporter: RefCell::new(None),
            }),
        }
    }

    /// Observe every recorded failure (called right after it is logged).
    pub fn with_reporter(self, reporter: impl Fn(&str, &CaughtError) + 'static) -> Self {
        *self.inner.reporter.borrow_mut() = Some(Rc::new(reporter));
        self
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn state(&self) -> BoundaryState {
        self.inner.state.borrow().clone()
    }

    pub fn is_tripped(&self) -> bool {
        matches!(*self.inner.state.borrow(), BoundaryState::Failed(_))
    }

    /// The failure that tripped the boundary, if any.
    pub fn caught(&self) -> Option<CaughtError> {
        match &*self.inner.state.borrow() {
            BoundaryState::Failed(error) => Some(error.clone()),
            BoundaryState::Healthy => None,
        }
    }

    /// Record a failure without scheduling the teardown.
    ///
    /// Returns `true` if this was the first failure. Only the first is logged.
    pub fn record(&self, error: CaughtError) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            if matches!(*state, BoundaryState::Failed(_)) {
                tracing::debug!(
                    boundary = %self.inner.name,
                    error = %error,
                    "boundary already tripped, ignoring report"
                );
                return false;
            }
            *state = BoundaryState::Failed(error.clone());
        }

        tracing::error!(
            boundary = %self.inner.name,
            kind = %error.kind,
            context = %error.context,
            error = %error.message,
            "caught failure, rendering fallback"
        );

        let reporter = self.inner.reporter.borrow().clone();
        if let Some(reporter) = reporter {
            reporter(&self.inner.name, &error);
        }
        true
    }

    /// Report a failure from outside the boundary's own mount.
    ///
    /// The subtree is replaced by the fallback on the next executor turn.
    pub fn trip(&self, error: CaughtError) -> bool {
        if !self.record(error) {
            return false;
        }

        let tripped = self.inner.tripped.clone();
        let deferred = tripped.clone();
        if spawn_local(async move {
            deferred.set(true);
        }).is_err() {
            tripped.set(true);
        }
        true
    }

    fn tripped_signal(&self) -> Signal<bool> {
        self.inner.tripped.clone()
    }
}

// =============================================================================
// Boundary Context
// =============================================================================

thread_local! {
    static BOUNDARY_STACK: RefCell<Vec<BoundaryHandle>> = RefCell::new(Vec::new());
    /// Depth of [`contain_panic`] calls on this thread.
    static CONTAINING: Cell<usize> = const { Cell::new(0) };
}

/// `catch_unwind` for a panic a boundary is about to report.
///
/// While `f` runs, [`panic_is_contained`] is true, so a panic hook can stay
/// silent and leave the boundary's `tracing::error!` as the only record.
pub fn contain_panic<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    CONTAINING.with(|depth| depth.set(depth.get() + 1));
    let result = catch_unwind(AssertUnwindSafe(f));
    CONTAINING.with(|depth| depth.set(depth.get().saturating_sub(1)));
    result
}

/// True while the current thread runs inside [`contain_panic`].
pub fn panic_is_contained() -> bool {
    CONTAINING.with(|depth| depth.get() > 0)
}

/// Innermost boundary around the component being created.
pub fn current_boundary() -> Option<BoundaryHandle> {
    BOUNDARY_STACK.with(|stack| stack.borrow().last().cloned())
}

fn push_boundary(handle: BoundaryHandle) {
    BOUNDARY_STACK.with(|stack| stack.borrow_mut().push(handle));
}

fn pop_boundary() {
    BOUNDARY_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

/// Run a deferred render with `boundary` restored as the current boundary.
///
/// Inside a boundary a panic is caught, reported through [`BoundaryHandle::trip`]
/// and `None` is returned. Outside any boundary the panic propagates.
pub(crate) fn guarded<R>(
    boundary: Option<&BoundaryHandle>,
    stage: &str,
    render: impl FnOnce() -> R,
) -> Option<R> {
    let Some(boundary) = boundary else {
        return Some(render());
    };

    let depth = parent_context_depth();
    push_boundary(boundary.clone());
    let result = contain_panic(render);
    pop_boundary();

    match result {
        Ok(value) => Some(value),
        Err(payload) => {
            truncate_parent_context(depth);
            boundary.trip(CaughtError::from_panic(payload.as_ref(), stage));
            None
        }
    }
}

// =============================================================================
// error_boundary()
// =============================================================================

/// Render `children` inside a failure boundary.
///
/// `children` builds the guarded subtree and returns its cleanup, or an error
/// if it could not render. `fallback` renders the replacement for a caught
/// failure; it is called at most once per mount.
///
/// # Example
///
/// ```ignore
/// let handle = BoundaryHandle::new("hero-scene");
/// error_boundary(
///     handle.clone(),
///     move || {
///         let scene = load_scene()?;
///         Ok(scene_view(scene))
///     },
///     |caught| fallback_card(caught),
/// );
/// ```
pub fn error_boundary<C, F>(handle: BoundaryHandle, children: C, fallback: F) -> Cleanup
where
    C: FnOnce() -> Result<Cleanup, RenderError> + 'static,
    F: Fn(&CaughtError) -> Cleanup + 'static,
{
    // 1. CONTAINER - children and fallback both live inside it
    let container = allocate_index(None);
    arrays::set_component_type(container, ComponentType::Box);

    let content: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));

    // 2. SYNCHRONOUS MOUNT (skipped for an already tripped handle)
    if !handle.is_tripped() {
        let depth = parent_context_depth();
        push_parent_context(container);
        push_boundary(handle.clone());
        let result = contain_panic(children);
        pop_boundary();
        truncate_parent_context(depth);

        match result {
            Ok(Ok(cleanup)) => *content.borrow_mut() = Some(cleanup),
            Ok(Err(error)) => {
                handle.record(CaughtError::from_render(&error, "mount"));
            }
            Err(payload) => {
                handle.record(CaughtError::from_panic(payload.as_ref(), "mount"));
            }
        }
    }

    // 3. FALLBACK SWAP - runs now if mount failed, later on an async trip
    let fallback_shown = Rc::new(Cell::new(false));
    let show_fallback = {
        let handle = handle.clone();
        let content = content.clone();
        move || {
            if fallback_shown.get() {
                return;
            }
            let Some(caught) = handle.caught() else {
                return;
            };
            fallback_shown.set(true);

            let previous = content.borrow_mut().take();
            if let Some(previous) = previous {
                previous();
            }
            release_children(container);

            push_parent_context(container);
            let cleanup = fallback(&caught);
            pop_parent_context();
            *content.borrow_mut() = Some(cleanup);
        }
    };

    let scope = effect_scope(false);
    let tripped = handle.tripped_signal();
    let content_for_dispose = content.clone();

    scope.run(move || {
        let _effect_cleanup = effect(move || {
            // Tracks the async trip; a failed mount is already recorded.
            let _ = tripped.get();
            show_fallback();
        });

        on_scope_dispose(move || {
            let taken = content_for_dispose.borrow_mut().take();
            if let Some(cleanup_fn) = taken {
                cleanup_fn();
            }
        });
    });

    on_destroy(container, move || scope.stop());

    Box::new(move || release_index(container))
}
