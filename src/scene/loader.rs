//! Resilient scene loader.
//!
//! ```text
//! error_boundary ─┬─ show(ready)
//! │               │    ├─ false: placeholder
//! │               │    └─ true:  when(lazy.request())
//! │               │                ├─ Pending:  placeholder
//! │               │                ├─ Resolved: scene_view (init, then draw per frame)
//! │               │                └─ Rejected: trip boundary
//! └─ fallback_card (after any caught failure)
//! ```
//!
//! The readiness flag starts false and is set once, by a task spawned at
//! mount, if the capability check passes. The placeholder, the scene and the
//! fallback card all occupy the same number of rows.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

use spark_signals::signal;

use crate::engine::{get_index, on_destroy};
use crate::pipeline::{on_frame, spawn_local, viewport_width};
use crate::primitives::{
    box_primitive, contain_panic, current_boundary, error_boundary, show, text, when,
    BoundaryHandle, BoxProps, CaughtError, Cleanup, TextProps, WhenOptions,
};
use crate::renderer::truncate_text;
use crate::types::{Attr, Rgba, TextAlign};

use super::capability::Capability;
use super::lazy::LazyScene;
use super::{LoadedScene, SceneSize};

pub const FALLBACK_BADGE: &str = "Rendering fallback";
pub const FALLBACK_HEADING: &str = "Something went wrong loading this section.";
pub const FALLBACK_SUBTEXT: &str = "You can still browse the rest of the page.";

/// Properties for [`resilient_scene`].
pub struct SceneProps {
    /// Id of the scene box (the placeholder and fallback use `{id}-placeholder`
    /// and `{id}-fallback`).
    pub id: String,
    pub lazy: LazyScene,
    /// Height of the scene box in rows.
    pub rows: u16,
    /// Width in cells (default: viewport width).
    pub cols: Option<u16>,
    pub capability: Rc<dyn Capability>,
    /// Placeholder and scene background.
    pub background: Rgba,
    /// Scene foreground.
    pub foreground: Rgba,
    /// Fallback text color.
    pub text_color: Rgba,
    /// Shared crash flag (default: a fresh one named after `id`).
    pub boundary: Option<BoundaryHandle>,
}

impl SceneProps {
    pub fn new(lazy: LazyScene, capability: Rc<dyn Capability>) -> Self {
        Self {
            id: "scene".to_string(),
            lazy,
            rows: 12,
            cols: None,
            capability,
            background: Rgba::TERMINAL_DEFAULT,
            foreground: Rgba::TERMINAL_DEFAULT,
            text_color: Rgba::TERMINAL_DEFAULT,
            boundary: None,
        }
    }
}

/// Plain style values the loader's render functions share.
#[derive(Clone)]
struct Look {
    id: String,
    rows: u16,
    cols: Option<u16>,
    background: Rgba,
    foreground: Rgba,
    text_color: Rgba,
}

// =============================================================================
// Placeholder and fallback
// =============================================================================

/// Solid background box, `rows` tall.
pub fn placeholder(id: &str, rows: u16, background: Rgba) -> Cleanup {
    box_primitive(BoxProps {
        id: Some(format!("{id}-placeholder")),
        height: Some(rows.into()),
        bg: Some(background),
        ..Default::default()
    })
}

/// Card shown in place of a failed scene, `rows` tall.
pub fn fallback_card(id: &str, rows: u16, background: Rgba, color: Rgba) -> Cleanup {
    let muted = color.dim(0.7);
    box_primitive(BoxProps {
        id: Some(format!("{id}-fallback")),
        height: Some(rows.into()),
        bg: Some(background),
        padding_x: Some(2),
        padding_y: Some(1),
        gap: Some(1),
        align: Some(TextAlign::Center),
        children: Some(Box::new(move || {
            text(TextProps {
                content: format!("( {FALLBACK_BADGE} )").into(),
                fg: Some(muted.into()),
                ..Default::default()
            });
            text(TextProps {
                content: FALLBACK_HEADING.into(),
                fg: Some(color.into()),
                attrs: Some(Attr::BOLD.into()),
                ..Default::default()
            });
            text(TextProps {
                content: FALLBACK_SUBTEXT.into(),
                fg: Some(muted.into()),
                ..Default::default()
            });
        })),
        ..Default::default()
    })
}

// =============================================================================
// Scene view
// =============================================================================

/// Initialise a loaded scene and draw it on every frame tick.
///
/// Init and draw failures (errors and panics) are reported to the current
/// boundary; the view stops drawing after the first one. Outside a boundary
/// the failure is only logged.
pub fn scene_view(
    scene: LoadedScene,
    id: &str,
    size: impl Fn() -> SceneSize + 'static,
    background: Rgba,
    foreground: Rgba,
) -> Cleanup {
    let boundary = current_boundary();
    let report = move |caught: CaughtError| match &boundary {
        Some(boundary) => {
            boundary.trip(caught);
        }
        None => tracing::error!(error = %caught, "scene failed outside a boundary"),
    };

    // 1. INIT
    let initial = size();
    let init = contain_panic(|| scene.0.init(initial));
    let view = match init {
        Ok(Ok(view)) => view,
        Ok(Err(error)) => {
            report(CaughtError::from_scene(&error, "init"));
            return placeholder(id, initial.rows, background);
        }
        Err(payload) => {
            report(CaughtError::from_panic(payload.as_ref(), "init"));
            return placeholder(id, initial.rows, background);
        }
    };

    // 2. BOX - rows are redrawn into a signal the text reads
    let content = signal(String::new());
    let rows = initial.rows;
    let cleanup = box_primitive(BoxProps {
        id: Some(id.to_string()),
        height: Some(rows.into()),
        bg: Some(background),
        fg: Some(foreground.into()),
        children: Some(Box::new({
            let content = content.clone();
            move || {
                text(TextProps {
                    content: content.into(),
                    ..Default::default()
                });
            }
        })),
        ..Default::default()
    });

    // 3. FRAME SUBSCRIPTION
    let view = Rc::new(RefCell::new(view));
    let stopped = Rc::new(Cell::new(false));
    let draw = move |frame: u64| {
        if stopped.get() {
            return;
        }
        let size = size();
        let result = contain_panic(|| view.borrow_mut().draw(size, frame));
        match result {
            Ok(Ok(lines)) => {
                let clipped: Vec<String> = lines
                    .iter()
                    .take(size.rows as usize)
                    .map(|line| truncate_text(line, size.cols))
                    .collect();
                content.set(clipped.join("\n"));
            }
            Ok(Err(error)) => {
                stopped.set(true);
                report(CaughtError::from_scene(&error, "draw"));
            }
            Err(payload) => {
                stopped.set(true);
                report(CaughtError::from_panic(payload.as_ref(), "draw"));
            }
        }
    };
    draw(crate::pipeline::frame_count());
    let unsubscribe = on_frame(draw);

    if let Some(index) = get_index(id) {
        on_destroy(index, unsubscribe);
    }
    cleanup
}

// =============================================================================
// Loader
// =============================================================================

/// Render the scene as an optional, failure-contained enhancement.
///
/// Returns a cleanup for the whole loader.
pub fn resilient_scene(props: SceneProps) -> Cleanup {
    let look = Look {
        id: props.id.clone(),
        rows: props.rows,
        cols: props.cols,
        background: props.background,
        foreground: props.foreground,
        text_color: props.text_color,
    };
    let boundary = props
        .boundary
        .unwrap_or_else(|| BoundaryHandle::new(props.id.clone()));

    // 1. READINESS - checked once, after mount
    let ready = signal(false);
    let ready_for_check = ready.clone();
    let capability = props.capability;
    let url = props.lazy.url().to_string();
    let check = async move {
        if capability.is_interactive() {
            ready_for_check.set(true);
        } else {
            tracing::debug!(url = %url, "environment not interactive, keeping placeholder");
        }
    };
    if let Err(error) = spawn_local(check) {
        tracing::warn!(error = %error, "could not schedule capability check");
    }

    // 2. GUARDED SUBTREE
    let lazy = props.lazy;
    let subtree_look = look.clone();
    let children = move || {
        let look = subtree_look;
        let waiting = {
            let look = look.clone();
            move || placeholder(&look.id, look.rows, look.background)
        };
        let loading = waiting.clone();

        Ok(show(
            move || ready.get(),
            move || load_scene(&lazy, &look, loading.clone()),
            Some(waiting),
        ))
    };

    let fallback = move |_: &CaughtError| {
        fallback_card(&look.id, look.rows, look.background, look.text_color)
    };

    error_boundary(boundary, children, fallback)
}

fn load_scene(
    lazy: &LazyScene,
    look: &Look,
    placeholder_fn: impl Fn() -> Cleanup + Clone + 'static,
) -> Cleanup {
    let state = lazy.request();
    let boundary = current_boundary();

    let view_look = look.clone();
    let rejected = placeholder_fn.clone();

    when(
        move || state.get(),
        WhenOptions {
            pending: Some(placeholder_fn),
            then_fn: move |scene: LoadedScene| {
                let rows = view_look.rows;
                let cols = view_look.cols;
                scene_view(
                    scene,
                    &view_look.id,
                    move || SceneSize {
                        cols: cols.unwrap_or_else(viewport_width),
                        rows,
                    },
                    view_look.background,
                    view_look.foreground,
                )
            },
            catch_fn: Some(move |error: crate::error::SceneError| {
                if let Some(boundary) = &boundary {
                    boundary.trip(CaughtError::from_scene(&error, "load"));
                }
                rejected()
            }),
            _marker: PhantomData,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use futures::channel::oneshot;
    use futures::future::{FutureExt, LocalBoxFuture};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use crate::engine::{get_allocated_count, reset_registry};
    use crate::error::{SceneError, SceneResult};
    use crate::pipeline::{mount, run_until_stalled, MountOptions};
    use crate::primitives::{AsyncState, BoundaryState, FailureKind};
    use crate::scene::{
        BuiltinSceneSource, Interactive, NonInteractive, OrbScene, SceneModule, SceneSource,
    };

    fn counting_boundary() -> (BoundaryHandle, Rc<Cell<usize>>) {
        let reports = Rc::new(Cell::new(0));
        let reports_clone = reports.clone();
        let boundary = BoundaryHandle::new("hero-scene")
            .with_reporter(move |_, _| reports_clone.set(reports_clone.get() + 1));
        (boundary, reports)
    }

    fn props(url: &str, capability: Rc<dyn Capability>) -> (SceneProps, Rc<Cell<usize>>) {
        let (boundary, reports) = counting_boundary();
        let mut props = SceneProps::new(
            LazyScene::new(Rc::new(BuiltinSceneSource), url),
            capability,
        );
        props.rows = 10;
        props.boundary = Some(boundary);
        (props, reports)
    }

    /// Counts `ERROR` events.
    struct ErrorEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Run `f` under a subscriber and return how many error events it logged.
    fn count_errors(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorEvents(count.clone()));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    type ModuleResult = SceneResult<Rc<dyn SceneModule>>;

    /// Source whose one fetch settles when the test sends a result.
    struct Deferred {
        receiver: RefCell<Option<oneshot::Receiver<ModuleResult>>>,
    }

    impl Deferred {
        fn new() -> (Self, oneshot::Sender<ModuleResult>) {
            let (sender, receiver) = oneshot::channel();
            let source = Self {
                receiver: RefCell::new(Some(receiver)),
            };
            (source, sender)
        }
    }

    impl SceneSource for Deferred {
        fn fetch(&self, url: &str) -> LocalBoxFuture<'static, ModuleResult> {
            let url = url.to_string();
            let receiver = self.receiver.borrow_mut().take();
            async move {
                match receiver {
                    Some(receiver) => receiver.await.unwrap_or(Err(SceneError::NotFound(url))),
                    None => Err(SceneError::NotFound(url)),
                }
            }
            .boxed_local()
        }
    }

    fn deferred_props() -> (SceneProps, oneshot::Sender<ModuleResult>, Rc<Cell<usize>>) {
        let (source, sender) = Deferred::new();
        let (mut props, reports) = props("deferred://hero", Rc::new(Interactive));
        props.lazy = LazyScene::new(Rc::new(source), "deferred://hero");
        (props, sender, reports)
    }

    #[test]
    fn test_non_interactive_never_fetches() {
        reset_registry();
        let (props, reports) = props("builtin://orb", Rc::new(NonInteractive));
        let lazy = props.lazy.clone();

        let mut handle = mount(move || resilient_scene(props), MountOptions { size: Some((40, 20)) });
        let frame = handle.settle(3);

        assert_eq!(lazy.fetch_count(), 0);
        assert!(get_index("scene-placeholder").is_some());
        assert!(get_index("scene").is_none());
        assert_eq!(frame.height(), 10);
        assert_eq!(reports.get(), 0);
    }

    #[test]
    fn test_successful_load_replaces_placeholder() {
        reset_registry();
        let (props, reports) = props("builtin://orb", Rc::new(Interactive));

        let mut handle = mount(move || resilient_scene(props), MountOptions { size: Some((40, 20)) });
        let frame = handle.settle(2);

        assert!(get_index("scene").is_some());
        assert!(get_index("scene-placeholder").is_none());
        assert!(frame.contains("@") || frame.contains("%") || frame.contains("#"));
        assert!(!frame.contains(FALLBACK_HEADING));
        assert_eq!(reports.get(), 0);
    }

    #[test]
    fn test_rejected_load_shows_fallback() {
        reset_registry();
        let (props, reports) = props("builtin://missing", Rc::new(Interactive));
        let boundary = props.boundary.clone().unwrap();

        let mut handle = mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
        let frame = handle.settle(2);

        assert!(frame.contains(FALLBACK_HEADING));
        assert!(frame.contains(FALLBACK_BADGE));
        assert!(get_index("scene-placeholder").is_none());
        assert!(get_index("scene").is_none());
        assert_eq!(boundary.caught().map(|c| c.kind), Some(FailureKind::Load));
        assert_eq!(reports.get(), 1);
    }

    #[test]
    fn test_init_error_shows_fallback() {
        reset_registry();
        let (props, reports) = props("builtin://fail/init", Rc::new(Interactive));

        let mut handle = mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
        let frame = handle.settle(2);

        assert!(frame.contains(FALLBACK_HEADING));
        assert_eq!(reports.get(), 1);
    }

    #[test]
    fn test_draw_panic_is_caught_once() {
        reset_registry();
        let (props, reports) = props("builtin://fail/panic", Rc::new(Interactive));
        let boundary = props.boundary.clone().unwrap();

        let mut handle = mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
        let frame = handle.settle(8);

        assert!(frame.contains(FALLBACK_HEADING));
        assert!(!frame.contains("~~~"), "asset rows gone");
        assert!(matches!(
            boundary.state(),
            BoundaryState::Failed(CaughtError { kind: FailureKind::Panic, .. })
        ));
        assert_eq!(reports.get(), 1);
    }

    #[test]
    fn test_all_states_keep_the_same_height() {
        for (url, capability) in [
            ("builtin://orb", Rc::new(NonInteractive) as Rc<dyn Capability>),
            ("builtin://orb", Rc::new(Interactive) as Rc<dyn Capability>),
            ("builtin://missing", Rc::new(Interactive) as Rc<dyn Capability>),
        ] {
            reset_registry();
            let (props, _) = props(url, capability);
            let mut handle =
                mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
            assert_eq!(handle.settle(2).height(), 10, "{url}");
        }
    }

    #[test]
    fn test_shared_lazy_scene_fetches_once() {
        reset_registry();

        struct Counting(Rc<Cell<usize>>);
        impl SceneSource for Counting {
            fn fetch(
                &self,
                url: &str,
            ) -> futures::future::LocalBoxFuture<
                'static,
                crate::error::SceneResult<Rc<dyn crate::scene::SceneModule>>,
            > {
                self.0.set(self.0.get() + 1);
                BuiltinSceneSource.fetch(url)
            }
        }

        let calls = Rc::new(Cell::new(0));
        let lazy = LazyScene::new(Rc::new(Counting(calls.clone())), "builtin://grid");

        let first = lazy.clone();
        let second = lazy.clone();
        let mut handle = mount(
            move || {
                let mut a = SceneProps::new(first, Rc::new(Interactive));
                a.id = "scene-a".into();
                let mut b = SceneProps::new(second, Rc::new(Interactive));
                b.id = "scene-b".into();
                let cleanup_a = resilient_scene(a);
                let cleanup_b = resilient_scene(b);
                Box::new(move || {
                    cleanup_a();
                    cleanup_b();
                })
            },
            MountOptions { size: Some((40, 30)) },
        );
        handle.settle(2);

        assert_eq!(calls.get(), 1);
        assert_eq!(lazy.fetch_count(), 1);
        assert!(get_index("scene-a").is_some());
        assert!(get_index("scene-b").is_some());
    }

    #[test]
    fn test_caught_panic_logs_one_error_event() {
        reset_registry();
        let (props, reports) = props("builtin://fail/panic", Rc::new(Interactive));

        let errors = count_errors(move || {
            let mut handle =
                mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
            assert!(handle.settle(8).contains(FALLBACK_HEADING));
            handle.settle(4);
        });

        assert_eq!(errors, 1);
        assert_eq!(reports.get(), 1);
    }

    #[test]
    fn test_placeholder_holds_while_fetch_is_in_flight() {
        reset_registry();
        let (props, sender, reports) = deferred_props();
        let lazy = props.lazy.clone();

        let mut handle = mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
        for _ in 0..4 {
            let frame = handle.tick();
            assert_eq!(frame.height(), 10);
            assert!(get_index("scene-placeholder").is_some());
            assert!(get_index("scene").is_none());
            assert!(!frame.contains(FALLBACK_HEADING));
        }
        assert!(lazy.is_started());
        assert!(lazy.state().is_pending());

        let rejection = SceneError::Parse {
            url: "deferred://hero".into(),
            reason: "truncated".into(),
        };
        assert!(sender.send(Err(rejection)).is_ok());
        let frame = handle.settle(2);

        assert!(frame.contains(FALLBACK_HEADING));
        assert_eq!(frame.height(), 10);
        assert!(get_index("scene-placeholder").is_none());
        assert_eq!(reports.get(), 1);
    }

    #[test]
    fn test_late_scene_replaces_placeholder() {
        reset_registry();
        let (props, sender, reports) = deferred_props();

        let mut handle = mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
        handle.settle(3);
        assert!(get_index("scene-placeholder").is_some());

        let module: Rc<dyn SceneModule> = Rc::new(OrbScene::default());
        assert!(sender.send(Ok(module)).is_ok());
        let frame = handle.settle(2);

        assert!(get_index("scene").is_some());
        assert!(get_index("scene-placeholder").is_none());
        assert_eq!(frame.height(), 10);
        assert_eq!(reports.get(), 0);
    }

    #[test]
    fn test_rejection_after_unmount_is_silent() {
        reset_registry();
        let (props, sender, reports) = deferred_props();
        let lazy = props.lazy.clone();
        let boundary = props.boundary.clone().unwrap();

        let errors = count_errors(move || {
            let mut handle =
                mount(move || resilient_scene(props), MountOptions { size: Some((60, 20)) });
            handle.settle(2);
            handle.unmount();

            assert!(sender.send(Err(SceneError::NotFound("deferred://hero".into()))).is_ok());
            run_until_stalled();
        });

        assert!(matches!(lazy.state(), AsyncState::Rejected(_)), "result lands unobserved");
        assert!(!boundary.is_tripped());
        assert_eq!(reports.get(), 0);
        assert_eq!(errors, 0);
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_tripped_boundary_survives_live_rerender_with_new_props() {
        reset_registry();
        let (boundary, reports) = counting_boundary();
        let orb = LazyScene::new(Rc::new(BuiltinSceneSource), "builtin://orb");

        let variant = signal(0u8);
        let variant_read = variant.clone();
        let failing_boundary = boundary.clone();
        let later_boundary = boundary.clone();
        let later_lazy = orb.clone();

        let mut handle = mount(
            move || {
                show(
                    move || variant_read.get() == 0,
                    move || {
                        let mut props = SceneProps::new(
                            LazyScene::new(Rc::new(BuiltinSceneSource), "builtin://missing"),
                            Rc::new(Interactive),
                        );
                        props.rows = 10;
                        props.boundary = Some(failing_boundary.clone());
                        resilient_scene(props)
                    },
                    Some(move || {
                        let mut props = SceneProps::new(later_lazy.clone(), Rc::new(Interactive));
                        props.rows = 6;
                        props.boundary = Some(later_boundary.clone());
                        resilient_scene(props)
                    }),
                )
            },
            MountOptions { size: Some((60, 20)) },
        );
        handle.settle(2);
        assert!(boundary.is_tripped());

        variant.set(1);
        let frame = handle.settle(2);

        assert!(frame.contains(FALLBACK_HEADING));
        assert_eq!(frame.height(), 6, "new props applied to the fallback");
        assert_eq!(orb.fetch_count(), 0, "a tripped boundary never loads again");
        assert_eq!(reports.get(), 1);
    }

    #[test]
    fn test_tripped_boundary_survives_remount_with_same_handle() {
        reset_registry();
        let (first, reports) = props("builtin://missing", Rc::new(Interactive));
        let boundary = first.boundary.clone().unwrap();

        let mut handle = mount(move || resilient_scene(first), MountOptions { size: Some((60, 20)) });
        handle.settle(2);
        handle.unmount();

        let mut second = SceneProps::new(
            LazyScene::new(Rc::new(BuiltinSceneSource), "builtin://orb"),
            Rc::new(Interactive),
        );
        second.rows = 6;
        second.boundary = Some(boundary.clone());
        let lazy = second.lazy.clone();

        let mut handle = mount(move || resilient_scene(second), MountOptions { size: Some((60, 20)) });
        let frame = handle.settle(2);

        assert!(frame.contains(FALLBACK_HEADING));
        assert_eq!(lazy.fetch_count(), 0, "a tripped boundary never loads again");
        assert_eq!(reports.get(), 1);
        assert!(matches!(
            boundary.caught(),
            Some(CaughtError { kind: FailureKind::Load, .. })
        ));
    }
}
