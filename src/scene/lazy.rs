//! LazyScene - A memoized, started-on-demand scene fetch.
//!
//! Nothing is fetched until the first [`LazyScene::request`]. The fetch then
//! runs once on the local executor and its result is kept for every later
//! request, across all loaders sharing the same `LazyScene`.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::error::SceneError;
use crate::pipeline::spawn_local;
use crate::primitives::AsyncState;

use super::{LoadedScene, SceneSource};

/// Load state of a scene.
pub type SceneState = AsyncState<LoadedScene, SceneError>;

struct LazyInner {
    source: Rc<dyn SceneSource>,
    url: String,
    state: Signal<SceneState>,
    started: Cell<bool>,
    fetches: Cell<usize>,
}

/// Shared handle to a scene that is fetched at most once.
#[derive(Clone)]
pub struct LazyScene {
    inner: Rc<LazyInner>,
}

impl LazyScene {
    pub fn new(source: Rc<dyn SceneSource>, url: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(LazyInner {
                source,
                url: url.into(),
                state: signal(AsyncState::Pending),
                started: Cell::new(false),
                fetches: Cell::new(0),
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Start the fetch if nobody has yet, and return the state signal.
    pub fn request(&self) -> Signal<SceneState> {
        let inner = &self.inner;
        if inner.started.replace(true) {
            return inner.state.clone();
        }
        inner.fetches.set(inner.fetches.get() + 1);

        let url = inner.url.clone();
        tracing::debug!(url = %url, "loading scene");

        let fetch = inner.source.fetch(&url);
        let state = inner.state.clone();
        let task = async move {
            match fetch.await {
                Ok(module) => {
                    tracing::debug!(url = %url, scene = module.name(), "scene loaded");
                    state.set(AsyncState::Resolved(LoadedScene(module)));
                }
                Err(error) => {
                    tracing::debug!(url = %url, error = %error, "scene load rejected");
                    state.set(AsyncState::Rejected(error));
                }
            }
        };

        if let Err(error) = spawn_local(task) {
            inner
                .state
                .set(AsyncState::Rejected(SceneError::Spawn(error.to_string())));
        }

        inner.state.clone()
    }

    /// Current state without starting anything.
    pub fn state(&self) -> SceneState {
        self.inner.state.get()
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.get()
    }

    /// Number of fetches ever issued (0 or 1).
    pub fn fetch_count(&self) -> usize {
        self.inner.fetches.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run_until_stalled;
    use crate::scene::BuiltinSceneSource;

    #[test]
    fn test_nothing_fetched_until_requested() {
        let lazy = LazyScene::new(Rc::new(BuiltinSceneSource), "builtin://orb");
        run_until_stalled();

        assert!(!lazy.is_started());
        assert_eq!(lazy.fetch_count(), 0);
        assert!(lazy.state().is_pending());
    }

    #[test]
    fn test_request_fetches_once() {
        let lazy = LazyScene::new(Rc::new(BuiltinSceneSource), "builtin://orb");
        let shared = lazy.clone();

        lazy.request();
        shared.request();
        run_until_stalled();
        shared.request();

        assert_eq!(lazy.fetch_count(), 1);
        assert!(matches!(lazy.state(), AsyncState::Resolved(_)));
    }

    #[test]
    fn test_rejection_is_kept() {
        let lazy = LazyScene::new(Rc::new(BuiltinSceneSource), "builtin://missing");
        lazy.request();
        run_until_stalled();

        assert_eq!(
            lazy.state(),
            AsyncState::Rejected(SceneError::NotFound("builtin://missing".into()))
        );
    }
}
