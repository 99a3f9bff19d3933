//! Scene - The optional embedded interactive asset.
//!
//! The hero section can embed a heavyweight animated scene. The scene is a
//! non-critical enhancement: it is addressed by URL, fetched lazily through a
//! [`SceneSource`], and may be unavailable in the current environment. Its
//! failure never reaches the rest of the page.
//!
//! # Collaborators
//!
//! - [`SceneSource`] fetches a [`SceneModule`] for a URL
//! - [`SceneModule::init`] creates a [`SceneView`] for the box size
//! - [`SceneView::draw`] produces the rows of one animation frame
//! - [`Capability`] decides whether interactive rendering is possible at all
//!
//! [`resilient_scene`] wires them together behind a failure boundary.

mod builtin;
mod capability;
mod lazy;
mod loader;
mod source;

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::SceneResult;

pub use builtin::{FailStage, FailingScene, FrameScene, GridScene, OrbScene};
pub use capability::{Capability, Interactive, NonInteractive, TerminalCapability};
pub use lazy::{LazyScene, SceneState};
pub use loader::{
    fallback_card, placeholder, resilient_scene, scene_view, SceneProps, FALLBACK_BADGE,
    FALLBACK_HEADING, FALLBACK_SUBTEXT,
};
pub use source::{BuiltinSceneSource, FileSceneSource, RouterSceneSource};

/// Cells available to a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSize {
    pub cols: u16,
    pub rows: u16,
}

/// Fetches scene modules by URL.
pub trait SceneSource {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, SceneResult<Rc<dyn SceneModule>>>;
}

/// A loaded, not yet initialised scene.
pub trait SceneModule {
    fn init(&self, size: SceneSize) -> SceneResult<Box<dyn SceneView>>;

    fn name(&self) -> &str {
        "scene"
    }
}

/// A running scene.
pub trait SceneView {
    /// Rows for `frame`. Extra rows and columns are clipped by the caller.
    fn draw(&mut self, size: SceneSize, frame: u64) -> SceneResult<Vec<String>>;
}

/// A fetched module, comparable by identity so it can live in a signal.
#[derive(Clone)]
pub struct LoadedScene(pub Rc<dyn SceneModule>);

impl PartialEq for LoadedScene {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LoadedScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoadedScene").field(&self.0.name()).finish()
    }
}
