//! # glowfolio
//!
//! A personal portfolio page rendered as a reactive terminal UI.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Components are indices into per-index arrays rather than objects. Props
//! are stored as static values, signals or getters and only read when a
//! frame is rendered.
//!
//! ```text
//! site::page → primitives → engine arrays → renderer::render_tree → Frame → diff output
//! ```
//!
//! The hero section embeds an optional animated scene. It is fetched lazily,
//! only in an interactive terminal, and sits behind a failure boundary: a
//! scene that fails to load, initialise or draw is replaced by a fallback
//! card while the rest of the page keeps rendering.
//!
//! ## Modules
//!
//! - [`types`] - Colors, text attributes, layout enums
//! - [`engine`] - Component registry and per-index arrays
//! - [`primitives`] - `box_primitive`, `text`, `show`, `when`, `error_boundary`
//! - [`pipeline`] - Executor, frame clock, viewport, reveal, mount
//! - [`renderer`] - Layout into frames, ANSI output
//! - [`scene`] - Scene sources and the resilient scene loader
//! - [`site`] - The page and its sections
//! - [`config`] / [`telemetry`] - JSON config, `tracing` setup

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod scene;
pub mod site;
pub mod telemetry;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::SiteConfig;
pub use error::{FolioError, FolioResult, RenderError, SceneError, SceneResult};

pub use engine::{
    allocate_index, get_allocated_count, get_current_parent_index, get_index, on_destroy,
    pop_parent_context, push_parent_context, release_index, reset_registry,
};

pub use pipeline::{
    advance_frame, frame_count, mount, on_frame, run_until_stalled, scroll_offset, spawn_local,
    MountHandle, MountOptions,
};

pub use primitives::{
    box_primitive, current_boundary, error_boundary, show, text, when, AsyncState,
    BoundaryHandle, BoundaryState, BoxProps, CaughtError, Cleanup, FailureKind, PropValue,
    TextProps, WhenOptions,
};

pub use renderer::{Frame, InlineRenderer, LineDiffRenderer};

pub use scene::{
    resilient_scene, BuiltinSceneSource, Capability, FileSceneSource, LazyScene,
    RouterSceneSource, SceneProps, TerminalCapability,
};

pub use site::{page, PageProps};
