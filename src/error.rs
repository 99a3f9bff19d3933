use std::path::PathBuf;

use thiserror::Error;

pub type FolioResult<T> = Result<T, FolioError>;
pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("could not spawn local task: {0}")]
    Spawn(String),
}

/// Failures of the optional scene collaborator.
///
/// Clone + PartialEq so it can live inside a signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("unsupported scene url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("scene not found: {0}")]
    NotFound(String),

    #[error("malformed scene {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("scene failed to initialise: {0}")]
    Init(String),

    #[error("scene failed to draw frame {frame}: {reason}")]
    Draw { frame: u64, reason: String },

    #[error("scene fetch could not be scheduled: {0}")]
    Spawn(String),
}

/// Error a component returns when it cannot render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("{0}")]
    Message(String),
}
