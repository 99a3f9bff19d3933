//! Scene sources - Resolve a scene URL to a module.
//!
//! | URL | Source |
//! |---|---|
//! | `builtin://orb`, `builtin://grid` | [`BuiltinSceneSource`] |
//! | `builtin://fail/init`, `/draw`, `/panic` | [`BuiltinSceneSource`] (failure demos) |
//! | `file://path/to/scene.json` | [`FileSceneSource`] |
//!
//! [`RouterSceneSource`] dispatches on the scheme. Any other scheme,
//! `https://` included, is rejected with [`SceneError::UnsupportedScheme`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde::Deserialize;

use crate::error::{SceneError, SceneResult};

use super::builtin::{FailStage, FailingScene, FrameScene, GridScene, OrbScene};
use super::{SceneModule, SceneSource};

type ModuleFuture = LocalBoxFuture<'static, SceneResult<Rc<dyn SceneModule>>>;

fn ready(result: SceneResult<Rc<dyn SceneModule>>) -> ModuleFuture {
    future::ready(result).boxed_local()
}

/// Split `scheme://rest`.
fn split_url(url: &str) -> Option<(&str, &str)> {
    url.split_once("://")
}

// =============================================================================
// Builtin
// =============================================================================

/// Scenes compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSceneSource;

impl BuiltinSceneSource {
    fn resolve(url: &str) -> SceneResult<Rc<dyn SceneModule>> {
        let name = match split_url(url) {
            Some(("builtin", name)) => name,
            _ => return Err(SceneError::NotFound(url.to_string())),
        };
        let module: Rc<dyn SceneModule> = match name {
            "orb" => Rc::new(OrbScene::default()),
            "grid" => Rc::new(GridScene),
            "fail/init" => Rc::new(FailingScene {
                stage: FailStage::Init,
            }),
            "fail/draw" => Rc::new(FailingScene {
                stage: FailStage::Draw { after: 3 },
            }),
            "fail/panic" => Rc::new(FailingScene {
                stage: FailStage::Panic { after: 3 },
            }),
            _ => return Err(SceneError::NotFound(url.to_string())),
        };
        Ok(module)
    }
}

impl SceneSource for BuiltinSceneSource {
    fn fetch(&self, url: &str) -> ModuleFuture {
        ready(Self::resolve(url))
    }
}

// =============================================================================
// File
// =============================================================================

/// On-disk scene: a list of frames, each a list of rows.
///
/// ```json
/// { "name": "wave", "hold": 2, "frames": [["~~  ", " ~~ "], ["  ~~", "~  ~"]] }
/// ```
#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_hold")]
    hold: u64,
    frames: Vec<Vec<String>>,
}

fn default_hold() -> u64 {
    1
}

/// Loads `file://` scenes.
#[derive(Debug, Clone, Default)]
pub struct FileSceneSource {
    /// Relative paths resolve against this directory.
    pub base_dir: Option<PathBuf>,
}

impl FileSceneSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn path_for(&self, url: &str) -> SceneResult<PathBuf> {
        let rest = match split_url(url) {
            Some(("file", rest)) => rest,
            Some((scheme, _)) => return Err(SceneError::UnsupportedScheme(scheme.to_string())),
            None => return Err(SceneError::NotFound(url.to_string())),
        };
        let path = PathBuf::from(rest);
        Ok(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        })
    }

    fn load(url: &str, path: PathBuf) -> SceneResult<Rc<dyn SceneModule>> {
        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SceneError::NotFound(url.to_string()),
            _ => SceneError::Parse {
                url: url.to_string(),
                reason: e.to_string(),
            },
        })?;
        let file: SceneFile = serde_json::from_str(&text).map_err(|e| SceneError::Parse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if file.frames.is_empty() {
            return Err(SceneError::Parse {
                url: url.to_string(),
                reason: "no frames".to_string(),
            });
        }

        let name = file.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".to_string())
        });
        Ok(Rc::new(FrameScene {
            name,
            frames: file.frames,
            hold: file.hold,
        }))
    }
}

impl SceneSource for FileSceneSource {
    fn fetch(&self, url: &str) -> ModuleFuture {
        let url = url.to_string();
        match self.path_for(&url) {
            Ok(path) => async move { Self::load(&url, path) }.boxed_local(),
            Err(error) => ready(Err(error)),
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Dispatches a URL to the source registered for its scheme.
#[derive(Clone, Default)]
pub struct RouterSceneSource {
    routes: HashMap<String, Rc<dyn SceneSource>>,
}

impl RouterSceneSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// `builtin://` and `file://` (relative to the working directory).
    pub fn with_defaults() -> Self {
        Self::new()
            .route("builtin", BuiltinSceneSource)
            .route("file", FileSceneSource::default())
    }

    pub fn route(mut self, scheme: impl Into<String>, source: impl SceneSource + 'static) -> Self {
        self.routes.insert(scheme.into(), Rc::new(source));
        self
    }

    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }
}

impl SceneSource for RouterSceneSource {
    fn fetch(&self, url: &str) -> ModuleFuture {
        let scheme = split_url(url).map(|(scheme, _)| scheme).unwrap_or("");
        match self.routes.get(scheme) {
            Some(source) => source.fetch(url),
            None => ready(Err(SceneError::UnsupportedScheme(scheme.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::io::Write;

    fn fetch(source: &dyn SceneSource, url: &str) -> SceneResult<Rc<dyn SceneModule>> {
        block_on(source.fetch(url))
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(fetch(&BuiltinSceneSource, "builtin://orb").unwrap().name(), "orb");
        assert_eq!(fetch(&BuiltinSceneSource, "builtin://grid").unwrap().name(), "grid");
        assert!(matches!(
            fetch(&BuiltinSceneSource, "builtin://nope"),
            Err(SceneError::NotFound(_))
        ));
    }

    #[test]
    fn test_router_rejects_unknown_scheme() {
        let router = RouterSceneSource::with_defaults();
        assert_eq!(router.schemes(), vec!["builtin", "file"]);

        let result = fetch(&router, "https://prod.spline.design/scene.splinecode");
        assert_eq!(result.err(), Some(SceneError::UnsupportedScheme("https".into())));
    }

    #[test]
    fn test_file_scene_loads_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("wave.json")).unwrap();
        write!(file, r#"{{ "hold": 2, "frames": [["~~"], ["  ~~"]] }}"#).unwrap();

        let source = FileSceneSource::new(dir.path());
        let module = fetch(&source, "file://wave.json").unwrap();
        assert_eq!(module.name(), "wave");
    }

    #[test]
    fn test_file_scene_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("empty.json"), r#"{ "frames": [] }"#).unwrap();
        let source = FileSceneSource::new(dir.path());

        assert!(matches!(
            fetch(&source, "file://missing.json"),
            Err(SceneError::NotFound(_))
        ));
        assert!(matches!(
            fetch(&source, "file://bad.json"),
            Err(SceneError::Parse { .. })
        ));
        assert!(matches!(
            fetch(&source, "file://empty.json"),
            Err(SceneError::Parse { .. })
        ));
    }
}
