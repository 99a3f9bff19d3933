//! Site configuration.
//!
//! # Priority (high → low)
//!
//! ```text
//! 1. CLI arguments
//! 2. Environment (GLOWFOLIO_SCENE_URL)
//! 3. Config file (JSON)
//! 4. Default values
//! ```
//!
//! Every field is optional in the file.
//!
//! ```json
//! {
//!   "scene_url": "file://scenes/wave.json",
//!   "scene_rows": 10,
//!   "theme": "glow",
//!   "palette": { "accent": "#ff7ab6" },
//!   "content": { "owner": "Ada Lovelace" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};
use crate::site::{Palette, PaletteOverrides, SiteContent};
use crate::types::RenderMode;

/// Environment variable overriding [`SiteConfig::scene_url`].
pub const SCENE_URL_ENV: &str = "GLOWFOLIO_SCENE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Where the hero scene is fetched from.
    #[serde(default = "default_scene_url")]
    pub scene_url: String,

    /// Rows of the hero scene box.
    #[serde(default = "default_scene_rows")]
    pub scene_rows: u16,

    /// Base directory for relative `file://` scene urls.
    #[serde(default)]
    pub scene_dir: Option<PathBuf>,

    #[serde(default)]
    pub render_mode: RenderMode,

    /// Palette preset (`glow` or `terminal`).
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Single colors on top of the preset.
    #[serde(default)]
    pub palette: PaletteOverrides,

    /// Force the scene capability check (default: detect the terminal).
    #[serde(default)]
    pub interactive: Option<bool>,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Milliseconds between ticks in fullscreen mode.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default)]
    pub content: SiteContent,
}

fn default_scene_url() -> String {
    "builtin://orb".to_string()
}

fn default_scene_rows() -> u16 {
    12
}

fn default_theme() -> String {
    "glow".to_string()
}

fn default_tick_ms() -> u64 {
    50
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scene_url: default_scene_url(),
            scene_rows: default_scene_rows(),
            scene_dir: None,
            render_mode: RenderMode::default(),
            theme: default_theme(),
            palette: PaletteOverrides::default(),
            interactive: None,
            log_filter: None,
            tick_ms: default_tick_ms(),
            content: SiteContent::default(),
        }
    }
}

impl SiteConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config: SiteConfig =
            serde_json::from_str(&text).map_err(|source| FolioError::Config {
                path: path.to_path_buf(),
                source,
            })?;

        // Relative scene paths resolve against the config file's directory
        if config.scene_dir.is_none() {
            config.scene_dir = path.parent().map(Path::to_path_buf);
        }
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` if given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> FolioResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(SCENE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            tracing::debug!(url = %url, "scene url from environment");
            self.scene_url = url;
        }
    }

    /// Preset named by `theme` with the overrides applied.
    ///
    /// An unknown preset falls back to `glow`.
    pub fn palette(&self) -> Palette {
        let base = Palette::preset(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme, using glow");
            Palette::glow()
        });
        base.with_overrides(&self.palette)
    }
}
