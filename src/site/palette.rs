//! Palette - Semantic colors for the page.
//!
//! Two presets:
//! - `glow` (default) - the deep indigo page with violet and cyan accents
//! - `terminal` - terminal default colors only, for limited terminals
//!
//! Config files override single colors on top of a preset.

use serde::{Deserialize, Serialize};

use crate::types::Rgba;

/// Colors used by the page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    // =========================================================================
    // Backgrounds (one per band of the page)
    // =========================================================================
    /// Nav and hero band, also the scene placeholder.
    pub background: Rgba,
    /// About and services bands.
    pub surface: Rgba,
    /// Portfolio and contact bands.
    pub surface_deep: Rgba,
    pub footer: Rgba,

    // =========================================================================
    // Accents
    // =========================================================================
    /// Buttons and the scene foreground.
    pub accent: Rgba,
    /// Years, icons, focused fields.
    pub highlight: Rgba,

    // =========================================================================
    // Text and borders
    // =========================================================================
    pub text: Rgba,
    pub text_muted: Rgba,
    pub border: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self::glow()
    }
}

impl Palette {
    pub fn glow() -> Self {
        Self {
            background: Rgba::from_rgb_int(0x1B1F3B),
            surface: Rgba::from_rgb_int(0x141735),
            surface_deep: Rgba::from_rgb_int(0x0F1226),
            footer: Rgba::from_rgb_int(0x0B0E20),
            accent: Rgba::from_rgb_int(0x7B61FF),
            highlight: Rgba::from_rgb_int(0x00E6FF),
            text: Rgba::WHITE,
            text_muted: Rgba::WHITE.dim(0.75),
            border: Rgba::WHITE.dim(0.3),
        }
    }

    pub fn terminal() -> Self {
        Self {
            background: Rgba::TERMINAL_DEFAULT,
            surface: Rgba::TERMINAL_DEFAULT,
            surface_deep: Rgba::TERMINAL_DEFAULT,
            footer: Rgba::TERMINAL_DEFAULT,
            accent: Rgba::TERMINAL_DEFAULT,
            highlight: Rgba::TERMINAL_DEFAULT,
            text: Rgba::TERMINAL_DEFAULT,
            text_muted: Rgba::TERMINAL_DEFAULT,
            border: Rgba::TERMINAL_DEFAULT,
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "glow" => Some(Self::glow()),
            "terminal" => Some(Self::terminal()),
            _ => None,
        }
    }

    /// Apply the colors set in `overrides`.
    pub fn with_overrides(mut self, overrides: &PaletteOverrides) -> Self {
        let slots = [
            (&mut self.background, overrides.background),
            (&mut self.surface, overrides.surface),
            (&mut self.surface_deep, overrides.surface_deep),
            (&mut self.footer, overrides.footer),
            (&mut self.accent, overrides.accent),
            (&mut self.highlight, overrides.highlight),
            (&mut self.text, overrides.text),
            (&mut self.text_muted, overrides.text_muted),
            (&mut self.border, overrides.border),
        ];
        for (slot, value) in slots {
            if let Some(color) = value {
                *slot = color;
            }
        }
        self
    }
}

/// Per-color overrides read from the config file (`"#rrggbb"` strings).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    pub background: Option<Rgba>,
    pub surface: Option<Rgba>,
    pub surface_deep: Option<Rgba>,
    pub footer: Option<Rgba>,
    pub accent: Option<Rgba>,
    pub highlight: Option<Rgba>,
    pub text: Option<Rgba>,
    pub text_muted: Option<Rgba>,
    pub border: Option<Rgba>,
}
