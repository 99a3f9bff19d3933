//! Core types for glowfolio.
//!
//! These types flow from component props through the engine arrays into the
//! renderer. They are deliberately small: a color, a handful of layout enums
//! and the text attribute bitflags.

use serde::{Deserialize, Serialize};

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Integers for exact comparison. Alpha 255 = fully opaque, 0 = fully
/// transparent. Special value: r=-1 means "terminal default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create from a packed `0xRRGGBB` integer.
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            a: a as i16,
            ..self
        }
    }

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional),
    /// or the keyword `default`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        if hex.eq_ignore_ascii_case("default") {
            return Some(Self::TERMINAL_DEFAULT);
        }
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .ok()
                .map(|n| (n << 4) | n)
        };

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Format as `#rrggbb` (or `#rrggbbaa` when not opaque).
    pub fn to_hex(&self) -> String {
        if self.is_terminal_default() {
            return "default".to_string();
        }
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha blend src over dst (Porter-Duff "over").
    ///
    /// A terminal-default destination is treated as opaque black.
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() || src.is_terminal_default() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }

        let (dr, dg, db, da) = if dst.is_terminal_default() {
            (0i32, 0i32, 0i32, 255i32)
        } else {
            (dst.r as i32, dst.g as i32, dst.b as i32, dst.a as i32)
        };

        let sa = src.a as i32;
        let inv_sa = 255 - sa;
        let out_a = sa + (da * inv_sa) / 255;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        let channel = |s: i16, d: i32| -> i16 {
            (((s as i32 * sa) + (d * da * inv_sa / 255)) / out_a).clamp(0, 255) as i16
        };

        Self {
            r: channel(src.r, dr),
            g: channel(src.g, dg),
            b: channel(src.b, db),
            a: out_a.clamp(0, 255) as i16,
        }
    }

    /// Dim the color by a factor (0.0 = black, 1.0 = unchanged).
    pub fn dim(self, factor: f32) -> Self {
        if self.is_terminal_default() {
            return self;
        }
        let scale = |c: i16| (c as f32 * factor).clamp(0.0, 255.0) as i16;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color `{value}`"))
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

// =============================================================================
// Component Types
// =============================================================================

/// Component kind stored per index in the engine arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ComponentType {
    #[default]
    None = 0,
    Box = 1,
    Text = 2,
}

// =============================================================================
// Border Styles
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    #[default]
    None = 0,
    /// ─ │ ┌ ┐ └ ┘
    Single = 1,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 2,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold = 3,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double = 4,
}

impl BorderStyle {
    /// Border characters: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
        }
    }

    /// Cells taken by the border on each side.
    pub const fn thickness(&self) -> u16 {
        match self {
            Self::None => 0,
            _ => 1,
        }
    }
}

// =============================================================================
// Layout Enums
// =============================================================================

/// Direction children are stacked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    Row = 1,
}

impl FlexDirection {
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextAlign {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

// =============================================================================
// Render Mode
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Alternate screen buffer, full terminal control, diffed redraws.
    #[default]
    Fullscreen,
    /// Render the settled page once to stdout.
    Inline,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_hex_formats() {
        assert_eq!(Rgba::from_hex("#1B1F3B"), Some(Rgba::rgb(0x1b, 0x1f, 0x3b)));
        assert_eq!(Rgba::from_hex("fff"), Some(Rgba::WHITE));
        assert_eq!(
            Rgba::from_hex("#ffffff0d"),
            Some(Rgba::new(255, 255, 255, 13))
        );
        assert!(Rgba::from_hex("default").unwrap().is_terminal_default());
    }

    #[test]
    fn test_rgba_from_hex_invalid() {
        assert!(Rgba::from_hex("").is_none());
        assert!(Rgba::from_hex("#gg0000").is_none());
        assert!(Rgba::from_hex("#12345").is_none());
        assert!(Rgba::from_hex("#é00").is_none());
    }

    #[test]
    fn test_rgba_hex_round_trip_through_serde() {
        let color: Rgba = serde_json::from_str("\"#7b61ff\"").unwrap();
        assert_eq!(color, Rgba::from_rgb_int(0x7b61ff));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#7b61ff\"");

        let bad: Result<Rgba, _> = serde_json::from_str("\"purple\"");
        assert!(bad.is_err(), "named colors are not accepted");
    }

    #[test]
    fn test_rgba_blend() {
        let bg = Rgba::rgb(0, 0, 0);
        assert_eq!(Rgba::blend(Rgba::WHITE, bg), Rgba::WHITE);
        assert_eq!(Rgba::blend(Rgba::TRANSPARENT, bg), bg);

        // white at ~70% over black
        let muted = Rgba::blend(Rgba::WHITE.with_alpha(178), bg);
        assert!(muted.r > 170 && muted.r < 185, "muted.r = {}", muted.r);
        assert!(muted.is_opaque());
    }

    #[test]
    fn test_border_thickness() {
        assert_eq!(BorderStyle::None.thickness(), 0);
        assert_eq!(BorderStyle::Rounded.thickness(), 1);
        assert_eq!(BorderStyle::Rounded.chars().2, '╭');
    }
}
