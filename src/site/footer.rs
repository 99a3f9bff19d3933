use chrono::Datelike;

use crate::primitives::{box_primitive, text, BoxProps, Cleanup, TextProps};
use crate::types::TextAlign;

use super::content::SiteContent;
use super::palette::Palette;

/// Current local year.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub fn footer_line(year: i32, owner: &str, line: &str) -> String {
    format!("© {year} {owner} — {line}")
}

pub fn footer(content: &SiteContent, palette: &Palette, year: i32) -> Cleanup {
    let line = footer_line(year, &content.owner, &content.footer_line);
    let color = palette.text_muted;

    box_primitive(BoxProps {
        id: Some("footer".into()),
        bg: Some(palette.footer),
        padding_y: Some(1),
        align: Some(TextAlign::Center),
        children: Some(Box::new(move || {
            text(TextProps {
                content: line.into(),
                fg: Some(color.into()),
                ..Default::default()
            });
        })),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_line() {
        assert_eq!(
            footer_line(2025, "Fajri Rahmanto", "Crafted with love, code, and a bit of glow."),
            "© 2025 Fajri Rahmanto — Crafted with love, code, and a bit of glow."
        );
        assert!(current_year() >= 2024);
    }
}
