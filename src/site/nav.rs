use crate::primitives::{box_primitive, text, BoxProps, Cleanup, TextProps};
use crate::types::{Attr, BorderStyle, FlexDirection, TextAlign};

use super::content::SiteContent;
use super::palette::Palette;

/// Top bar: owner, section links, hire button.
pub fn nav(content: &SiteContent, palette: &Palette) -> Cleanup {
    let owner = content.owner.clone();
    let links = content
        .nav
        .iter()
        .map(|link| link.label.as_str())
        .collect::<Vec<_>>()
        .join("  ");
    let palette = *palette;

    box_primitive(BoxProps {
        id: Some("nav".into()),
        direction: Some(FlexDirection::Row),
        border: Some(BorderStyle::Rounded.into()),
        border_color: Some(palette.border),
        bg: Some(palette.background),
        padding_x: Some(1),
        gap: Some(2),
        children: Some(Box::new(move || {
            text(TextProps {
                content: owner.into(),
                fg: Some(palette.text.into()),
                attrs: Some(Attr::BOLD.into()),
                ..Default::default()
            });
            text(TextProps {
                content: links.into(),
                fg: Some(palette.text_muted.into()),
                align: Some(TextAlign::Center),
                ..Default::default()
            });
            text(TextProps {
                content: "Hire Me →".into(),
                fg: Some(palette.accent.into()),
                attrs: Some(Attr::BOLD.into()),
                align: Some(TextAlign::Right),
                ..Default::default()
            });
        })),
        ..Default::default()
    })
}
