//! Hero - The scene band and the introduction under it.

use std::rc::Rc;

use crate::primitives::{box_primitive, text, BoundaryHandle, BoxProps, Cleanup, TextProps};
use crate::scene::{resilient_scene, Capability, LazyScene, SceneProps};
use crate::types::{Attr, FlexDirection, Rgba, TextAlign};

use super::content::SiteContent;
use super::palette::Palette;
use super::widgets::padded_section;

/// Scene settings for the hero.
#[derive(Clone)]
pub struct HeroScene {
    pub lazy: LazyScene,
    pub capability: Rc<dyn Capability>,
    pub rows: u16,
    /// Shared crash flag, kept by the caller so it outlives re-renders.
    pub boundary: BoundaryHandle,
}

impl HeroScene {
    pub fn new(lazy: LazyScene, capability: Rc<dyn Capability>, rows: u16) -> Self {
        Self {
            lazy,
            capability,
            rows,
            boundary: BoundaryHandle::new("hero-scene"),
        }
    }
}

pub fn hero(content: &SiteContent, palette: &Palette, scene: HeroScene) -> Cleanup {
    let content = content.clone();
    let palette = *palette;

    // No side padding: the scene spans the full width it is told about
    padded_section("home", palette.background, 0, move || {
        resilient_scene(SceneProps {
            id: "hero-scene".into(),
            lazy: scene.lazy,
            rows: scene.rows,
            cols: None,
            capability: scene.capability,
            background: palette.background,
            foreground: palette.highlight,
            text_color: palette.text,
            boundary: Some(scene.boundary),
        });

        centered(&format!("✦ {}", content.badge), palette.highlight, Attr::NONE);
        centered(&format!("Hi, I'm {} 👋", content.owner), palette.text, Attr::BOLD);
        centered(&content.role, palette.text, Attr::BOLD);
        centered(&content.tagline, palette.text_muted, Attr::NONE);

        let primary = format!("[ {} → ]", content.primary_cta);
        let secondary = format!("[ {} ]", content.secondary_cta);
        box_primitive(BoxProps {
            id: Some("hero-cta".into()),
            direction: Some(FlexDirection::Row),
            gap: Some(2),
            children: Some(Box::new(move || {
                text(TextProps {
                    content: primary.into(),
                    fg: Some(palette.accent.into()),
                    attrs: Some(Attr::BOLD.into()),
                    align: Some(TextAlign::Right),
                    ..Default::default()
                });
                text(TextProps {
                    content: secondary.into(),
                    fg: Some(palette.text.into()),
                    attrs: Some(Attr::BOLD.into()),
                    ..Default::default()
                });
            })),
            ..Default::default()
        });
    })
}

fn centered(content: &str, color: Rgba, attrs: Attr) {
    text(TextProps {
        content: content.into(),
        fg: Some(color.into()),
        attrs: Some(attrs.into()),
        align: Some(TextAlign::Center),
        ..Default::default()
    });
}
