use crate::primitives::{box_primitive, text, BoxProps, Cleanup, TextProps};
use crate::types::{Attr, BorderStyle, FlexDirection, TextAlign};

use super::content::SiteContent;
use super::palette::Palette;
use super::widgets::{card, columns_for, heading, label, section, strong};

/// Bio with the skills grid, next to the experience highlights.
pub fn about(content: &SiteContent, palette: &Palette, width: u16) -> Cleanup {
    let content = content.clone();
    let palette = *palette;
    let side_by_side = columns_for(width, 2) == 2;

    section("about", palette.surface, move || {
        heading("About Me", palette.text);

        box_primitive(BoxProps {
            direction: Some(if side_by_side {
                FlexDirection::Row
            } else {
                FlexDirection::Column
            }),
            gap: Some(if side_by_side { 2 } else { 1 }),
            children: Some(Box::new(move || {
                let bio = content.bio.clone();
                let skills = content.skills.clone();
                card(Some("about-bio".into()), &palette, move || {
                    label(&bio, palette.text_muted);
                    box_primitive(BoxProps {
                        id: Some("skills".into()),
                        direction: Some(FlexDirection::Row),
                        gap: Some(1),
                        padding_y: Some(1),
                        children: Some(Box::new(move || {
                            for skill in &skills {
                                skill_tile(skill, &palette);
                            }
                        })),
                        ..Default::default()
                    });
                });

                let experience = content.experience.clone();
                card(Some("about-experience".into()), &palette, move || {
                    strong("Experience Highlights", palette.text);
                    for item in &experience {
                        text(TextProps {
                            content: item.year.as_str().into(),
                            fg: Some(palette.highlight.into()),
                            ..Default::default()
                        });
                        label(&item.text, palette.text_muted);
                    }
                });
            })),
            ..Default::default()
        });
    })
}

fn skill_tile(skill: &str, palette: &Palette) {
    let skill = skill.to_string();
    let color = palette.text;
    box_primitive(BoxProps {
        border: Some(BorderStyle::Rounded.into()),
        border_color: Some(palette.border),
        align: Some(TextAlign::Center),
        children: Some(Box::new(move || {
            text(TextProps {
                content: skill.into(),
                fg: Some(color.into()),
                attrs: Some(Attr::BOLD.into()),
                ..Default::default()
            });
        })),
        ..Default::default()
    });
}
