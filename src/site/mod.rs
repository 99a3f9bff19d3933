//! Site - The portfolio page.
//!
//! ```text
//! nav
//! home      (scene band + introduction)
//! about     (bio, skills, experience)
//! projects  (tilting project cards)
//! services
//! contact   (form + details)
//! footer
//! ```
//!
//! Every band below the nav reveals once it scrolls into view. The scene in
//! the home band is optional: whatever happens to it, the other bands render.

mod about;
mod contact;
mod content;
mod footer;
mod hero;
mod nav;
mod palette;
mod portfolio;
mod services;
mod widgets;

use std::rc::Rc;

use crate::pipeline::viewport_width;
use crate::primitives::{box_primitive, BoxProps, Cleanup};

pub use contact::{ContactForm, Field};
pub use content::{Experience, NavLink, Project, Service, SiteContent, SocialLink};
pub use footer::{current_year, footer_line};
pub use hero::HeroScene;
pub use palette::{Palette, PaletteOverrides};
pub use portfolio::{card_id, Gallery, Tilt, CARD_ROWS};

/// Section ids in page order.
pub const SECTIONS: [&str; 5] = ["home", "about", "projects", "services", "contact"];

/// Everything the page needs. Interactive state (form, gallery) and the
/// scene's crash flag are owned by the caller so they survive remounts.
pub struct PageProps {
    pub content: Rc<SiteContent>,
    pub palette: Palette,
    pub scene: HeroScene,
    pub form: ContactForm,
    pub gallery: Gallery,
    pub year: i32,
}

impl PageProps {
    pub fn new(content: SiteContent, palette: Palette, scene: HeroScene) -> Self {
        let gallery = Gallery::new(content.projects.len());
        Self {
            content: Rc::new(content),
            palette,
            scene,
            form: ContactForm::new(),
            gallery,
            year: current_year(),
        }
    }
}

/// Build the whole page.
pub fn page(props: PageProps) -> Cleanup {
    let width = viewport_width();
    let PageProps {
        content,
        palette,
        scene,
        form,
        gallery,
        year,
    } = props;

    tracing::debug!(owner = %content.owner, width, "building page");

    box_primitive(BoxProps {
        id: Some("page".into()),
        bg: Some(palette.background),
        fg: Some(palette.text.into()),
        children: Some(Box::new(move || {
            nav::nav(&content, &palette);
            hero::hero(&content, &palette, scene);
            about::about(&content, &palette, width);
            portfolio::portfolio(&content, &palette, &gallery, width);
            services::services(&content, &palette, width);
            contact::contact(&content, &palette, &form, width);
            footer::footer(&content, &palette, year);
        })),
        ..Default::default()
    })
}
