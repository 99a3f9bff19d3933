use crate::primitives::Cleanup;

use super::content::SiteContent;
use super::palette::Palette;
use super::widgets::{card, columns_for, grid, heading, label, section, strong};

pub fn services(content: &SiteContent, palette: &Palette, width: u16) -> Cleanup {
    let services = content.services.clone();
    let palette = *palette;
    let columns = columns_for(width, 4);

    section("services", palette.surface, move || {
        heading("Services", palette.text);
        grid(services, columns, 2, move |i, service| {
            card(Some(format!("service-{i}")), &palette, move || {
                strong(&service.title, palette.text);
                label(&service.description, palette.text_muted);
            });
        });
    })
}
