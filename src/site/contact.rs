//! Contact - The message form and contact details.
//!
//! The form only collects text. Nothing is sent anywhere.

use spark_signals::{signal, Signal};

use crate::primitives::{box_primitive, text, BoxProps, Cleanup, PropValue, TextProps};
use crate::types::{Attr, BorderStyle, FlexDirection, TextAlign};

use super::content::SiteContent;
use super::palette::Palette;
use super::widgets::{card, columns_for, heading, label, section, strong};

/// Rows of the message field's text area.
const MESSAGE_ROWS: u16 = 4;

// =============================================================================
// Form state
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "you@example.com",
            Field::Message => "Tell me about your project",
        }
    }

    fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }
}

/// Field values and focus, as signals.
#[derive(Clone)]
pub struct ContactForm {
    name: Signal<String>,
    email: Signal<String>,
    message: Signal<String>,
    focus: Signal<Option<Field>>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: signal(String::new()),
            email: signal(String::new()),
            message: signal(String::new()),
            focus: signal(None),
        }
    }

    fn slot(&self, field: Field) -> &Signal<String> {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn value(&self, field: Field) -> String {
        self.slot(field).get()
    }

    pub fn focused(&self) -> Option<Field> {
        self.focus.get()
    }

    pub fn focus(&self, field: Field) {
        self.focus.set(Some(field));
    }

    pub fn blur(&self) {
        self.focus.set(None);
    }

    /// Move focus to the next field, wrapping around. Starts at the name.
    pub fn focus_next(&self) -> Field {
        let next = self.focus.get().map(Field::next).unwrap_or(Field::Name);
        self.focus.set(Some(next));
        next
    }

    /// Type into the focused field. Returns `false` with nothing focused.
    pub fn type_char(&self, c: char) -> bool {
        let Some(field) = self.focus.get() else {
            return false;
        };
        if c == '\n' && field != Field::Message {
            self.focus_next();
            return true;
        }
        let slot = self.slot(field);
        let mut value = slot.get();
        value.push(c);
        slot.set(value);
        true
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&self) -> bool {
        let Some(field) = self.focus.get() else {
            return false;
        };
        let slot = self.slot(field);
        let mut value = slot.get();
        if value.pop().is_none() {
            return false;
        }
        slot.set(value);
        true
    }

    /// What a field shows: its value, or the dimmed placeholder when empty.
    pub fn display(&self, field: Field) -> (String, bool) {
        let value = self.value(field);
        if value.is_empty() {
            (field.placeholder().to_string(), true)
        } else {
            (value, false)
        }
    }
}

// =============================================================================
// Section
// =============================================================================

pub fn contact(content: &SiteContent, palette: &Palette, form: &ContactForm, width: u16) -> Cleanup {
    let content = content.clone();
    let palette = *palette;
    let form = form.clone();
    let side_by_side = columns_for(width, 2) == 2;

    section("contact", palette.surface_deep, move || {
        heading(&content.contact_heading, palette.text);

        box_primitive(BoxProps {
            direction: Some(if side_by_side {
                FlexDirection::Row
            } else {
                FlexDirection::Column
            }),
            gap: Some(if side_by_side { 2 } else { 1 }),
            children: Some(Box::new(move || {
                card(Some("contact-form".into()), &palette, move || {
                    for field in Field::ALL {
                        form_field(&form, field, &palette);
                    }
                    send_button(&palette);
                });
                card(Some("contact-details".into()), &palette, move || {
                    details(&content, &palette);
                });
            })),
            ..Default::default()
        });
    })
}

fn form_field(form: &ContactForm, field: Field, palette: &Palette) {
    label(field.label(), palette.text_muted);

    let rows = if field == Field::Message { MESSAGE_ROWS + 2 } else { 3 };
    let (focus_form, text_form, fg_form) = (form.clone(), form.clone(), form.clone());
    let (placeholder_fg, fg) = (palette.text_muted.dim(0.6), palette.text);

    // The focused field gets a bold border
    box_primitive(BoxProps {
        id: Some(format!("field-{}", field.label().to_lowercase())),
        height: Some(rows.into()),
        border: Some(PropValue::getter(move || {
            if focus_form.focused() == Some(field) {
                BorderStyle::Bold
            } else {
                BorderStyle::Rounded
            }
        })),
        border_color: Some(palette.border),
        padding_x: Some(1),
        children: Some(Box::new(move || {
            text(TextProps {
                content: PropValue::getter(move || text_form.display(field).0),
                fg: Some(PropValue::getter(move || {
                    if fg_form.display(field).1 { placeholder_fg } else { fg }
                })),
                ..Default::default()
            });
        })),
        ..Default::default()
    });
}

fn send_button(palette: &Palette) {
    let (accent, color) = (palette.accent, palette.text);
    box_primitive(BoxProps {
        id: Some("send-message".into()),
        bg: Some(accent),
        align: Some(TextAlign::Center),
        children: Some(Box::new(move || {
            text(TextProps {
                content: "Send Message".into(),
                fg: Some(color.into()),
                attrs: Some(Attr::BOLD.into()),
                ..Default::default()
            });
        })),
        ..Default::default()
    });
}

fn details(content: &SiteContent, palette: &Palette) {
    strong("Get in touch", palette.text);
    label(&content.contact_intro, palette.text_muted);
    label(&format!("✉  {}", content.email), palette.text_muted);
    label(&format!("☎  {}", content.phone), palette.text_muted);

    let links = content
        .links
        .iter()
        .map(|link| link.label.as_str())
        .collect::<Vec<_>>()
        .join("  ·  ");
    text(TextProps {
        content: links.into(),
        fg: Some(palette.highlight.into()),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reset_registry;
    use crate::renderer::render_tree;

    #[test]
    fn test_focus_cycles_through_fields() {
        let form = ContactForm::new();
        assert_eq!(form.focused(), None);
        assert_eq!(form.focus_next(), Field::Name);
        assert_eq!(form.focus_next(), Field::Email);
        assert_eq!(form.focus_next(), Field::Message);
        assert_eq!(form.focus_next(), Field::Name);
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let form = ContactForm::new();
        assert!(!form.type_char('x'), "nothing focused");

        form.focus(Field::Name);
        for c in "Ada".chars() {
            form.type_char(c);
        }
        assert!(form.backspace());
        assert_eq!(form.value(Field::Name), "Ad");

        form.type_char('\n');
        assert_eq!(form.focused(), Some(Field::Email), "enter moves on from single-line fields");

        form.focus(Field::Message);
        form.type_char('a');
        form.type_char('\n');
        form.type_char('b');
        assert_eq!(form.value(Field::Message), "a\nb");
    }

    #[test]
    fn test_placeholders_until_typed() {
        reset_registry();
        let form = ContactForm::new();
        let _cleanup = contact(&SiteContent::default(), &Palette::glow(), &form, 120);

        let frame = render_tree(120);
        assert!(frame.contains("Your name"));
        assert!(frame.contains("you@example.com"));
        assert!(frame.contains("Tell me about your project"));
        assert!(frame.contains("Send Message"));
        assert!(frame.contains("hello@fajri.dev"));

        form.focus(Field::Email);
        for c in "me@glow.dev".chars() {
            form.type_char(c);
        }
        let frame = render_tree(120);
        assert!(!frame.contains("you@example.com"));
        assert!(frame.contains("me@glow.dev"));
        assert!(frame.contains("┏"), "focused field drawn with a bold border");
    }
}
