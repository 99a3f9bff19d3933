//! Input - Terminal events to page actions.
//!
//! # API
//!
//! - [`convert_event`] - crossterm event to a [`PageAction`]
//! - [`apply_action`] - run an action against the page state
//! - [`poll_action`] - non-blocking read with timeout
//!
//! # Keys
//!
//! | Key | Action |
//! |---|---|
//! | Up / Down, mouse wheel | scroll |
//! | PageUp / PageDown / Space | scroll a page |
//! | Home / End | top / bottom |
//! | Tab | next contact field |
//! | typing, Backspace, Enter | edit the focused field |
//! | Esc | leave the field, or quit when none is focused |
//! | q | quit when no field is focused |
//! | Ctrl+C | quit |

use std::time::Duration;

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use crate::pipeline::viewport::{page_rows, scroll_by, scroll_offset, scroll_to, LINE_SCROLL};
use crate::pipeline::set_viewport_size;
use crate::renderer::Frame;
use crate::site::{ContactForm, Gallery};

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_SCROLL: i32 = 3;

// =============================================================================
// PAGE ACTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Scroll by a number of rows (negative = up).
    Scroll(i32),
    ScrollTop,
    ScrollBottom,
    FocusNext,
    Type(char),
    Backspace,
    Blur,
    /// Pointer moved to a screen cell.
    Pointer { x: u16, y: u16 },
    Resize(u16, u16),
    Quit,
    None,
}

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert a crossterm event. `editing` is true while a form field has focus.
pub fn convert_event(event: CrosstermEvent, editing: bool) -> PageAction {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key, editing),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Resize(w, h) => PageAction::Resize(w, h),
        _ => PageAction::None,
    }
}

pub fn convert_key_event(event: CrosstermKeyEvent, editing: bool) -> PageAction {
    if event.kind == KeyEventKind::Release {
        return PageAction::None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return PageAction::Quit;
    }

    let page = page_rows();
    match event.code {
        KeyCode::Up => PageAction::Scroll(-(LINE_SCROLL as i32)),
        KeyCode::Down => PageAction::Scroll(LINE_SCROLL as i32),
        KeyCode::PageUp => PageAction::Scroll(-page),
        KeyCode::PageDown => PageAction::Scroll(page),
        KeyCode::Home if !editing => PageAction::ScrollTop,
        KeyCode::End if !editing => PageAction::ScrollBottom,
        KeyCode::Tab => PageAction::FocusNext,
        KeyCode::Esc if editing => PageAction::Blur,
        KeyCode::Esc => PageAction::Quit,
        KeyCode::Backspace if editing => PageAction::Backspace,
        KeyCode::Enter if editing => PageAction::Type('\n'),
        KeyCode::Char(c) if editing => PageAction::Type(c),
        KeyCode::Char('q') => PageAction::Quit,
        KeyCode::Char(' ') => PageAction::Scroll(page),
        _ => PageAction::None,
    }
}

pub fn convert_mouse_event(event: CrosstermMouseEvent) -> PageAction {
    match event.kind {
        MouseEventKind::ScrollUp => PageAction::Scroll(-WHEEL_SCROLL),
        MouseEventKind::ScrollDown => PageAction::Scroll(WHEEL_SCROLL),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PageAction::Pointer {
            x: event.column,
            y: event.row,
        },
        _ => PageAction::None,
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Wait up to `timeout` for the next event.
pub fn poll_action(timeout: Duration, editing: bool) -> std::io::Result<Option<PageAction>> {
    if poll(timeout)? {
        Ok(Some(convert_event(read()?, editing)))
    } else {
        Ok(None)
    }
}

// =============================================================================
// APPLYING
// =============================================================================

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Nothing visible changed.
    Idle,
    /// Draw again.
    Redraw,
    Quit,
}

/// Apply `action` to the page. `frame` is the last rendered frame.
pub fn apply_action(
    action: PageAction,
    frame: &Frame,
    rows: u16,
    form: &ContactForm,
    gallery: &Gallery,
) -> Flow {
    let max = frame.max_scroll(rows);
    let changed = match action {
        PageAction::Scroll(delta) => scroll_by(delta, max),
        PageAction::ScrollTop => {
            let moved = scroll_offset() != 0;
            scroll_to(0, max);
            moved
        }
        PageAction::ScrollBottom => {
            let moved = scroll_offset() != max;
            scroll_to(max, max);
            moved
        }
        PageAction::FocusNext => {
            let field = form.focus_next();
            tracing::trace!(?field, "focus moved");
            true
        }
        PageAction::Type(c) => form.type_char(c),
        PageAction::Backspace => form.backspace(),
        PageAction::Blur => {
            form.blur();
            true
        }
        PageAction::Pointer { x, y } => {
            gallery.pointer_move(frame, x, y.saturating_add(scroll_offset()))
        }
        PageAction::Resize(width, height) => {
            set_viewport_size(width, height);
            true
        }
        PageAction::Quit => return Flow::Quit,
        PageAction::None => false,
    };
    if changed { Flow::Redraw } else { Flow::Idle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_keys_depend_on_editing() {
        assert_eq!(convert_key_event(key(KeyCode::Char('q')), false), PageAction::Quit);
        assert_eq!(convert_key_event(key(KeyCode::Char('q')), true), PageAction::Type('q'));
        assert_eq!(convert_key_event(key(KeyCode::Esc), true), PageAction::Blur);
        assert_eq!(convert_key_event(key(KeyCode::Esc), false), PageAction::Quit);
        assert_eq!(convert_key_event(key(KeyCode::Enter), true), PageAction::Type('\n'));
        assert_eq!(convert_key_event(key(KeyCode::Down), true), PageAction::Scroll(1));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let event = CrosstermKeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(convert_key_event(event, true), PageAction::Quit);
    }

    #[test]
    fn test_release_is_ignored() {
        let event = CrosstermKeyEvent {
            kind: KeyEventKind::Release,
            ..key(KeyCode::Char('q'))
        };
        assert_eq!(convert_key_event(event, false), PageAction::None);
    }

    #[test]
    fn test_mouse_events() {
        let mouse = |kind| CrosstermMouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(convert_mouse_event(mouse(MouseEventKind::Moved)), PageAction::Pointer { x: 7, y: 3 });
        assert_eq!(convert_mouse_event(mouse(MouseEventKind::ScrollDown)), PageAction::Scroll(3));
    }

    #[test]
    fn test_apply_scroll_clamps_to_frame() {
        let frame = Frame {
            width: 10,
            lines: vec![Default::default(); 30],
            ..Default::default()
        };
        let form = ContactForm::new();
        let gallery = Gallery::new(0);
        scroll_to(0, 0);

        assert_eq!(apply_action(PageAction::Scroll(-1), &frame, 10, &form, &gallery), Flow::Idle);
        assert_eq!(apply_action(PageAction::ScrollBottom, &frame, 10, &form, &gallery), Flow::Redraw);
        assert_eq!(scroll_offset(), 20);
        assert_eq!(apply_action(PageAction::Scroll(5), &frame, 10, &form, &gallery), Flow::Idle);
        assert_eq!(apply_action(PageAction::Quit, &frame, 10, &form, &gallery), Flow::Quit);
    }

    #[test]
    fn test_apply_form_actions() {
        let frame = Frame::default();
        let form = ContactForm::new();
        let gallery = Gallery::new(0);

        assert_eq!(apply_action(PageAction::Type('x'), &frame, 10, &form, &gallery), Flow::Idle);
        apply_action(PageAction::FocusNext, &frame, 10, &form, &gallery);
        assert_eq!(apply_action(PageAction::Type('x'), &frame, 10, &form, &gallery), Flow::Redraw);
        assert_eq!(form.value(crate::site::Field::Name), "x");
    }
}
