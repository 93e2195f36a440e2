use crate::domain::AnnotationKind;
use crate::session::messages::SessionAction;

/// Key pressed in the editor, already translated from the host toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Escape,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Ctrl, or Cmd on macOS
    pub command: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        command: false,
        shift: false,
    };
    pub const COMMAND: Self = Self {
        command: true,
        shift: false,
    };
}

pub fn handle_key_event(key: Key, modifiers: Modifiers, dragging: bool) -> Option<SessionAction> {
    match key {
        // Ctrl+C / Ctrl+S / Ctrl+Z
        Key::Character(c) if modifiers.command && c.eq_ignore_ascii_case(&'c') => {
            Some(SessionAction::Copy)
        }
        Key::Character(c) if modifiers.command && c.eq_ignore_ascii_case(&'s') => {
            Some(SessionAction::Save)
        }
        Key::Character(c) if modifiers.command && c.eq_ignore_ascii_case(&'z') => {
            Some(SessionAction::undo())
        }
        Key::Character(_) if modifiers.command => None,
        Key::Enter if modifiers.command => Some(SessionAction::Copy),
        Key::Escape => Some(SessionAction::Cancel),
        // Tool and color keys would change the shape under the pointer mid-drag
        Key::Character(_) if dragging => None,
        Key::Character(c) if c.eq_ignore_ascii_case(&'x') => Some(SessionAction::PickColor),
        Key::Character(c) if c == 'T' && modifiers.shift => Some(SessionAction::cycle_kind()),
        Key::Character(c) => AnnotationKind::from_shortcut(c).map(SessionAction::set_kind),
        Key::Enter => None,
    }
}
