//! Key — the editor's view of a key press.
//!
//! The terminal layer reports rich [`KeyEvent`]s (code plus modifier set).
//! The editor only distinguishes a small closed set: a byte to insert, a
//! control chord, or one of the named movement/editing keys. Everything
//! else (function keys, Insert, Alt chords) maps to `None` and is ignored.

use kiln_term::input::{KeyCode, KeyEvent, Modifiers};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    /// Printable ASCII or tab, inserted as-is.
    Byte(u8),
    /// Ctrl plus a letter, carried as the lowercase letter (`Ctrl(b'q')`).
    Ctrl(u8),
    /// A non-ASCII character, inserted as its UTF-8 bytes.
    Unicode(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Backspace,
    Enter,
    Escape,
}

impl Key {
    /// Map a decoded terminal event. `None` for keys the editor ignores.
    #[must_use]
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.modifiers.contains(Modifiers::ALT) {
            return None;
        }
        let key = match event.code {
            KeyCode::Char(c) if event.modifiers.contains(Modifiers::CTRL) => {
                Self::Ctrl(u8::try_from(c.to_ascii_lowercase()).ok()?)
            }
            KeyCode::Char(c) => u8::try_from(c)
                .ok()
                .filter(u8::is_ascii)
                .map_or(Self::Unicode(c), Self::Byte),
            KeyCode::Tab => Self::Byte(b'\t'),
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Escape => Self::Escape,
            KeyCode::Delete => Self::Delete,
            KeyCode::Up => Self::ArrowUp,
            KeyCode::Down => Self::ArrowDown,
            KeyCode::Left => Self::ArrowLeft,
            KeyCode::Right => Self::ArrowRight,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,
            KeyCode::Insert | KeyCode::F(_) => return None,
        };
        Some(key)
    }

    /// Whether this is one of the four arrow keys.
    #[must_use]
    pub const fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }

    /// Backspace, Delete, or Ctrl-H.
    #[must_use]
    pub const fn is_erase(self) -> bool {
        matches!(self, Self::Backspace | Self::Delete | Self::Ctrl(b'h'))
    }
}
