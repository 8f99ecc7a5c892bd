//! Prompt — modal single-line input shown in the message bar.
//!
//! The editor owns at most one prompt at a time and routes every key to it
//! while it is open. [`Prompt::handle_key`] reports what happened so the
//! caller can react to each keystroke (incremental search) as well as to
//! the final outcome.

use crate::key::Key;

/// Outcome of one key press in a prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptEvent {
    /// Still open; the input may or may not have changed.
    Edited,
    /// Enter with acceptable input. The prompt is finished.
    Accepted(String),
    /// Escape. The prompt is finished.
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct Prompt {
    prefix: String,
    suffix: String,
    input: String,
    allow_empty: bool,
}

impl Prompt {
    /// A prompt displayed as `prefix`, the input, then `suffix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            input: String::new(),
            allow_empty: false,
        }
    }

    /// Let Enter accept an empty input.
    #[must_use]
    pub const fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The message-bar text for the current input.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{}{}{}", self.prefix, self.input, self.suffix)
    }

    pub fn handle_key(&mut self, key: Key) -> PromptEvent {
        match key {
            k if k.is_erase() => {
                self.input.pop();
            }
            Key::Escape => return PromptEvent::Cancelled,
            Key::Enter => {
                if !self.input.is_empty() || self.allow_empty {
                    return PromptEvent::Accepted(self.input.clone());
                }
            }
            Key::Byte(b) if (0x20..0x7F).contains(&b) => self.input.push(char::from(b)),
            _ => {}
        }
        PromptEvent::Edited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(prompt: &mut Prompt, text: &str) {
        for b in text.bytes() {
            assert_eq!(prompt.handle_key(Key::Byte(b)), PromptEvent::Edited);
        }
    }

    #[test]
    fn message_wraps_input() {
        let mut p = Prompt::new("Save as: ", " (ESC to cancel)");
        typed(&mut p, "a.c");
        assert_eq!(p.message(), "Save as: a.c (ESC to cancel)");
    }

    #[test]
    fn enter_accepts_non_empty() {
        let mut p = Prompt::new("> ", "");
        typed(&mut p, "x");
        assert_eq!(p.handle_key(Key::Enter), PromptEvent::Accepted("x".into()));
    }

    #[test]
    fn enter_on_empty_keeps_prompting() {
        let mut p = Prompt::new("> ", "");
        assert_eq!(p.handle_key(Key::Enter), PromptEvent::Edited);
    }

    #[test]
    fn allow_empty_accepts_nothing() {
        let mut p = Prompt::new("> ", "").allow_empty();
        assert_eq!(p.handle_key(Key::Enter), PromptEvent::Accepted(String::new()));
    }

    #[test]
    fn escape_cancels() {
        let mut p = Prompt::new("> ", "");
        typed(&mut p, "abc");
        assert_eq!(p.handle_key(Key::Escape), PromptEvent::Cancelled);
    }

    #[test]
    fn erase_keys() {
        let mut p = Prompt::new("", "");
        typed(&mut p, "abcd");
        p.handle_key(Key::Backspace);
        p.handle_key(Key::Delete);
        p.handle_key(Key::Ctrl(b'h'));
        assert_eq!(p.input(), "a");
        p.handle_key(Key::Backspace);
        p.handle_key(Key::Backspace);
        assert_eq!(p.input(), "");
    }

    #[test]
    fn only_printable_ascii_is_appended() {
        let mut p = Prompt::new("", "");
        p.handle_key(Key::Byte(b'\t'));
        p.handle_key(Key::Unicode('é'));
        p.handle_key(Key::Ctrl(b'a'));
        p.handle_key(Key::ArrowLeft);
        p.handle_key(Key::Byte(b'~'));
        assert_eq!(p.input(), "~");
    }
}
