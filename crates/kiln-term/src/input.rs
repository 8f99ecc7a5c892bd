// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into key events. Only the legacy keyboard encodings
// are understood, because those are the only ones a plain raw-mode terminal
// sends without opting into extra protocols:
//
// - Control bytes (Ctrl+letter, Enter, Tab, Backspace)
// - CSI sequences (arrows, Home/End, Page Up/Down, Delete, F-keys)
// - SS3 sequences (arrows and Home/End from application-cursor mode)
// - Alt+key (ESC followed by a printable byte)
// - UTF-8 multi-byte characters
//
// Escape sequences can span multiple `read()` calls, so the parser keeps a
// small pending buffer. When a read times out with bytes still pending,
// [`Parser::flush`] turns them into literal keys; a lone ESC becomes the
// Escape key.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// A Ctrl+key press.
    #[inline]
    #[must_use]
    pub const fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::CTRL,
        }
    }

    /// A key press with an explicit modifier set.
    #[inline]
    #[must_use]
    pub const fn with(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character. Ctrl+letter arrives as the lowercase letter
    /// with [`Modifiers::CTRL`] set.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F12.
    F(u8),
}

bitflags! {
    /// Keyboard modifier flags, in xterm's `param = 1 + bitmask` layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Incremental key parser.
///
/// Feed bytes via [`advance`](Parser::advance). Incomplete sequences stay
/// buffered until more bytes arrive or [`flush`](Parser::flush) is called.
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
        }
    }

    /// Feed raw bytes and return every key that could be decoded.
    pub fn advance(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(data);
        let mut keys = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Key(key, consumed) => {
                    keys.push(key);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }
        keys
    }

    /// Whether bytes are waiting for the rest of a sequence.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Resolve pending bytes as literal keys.
    ///
    /// A lone ESC becomes [`KeyCode::Escape`]. The bytes of an unfinished
    /// sequence such as `ESC [` come out as Escape followed by `[`.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let mut keys = Vec::new();
        for &byte in &self.buf {
            let key = match byte {
                0x1B => KeyEvent::plain(KeyCode::Escape),
                0x7F => KeyEvent::plain(KeyCode::Backspace),
                b @ 0x01..=0x1A => KeyEvent::ctrl(KeyCode::Char(char::from(b + b'a' - 1))),
                b @ 0x20..=0x7E => KeyEvent::plain(KeyCode::Char(char::from(b))),
                _ => continue,
            };
            keys.push(key);
        }
        self.buf.clear();
        keys
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ──────────────────────────────────────────────────────

enum Parsed {
    /// A key, and how many bytes it used.
    Key(KeyEvent, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized bytes to drop.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&lead) = buf.first() else {
        return Parsed::Skip(0);
    };

    match lead {
        0x1B => parse_escape(buf),
        0x00 => Parsed::Key(KeyEvent::ctrl(KeyCode::Char('@')), 1),
        0x09 => Parsed::Key(KeyEvent::plain(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Key(KeyEvent::plain(KeyCode::Enter), 1),
        0x7F => Parsed::Key(KeyEvent::plain(KeyCode::Backspace), 1),
        // Ctrl-H stays a Ctrl key; the editor decides it means backspace.
        b @ (0x01..=0x08 | 0x0B..=0x0C | 0x0E..=0x1A) => Parsed::Key(
            KeyEvent::ctrl(KeyCode::Char(char::from(b + b'a' - 1))),
            1,
        ),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::plain(KeyCode::Char(char::from(b))), 1),
        0xC0..=0xFF => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        0x1B => Parsed::Key(KeyEvent::with(KeyCode::Escape, Modifiers::ALT), 2),
        b @ 0x20..=0x7E => Parsed::Key(
            KeyEvent::with(KeyCode::Char(char::from(b)), Modifiers::ALT),
            2,
        ),
        _ => Parsed::Key(KeyEvent::plain(KeyCode::Escape), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    // Parameter bytes 0x30..=0x3F, intermediates 0x20..=0x2F, final 0x40..=0x7E.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    if final_byte == b'~' {
        let code = match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            _ => return Parsed::Skip(consumed),
        };
        return Parsed::Key(KeyEvent::with(code, modifiers), consumed);
    }

    let code = match final_byte {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'S' => KeyCode::F(4),
        // `CSI R` alone is F3; with two params it is a cursor report, dropped.
        b'R' if params.len() < 2 => KeyCode::F(3),
        b'Z' => return Parsed::Key(KeyEvent::with(KeyCode::Tab, Modifiers::SHIFT), consumed),
        _ => return Parsed::Skip(consumed),
    };
    Parsed::Key(KeyEvent::with(code, modifiers), consumed)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return Parsed::Skip(3),
    };
    Parsed::Key(KeyEvent::plain(code), 3)
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = utf8_char_len(buf[0]);
    if expected == 0 {
        return Parsed::Skip(1);
    }
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| {
            Parsed::Key(KeyEvent::plain(KeyCode::Char(ch)), expected)
        })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Semicolon-separated decimal parameters. Empty fields read as 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Decode an xterm modifier parameter (`1 + bitmask`).
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

/// UTF-8 sequence length from its lead byte, 0 when invalid.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(data: &[u8]) -> Vec<KeyEvent> {
        Parser::new().advance(data)
    }

    fn parse_one(data: &[u8]) -> KeyEvent {
        let keys = parse(data);
        assert_eq!(keys.len(), 1, "expected 1 key, got {keys:?}");
        keys[0]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    // ── Printable ───────────────────────────────────────────────────────

    #[test]
    fn ascii_chars() {
        assert_eq!(
            parse(b"ab~"),
            vec![
                key(KeyCode::Char('a')),
                key(KeyCode::Char('b')),
                key(KeyCode::Char('~')),
            ]
        );
    }

    #[test]
    fn utf8_multibyte() {
        assert_eq!(parse_one("é".as_bytes()), key(KeyCode::Char('é')));
        assert_eq!(parse_one("€".as_bytes()), key(KeyCode::Char('€')));
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "€".as_bytes();
        let mut parser = Parser::new();
        assert!(parser.advance(&bytes[..1]).is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.advance(&bytes[1..]), vec![key(KeyCode::Char('€'))]);
    }

    #[test]
    fn stray_continuation_byte_skipped() {
        assert_eq!(parse(b"\x80a"), vec![key(KeyCode::Char('a'))]);
    }

    // ── Control bytes ───────────────────────────────────────────────────

    #[test]
    fn ctrl_letters() {
        assert_eq!(parse_one(b"\x11"), KeyEvent::ctrl(KeyCode::Char('q')));
        assert_eq!(parse_one(b"\x13"), KeyEvent::ctrl(KeyCode::Char('s')));
        assert_eq!(parse_one(b"\x08"), KeyEvent::ctrl(KeyCode::Char('h')));
    }

    #[test]
    fn enter_tab_backspace() {
        assert_eq!(parse_one(b"\r"), key(KeyCode::Enter));
        assert_eq!(parse_one(b"\n"), key(KeyCode::Enter));
        assert_eq!(parse_one(b"\t"), key(KeyCode::Tab));
        assert_eq!(parse_one(b"\x7f"), key(KeyCode::Backspace));
    }

    // ── CSI ─────────────────────────────────────────────────────────────

    #[test]
    fn arrows() {
        assert_eq!(parse_one(b"\x1b[A"), key(KeyCode::Up));
        assert_eq!(parse_one(b"\x1b[B"), key(KeyCode::Down));
        assert_eq!(parse_one(b"\x1b[C"), key(KeyCode::Right));
        assert_eq!(parse_one(b"\x1b[D"), key(KeyCode::Left));
    }

    #[test]
    fn modified_arrow() {
        assert_eq!(
            parse_one(b"\x1b[1;5C"),
            KeyEvent::with(KeyCode::Right, Modifiers::CTRL)
        );
    }

    #[test]
    fn home_end_variants() {
        for seq in [&b"\x1b[H"[..], b"\x1b[1~", b"\x1b[7~", b"\x1bOH"] {
            assert_eq!(parse_one(seq), key(KeyCode::Home), "{seq:?}");
        }
        for seq in [&b"\x1b[F"[..], b"\x1b[4~", b"\x1b[8~", b"\x1bOF"] {
            assert_eq!(parse_one(seq), key(KeyCode::End), "{seq:?}");
        }
    }

    #[test]
    fn editing_keys() {
        assert_eq!(parse_one(b"\x1b[3~"), key(KeyCode::Delete));
        assert_eq!(parse_one(b"\x1b[5~"), key(KeyCode::PageUp));
        assert_eq!(parse_one(b"\x1b[6~"), key(KeyCode::PageDown));
        assert_eq!(parse_one(b"\x1b[2~"), key(KeyCode::Insert));
    }

    #[test]
    fn function_keys() {
        assert_eq!(parse_one(b"\x1bOP"), key(KeyCode::F(1)));
        assert_eq!(parse_one(b"\x1b[15~"), key(KeyCode::F(5)));
        assert_eq!(parse_one(b"\x1b[24~"), key(KeyCode::F(12)));
    }

    #[test]
    fn cursor_report_is_dropped() {
        assert_eq!(parse(b"\x1b[24;80Rx"), vec![key(KeyCode::Char('x'))]);
    }

    #[test]
    fn unknown_csi_skipped() {
        assert_eq!(parse(b"\x1b[99~a"), vec![key(KeyCode::Char('a'))]);
    }

    #[test]
    fn alt_letter() {
        assert_eq!(
            parse_one(b"\x1bx"),
            KeyEvent::with(KeyCode::Char('x'), Modifiers::ALT)
        );
    }

    // ── Pending / flush ─────────────────────────────────────────────────

    #[test]
    fn lone_escape_waits_then_flushes() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b").is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.flush(), vec![key(KeyCode::Escape)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn split_csi_sequence() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b[").is_empty());
        assert_eq!(parser.advance(b"A"), vec![key(KeyCode::Up)]);
    }

    #[test]
    fn flush_unfinished_csi() {
        let mut parser = Parser::new();
        parser.advance(b"\x1b[");
        assert_eq!(
            parser.flush(),
            vec![key(KeyCode::Escape), key(KeyCode::Char('['))]
        );
    }

    #[test]
    fn rapid_arrows_in_one_read() {
        assert_eq!(
            parse(b"\x1b[A\x1b[A\x1b[B"),
            vec![key(KeyCode::Up), key(KeyCode::Up), key(KeyCode::Down)]
        );
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    #[test]
    fn params_parse() {
        assert_eq!(parse_params(b""), Vec::<u16>::new());
        assert_eq!(parse_params(b"1;5"), vec![1, 5]);
        assert_eq!(parse_params(b";3"), vec![0, 3]);
        assert_eq!(parse_params(b"99999"), vec![u16::MAX]);
    }

    #[test]
    fn modifier_decoding() {
        assert_eq!(decode_modifiers(0), Modifiers::empty());
        assert_eq!(decode_modifiers(1), Modifiers::empty());
        assert_eq!(decode_modifiers(2), Modifiers::SHIFT);
        assert_eq!(decode_modifiers(6), Modifiers::CTRL | Modifiers::SHIFT);
    }
}
