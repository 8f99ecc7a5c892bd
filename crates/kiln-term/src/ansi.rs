// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit. The editor's view layer decides what a
// frame looks like; this module only knows the byte-level encoding.
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI standard uses 1-based coordinates).
use std::io::{self, Write};

use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor to the top-left corner (CUP with no arguments).
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Push the cursor as far right and down as the terminal allows.
///
/// CUF/CUD stop at the screen edge, which is what makes the size fallback
/// in `terminal.rs` work. `CUP 999;999` is not specified to clamp.
#[inline]
pub fn cursor_to_far_corner(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[999C\x1b[999B")
}

/// Ask the terminal to report the cursor position (DSR 6).
///
/// The reply arrives on stdin as `ESC [ rows ; cols R`.
#[inline]
pub fn request_cursor_position(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[6n")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Erase from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Switch to the alternate screen buffer.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Return to the main screen buffer, restoring the shell's content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Swap foreground and background (SGR 7).
#[inline]
pub fn inverse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[7m")
}

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97) and the
/// 256-color extended format for palette indices 16-255.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
