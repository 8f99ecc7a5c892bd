//! View — the bridge from document to terminal frame.
//!
//! A `View` holds only the scroll offsets and the size of the text area. It
//! doesn't own the document or the cursor; those are passed to
//! [`scroll`](View::scroll) and [`draw`](View::draw) every frame.
//!
//! The screen layout:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ text rows                    │ ← screenrows
//! │ ~                            │
//! │ ~                            │
//! │ main.c - 42 lines (modified) │ ← status bar (inverse video)
//! │ HELP: Ctrl-S = save | ...    │ ← message bar
//! └──────────────────────────────┘
//! ```
//!
//! Every line of the frame ends by erasing to the right, so the whole
//! screen is repainted without a separate clear.

use kiln_term::ansi;
use kiln_term::color::CellColor;
use kiln_term::output::{self, OutputBuffer};
use kiln_term::terminal::Size;

use crate::cursor::Cursor;
use crate::document::Document;
use crate::highlight::Highlight;

/// Status and message bar rows below the text area.
pub const BAR_ROWS: usize = 2;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Foreground color for a highlight tag.
#[must_use]
pub const fn color(tag: Highlight) -> CellColor {
    match tag {
        Highlight::Normal => CellColor::Default,
        Highlight::Number => CellColor::RED,
        Highlight::Keyword => CellColor::YELLOW,
        Highlight::TypeKeyword => CellColor::GREEN,
        Highlight::String => CellColor::MAGENTA,
        Highlight::Comment | Highlight::BlockComment => CellColor::CYAN,
        Highlight::Match => CellColor::BLUE,
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct View {
    rowoff: usize,
    coloff: usize,
    screenrows: usize,
    screencols: usize,
}

impl View {
    /// A view with a text area of `screenrows` x `screencols`.
    #[must_use]
    pub const fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            screenrows,
            screencols,
        }
    }

    /// Fit the text area to a terminal of `size`, leaving room for the bars.
    pub fn resize(&mut self, size: Size) {
        self.screenrows = usize::from(size.rows).saturating_sub(BAR_ROWS);
        self.screencols = usize::from(size.cols);
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn rowoff(&self) -> usize {
        self.rowoff
    }

    #[inline]
    #[must_use]
    pub const fn coloff(&self) -> usize {
        self.coloff
    }

    #[inline]
    #[must_use]
    pub const fn screenrows(&self) -> usize {
        self.screenrows
    }

    #[inline]
    #[must_use]
    pub const fn screencols(&self) -> usize {
        self.screencols
    }

    /// `(rowoff, coloff)`, for saving around a find session.
    #[inline]
    #[must_use]
    pub const fn offsets(&self) -> (usize, usize) {
        (self.rowoff, self.coloff)
    }

    pub const fn set_offsets(&mut self, rowoff: usize, coloff: usize) {
        self.rowoff = rowoff;
        self.coloff = coloff;
    }

    // -- Scrolling ----------------------------------------------------------

    /// Recompute the cursor's render column and move the offsets just far
    /// enough to keep the cursor on screen.
    pub fn scroll(&mut self, cursor: &mut Cursor, doc: &Document) {
        let rx = doc.row(cursor.cy()).map_or(0, |row| row.cx_to_rx(cursor.cx()));
        cursor.set_rx(rx);

        let cy = cursor.cy();
        if cy < self.rowoff {
            self.rowoff = cy;
        }
        if cy >= self.rowoff + self.screenrows {
            self.rowoff = (cy + 1).saturating_sub(self.screenrows);
        }
        if rx < self.coloff {
            self.coloff = rx;
        }
        if rx >= self.coloff + self.screencols {
            self.coloff = (rx + 1).saturating_sub(self.screencols);
        }
    }

    /// Where the terminal cursor goes, 0-indexed `(x, y)`.
    #[must_use]
    pub fn cursor_screen(&self, cursor: &Cursor) -> (u16, u16) {
        let x = cursor.rx().saturating_sub(self.coloff);
        let y = cursor.cy().saturating_sub(self.rowoff);
        (
            u16::try_from(x).unwrap_or(u16::MAX),
            u16::try_from(y).unwrap_or(u16::MAX),
        )
    }

    // -- Drawing ------------------------------------------------------------

    /// Compose a full frame: text rows, status bar, message bar.
    ///
    /// `message` is the status message still within its display time.
    pub fn draw(
        &self,
        out: &mut OutputBuffer,
        doc: &Document,
        cursor: &Cursor,
        message: Option<&str>,
    ) {
        self.draw_rows(out, doc);
        self.draw_status_bar(out, doc, cursor);
        self.draw_message_bar(out, message);
    }

    /// The text area: visible slices of each row, tildes past the end, and
    /// the welcome banner on an empty document.
    pub fn draw_rows(&self, out: &mut OutputBuffer, doc: &Document) {
        for y in 0..self.screenrows {
            let filerow = y + self.rowoff;
            match doc.row(filerow) {
                Some(row) => self.draw_text(out, row.render(), row.highlight()),
                None if doc.is_empty() && y == self.screenrows / 3 => {
                    self.draw_welcome(out);
                }
                None => out.push_bytes(b"~"),
            }
            ansi::clear_line(out).ok();
            out.push_bytes(b"\r\n");
        }
    }

    fn draw_welcome(&self, out: &mut OutputBuffer) {
        let welcome = format!("Kiln editor -- version {VERSION}");
        let len = welcome.len().min(self.screencols);
        let mut padding = (self.screencols - len) / 2;
        if padding > 0 {
            out.push_bytes(b"~");
            padding -= 1;
        }
        out.push_bytes(" ".repeat(padding).as_bytes());
        out.push_bytes(&welcome.as_bytes()[..len]);
    }

    fn draw_text(&self, out: &mut OutputBuffer, render: &[u8], tags: &[Highlight]) {
        let start = self.coloff.min(render.len());
        let end = (start + self.screencols).min(render.len());
        let mut current: Option<CellColor> = None;

        for (&c, &tag) in render[start..end].iter().zip(&tags[start..end]) {
            if c < 32 || c == 127 {
                let sym = if c <= 26 { b'@' + c } else { b'?' };
                ansi::inverse(out).ok();
                out.push_bytes(&[sym]);
                ansi::reset(out).ok();
                if let Some(color) = current {
                    ansi::fg(out, color).ok();
                }
            } else if tag == Highlight::Normal {
                if current.take().is_some() {
                    ansi::fg(out, CellColor::Default).ok();
                }
                out.push_bytes(&[c]);
            } else {
                let color = self::color(tag);
                if current != Some(color) {
                    current = Some(color);
                    ansi::fg(out, color).ok();
                }
                out.push_bytes(&[c]);
            }
        }
        ansi::fg(out, CellColor::Default).ok();
    }

    /// Inverse-video bar: file name, line count, modified flag on the left;
    /// file type and cursor line on the right.
    pub fn draw_status_bar(&self, out: &mut OutputBuffer, doc: &Document, cursor: &Cursor) {
        let name = doc
            .path()
            .map_or_else(|| "[No Name]".to_owned(), |p| p.display().to_string());
        let name: String = name.chars().take(20).collect();
        let modified = if doc.is_dirty() { "(modified)" } else { "" };
        let left = format!("{name} - {} lines {modified}", doc.numrows());
        let right = format!(
            "{} | {}/{}",
            doc.filetype().unwrap_or("no ft"),
            cursor.cy() + 1,
            doc.numrows()
        );
        let right_len = output::display_width(&right);

        ansi::inverse(out).ok();
        let mut len = out.push_str_clipped(&left, self.screencols);
        while len < self.screencols {
            if self.screencols - len == right_len {
                out.push_bytes(right.as_bytes());
                break;
            }
            out.push_bytes(b" ");
            len += 1;
        }
        out.push_bytes(b"\x1b[m");
        out.push_bytes(b"\r\n");
    }

    /// The last line: the status message, clipped to the screen width.
    pub fn draw_message_bar(&self, out: &mut OutputBuffer, message: Option<&str>) {
        ansi::clear_line(out).ok();
        if let Some(msg) = message {
            out.push_str_clipped(msg, self.screencols);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
