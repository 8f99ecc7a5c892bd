//! Cursor — position in the document and movement rules.
//!
//! The cursor is a raw position (`cx` byte column, `cy` row) plus the derived
//! render column `rx`, which the view recomputes on every scroll. `cy` may
//! equal the row count: that is the empty line past the end where typing
//! appends a new row.
//!
//! Horizontal movement wraps across row ends; vertical movement keeps `cx`
//! and then snaps it back inside the destination row.

use crate::document::Document;
use crate::key::Key;
use crate::position::Position;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    cx: usize,
    cy: usize,
    rx: usize,
}

impl Cursor {
    #[must_use]
    pub const fn new() -> Self {
        Self { cx: 0, cy: 0, rx: 0 }
    }

    #[must_use]
    pub const fn at(pos: Position) -> Self {
        Self {
            cx: pos.col,
            cy: pos.row,
            rx: 0,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.cy, self.cx)
    }

    #[inline]
    #[must_use]
    pub const fn cx(&self) -> usize {
        self.cx
    }

    #[inline]
    #[must_use]
    pub const fn cy(&self) -> usize {
        self.cy
    }

    /// Render column, valid after the last [`View::scroll`](crate::view::View::scroll).
    #[inline]
    #[must_use]
    pub const fn rx(&self) -> usize {
        self.rx
    }

    /// Jump to `pos` as returned by a document edit.
    pub const fn set_position(&mut self, pos: Position) {
        self.cx = pos.col;
        self.cy = pos.row;
    }

    pub(crate) const fn set_rx(&mut self, rx: usize) {
        self.rx = rx;
    }

    // -- Movement -----------------------------------------------------------

    /// Apply an arrow key. Other keys are ignored.
    pub fn move_key(&mut self, key: Key, doc: &Document) {
        match key {
            Key::ArrowLeft => self.move_left(doc),
            Key::ArrowRight => self.move_right(doc),
            Key::ArrowUp => self.move_up(doc),
            Key::ArrowDown => self.move_down(doc),
            _ => {}
        }
    }

    /// One byte left, or to the end of the previous row at column 0.
    pub fn move_left(&mut self, doc: &Document) {
        if self.cx > 0 {
            self.cx -= 1;
        } else if self.cy > 0 {
            self.cy -= 1;
            self.cx = doc.row_len(self.cy);
        }
        self.snap(doc);
    }

    /// One byte right, or to the start of the next row at the row end.
    /// Does nothing on the line past the end.
    pub fn move_right(&mut self, doc: &Document) {
        if let Some(row) = doc.row(self.cy) {
            if self.cx < row.size() {
                self.cx += 1;
            } else {
                self.cy += 1;
                self.cx = 0;
            }
        }
        self.snap(doc);
    }

    pub fn move_up(&mut self, doc: &Document) {
        self.cy = self.cy.saturating_sub(1);
        self.snap(doc);
    }

    /// One row down, stopping on the line past the end.
    pub fn move_down(&mut self, doc: &Document) {
        if self.cy < doc.numrows() {
            self.cy += 1;
        }
        self.snap(doc);
    }

    pub const fn home(&mut self) {
        self.cx = 0;
    }

    /// End of the current row. No-op past the end.
    pub fn end(&mut self, doc: &Document) {
        if self.cy < doc.numrows() {
            self.cx = doc.row_len(self.cy);
        }
    }

    /// Page Up/Down within a viewport starting at `rowoff` and `screenrows`
    /// tall: jump to the viewport edge, then move a screenful.
    pub fn page(&mut self, key: Key, doc: &Document, rowoff: usize, screenrows: usize) {
        let step = match key {
            Key::PageUp => {
                self.cy = rowoff;
                Key::ArrowUp
            }
            Key::PageDown => {
                self.cy = (rowoff + screenrows).saturating_sub(1).min(doc.numrows());
                Key::ArrowDown
            }
            _ => return,
        };
        for _ in 0..screenrows {
            self.move_key(step, doc);
        }
    }

    /// Pull `cy` back inside `0..=numrows` and `cx` inside its row.
    pub fn snap(&mut self, doc: &Document) {
        self.cy = self.cy.min(doc.numrows());
        self.cx = self.cx.min(doc.row_len(self.cy));
    }
}
