//! Row — one line of text and everything derived from it.
//!
//! A row owns its raw bytes plus two derived arrays that are kept in step
//! with them: the tab-expanded render bytes and one [`Highlight`] per render
//! byte. Every raw mutation goes through a method here that rebuilds the
//! render bytes and resizes the tags, so `highlight.len() == render.len()`
//! holds between any two calls. Reclassifying the tags (which needs the
//! previous row's comment state) is the document's job.

use crate::column;
use crate::highlight::{self, Highlight};
use crate::syntax::Syntax;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    index: usize,
    raw: Vec<u8>,
    render: Vec<u8>,
    highlight: Vec<Highlight>,
    open_at_start: bool,
    open_comment: bool,
}

impl Row {
    /// A row at `index` holding `raw`, with all tags `Normal`.
    #[must_use]
    pub(crate) fn new(index: usize, raw: Vec<u8>) -> Self {
        let render = column::expand_tabs(&raw);
        let highlight = vec![Highlight::Normal; render.len()];
        Self {
            index,
            raw,
            render,
            highlight,
            open_at_start: false,
            open_comment: false,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Position of this row in its document.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Tab-expanded bytes, as drawn on screen.
    #[inline]
    #[must_use]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// One tag per render byte.
    #[inline]
    #[must_use]
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Raw length in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Render length in bytes.
    #[inline]
    #[must_use]
    pub fn rsize(&self) -> usize {
        self.render.len()
    }

    /// Whether classification ended inside an unterminated block comment.
    #[inline]
    #[must_use]
    pub const fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// Render column of raw column `cx`.
    #[inline]
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        column::raw_to_render(&self.raw, cx)
    }

    /// Raw column covering render column `rx`.
    #[inline]
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        column::render_to_raw(&self.raw, rx)
    }

    // -- Raw mutation -------------------------------------------------------

    pub(crate) const fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Insert `byte` at `at`, clamped to the row length.
    pub(crate) fn insert(&mut self, at: usize, byte: u8) {
        let at = at.min(self.raw.len());
        self.raw.insert(at, byte);
        self.refresh_render();
    }

    /// Remove the byte at `at`. Returns false if `at` is out of range.
    pub(crate) fn remove(&mut self, at: usize) -> bool {
        if at >= self.raw.len() {
            return false;
        }
        self.raw.remove(at);
        self.refresh_render();
        true
    }

    pub(crate) fn append(&mut self, bytes: &[u8]) {
        self.raw.extend_from_slice(bytes);
        self.refresh_render();
    }

    /// Cut the row at `at` (clamped) and return the tail.
    pub(crate) fn split_off(&mut self, at: usize) -> Vec<u8> {
        let tail = self.raw.split_off(at.min(self.raw.len()));
        self.refresh_render();
        tail
    }

    fn refresh_render(&mut self) {
        self.render = column::expand_tabs(&self.raw);
        self.highlight.resize(self.render.len(), Highlight::Normal);
    }

    // -- Highlight ----------------------------------------------------------

    /// Reclassify the render bytes given the previous row's comment state.
    ///
    /// Returns true if this row's own carried state changed, meaning the
    /// next row must be reclassified too.
    pub(crate) fn rehighlight(&mut self, syntax: Option<&Syntax>, open_at_start: bool) -> bool {
        let (tags, open) = highlight::highlight_row(&self.render, syntax, open_at_start);
        self.highlight = tags;
        self.open_at_start = open_at_start;
        let changed = open != self.open_comment;
        self.open_comment = open;
        changed
    }

    /// The comment state the current tags were computed against.
    #[inline]
    pub(crate) const fn open_at_start(&self) -> bool {
        self.open_at_start
    }

    /// Tag `len` render bytes from `start` with `tag`, returning the tags
    /// that were there before. The range is clipped to the row.
    pub(crate) fn overlay(&mut self, start: usize, len: usize, tag: Highlight) -> Vec<Highlight> {
        let saved = self.highlight.clone();
        let start = start.min(self.highlight.len());
        let end = start.saturating_add(len).min(self.highlight.len());
        self.highlight[start..end].fill(tag);
        saved
    }

    /// Put back tags saved by [`overlay`](Self::overlay).
    ///
    /// Ignored (returns false) if the row's render length changed since, in
    /// which case the saved tags no longer describe it.
    pub(crate) fn restore(&mut self, saved: Vec<Highlight>) -> bool {
        if saved.len() != self.render.len() {
            return false;
        }
        self.highlight = saved;
        true
    }
}
