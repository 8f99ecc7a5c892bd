//! Search — incremental literal search with a transient match overlay.
//!
//! The editor calls [`SearchState::step`] after every keystroke of the find
//! prompt, passing the current query and the key that was just pressed.
//! Arrow keys move between matches without changing the query; any other
//! key restarts the scan from the top of the document.
//!
//! # Match overlay
//!
//! A hit paints its bytes with [`Highlight::Match`] after saving the row's
//! previous tags. The next step (or [`SearchState::restore`] when the
//! prompt closes) puts them back, so at most one row carries the overlay
//! at a time. The overlay is dropped rather than restored if the row has
//! since changed length.

use tracing::trace;

use crate::document::Document;
use crate::highlight::Highlight;
use crate::key::Key;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

// ---------------------------------------------------------------------------
// SearchHit
// ---------------------------------------------------------------------------

/// Where a step landed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchHit {
    pub row: usize,
    /// Raw column of the first matched byte.
    pub col: usize,
    /// Render column of the first matched byte.
    pub render_col: usize,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct SavedHighlight {
    row: usize,
    tags: Vec<Highlight>,
}

/// State carried between steps of one find session.
#[derive(Debug, Default)]
pub struct SearchState {
    last_match: Option<usize>,
    direction: Direction,
    saved: Option<SavedHighlight>,
}

impl SearchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a match overlay is currently painted.
    #[inline]
    #[must_use]
    pub const fn has_overlay(&self) -> bool {
        self.saved.is_some()
    }

    /// Put back the tags hidden by the current overlay, if any.
    pub fn restore(&mut self, doc: &mut Document) {
        if let Some(saved) = self.saved.take() {
            doc.restore_highlight(saved.row, saved.tags);
        }
    }

    /// Advance the search after `key` was pressed with `query` in the
    /// prompt.
    ///
    /// Enter and Escape end the session: the state resets and nothing is
    /// found. Right/Down search forward from the last match, Left/Up
    /// backward; any other key searches forward from the top.
    pub fn step(&mut self, doc: &mut Document, query: &str, key: Key) -> Option<SearchHit> {
        self.restore(doc);

        match key {
            Key::Enter | Key::Escape => {
                self.last_match = None;
                self.direction = Direction::Forward;
                return None;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = Direction::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = Direction::Backward,
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let numrows = doc.numrows();
        if query.is_empty() || numrows == 0 {
            return None;
        }
        let needle = query.as_bytes();

        let mut current = self.last_match;
        for _ in 0..numrows {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(at), Direction::Forward) => {
                    if at + 1 >= numrows {
                        0
                    } else {
                        at + 1
                    }
                }
                (Some(at), Direction::Backward) => {
                    if at == 0 {
                        numrows - 1
                    } else {
                        at - 1
                    }
                }
            };
            current = Some(next);

            let Some(row) = doc.row(next) else { continue };
            let Some(render_col) = find(row.render(), needle) else {
                continue;
            };

            let col = row.rx_to_cx(render_col);
            self.last_match = Some(next);
            if let Some(tags) = doc.overlay(next, render_col, needle.len(), Highlight::Match) {
                self.saved = Some(SavedHighlight { row: next, tags });
            }
            trace!(row = next, col, direction = ?self.direction, "search hit");
            return Some(SearchHit {
                row: next,
                col,
                render_col,
            });
        }

        trace!(query, "search miss");
        None
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
