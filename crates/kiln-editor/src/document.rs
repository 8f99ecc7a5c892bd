//! Document — the ordered rows of one file.
//!
//! The document owns every structural change: inserting and deleting rows,
//! inserting and deleting bytes, splitting a row at the cursor and merging
//! it back on backspace. After each change it brings the affected rows'
//! render bytes and highlight tags up to date before returning, so callers
//! never see a stale row.
//!
//! # Highlight cascade
//!
//! A row's tags depend on whether the previous row ended inside a block
//! comment. Each row remembers the state its tags were computed against.
//! After reclassifying row `i`, [`Document::update_row`] moves on to row
//! `i + 1` if that row was computed against something other than row `i`'s
//! new end state, and stops at the first row that is already consistent or
//! at the end of the document. Comparing against the next row's recorded
//! input, rather than against row `i`'s previous bit, also covers rows that
//! were just inserted or merged. The walk is a plain loop bounded by the
//! row count.
//!
//! # Coordinates
//!
//! Every operation clamps its coordinates instead of failing. Row index
//! `numrows` (one past the last row) is accepted where the cursor may be.
//!
//! # Dirty counter
//!
//! Each successful mutation increments [`dirty`](Document::dirty); loading
//! and saving reset it to zero.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::highlight::Highlight;
use crate::position::Position;
use crate::row::Row;
use crate::syntax::{self, Syntax};

#[derive(Debug, Default)]
pub struct Document {
    rows: Vec<Row>,
    dirty: u64,
    syntax: Option<&'static Syntax>,
    path: Option<PathBuf>,
}

impl Document {
    // -- Construction -------------------------------------------------------

    /// An empty, unnamed document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clean document from file contents.
    ///
    /// Lines are split on `\n`; trailing `\r`/`\n` bytes are stripped from
    /// each. A final newline does not produce an extra empty row, and empty
    /// input produces no rows at all.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut doc = Self::new();
        doc.load_lines(bytes);
        doc
    }

    /// Open `path`.
    ///
    /// The file name picks the syntax. A file that does not exist yet opens
    /// as an empty document bound to `path`, so the first save creates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "new file");
                Vec::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "open failed");
                return Err(err.into());
            }
        };

        let mut doc = Self::new();
        doc.path = Some(path.to_path_buf());
        doc.syntax = syntax::select(&path.to_string_lossy());
        doc.load_lines(&bytes);
        debug!(
            path = %path.display(),
            rows = doc.numrows(),
            filetype = doc.filetype().unwrap_or("none"),
            "opened"
        );
        Ok(doc)
    }

    fn load_lines(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
            for line in body.split(|&b| b == b'\n') {
                let mut end = line.len();
                while end > 0 && matches!(line[end - 1], b'\r' | b'\n') {
                    end -= 1;
                }
                self.insert_row(self.rows.len(), &line[..end]);
            }
        }
        self.dirty = 0;
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    #[inline]
    #[must_use]
    pub fn numrows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw length of row `at`, 0 past the end.
    #[inline]
    #[must_use]
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::size)
    }

    /// Modification counter. Zero means clean.
    #[inline]
    #[must_use]
    pub const fn dirty(&self) -> u64 {
        self.dirty
    }

    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    #[inline]
    #[must_use]
    pub const fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// The active syntax's name, if any.
    #[must_use]
    pub fn filetype(&self) -> Option<&'static str> {
        self.syntax.map(|s| s.name)
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Switch syntax and reclassify every row from the top.
    pub fn set_syntax(&mut self, syntax: Option<&'static Syntax>) {
        self.syntax = syntax;
        let mut open = false;
        for row in &mut self.rows {
            row.rehighlight(syntax, open);
            open = row.open_comment();
        }
        debug!(filetype = self.filetype().unwrap_or("none"), "syntax selected");
    }

    /// Bind the document to `path` and pick the syntax its name implies.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let syntax = syntax::select(&path.to_string_lossy());
        self.path = Some(path);
        self.set_syntax(syntax);
    }

    // -- Row operations -----------------------------------------------------

    /// Insert a row holding `bytes` at `at` (clamped to `0..=numrows`).
    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(at, bytes.to_vec()));
        self.renumber_from(at + 1);
        self.update_row(at);
        self.dirty += 1;
    }

    /// Delete row `at`. Out of range is a no-op.
    ///
    /// Neighbouring rows are not reclassified. If the deleted row changed
    /// the block-comment state, the row that moves up into `at` keeps tags
    /// computed against the deleted row until it, or the row above it, is
    /// next edited.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.renumber_from(at);
        self.dirty += 1;
    }

    /// Insert one byte at `pos` and return the position just after it.
    ///
    /// `pos.row == numrows` appends an empty row first.
    pub fn insert_char(&mut self, pos: Position, byte: u8) -> Position {
        let at = pos.row.min(self.rows.len());
        if at == self.rows.len() {
            self.insert_row(at, b"");
        }
        let col = pos.col.min(self.rows[at].size());
        self.rows[at].insert(col, byte);
        self.update_row(at);
        self.dirty += 1;
        Position::new(at, col + 1)
    }

    /// Backspace at `pos`: delete the byte before it, or merge the row into
    /// the previous one at column 0. Returns the new cursor position.
    pub fn delete_char(&mut self, pos: Position) -> Position {
        if pos.row >= self.rows.len() {
            return pos;
        }
        if pos.row == 0 && pos.col == 0 {
            return pos;
        }

        let col = pos.col.min(self.rows[pos.row].size());
        if col > 0 {
            self.rows[pos.row].remove(col - 1);
            self.update_row(pos.row);
            self.dirty += 1;
            Position::new(pos.row, col - 1)
        } else {
            let prev = pos.row - 1;
            let join = self.rows[prev].size();
            let moved = self.rows[pos.row].raw().to_vec();
            self.rows[prev].append(&moved);
            self.delete_row(pos.row);
            self.update_row(prev);
            self.dirty += 1;
            Position::new(prev, join)
        }
    }

    /// Enter at `pos`: split the row there. Returns column 0 of the next row.
    pub fn split_row(&mut self, pos: Position) -> Position {
        let at = pos.row.min(self.rows.len());
        let col = self.rows.get(at).map_or(0, |r| pos.col.min(r.size()));

        if col == 0 {
            self.insert_row(at, b"");
        } else {
            let tail = self.rows[at].split_off(col);
            self.insert_row(at + 1, &tail);
            self.update_row(at);
        }
        Position::new(at + 1, 0)
    }

    /// Every row's raw bytes, each followed by `\n`.
    #[must_use]
    pub fn rows_to_bytes(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|r| r.size() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.raw());
            out.push(b'\n');
        }
        out
    }

    // -- Persistence --------------------------------------------------------

    /// Write the document to its bound path and mark it clean.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Error::NoFileName`] if no path is bound; [`Error::Io`] if the write
    /// fails, in which case the dirty counter is left alone.
    pub fn save(&mut self) -> Result<usize> {
        let path = self.path.clone().ok_or(Error::NoFileName)?;
        let buf = self.rows_to_bytes();

        let written = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .and_then(|mut file| {
                file.set_len(buf.len() as u64)?;
                file.write_all(&buf)?;
                file.flush()
            });

        if let Err(err) = written {
            warn!(path = %path.display(), %err, "save failed");
            return Err(err.into());
        }

        self.dirty = 0;
        debug!(path = %path.display(), bytes = buf.len(), "saved");
        Ok(buf.len())
    }

    /// Bind `path` (reselecting syntax), then [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save). The new path stays bound even if the
    /// write fails.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<usize> {
        self.set_path(path);
        self.save()
    }

    // -- Highlight plumbing -------------------------------------------------

    /// Reclassify row `at` and cascade into following rows while the next
    /// row's tags were computed against a different comment state.
    fn update_row(&mut self, at: usize) {
        let mut at = at;
        let start = at;
        while at < self.rows.len() {
            let open = at > 0 && self.rows[at - 1].open_comment();
            self.rows[at].rehighlight(self.syntax, open);
            let carried = self.rows[at].open_comment();
            if self.rows.get(at + 1).is_none_or(|next| next.open_at_start() == carried) {
                break;
            }
            at += 1;
        }
        if at > start + 1 {
            trace!(from = start, to = at.min(self.rows.len()), "highlight cascade");
        }
    }

    fn renumber_from(&mut self, from: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(from) {
            row.set_index(i);
        }
    }

    /// Overlay `tag` on render bytes `start..start + len` of row `at`,
    /// returning the previous tags. `None` if the row does not exist.
    pub(crate) fn overlay(
        &mut self,
        at: usize,
        start: usize,
        len: usize,
        tag: Highlight,
    ) -> Option<Vec<Highlight>> {
        self.rows.get_mut(at).map(|row| row.overlay(start, len, tag))
    }

    /// Put back tags saved by [`overlay`](Self::overlay). Ignored if the
    /// row is gone or its render length changed.
    pub(crate) fn restore_highlight(&mut self, at: usize, saved: Vec<Highlight>) {
        if let Some(row) = self.rows.get_mut(at) {
            row.restore(saved);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
