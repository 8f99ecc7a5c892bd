// SPDX-License-Identifier: MIT
//
// Output buffering.
//
// A frame is a long run of small pieces: cursor moves, color changes, row
// text, erase-line sequences. Writing each piece separately makes the
// terminal repaint in visible stripes. Everything goes into an
// `OutputBuffer` first and reaches the terminal in a single `write()`.

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

/// A byte buffer that accumulates one frame of terminal output.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with 16 KB of capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append raw bytes.
    #[inline]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append at most `max_cols` display columns of `s`.
    ///
    /// Stops before a character that would cross the limit, so a wide
    /// character never gets split at the right edge. Returns the number of
    /// columns written.
    pub fn push_str_clipped(&mut self, s: &str, max_cols: usize) -> usize {
        let mut used = 0;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > max_cols {
                break;
            }
            let mut enc = [0u8; 4];
            self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
            used += w;
        }
        used
    }

    /// Clear the buffer for reuse, keeping its capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to stdout and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.flush_to(&mut lock)
    }

    /// Write accumulated output to `w` and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Real flushing goes through flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Display width of `s` in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
