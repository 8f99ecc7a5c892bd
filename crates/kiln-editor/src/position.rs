//! Document coordinates.
//!
//! All coordinates are **0-indexed** raw positions: `row` indexes the
//! document's rows and `col` is a byte offset into that row's raw bytes
//! (never a render column). `row == numrows` is the valid "one past the
//! last row" position the cursor may rest on.

use std::fmt;

/// A raw position in a document: (row, byte column), both 0-indexed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const ZERO: Self = Self { row: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// Compact form for test failures and logs: `(row, col)`.
impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
