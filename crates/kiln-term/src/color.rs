// SPDX-License-Identifier: MIT
//
// Terminal colors.
//
// The editor only ever paints with the terminal's own palette, so a color is
// either "whatever the terminal's default foreground is" or one of the 256
// palette indices. Indices 0-7 are the classic ANSI colors and map to the
// compact SGR 30-37 codes in `ansi::fg`.

/// A color as the terminal understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CellColor {
    /// The terminal's configured default (SGR 39 / 49).
    #[default]
    Default,
    /// A palette index. 0-7 standard, 8-15 bright, 16-255 extended.
    Ansi256(u8),
}

impl CellColor {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);

    /// True for [`CellColor::Default`].
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}
