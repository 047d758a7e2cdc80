//! Cell: one character position of the terminal.

use crate::text::{char_width, Style};

/// A single terminal cell.
///
/// Double-width characters occupy their own cell plus a continuation cell
/// to their right, which the renderer skips.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    ch: char,
    /// Display width (0 = continuation, 1 = normal, 2 = wide).
    width: u8,
    style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell in the default style.
    pub const EMPTY: Self = Self {
        ch: ' ',
        width: 1,
        style: Style::DEFAULT,
    };

    /// Create a cell for `ch`.
    ///
    /// Zero-width code points are stored with width 1 so that they still
    /// claim their position on the grid.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            width: char_width(ch).clamp(1, 2) as u8,
            style,
        }
    }

    /// The right half of a double-width character.
    #[inline]
    pub const fn continuation(style: Style) -> Self {
        Self {
            ch: ' ',
            width: 0,
            style,
        }
    }

    /// The character.
    #[inline]
    pub const fn ch(&self) -> char {
        self.ch
    }

    /// Display width (0, 1 or 2).
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// The style.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Whether this is the right half of a double-width character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }
}
