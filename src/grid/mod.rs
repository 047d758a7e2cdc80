//! Grid module: the cell-grid painter contract and its in-memory form.
//!
//! This module contains:
//! - [`Canvas`]: what drawing code needs from a screen
//! - [`Cell`]: one character position with its style
//! - [`Grid`]: a row-major grid of cells implementing [`Canvas`]
//! - [`diff`]: turns grid changes into minimal ANSI output

mod cell;
pub mod diff;
#[allow(clippy::module_inception)]
mod grid;

pub use cell::Cell;
pub use grid::Grid;

use crate::text::Style;

/// A surface drawing code paints on.
///
/// Writes outside of [`size`](Canvas::size) must be ignored.
pub trait Canvas {
    /// Width and height in cells.
    fn size(&self) -> (u16, u16);

    /// Paint `ch` at (x, y).
    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style);
}
