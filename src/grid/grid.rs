//! Grid: an in-memory cell grid, row-major.

use super::cell::Cell;
use super::Canvas;
use crate::text::Style;

/// A grid of cells the size of the terminal.
///
/// Cells are stored contiguously: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a blank grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) to a linear index, `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// The cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, keeping the top-left content that still fits.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }

        let mut cells = vec![Cell::EMPTY; usize::from(width) * usize::from(height)];
        let copy_width = usize::from(self.width.min(width));
        let copy_height = usize::from(self.height.min(height));

        for y in 0..copy_height {
            let old_start = y * usize::from(self.width);
            let new_start = y * usize::from(width);
            cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
    }

    /// Copy content from a grid of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Characters of row `y` as a string, skipping continuation cells.
    ///
    /// Mostly useful in tests.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(Cell::ch)
            .collect()
    }
}

impl Canvas for Grid {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        let cell = Cell::new(ch, style);
        self.set(x, y, cell);
        if cell.width() == 2 && x < u16::MAX {
            self.set(x + 1, y, Cell::continuation(style));
        }
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
