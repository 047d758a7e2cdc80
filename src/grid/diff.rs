//! Diffing: turn the difference between two grids into ANSI sequences.
//!
//! 1. Compare the displayed and the next grid cell by cell
//! 2. Skip cursor moves when the changed cell is where the cursor already is
//! 3. Track the active style to avoid redundant SGR sequences
//!
//! Output goes to an [`OutputBuffer`] so the caller can flush it with one
//! write.

use super::{Cell, Grid};
use crate::terminal::OutputBuffer;
use crate::text::{Modifiers, Rgb, Style};

/// Terminal state as last emitted, used to skip redundant sequences.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    /// `None` when unknown, e.g. after a full redraw.
    style: Option<Style>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// State with an unknown terminal style and the cursor at home.
    pub const fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            style: None,
        }
    }

    /// Record a cursor move emitted outside of the diff.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Forget everything (e.g. after a full screen clear).
    pub fn reset(&mut self) {
        self.style = None;
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Statistics of a diff pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Cells that differed.
    pub cells_changed: usize,
    /// Cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Style change sequences emitted.
    pub style_changes: usize,
}

/// Emit the sequences that turn `current` into `next`.
pub fn render_diff(
    current: &Grid,
    next: &Grid,
    output: &mut OutputBuffer,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let width = usize::from(next.width());

    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new || new.is_continuation() {
            continue;
        }
        result.cells_changed += 1;

        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);
        if state.cursor_x != x || state.cursor_y != y {
            output.cursor_move(x, y);
            result.cursor_moves += 1;
        }

        if state.style != Some(new.style()) {
            emit_style(output, new.style());
            state.style = Some(new.style());
            result.style_changes += 1;
        }

        emit_cell(output, new);
        state.cursor_x = x.saturating_add(u16::from(new.width().max(1)));
        state.cursor_y = y;
    }

    result
}

/// Emit a full redraw of `grid`, without diffing.
pub fn render_full(grid: &Grid, output: &mut OutputBuffer, state: &mut DiffState) {
    output.cursor_hide();
    output.write_raw(b"\x1b[H");
    state.style = None;

    for y in 0..grid.height() {
        if y > 0 {
            output.write_raw(b"\r\n");
        }
        for x in 0..grid.width() {
            let Some(cell) = grid.get(x, y) else { continue };
            if cell.is_continuation() {
                continue;
            }
            if state.style != Some(cell.style()) {
                emit_style(output, cell.style());
                state.style = Some(cell.style());
            }
            emit_cell(output, cell);
        }
    }

    output.reset_attrs();
    state.style = Some(Style::DEFAULT);
    state.cursor_x = grid.width();
    state.cursor_y = grid.height().saturating_sub(1);
}

/// Emit a style from scratch: reset, then colors and modifiers.
fn emit_style(output: &mut OutputBuffer, style: Style) {
    output.reset_attrs();
    if let Some(fg) = style.fg {
        emit_color(output, 38, fg);
    }
    if let Some(bg) = style.bg {
        emit_color(output, 48, bg);
    }
    emit_modifiers(output, style.modifiers);
}

fn emit_color(output: &mut OutputBuffer, layer: u8, color: Rgb) {
    output.write_str(&format!("\x1b[{layer};2;{};{};{}m", color.r, color.g, color.b));
}

fn emit_modifiers(output: &mut OutputBuffer, modifiers: Modifiers) {
    const CODES: [(Modifiers, &[u8]); 8] = [
        (Modifiers::BOLD, b"\x1b[1m"),
        (Modifiers::DIM, b"\x1b[2m"),
        (Modifiers::ITALIC, b"\x1b[3m"),
        (Modifiers::UNDERLINE, b"\x1b[4m"),
        (Modifiers::BLINK, b"\x1b[5m"),
        (Modifiers::REVERSED, b"\x1b[7m"),
        (Modifiers::HIDDEN, b"\x1b[8m"),
        (Modifiers::STRIKETHROUGH, b"\x1b[9m"),
    ];
    for (flag, code) in CODES {
        if modifiers.contains(flag) {
            output.write_raw(code);
        }
    }
}

fn emit_cell(output: &mut OutputBuffer, cell: &Cell) {
    // Tabs and other control characters would move the real cursor.
    let ch = if cell.ch().is_control() { ' ' } else { cell.ch() };
    let mut buf = [0u8; 4];
    output.write_str(ch.encode_utf8(&mut buf));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Canvas;

    fn text(output: &OutputBuffer) -> String {
        String::from_utf8_lossy(output.as_bytes()).into_owned()
    }

    #[test]
    fn test_diff_identical_grids() {
        let a = Grid::new(10, 5);
        let b = Grid::new(10, 5);
        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();

        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_diff_single_cell_change() {
        let a = Grid::new(10, 5);
        let mut b = Grid::new(10, 5);
        b.set_cell(5, 2, 'X', Style::DEFAULT);

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 1);
        assert_eq!(result.cursor_moves, 1);
        let out = text(&output);
        assert!(out.starts_with("\x1b[3;6H"));
        assert!(out.ends_with('X'));
    }

    #[test]
    fn test_diff_adjacent_cells_no_cursor_move() {
        let a = Grid::new(10, 5);
        let mut b = Grid::new(10, 5);
        b.set_cell(0, 0, 'A', Style::DEFAULT);
        b.set_cell(1, 0, 'B', Style::DEFAULT);
        b.set_cell(2, 0, 'C', Style::DEFAULT);

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 3);
        assert_eq!(result.cursor_moves, 0);
        assert_eq!(result.style_changes, 1);
    }

    #[test]
    fn test_diff_style_tracking() {
        let a = Grid::new(10, 1);
        let mut b = Grid::new(10, 1);
        let red = Style::DEFAULT.fg(Rgb::new(255, 0, 0));
        b.set_cell(0, 0, 'A', red);
        b.set_cell(1, 0, 'B', red);
        b.set_cell(2, 0, 'C', Style::DEFAULT.bold());

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.style_changes, 2);
        let out = text(&output);
        assert!(out.contains("\x1b[38;2;255;0;0m"));
        assert!(out.contains("\x1b[1m"));
    }

    #[test]
    fn test_diff_wide_char_advances_cursor() {
        let a = Grid::new(10, 1);
        let mut b = Grid::new(10, 1);
        b.set_cell(0, 0, '日', Style::DEFAULT);
        b.set_cell(2, 0, 'x', Style::DEFAULT);

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 2);
        assert_eq!(result.cursor_moves, 0);
    }

    #[test]
    fn test_render_full() {
        let mut grid = Grid::new(3, 2);
        grid.set_cell(0, 0, 'A', Style::DEFAULT);
        grid.set_cell(1, 0, 'B', Style::DEFAULT);
        grid.set_cell(2, 0, 'C', Style::DEFAULT);

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        render_full(&grid, &mut output, &mut state);

        let out = text(&output);
        assert!(out.starts_with("\x1b[?25l\x1b[H"));
        assert!(out.contains("ABC"));
        assert!(out.ends_with("\x1b[0m"));
    }
}
