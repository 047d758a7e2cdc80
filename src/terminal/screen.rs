//! Screen: a double-buffered [`Canvas`] on top of a real terminal.
//!
//! Drawing goes to the back grid. [`Screen::show`] diffs it against the
//! front grid (what the terminal currently displays), writes the changes in
//! a single syscall and swaps.

use super::OutputBuffer;
use crate::error::Result;
use crate::grid::diff::{render_diff, render_full, DiffState};
use crate::grid::{Canvas, Grid};
use crate::text::Style;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, IsTerminal, Stdout, Write};

/// A terminal screen.
pub struct Screen<W: Write = Stdout> {
    writer: W,
    front: Grid,
    back: Grid,
    diff: DiffState,
    output: OutputBuffer,
    needs_full_redraw: bool,
    cursor: Option<(u16, u16)>,
    has_mouse: bool,
    mouse_enabled: bool,
    paste_enabled: bool,
    alternate_screen: bool,
    /// Whether raw mode was entered and must be left on drop.
    owns_terminal: bool,
}

impl Screen<Stdout> {
    /// Take over the process's terminal: raw mode, optionally the alternate
    /// screen, hidden cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried or configured.
    pub fn new(alternate_screen: bool) -> Result<Self> {
        let mut stdout = io::stdout();
        let has_mouse = stdout.is_terminal();
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide)?;

        tracing::debug!(target: "ui", width, height, alternate_screen, "screen_init");

        let mut screen = Self::with_writer(stdout, width, height);
        screen.has_mouse = has_mouse;
        screen.alternate_screen = alternate_screen;
        screen.owns_terminal = true;
        Ok(screen)
    }

    /// Re-read the terminal size and resize the grids to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn sync_size(&mut self) -> Result<(u16, u16)> {
        let (width, height) = terminal::size()?;
        self.resize(width, height);
        Ok((width, height))
    }
}

impl<W: Write> Screen<W> {
    /// A screen writing to `writer`, without touching terminal modes.
    pub fn with_writer(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            front: Grid::new(width, height),
            back: Grid::new(width, height),
            diff: DiffState::new(),
            output: OutputBuffer::with_capacity(usize::from(width) * usize::from(height) * 4),
            needs_full_redraw: true,
            cursor: None,
            has_mouse: false,
            mouse_enabled: false,
            paste_enabled: false,
            alternate_screen: false,
            owns_terminal: false,
        }
    }

    /// Whether the terminal can report mouse events.
    pub const fn has_mouse(&self) -> bool {
        self.has_mouse
    }

    /// Start reporting mouse events.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn enable_mouse(&mut self) -> Result<()> {
        execute!(self.writer, EnableMouseCapture)?;
        self.mouse_enabled = true;
        Ok(())
    }

    /// Stop reporting mouse events.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn disable_mouse(&mut self) -> Result<()> {
        execute!(self.writer, DisableMouseCapture)?;
        self.mouse_enabled = false;
        Ok(())
    }

    /// Report pasted text as a single event.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn enable_paste(&mut self) -> Result<()> {
        execute!(self.writer, EnableBracketedPaste)?;
        self.paste_enabled = true;
        Ok(())
    }

    /// Resize the grids. The next [`show`](Self::show) redraws everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.front.resize(width, height);
        self.back.resize(width, height);
        self.needs_full_redraw = true;
    }

    /// Blank the back grid.
    pub fn clear(&mut self) {
        self.back.clear();
    }

    /// Show the cursor at (x, y) after the next flush.
    pub fn show_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }

    /// Hide the cursor after the next flush.
    pub fn hide_cursor(&mut self) {
        self.cursor = None;
    }

    /// What has been drawn since the last flush.
    pub const fn back(&self) -> &Grid {
        &self.back
    }

    /// The writer the screen flushes to.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Flush the back grid to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn show(&mut self) -> Result<()> {
        self.output.clear();

        if self.needs_full_redraw {
            self.diff.reset();
            self.output.reset_attrs();
            self.output.clear_screen();
            render_full(&self.back, &mut self.output, &mut self.diff);
            self.needs_full_redraw = false;
        } else {
            let result = render_diff(&self.front, &self.back, &mut self.output, &mut self.diff);
            tracing::trace!(
                target: "ui",
                cells = result.cells_changed,
                moves = result.cursor_moves,
                styles = result.style_changes,
                "frame_diffed"
            );
        }

        match self.cursor {
            Some((x, y)) => {
                self.output.cursor_move(x, y);
                self.output.cursor_show();
                self.diff.set_cursor(x, y);
            }
            None => self.output.cursor_hide(),
        }

        self.output.flush_to(&mut self.writer)?;
        self.front.copy_from(&self.back);
        Ok(())
    }
}

impl<W: Write> Canvas for Screen<W> {
    fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        self.back.set_cell(x, y, ch, style);
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        if !self.owns_terminal {
            return;
        }

        let _ = execute!(self.writer, cursor::Show);
        if self.mouse_enabled {
            let _ = execute!(self.writer, DisableMouseCapture);
        }
        if self.paste_enabled {
            let _ = execute!(self.writer, DisableBracketedPaste);
        }
        if self.alternate_screen {
            let _ = execute!(self.writer, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        tracing::debug!(target: "ui", "screen_restored");
    }
}

impl<W: Write> std::fmt::Debug for Screen<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("size", &self.size())
            .field("cursor", &self.cursor)
            .field("mouse_enabled", &self.mouse_enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(screen: &Screen<Vec<u8>>) -> String {
        String::from_utf8_lossy(screen.writer()).into_owned()
    }

    #[test]
    fn test_first_show_is_full_redraw() {
        let mut screen = Screen::with_writer(Vec::new(), 4, 2);
        screen.set_cell(0, 0, 'h', Style::DEFAULT);
        screen.set_cell(1, 0, 'i', Style::DEFAULT);
        screen.show().unwrap();

        let out = text(&screen);
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("hi"));
        assert!(out.ends_with("\x1b[?25l"));
    }

    #[test]
    fn test_second_show_only_sends_changes() {
        let mut screen = Screen::with_writer(Vec::new(), 4, 2);
        screen.show().unwrap();
        let before = screen.writer().len();

        screen.set_cell(3, 1, 'x', Style::DEFAULT);
        screen.show().unwrap();

        let delta = String::from_utf8_lossy(&screen.writer()[before..]).into_owned();
        assert!(!delta.contains("\x1b[2J"));
        assert!(delta.contains("\x1b[2;4H"));
        assert!(delta.contains('x'));
    }

    #[test]
    fn test_cursor_shown_after_flush() {
        let mut screen = Screen::with_writer(Vec::new(), 4, 2);
        screen.show_cursor(2, 1);
        screen.show().unwrap();
        assert!(text(&screen).ends_with("\x1b[2;3H\x1b[?25h"));
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut screen = Screen::with_writer(Vec::new(), 4, 2);
        screen.show().unwrap();
        let before = screen.writer().len();

        screen.resize(6, 3);
        assert_eq!(screen.size(), (6, 3));
        screen.show().unwrap();

        let delta = String::from_utf8_lossy(&screen.writer()[before..]).into_owned();
        assert!(delta.contains("\x1b[2J"));
    }

    #[test]
    fn test_headless_screen_has_no_mouse() {
        let screen = Screen::with_writer(Vec::new(), 1, 1);
        assert!(!screen.has_mouse());
    }
}
