//! Ui: the screen, the buffer list and the input thread behind one handle.
//!
//! Screen layout, with `chan` and `nick` the configured column widths:
//!
//! ```text
//! ┌────────┬──────────────────────────────────────────┐
//! │ buffer │ HH:MM   nick  timeline ...               │
//! │ list   │                                          │
//! │ (chan) │                                          │
//! │        │ status row                               │  h - 2
//! │        │ prompt │ input area                      │  h - 1
//! └────────┴──────────────────────────────────────────┘
//! ```

use crate::actor::{InputActor, InputEvent};
use crate::error::{Error, Result};
use crate::grid::Canvas;
use crate::terminal::Screen;
use crate::text::{Modifiers, Rgb, Style, StyledText};
use crate::timeline::{print_ident, print_str, BufferList, Line, TIMELINE_GUTTER};
use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io::{Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for [`Ui`].
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Width of the ident column in the timeline.
    pub nick_col_width: u16,
    /// Width of the vertical buffer list, border included.
    pub chan_col_width: u16,
    /// Whether to capture the mouse when the terminal supports it.
    pub mouse: bool,
    /// Whether to draw on the alternate screen.
    pub alternate_screen: bool,
    /// How often the input thread re-checks the exit flag.
    pub input_poll_timeout: Duration,
    /// Capacity of the input event queue.
    pub event_queue_capacity: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            nick_col_width: 16,
            chan_col_width: 16,
            mouse: true,
            alternate_screen: true,
            input_poll_timeout: Duration::from_millis(10),
            event_queue_capacity: 128,
        }
    }
}

/// Where the caller's input widget may paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputArea {
    /// First column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
}

/// The chat client's user interface.
pub struct Ui<W: Write = Stdout> {
    screen: Screen<W>,
    bs: BufferList,
    events: Receiver<InputEvent>,
    exit: Arc<AtomicBool>,
    config: UiConfig,
    input: Option<InputActor>,
    prompt: StyledText,
    status: String,
}

impl Ui<Stdout> {
    /// Take over the terminal and start the input thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured or the input
    /// thread cannot be spawned.
    pub fn new(config: UiConfig) -> Result<Self> {
        let mut screen = Screen::new(config.alternate_screen)?;
        if screen.has_mouse() && config.mouse {
            screen.enable_mouse()?;
        }
        screen.enable_paste()?;
        screen.clear();

        let exit = Arc::new(AtomicBool::new(false));
        let (tx, rx) = bounded(config.event_queue_capacity);
        let input = InputActor::spawn(tx, Arc::clone(&exit), config.input_poll_timeout)?;

        tracing::debug!(target: "ui", ?config, "ui_started");
        Ok(Self::assemble(config, screen, rx, exit, Some(input)))
    }

    /// Re-read the terminal size and lay the screen out again.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn resize(&mut self) -> Result<()> {
        let (width, height) = self.screen.sync_size()?;
        self.layout(width, height);
        Ok(())
    }
}

impl<W: Write> Ui<W> {
    /// A UI over an existing screen, without an input thread. Events are
    /// fed through the returned sender.
    pub fn with_screen(config: UiConfig, screen: Screen<W>) -> (Self, Sender<InputEvent>) {
        let (tx, rx) = bounded(config.event_queue_capacity);
        let exit = Arc::new(AtomicBool::new(false));
        (Self::assemble(config, screen, rx, exit, None), tx)
    }

    fn assemble(
        config: UiConfig,
        screen: Screen<W>,
        events: Receiver<InputEvent>,
        exit: Arc<AtomicBool>,
        input: Option<InputActor>,
    ) -> Self {
        let (width, height) = screen.size();
        let mut ui = Self {
            screen,
            bs: BufferList::new(width, height, config.nick_col_width),
            events,
            exit,
            config,
            input,
            prompt: StyledText::default(),
            status: String::new(),
        };
        ui.layout(width, height);
        ui
    }

    fn layout(&mut self, width: u16, height: u16) {
        self.bs.resize_timeline(
            width.saturating_sub(self.config.chan_col_width),
            height.saturating_sub(2),
            self.config.nick_col_width,
        );
    }

    /// Whether [`exit`](Self::exit) has been called.
    pub fn should_exit(&self) -> bool {
        self.exit.load(Ordering::Acquire)
    }

    /// Ask the event loop and the input thread to stop.
    pub fn exit(&self) {
        self.exit.store(true, Ordering::Release);
    }

    /// The input event queue.
    pub const fn events(&self) -> &Receiver<InputEvent> {
        &self.events
    }

    /// Block until the next input event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputDisconnected`] once the input thread is gone.
    pub fn next_event(&self) -> Result<InputEvent> {
        self.events.recv().map_err(|_| Error::InputDisconnected)
    }

    /// The buffer list.
    pub const fn buffers(&self) -> &BufferList {
        &self.bs
    }

    /// The screen.
    pub const fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    /// Network and title of the selected buffer.
    pub fn current_buffer(&self) -> (&str, &str) {
        self.bs.current()
    }

    /// Timestamp of the selected buffer's oldest line.
    pub fn current_buffer_oldest_time(&self) -> Option<DateTime<Utc>> {
        self.bs.current_oldest_time()
    }

    /// Select the next buffer.
    pub fn next_buffer(&mut self) {
        self.bs.next();
    }

    /// Select the previous buffer.
    pub fn previous_buffer(&mut self) {
        self.bs.previous();
    }

    /// Select the buffer at `index`, clamped to the last one.
    pub fn go_to_buffer(&mut self, index: usize) {
        self.bs.to(index);
    }

    /// Index of the buffer last clicked in the buffer list.
    pub const fn clicked_buffer(&self) -> Option<usize> {
        self.bs.clicked()
    }

    /// Mark a buffer as clicked. Ignored when out of range.
    pub fn click_buffer(&mut self, index: usize) {
        self.bs.click(index);
    }

    /// Forget the clicked buffer.
    pub fn unclick_buffer(&mut self) {
        self.bs.unclick();
    }

    /// Select the first buffer whose title contains `sub`, ignoring case.
    pub fn jump_buffer(&mut self, sub: &str) -> bool {
        self.bs.jump(sub)
    }

    /// Scroll up by half a screen.
    pub fn scroll_up(&mut self) {
        self.bs.scroll_up(usize::from(self.bs.timeline_height() / 2));
    }

    /// Scroll down by half a screen.
    pub fn scroll_down(&mut self) {
        self.bs.scroll_down(usize::from(self.bs.timeline_height() / 2));
    }

    /// Scroll up by `n` rows.
    pub fn scroll_up_by(&mut self, n: usize) {
        self.bs.scroll_up(n);
    }

    /// Scroll down by `n` rows.
    pub fn scroll_down_by(&mut self, n: usize) {
        self.bs.scroll_down(n);
    }

    /// Whether the last draw reached the selected buffer's oldest line.
    pub fn is_at_top(&self) -> bool {
        self.bs.is_at_top()
    }

    /// Open a buffer.
    pub fn add_buffer(&mut self, network: &str, title: &str) -> bool {
        self.bs.add(network, title)
    }

    /// Close a buffer.
    pub fn remove_buffer(&mut self, network: &str, title: &str) -> bool {
        self.bs.remove(network, title)
    }

    /// Append a line to a buffer.
    pub fn add_line(&mut self, network: &str, title: &str, line: Line) {
        self.bs.add_line(network, title, line);
    }

    /// Splice history before a buffer's oldest line.
    pub fn add_lines(&mut self, network: &str, title: &str, lines: Vec<Line>) {
        self.bs.add_lines(network, title, lines);
    }

    /// Text of the status row, empty to hide it.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Label painted in the ident column of the input row.
    pub fn set_prompt(&mut self, prompt: StyledText) {
        self.prompt = prompt;
    }

    /// Lay the screen out for an explicit size.
    pub fn resize_to(&mut self, width: u16, height: u16) {
        self.screen.resize(width, height);
        self.layout(width, height);
    }

    /// Area left to the input widget.
    pub fn input_area(&self) -> InputArea {
        let (width, height) = self.screen.size();
        let x = TIMELINE_GUTTER + self.config.chan_col_width + self.config.nick_col_width;
        InputArea {
            x,
            y: height.saturating_sub(1),
            width: width.saturating_sub(x),
        }
    }

    /// Paint everything and flush.
    ///
    /// `input` paints the input widget into the given area; it may also
    /// place the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn draw<F>(&mut self, input: F) -> Result<()>
    where
        F: FnOnce(&mut Screen<W>, InputArea),
    {
        let (width, height) = self.screen.size();
        let chan = self.config.chan_col_width;
        let nick = self.config.nick_col_width;

        self.bs.draw_timeline(&mut self.screen, chan, 0);
        self.bs.draw_vertical_buffer_list(&mut self.screen, 0, 0, chan, height);
        self.draw_status_bar(chan, height.saturating_sub(2), width.saturating_sub(chan));

        let y = i32::from(height) - 1;
        let mut x = i32::from(chan);
        print_str(&mut self.screen, &mut x, y, &" ".repeat(usize::from(TIMELINE_GUTTER + nick)), Style::DEFAULT);
        print_ident(&mut self.screen, i32::from(chan) + 7, y, usize::from(nick), &self.prompt);

        let area = self.input_area();
        input(&mut self.screen, area);

        self.screen.show()
    }

    fn draw_status_bar(&mut self, x0: u16, y: u16, width: u16) {
        let dim = Style::DEFAULT.add(Modifiers::DIM);
        for x in x0..x0.saturating_add(width) {
            self.screen.set_cell(x, y, ' ', dim);
        }
        if self.status.is_empty() {
            return;
        }

        let gray = Style::DEFAULT.fg(Rgb::GRAY);
        let y = i32::from(y);
        let mut x = i32::from(x0) + 5 + i32::from(self.config.nick_col_width);
        print_str(&mut self.screen, &mut x, y, "--", gray);
        x += 2;
        print_str(&mut self.screen, &mut x, y, &self.status, gray);
    }
}

impl<W: Write> Drop for Ui<W> {
    fn drop(&mut self) {
        self.exit();
        if self.input.take().is_some() {
            tracing::debug!(target: "ui", "ui_stopped");
        }
    }
}

impl<W: Write> std::fmt::Debug for Ui<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("screen", &self.screen)
            .field("buffers", &self.bs.len())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> UiConfig {
        UiConfig {
            nick_col_width: 5,
            chan_col_width: 10,
            ..UiConfig::default()
        }
    }

    fn ui() -> Ui<Vec<u8>> {
        let (ui, _tx) = Ui::with_screen(config(), Screen::with_writer(Vec::new(), 60, 10));
        ui
    }

    fn line(body: &str) -> Line {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Line::new(at, "nick", StyledText::plain(body))
    }

    #[test]
    fn test_default_config() {
        let config = UiConfig::default();
        assert_eq!(config.nick_col_width, 16);
        assert_eq!(config.chan_col_width, 16);
        assert_eq!(config.event_queue_capacity, 128);
        assert_eq!(config.input_poll_timeout, Duration::from_millis(10));
    }

    #[test]
    fn test_exit_flag() {
        let ui = ui();
        assert!(!ui.should_exit());
        ui.exit();
        assert!(ui.should_exit());
    }

    #[test]
    fn test_events_flow_through_queue() {
        let (ui, tx) = Ui::with_screen(config(), Screen::with_writer(Vec::new(), 60, 10));
        tx.send(InputEvent::FocusGained).unwrap();
        assert_eq!(ui.next_event().unwrap(), InputEvent::FocusGained);

        drop(tx);
        assert!(matches!(ui.next_event(), Err(Error::InputDisconnected)));
    }

    #[test]
    fn test_layout() {
        let ui = ui();
        // 60 - 10 - 5 - 9
        assert_eq!(ui.buffers().inner_width(), 36);
        assert_eq!(ui.input_area(), InputArea { x: 24, y: 9, width: 36 });
    }

    #[test]
    fn test_half_page_scroll() {
        let mut ui = ui();
        ui.add_buffer("net", "#chan");
        ui.scroll_up();
        assert_eq!(ui.buffers().current_buffer().scroll_amount(), 4);
        ui.scroll_down_by(3);
        assert_eq!(ui.buffers().current_buffer().scroll_amount(), 1);
        ui.scroll_down();
        assert_eq!(ui.buffers().current_buffer().scroll_amount(), 0);
    }

    #[test]
    fn test_draw_paints_every_region() {
        let mut ui = ui();
        ui.add_buffer("net", "");
        ui.add_buffer("net", "#chan");
        ui.go_to_buffer(1);
        ui.add_line("net", "#chan", line("hello there"));
        ui.set_status("connecting");
        ui.set_prompt(StyledText::plain("me"));

        ui.draw(|screen, area| {
            let mut x = i32::from(area.x);
            print_str(screen, &mut x, i32::from(area.y), "typing", Style::DEFAULT);
            screen.show_cursor(area.x + 6, area.y);
        })
        .unwrap();

        let grid = ui.screen().back();
        assert!(grid.row_text(0).starts_with("net"));
        assert!(grid.row_text(1).starts_with("  #chan"));
        assert!(grid.row_text(7).contains("hello there"));
        assert!(grid.row_text(8).contains("--  connecting"));
        let input_row = grid.row_text(9);
        assert!(input_row.contains("   me"));
        assert!(input_row.ends_with(&format!("typing{}", " ".repeat(30))));
        assert!(!ui.screen().writer().is_empty());
    }

    #[test]
    fn test_input_area_lines_up_with_timeline_bodies() {
        let mut ui = ui();
        ui.add_buffer("net", "#chan");
        ui.add_line("net", "#chan", line("hello"));
        ui.draw(|_, _| {}).unwrap();

        let row = ui.screen().back().row_text(7);
        let col = row.find("hello").map(|b| row[..b].chars().count());
        assert_eq!(col, Some(usize::from(ui.input_area().x)));
    }

    #[test]
    fn test_resize_to() {
        let mut ui = ui();
        ui.resize_to(80, 20);
        assert_eq!(ui.buffers().inner_width(), 56);
        assert_eq!(ui.buffers().timeline_height(), 18);
    }
}
