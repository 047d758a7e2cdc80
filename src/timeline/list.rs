//! Buffer list: the ordered set of conversations and the selection.
//!
//! Buffers are kept sorted by `(network, title)` in a plain `Vec`. The
//! selection is a bare index, so every insertion and removal adjusts it
//! explicitly.

use super::buffer::{AppendResult, Buffer};
use super::line::Line;
use chrono::{DateTime, Utc};

/// Columns of the timeline not available to line bodies, besides the ident
/// column: 5 for the time, 2 before and 2 after the ident.
pub(crate) const TIMELINE_GUTTER: u16 = 9;

/// All open buffers, sorted by network then title.
///
/// Operations other than [`add`](Self::add) expect the list to be
/// non-empty and panic otherwise.
#[derive(Debug, Clone)]
pub struct BufferList {
    pub(super) list: Vec<Buffer>,
    pub(super) current: usize,
    pub(super) clicked: Option<usize>,
    pub(super) tl_width: u16,
    pub(super) tl_height: u16,
    pub(super) nick_col_width: u16,
}

impl BufferList {
    /// Create an empty list for a timeline of the given geometry.
    pub fn new(tl_width: u16, tl_height: u16, nick_col_width: u16) -> Self {
        Self {
            list: Vec::new(),
            current: 0,
            clicked: None,
            tl_width,
            tl_height,
            nick_col_width,
        }
    }

    /// Update the timeline geometry.
    pub fn resize_timeline(&mut self, tl_width: u16, tl_height: u16, nick_col_width: u16) {
        self.tl_width = tl_width;
        self.tl_height = tl_height;
        self.nick_col_width = nick_col_width;
    }

    /// Width available to line bodies, at least 1.
    pub fn inner_width(&self) -> usize {
        usize::from(
            self.tl_width
                .saturating_sub(self.nick_col_width)
                .saturating_sub(TIMELINE_GUTTER)
                .max(1),
        )
    }

    /// Timeline height in rows.
    #[inline]
    pub const fn timeline_height(&self) -> u16 {
        self.tl_height
    }

    /// Number of buffers.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether there are no buffers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The buffers, in display order.
    #[inline]
    pub fn buffers(&self) -> &[Buffer] {
        &self.list
    }

    /// Index of the selected buffer.
    #[inline]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The selected buffer.
    pub fn current_buffer(&self) -> &Buffer {
        &self.list[self.current]
    }

    /// Network and title of the selected buffer.
    pub fn current(&self) -> (&str, &str) {
        self.list[self.current].key()
    }

    /// Timestamp of the oldest line of the selected buffer.
    pub fn current_oldest_time(&self) -> Option<DateTime<Utc>> {
        self.list[self.current].oldest_time()
    }

    /// Select the buffer at `index`, clamped to the last one.
    pub fn to(&mut self, index: usize) {
        self.current = index.min(self.list.len().saturating_sub(1));
        self.list[self.current].mark_read();
    }

    /// Select the next buffer, wrapping around.
    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.list.len();
        self.list[self.current].mark_read();
    }

    /// Select the previous buffer, wrapping around.
    pub fn previous(&mut self) {
        let len = self.list.len();
        self.current = (self.current + len - 1) % len;
        self.list[self.current].mark_read();
    }

    /// Select the first buffer whose title contains `sub`, ignoring case.
    pub fn jump(&mut self, sub: &str) -> bool {
        let sub = sub.to_lowercase();
        let found = self
            .list
            .iter()
            .position(|b| b.title().to_lowercase().contains(&sub));
        if let Some(i) = found {
            self.to(i);
        }
        found.is_some()
    }

    /// Position of the buffer, or where it would be inserted.
    pub fn find(&self, network: &str, title: &str) -> (usize, bool) {
        let key = (network, title);
        for (i, b) in self.list.iter().enumerate() {
            match key.cmp(&b.key()) {
                std::cmp::Ordering::Less => return (i, false),
                std::cmp::Ordering::Equal => return (i, true),
                std::cmp::Ordering::Greater => {}
            }
        }
        (self.list.len(), false)
    }

    /// Open a buffer. Returns `false` if it already exists.
    pub fn add(&mut self, network: &str, title: &str) -> bool {
        let (idx, found) = self.find(network, title);
        if found {
            return false;
        }

        if idx <= self.current && !self.list.is_empty() {
            self.current += 1;
        }
        self.list.insert(idx, Buffer::new(network, title));

        tracing::trace!(target: "timeline.list", network, title, index = idx, "buffer_added");
        true
    }

    /// Close a buffer. Returns `false` if it does not exist.
    pub fn remove(&mut self, network: &str, title: &str) -> bool {
        let (idx, found) = self.find(network, title);
        if !found {
            return false;
        }

        self.list.remove(idx);
        if self.current >= self.list.len() {
            self.current = self.list.len().saturating_sub(1);
        }
        if self.clicked.is_some_and(|c| c >= self.list.len()) {
            self.clicked = None;
        }

        tracing::trace!(target: "timeline.list", network, title, index = idx, "buffer_removed");
        true
    }

    /// Route a new line to a buffer. Lines for unknown buffers are dropped.
    pub fn add_line(&mut self, network: &str, title: &str, line: Line) {
        let (idx, found) = self.find(network, title);
        if !found {
            tracing::debug!(target: "timeline.list", network, title, "line_for_unknown_buffer");
            return;
        }

        let width = self.inner_width();
        let selected = idx == self.current;
        if self.list[idx].append_or_merge(line, selected, width) == AppendResult::Merged {
            tracing::trace!(target: "timeline.list", network, title, "line_merged");
        }
    }

    /// Splice backfilled history before a buffer's oldest line.
    ///
    /// `lines` must be sorted by time.
    pub fn add_lines(&mut self, network: &str, title: &str, lines: Vec<Line>) {
        let (idx, found) = self.find(network, title);
        if !found {
            return;
        }
        self.list[idx].merge_history(lines);
    }

    /// Scroll the selected buffer towards older lines.
    pub fn scroll_up(&mut self, n: usize) {
        self.list[self.current].scroll_up(n);
    }

    /// Scroll the selected buffer towards newer lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.list[self.current].scroll_down(n);
    }

    /// Whether the last paint of the selected buffer reached its oldest line.
    pub fn is_at_top(&self) -> bool {
        self.list[self.current].is_at_top()
    }

    /// Mark the buffer at `index` as clicked. Ignored when out of range.
    pub fn click(&mut self, index: usize) {
        if index < self.list.len() {
            self.clicked = Some(index);
        }
    }

    /// Forget the clicked buffer.
    pub fn unclick(&mut self) {
        self.clicked = None;
    }

    /// Index of the clicked buffer.
    #[inline]
    pub const fn clicked(&self) -> Option<usize> {
        self.clicked
    }
}
