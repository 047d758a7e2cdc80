//! Buffer: the log of lines for one conversation, plus its read and scroll
//! state.

use super::line::Line;
use chrono::{DateTime, Utc};

/// What [`Buffer::append_or_merge`] did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendResult {
    /// The line was folded into the previous mergeable line.
    Merged,
    /// The line was added as a new entry.
    Appended,
}

/// One conversation: a server, a channel or a query.
#[derive(Debug, Clone)]
pub struct Buffer {
    network: String,
    /// Channel or user name, empty for the server buffer.
    title: String,
    highlights: usize,
    unread: bool,
    /// Sorted by `Line::at`; ties keep insertion order.
    lines: Vec<Line>,
    /// Rows scrolled away from the live edge (0 = following new lines).
    scroll_amount: usize,
    is_at_top: bool,
}

impl Buffer {
    pub(crate) fn new(network: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            title: title.into(),
            highlights: 0,
            unread: false,
            lines: Vec::new(),
            scroll_amount: 0,
            is_at_top: false,
        }
    }

    /// Network the buffer belongs to.
    #[inline]
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Channel or user name, empty for the server buffer.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of highlights received while the buffer was not selected.
    #[inline]
    pub const fn highlights(&self) -> usize {
        self.highlights
    }

    /// Whether non-mergeable lines arrived while the buffer was not selected.
    #[inline]
    pub const fn unread(&self) -> bool {
        self.unread
    }

    /// The line log, oldest first.
    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub(crate) fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    /// Rows scrolled away from the newest line.
    #[inline]
    pub const fn scroll_amount(&self) -> usize {
        self.scroll_amount
    }

    /// Whether the last paint reached the oldest line.
    #[inline]
    pub const fn is_at_top(&self) -> bool {
        self.is_at_top
    }

    /// Timestamp of the oldest line, if any.
    pub fn oldest_time(&self) -> Option<DateTime<Utc>> {
        self.lines.first().map(|l| l.at)
    }

    pub(crate) fn key(&self) -> (&str, &str) {
        (&self.network, &self.title)
    }

    /// Clear unread and highlight state.
    pub(crate) fn mark_read(&mut self) {
        self.highlights = 0;
        self.unread = false;
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        if self.is_at_top {
            return;
        }
        self.scroll_amount += n;
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.scroll_amount = self.scroll_amount.saturating_sub(n);
    }

    pub(crate) fn set_at_top(&mut self, at_top: bool) {
        self.is_at_top = at_top;
    }

    /// Add a line to the end of the log, or fold it into the last line when
    /// both are mergeable.
    ///
    /// `selected` tells whether the user is looking at this buffer, and
    /// `width` is the timeline's inner width, used to keep the viewport still
    /// when the user has scrolled up.
    pub fn append_or_merge(&mut self, mut line: Line, selected: bool, width: usize) -> AppendResult {
        if line.mergeable {
            if let Some(last) = self.lines.last_mut().filter(|l| l.mergeable) {
                // TODO: grow scroll_amount by the rows the merge added when
                // the buffer is selected and scrolled up.
                last.merge(&line);
                tracing::trace!(target: "timeline.buffer", title = %self.title, "line_merged");
                return AppendResult::Merged;
            }
        }

        if selected && self.scroll_amount > 0 {
            // One row per break, plus the line's first row.
            self.scroll_amount += line.rows(width);
        }
        if !selected {
            if !line.mergeable {
                self.unread = true;
            }
            if line.highlight {
                self.highlights += 1;
            }
        }
        self.lines.push(line);
        AppendResult::Appended
    }

    /// Splice a batch of older lines before the oldest line of the log.
    ///
    /// `lines` must be sorted by time. The batch is cut at the first line
    /// that is newer than the current oldest line, or that has the same
    /// second-granularity timestamp and the same text; everything from that
    /// point on is assumed to be in the log already. Returns how many lines
    /// were added.
    pub fn merge_history(&mut self, mut lines: Vec<Line>) -> usize {
        let limit = match self.lines.first() {
            Some(first) => {
                let first_time = first.at.timestamp();
                let first_body = first.body().as_str();
                lines
                    .iter()
                    .position(|l| {
                        let t = l.at.timestamp();
                        t > first_time || (t == first_time && l.body().as_str() == first_body)
                    })
                    .unwrap_or(lines.len())
            }
            None => lines.len(),
        };

        let dropped = lines.len() - limit;
        lines.truncate(limit);
        lines.append(&mut self.lines);
        self.lines = lines;

        tracing::trace!(target: "timeline.buffer", title = %self.title, kept = limit, dropped, "history_merged");
        limit
    }
}
