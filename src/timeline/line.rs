//! Line: one logical message or event of a conversation.

use crate::text::{split_points, wrap, Rgb, SplitPoint, StyledText, StyledTextBuilder};
use chrono::{DateTime, Utc};

/// Separator inserted between the bodies of merged lines.
const MERGE_SEPARATOR: &str = "  ";

/// Row breaks computed for the last width a line was laid out at.
///
/// This is a single-entry memo: asking for another width recomputes the
/// breaks and replaces the entry.
#[derive(Debug, Clone, Default)]
struct LayoutCache {
    /// Width the breaks were computed for, 0 when stale.
    width: usize,
    row_breaks: Vec<usize>,
}

/// One message or event in a buffer's log.
#[derive(Debug, Clone)]
pub struct Line {
    /// When the line happened.
    pub at: DateTime<Utc>,
    /// Label painted in the ident column (nick, `--`, ...).
    pub head: String,
    /// Color of the head label, or the terminal default.
    pub head_color: Option<Rgb>,
    /// Whether the line mentions the user.
    pub highlight: bool,
    /// Whether the line may be folded into a preceding mergeable line.
    pub mergeable: bool,
    body: StyledText,
    split_points: Vec<SplitPoint>,
    cache: LayoutCache,
}

impl Line {
    /// Create a line. Split points are computed immediately.
    pub fn new(at: DateTime<Utc>, head: impl Into<String>, body: StyledText) -> Self {
        let split_points = split_points(&body);
        Self {
            at,
            head: head.into(),
            head_color: None,
            highlight: false,
            mergeable: false,
            body,
            split_points,
            cache: LayoutCache::default(),
        }
    }

    /// Set the head label color (builder pattern).
    #[must_use]
    pub fn with_head_color(mut self, color: Rgb) -> Self {
        self.head_color = Some(color);
        self
    }

    /// Mark the line as a highlight (builder pattern).
    #[must_use]
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Mark the line as mergeable (builder pattern).
    #[must_use]
    pub fn with_mergeable(mut self, mergeable: bool) -> Self {
        self.mergeable = mergeable;
        self
    }

    /// The styled body.
    #[inline]
    pub const fn body(&self) -> &StyledText {
        &self.body
    }

    /// Split points of the body.
    #[inline]
    pub fn split_points(&self) -> &[SplitPoint] {
        &self.split_points
    }

    /// Row breaks of the body for a viewport `width` columns wide.
    ///
    /// Only recomputed when `width` differs from the previous call or the
    /// body changed since.
    pub fn row_breaks(&mut self, width: usize) -> &[usize] {
        if self.cache.width != width {
            self.cache.row_breaks = wrap(&self.body, &self.split_points, width);
            self.cache.width = width;
        }
        &self.cache.row_breaks
    }

    /// The body together with its row breaks at `width`.
    pub(crate) fn laid_out(&mut self, width: usize) -> (&StyledText, &[usize]) {
        self.row_breaks(width);
        (&self.body, &self.cache.row_breaks)
    }

    /// Number of terminal rows the body occupies at `width`.
    pub fn rows(&mut self, width: usize) -> usize {
        self.row_breaks(width).len() + 1
    }

    /// Fold `other`'s body onto this line, two blanks apart.
    pub(crate) fn merge(&mut self, other: &Self) {
        let mut builder = StyledTextBuilder::new();
        builder.reserve(self.body.as_str().len() + MERGE_SEPARATOR.len() + other.body.as_str().len());
        builder.push_styled(&self.body);
        builder.push_str(MERGE_SEPARATOR);
        builder.push_styled(&other.body);
        self.set_body(builder.build());
    }

    /// Replace the body, recomputing split points and dropping the layout.
    pub fn set_body(&mut self, body: StyledText) {
        self.body = body;
        self.split_points = split_points(&self.body);
        self.cache = LayoutCache::default();
    }
}
