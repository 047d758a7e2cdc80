//! Styled text: an immutable string with ordered style runs.
//!
//! Offsets everywhere in this module are code-point indices, not byte
//! offsets, because the layout engine reasons in code points.

use super::style::Style;

/// The start of a style run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRun {
    /// Code-point index at which the run starts.
    pub start: usize,
    /// Style in effect from `start` until the next run.
    pub style: Style,
}

/// A string paired with an ordered, non-overlapping list of style runs.
///
/// The first run always starts at 0 when the text is non-empty, and run
/// starts are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    content: String,
    len: usize,
    runs: Vec<StyleRun>,
}

impl StyledText {
    /// Text in the default style.
    pub fn plain(s: &str) -> Self {
        Self::styled(s, Style::DEFAULT)
    }

    /// Text in a single style.
    pub fn styled(s: &str, style: Style) -> Self {
        let mut builder = StyledTextBuilder::new();
        builder.set_style(style);
        builder.push_str(s);
        builder.build()
    }

    /// The underlying string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Number of code points.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the text has no code points.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The style runs, in order.
    #[inline]
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// Style in effect at code-point index `index`.
    pub fn style_at(&self, index: usize) -> Style {
        let pos = self.runs.partition_point(|run| run.start <= index);
        pos.checked_sub(1)
            .map_or(Style::DEFAULT, |i| self.runs[i].style)
    }

    /// Iterate over `(index, char, style)` in order.
    pub fn styled_chars(&self) -> StyledChars<'_> {
        StyledChars {
            chars: self.content.chars().enumerate(),
            runs: &self.runs,
            style: Style::DEFAULT,
        }
    }
}

impl From<&str> for StyledText {
    fn from(s: &str) -> Self {
        Self::plain(s)
    }
}

/// Iterator returned by [`StyledText::styled_chars`].
pub struct StyledChars<'a> {
    chars: std::iter::Enumerate<std::str::Chars<'a>>,
    runs: &'a [StyleRun],
    style: Style,
}

impl Iterator for StyledChars<'_> {
    type Item = (usize, char, Style);

    fn next(&mut self) -> Option<Self::Item> {
        let (i, c) = self.chars.next()?;
        if let Some((run, rest)) = self.runs.split_first() {
            if run.start == i {
                self.style = run.style;
                self.runs = rest;
            }
        }
        Some((i, c, self.style))
    }
}

/// Append-only builder for [`StyledText`].
#[derive(Debug, Default)]
pub struct StyledTextBuilder {
    content: String,
    len: usize,
    runs: Vec<StyleRun>,
    style: Style,
}

impl StyledTextBuilder {
    /// Create an empty builder in the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.content.reserve(additional);
    }

    /// Style used by subsequent [`push_str`](Self::push_str) calls.
    pub fn set_style(&mut self, style: Style) -> &mut Self {
        self.style = style;
        self
    }

    /// Append plain text in the current style.
    pub fn push_str(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self;
        }
        self.open_run(self.len, self.style);
        self.content.push_str(s);
        self.len += s.chars().count();
        self
    }

    /// Append another styled text, shifting its runs by the current length.
    pub fn push_styled(&mut self, text: &StyledText) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        let offset = self.len;
        for run in &text.runs {
            self.open_run(offset + run.start, run.style);
        }
        self.content.push_str(&text.content);
        self.len += text.len;
        self
    }

    /// Finish building.
    pub fn build(self) -> StyledText {
        StyledText {
            content: self.content,
            len: self.len,
            runs: self.runs,
        }
    }

    /// Clear the content, keeping the current style.
    pub fn reset(&mut self) {
        self.content.clear();
        self.len = 0;
        self.runs.clear();
    }

    fn open_run(&mut self, start: usize, style: Style) {
        match self.runs.last_mut() {
            Some(last) if last.style == style => {}
            Some(last) if last.start == start => last.style = style,
            _ => self.runs.push(StyleRun { start, style }),
        }
    }
}
