//! Layout engine: width-aware greedy word wrap.
//!
//! Wrapping works on split points rather than on raw code points. A split
//! point is placed wherever the text switches between whitespace and
//! non-whitespace, so every pair of consecutive split points delimits one
//! "run" (a word, or a stretch of blanks) together with its display width.
//! Split points depend only on the text, which lets a line compute them
//! once and re-wrap cheaply whenever the terminal width changes.
//!
//! The output of [`wrap`] is a list of row breaks: code-point indices at
//! which a new terminal row starts. The painter is expected to skip blanks
//! at the start of every row except the first, which is why whitespace runs
//! that land at the start of a wrapped row cost nothing here.

use super::styled::StyledText;
use super::width::{char_width, is_split_char};

/// A boundary where the whitespace classification of the text changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPoint {
    /// Display width of the text before `i`.
    pub x: usize,
    /// Code-point index of the boundary.
    pub i: usize,
    /// Whether the run starting here is whitespace.
    pub split: bool,
}

/// Compute the split points of `text`.
///
/// When the text does not end with whitespace, a final synthetic point at
/// `(total width, len)` closes the last word.
pub fn split_points(text: &StyledText) -> Vec<SplitPoint> {
    let mut points = Vec::new();
    let mut width = 0;
    let mut last_was_split = false;

    for (i, c) in text.as_str().chars().enumerate() {
        let is_split = is_split_char(c);
        if i == 0 || last_was_split != is_split {
            points.push(SplitPoint {
                x: width,
                i,
                split: is_split,
            });
        }
        last_was_split = is_split;
        width += char_width(c);
    }

    if !last_was_split {
        points.push(SplitPoint {
            x: width,
            i: text.len(),
            split: true,
        });
    }

    points
}

/// Compute the row breaks of `text` for a viewport `width` columns wide.
///
/// `points` must be the result of [`split_points`] on the same text, and
/// `width` must be at least 1. The returned indices are strictly increasing
/// and all lie below `text.len()`.
pub fn wrap(text: &StyledText, points: &[SplitPoint], width: usize) -> Vec<usize> {
    debug_assert!(width > 0, "wrap width must be positive");

    let mut breaks: Vec<usize> = Vec::new();
    let mut x = 0;

    for (k, pair) in points.windows(2).enumerate() {
        let (sp1, sp2) = (pair[0], pair[1]);
        let run = sp2.x - sp1.x;

        if !breaks.is_empty() && x == 0 && sp1.split {
            // Blanks at the start of a wrapped row are not painted.
        } else if !sp1.split && run == width {
            // The word fills a whole row by itself: push whatever shares the
            // current row (the blanks before it included) out of its way.
            if x > 0 {
                let before = if k > 0 && points[k - 1].i > 0 {
                    points[k - 1].i
                } else {
                    sp1.i
                };
                if breaks.last() != Some(&before) {
                    breaks.push(before);
                }
            }
            breaks.push(sp2.i);
            x = 0;
        } else if x + run < width {
            x += run;
        } else if x + run == width {
            breaks.push(sp2.i);
            x = 0;
        } else if sp1.split && run > width {
            breaks.push(sp1.i);
            x = 0;
        } else if run > width {
            x = hard_split(text, sp1.i, sp2.i, x, width, &mut breaks);
            if x >= width {
                // The word ends flush with the end of a row.
                x = 0;
                breaks.push(sp2.i);
            }
        } else {
            breaks.push(sp1.i);
            x = if sp1.split { 0 } else { run };
        }
    }

    if breaks.last() == Some(&text.len()) {
        breaks.pop();
    }

    breaks
}

/// Break a word wider than the viewport wherever the next code point would
/// overflow the current row, starting at row offset `x`.
///
/// Breaks always fall on code-point boundaries, so a double-width glyph is
/// never cut; a glyph wider than the whole viewport gets a row of its own.
/// Returns the row offset after the word.
fn hard_split(
    text: &StyledText,
    start: usize,
    end: usize,
    x: usize,
    width: usize,
    breaks: &mut Vec<usize>,
) -> usize {
    let mut row = x;

    for (j, c) in text.as_str().chars().skip(start).take(end - start).enumerate() {
        let w = char_width(c);
        if w > 0 && row > 0 && row + w > width {
            breaks.push(start + j);
            row = 0;
        }
        row += w;
    }

    row
}
