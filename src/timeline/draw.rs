//! Painting the buffer list and the selected buffer's timeline on a
//! [`Canvas`].
//!
//! Coordinates are signed while painting: the timeline is laid out from the
//! bottom up and the topmost line may start above the viewport.

use super::list::{BufferList, TIMELINE_GUTTER};
use crate::grid::Canvas;
use crate::text::{char_width, is_split_char, str_width, truncate, Modifiers, Rgb, Style, StyledText};
use chrono::{DateTime, Local, Utc};

const ELLIPSIS: &str = "\u{2026}";
const BORDER: char = '\u{2502}';
const CLICKED_BORDER: char = '\u{2590}';

/// Offset of the ident column from the timeline origin.
const IDENT_OFFSET: i32 = 7;

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#[inline]
fn cols(c: char) -> i32 {
    char_width(c) as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#[inline]
fn to_i32(n: usize) -> i32 {
    n.min(i32::MAX as usize) as i32
}

/// Paint one cell, ignoring anything left of or above the canvas.
fn put<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, ch: char, style: Style) {
    if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
        canvas.set_cell(x, y, ch, style);
    }
}

fn fill<C: Canvas + ?Sized>(canvas: &mut C, x0: i32, y: i32, x1: i32, style: Style) {
    for x in x0..x1 {
        put(canvas, x, y, ' ', style);
    }
}

/// Paint `s` in a single style, advancing `x`.
pub(crate) fn print_str<C: Canvas + ?Sized>(canvas: &mut C, x: &mut i32, y: i32, s: &str, style: Style) {
    for c in s.chars() {
        put(canvas, *x, y, c, style);
        *x += cols(c);
    }
}

/// Paint `text` right-aligned in a column `width` cells wide, cut with an
/// ellipsis when it does not fit.
pub(crate) fn print_ident<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, width: usize, text: &StyledText) {
    let shown = truncate(text.as_str(), width, ELLIPSIS);
    let mut x = x + to_i32(width.saturating_sub(str_width(&shown)));
    for (i, c) in shown.chars().enumerate() {
        put(canvas, x, y, c, text.style_at(i));
        x += cols(c);
    }
}

/// Paint `at` as local `HH:MM`.
fn print_time<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, style: Style, at: DateTime<Utc>) {
    let label = at.with_timezone(&Local).format("%H:%M").to_string();
    let mut x = x;
    print_str(canvas, &mut x, y, &label, style);
}

fn print_number<C: Canvas + ?Sized>(canvas: &mut C, x: &mut i32, y: i32, style: Style, n: usize) {
    print_str(canvas, x, y, &n.to_string(), style);
}

/// Label of a buffer in buffer lists.
fn buffer_label<'a>(network: &'a str, title: &'a str) -> &'a str {
    match (network, title) {
        ("*", "") => "(status)",
        (network, "") => network,
        (_, title) => title,
    }
}

/// Highlight count, as a red reversed badge.
fn print_badge<C: Canvas + ?Sized>(canvas: &mut C, x: &mut i32, y: i32, style: Style, n: usize) {
    let style = style.fg(Rgb::RED).reversed();
    put(canvas, *x, y, ' ', style);
    *x += 1;
    print_number(canvas, x, y, style, n);
    put(canvas, *x, y, ' ', style);
    *x += 1;
}

impl BufferList {
    fn entry_style(&self, index: usize) -> Style {
        let buffer = &self.list[index];
        let mut style = Style::DEFAULT;
        if buffer.unread() {
            style = style.bold();
        } else if index == self.current {
            style = style.add(Modifiers::UNDERLINE);
        }
        if self.clicked == Some(index) {
            style = style.reversed();
        }
        style
    }

    /// Paint one buffer per row in a column `width` cells wide, the last of
    /// which is a border.
    pub fn draw_vertical_buffer_list<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        x0: u16,
        y0: u16,
        width: u16,
        height: u16,
    ) {
        let (x0, y0) = (i32::from(x0), i32::from(y0));
        let inner = i32::from(width) - 1;
        let bottom = y0 + i32::from(height);
        if inner < 0 {
            return;
        }

        for y in y0..bottom {
            fill(canvas, x0, y, x0 + inner, Style::DEFAULT);
            put(canvas, x0 + inner, y, BORDER, Style::DEFAULT);
        }

        for (i, buffer) in self.list.iter().enumerate() {
            let y = y0 + to_i32(i);
            if y >= bottom {
                break;
            }

            let style = self.entry_style(i);
            let mut x = x0;
            let label = buffer_label(buffer.network(), buffer.title());
            let label = if buffer.title().is_empty() {
                truncate(label, usize::from(width - 1), ELLIPSIS)
            } else {
                x += 2;
                truncate(label, usize::from(width - 1).saturating_sub(2), ELLIPSIS)
            };
            print_str(canvas, &mut x, y, &label, style);

            if buffer.highlights() > 0 {
                print_badge(canvas, &mut x, y, style, buffer.highlights());
            }

            if self.clicked == Some(i) {
                let clicked = Style::DEFAULT.reversed();
                fill(canvas, x, y, x0 + inner, clicked);
                put(canvas, x0 + inner, y, CLICKED_BORDER, clicked);
            }
        }
    }

    /// Paint every buffer on a single row, separated by blanks.
    pub fn draw_horizontal_buffer_list<C: Canvas + ?Sized>(&self, canvas: &mut C, x0: u16, y0: u16, width: u16) {
        let (x0, y) = (i32::from(x0), i32::from(y0));
        let right = x0 + i32::from(width);
        fill(canvas, x0, y, right, Style::DEFAULT);

        let mut x = x0;
        for (i, buffer) in self.list.iter().enumerate() {
            if x >= right {
                break;
            }

            let mut style = self.entry_style(i);
            if buffer.title().is_empty() {
                style = style.add(Modifiers::DIM);
            }
            let budget = usize::try_from(right - x).unwrap_or(0);
            let label = truncate(buffer_label(buffer.network(), buffer.title()), budget, ELLIPSIS);
            print_str(canvas, &mut x, y, &label, style);

            if buffer.highlights() > 0 && x + 3 <= right {
                print_badge(canvas, &mut x, y, style, buffer.highlights());
            }
            x += 1;
        }
    }

    /// Paint the selected buffer's timeline with its top-left corner at
    /// (x0, y0).
    ///
    /// Lines are laid out from the newest one upwards, starting
    /// `scroll_amount` rows below the bottom edge. The time is painted on
    /// the first line of every minute, and blanks opening a wrapped row are
    /// skipped. Records whether the oldest line was reached.
    pub fn draw_timeline<C: Canvas + ?Sized>(&mut self, canvas: &mut C, x0: u16, y0: u16) {
        let (x0, y0) = (i32::from(x0), i32::from(y0));
        let right = x0 + i32::from(self.tl_width);
        let bottom = y0 + i32::from(self.tl_height);
        for y in y0..bottom {
            fill(canvas, x0, y, right, Style::DEFAULT);
        }
        if self.list.is_empty() {
            return;
        }

        let nick_width = usize::from(self.nick_col_width);
        let inner = self.inner_width();
        let x1 = x0 + i32::from(TIMELINE_GUTTER) + i32::from(self.nick_col_width);

        let buffer = &mut self.list[self.current];
        let mut yi = bottom.saturating_add(to_i32(buffer.scroll_amount()));
        let lines = buffer.lines_mut();

        for i in (0..lines.len()).rev() {
            if yi < y0 {
                break;
            }

            let new_minute = i == 0 || minute(lines[i - 1].at) != minute(lines[i].at);
            let line = &mut lines[i];
            yi -= to_i32(line.rows(inner));
            if yi >= bottom {
                continue;
            }

            if yi >= y0 {
                if new_minute {
                    print_time(canvas, x0, yi, Style::DEFAULT.bold(), line.at);
                }
                let mut ident = Style::DEFAULT.toggle(Modifiers::REVERSED, line.highlight);
                ident.fg = line.head_color;
                print_ident(canvas, x0 + IDENT_OFFSET, yi, nick_width, &StyledText::styled(&line.head, ident));
            }

            let (body, breaks) = line.laid_out(inner);
            let mut breaks = breaks.iter().peekable();
            let (mut x, mut y) = (x1, yi);
            for (ci, c, style) in body.styled_chars() {
                if breaks.next_if(|&&b| b == ci).is_some() {
                    x = x1;
                    y += 1;
                    if y >= bottom {
                        break;
                    }
                }
                if y != yi && x == x1 && is_split_char(c) {
                    continue;
                }

                let w = cols(c);
                if w > 0 && y >= y0 && x + w <= right {
                    put(canvas, x, y, c, style);
                }
                x += w;
            }
        }

        buffer.set_at_top(y0 <= yi);
    }
}

fn minute(at: DateTime<Utc>) -> i64 {
    at.timestamp().div_euclid(60)
}
