//! End-to-end scenarios over the public buffer-list API.

use chrono::{DateTime, Duration, TimeZone, Utc};
use threadline::{Buffer, BufferList, Grid, Line, Style, StyledText, StyledTextBuilder};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::seconds(secs)
}

fn msg(secs: i64, body: &str) -> Line {
    Line::new(at(secs), "nick", StyledText::plain(body))
}

fn bodies(buffer: &Buffer) -> Vec<String> {
    buffer.lines().iter().map(|l| l.body().as_str().to_string()).collect()
}

fn keys(bs: &BufferList) -> Vec<(String, String)> {
    bs.buffers()
        .iter()
        .map(|b| (b.network().to_string(), b.title().to_string()))
        .collect()
}

#[test]
fn buffers_sorted_by_network_then_title() {
    let mut bs = BufferList::new(80, 24, 16);
    assert!(bs.add("net", "b"));
    assert!(bs.add("net", "a"));
    assert!(bs.add("other", "z"));

    let expected: Vec<(String, String)> = [("net", "a"), ("net", "b"), ("other", "z")]
        .iter()
        .map(|(n, t)| ((*n).to_string(), (*t).to_string()))
        .collect();
    assert_eq!(keys(&bs), expected);
}

#[test]
fn selection_follows_its_buffer_across_insertions_and_removals() {
    let mut bs = BufferList::new(80, 24, 16);
    bs.add("net", "m");
    bs.add("net", "z");
    bs.to(1);

    bs.add("net", "a");
    bs.add("aaa", "");
    assert_eq!(bs.current(), ("net", "z"));

    bs.remove("net", "z");
    assert_eq!(bs.current(), ("net", "m"));
}

#[test]
fn read_receipt_on_every_selection_change() {
    let mut bs = BufferList::new(80, 24, 16);
    for title in ["#a", "#b", "#c"] {
        bs.add("net", title);
    }
    for title in ["#b", "#c"] {
        bs.add_line("net", title, msg(0, "ping").with_highlight(true));
        bs.add_line("net", title, msg(1, "ping again").with_highlight(true));
    }
    assert_eq!(bs.buffers()[1].highlights(), 2);

    bs.next();
    assert_eq!(bs.buffers()[1].highlights(), 0);
    assert!(!bs.buffers()[1].unread());

    bs.to(2);
    assert_eq!(bs.buffers()[2].highlights(), 0);
    assert!(!bs.buffers()[2].unread());
}

#[test]
fn merge_collapses_exactly_one_line() {
    let mut bs = BufferList::new(80, 24, 16);
    bs.add("net", "#chan");

    bs.add_line("net", "#chan", msg(0, "hello"));
    bs.add_line("net", "#chan", msg(1, "a joined").with_mergeable(true));
    assert_eq!(bs.current_buffer().lines().len(), 2);

    for (i, nick) in ["b", "c", "d"].iter().enumerate() {
        let secs = i64::try_from(i).unwrap() + 2;
        bs.add_line("net", "#chan", msg(secs, &format!("{nick} joined")).with_mergeable(true));
        assert_eq!(bs.current_buffer().lines().len(), 2);
    }

    bs.add_line("net", "#chan", msg(9, "back to talking"));
    assert_eq!(bs.current_buffer().lines().len(), 3);
    assert_eq!(
        bs.current_buffer().lines()[1].body().as_str(),
        "a joined  b joined  c joined  d joined"
    );
}

#[test]
fn merged_body_keeps_styles() {
    let green = Style::DEFAULT.fg(threadline::Rgb::new(0, 200, 0));
    let mut first = StyledTextBuilder::new();
    first.set_style(green).push_str("+a");
    let mut second = StyledTextBuilder::new();
    second.set_style(green).push_str("+b");

    let mut buffer_lines = BufferList::new(80, 24, 16);
    buffer_lines.add("net", "#chan");
    buffer_lines.add_line("net", "#chan", Line::new(at(0), "--", first.build()).with_mergeable(true));
    buffer_lines.add_line("net", "#chan", Line::new(at(1), "--", second.build()).with_mergeable(true));

    let body = buffer_lines.current_buffer().lines()[0].body();
    assert_eq!(body.as_str(), "+a  +b");
    assert_eq!(body.style_at(0), green);
    assert_eq!(body.style_at(2), Style::DEFAULT);
    assert_eq!(body.style_at(4), green);
}

#[test]
fn history_backfill_is_idempotent() {
    let mut once = BufferList::new(80, 24, 16);
    once.add("net", "#chan");
    once.add_line("net", "#chan", msg(100, "live"));
    once.add_lines("net", "#chan", vec![msg(5, "z"), msg(10, "a"), msg(20, "b")]);

    let mut twice = BufferList::new(80, 24, 16);
    twice.add("net", "#chan");
    twice.add_line("net", "#chan", msg(100, "live"));
    twice.add_lines("net", "#chan", vec![msg(10, "a"), msg(20, "b"), msg(100, "live")]);
    twice.add_lines("net", "#chan", vec![msg(5, "z"), msg(10, "a"), msg(20, "b")]);
    twice.add_lines("net", "#chan", vec![msg(5, "z"), msg(10, "a")]);

    assert_eq!(bodies(once.current_buffer()), vec!["z", "a", "b", "live"]);
    assert_eq!(bodies(twice.current_buffer()), bodies(once.current_buffer()));
    assert_eq!(once.current_oldest_time(), Some(at(5)));
}

#[test]
fn lines_stay_sorted_by_time() {
    let mut b = BufferList::new(80, 24, 16);
    b.add("net", "#chan");
    b.add_line("net", "#chan", msg(50, "x"));
    b.add_line("net", "#chan", msg(60, "y"));
    b.add_lines("net", "#chan", vec![msg(1, "p"), msg(2, "q"), msg(55, "r")]);

    let times: Vec<_> = b.current_buffer().lines().iter().map(|l| l.at).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(bodies(b.current_buffer()), vec!["p", "q", "x", "y"]);
}

#[test]
fn worked_wrap_example() {
    let mut line = msg(0, "hello world foobarbazqux");
    assert_eq!(line.row_breaks(10), &[6, 16]);
    assert_eq!(line.rows(10), 3);
}

#[test]
fn scrolled_viewport_does_not_move_on_append() {
    // Bodies are 16 columns wide.
    let mut bs = BufferList::new(30, 4, 5);
    bs.add("net", "#chan");
    for i in 0..6 {
        bs.add_line("net", "#chan", msg(i, &format!("line {i}")));
    }
    bs.scroll_up(2);

    let mut before = Grid::new(30, 4);
    bs.draw_timeline(&mut before, 0, 0);

    let r = bs.buffers()[0].lines().len();
    bs.add_line("net", "#chan", msg(7, "aaaa bbbb cccc dddd"));
    assert_eq!(bs.buffers()[0].lines().len(), r + 1);
    assert_eq!(bs.current_buffer().scroll_amount(), 4);

    let mut after = Grid::new(30, 4);
    bs.draw_timeline(&mut after, 0, 0);
    for y in 0..4 {
        assert_eq!(before.row_text(y), after.row_text(y));
    }
}

#[test]
fn scroll_up_stops_once_top_is_reached() {
    let mut bs = BufferList::new(30, 4, 5);
    bs.add("net", "#chan");
    bs.add_line("net", "#chan", msg(0, "only line"));

    let mut grid = Grid::new(30, 4);
    bs.draw_timeline(&mut grid, 0, 0);
    assert!(bs.is_at_top());

    bs.scroll_up(10);
    assert_eq!(bs.current_buffer().scroll_amount(), 0);
}
