//! Timeline benchmark: appending lines and painting the selected buffer.
//!
//! Target: < 1ms per 200×50 timeline paint

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use threadline::{BufferList, Grid, Line, StyledText};

fn message(i: usize) -> Line {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(i64::try_from(i).unwrap());
    let body = format!("message number {i} with a few words that will wrap on narrow terminals");
    Line::new(at, format!("user{}", i % 7), StyledText::plain(&body))
}

fn create_list(width: u16, height: u16, lines: usize) -> BufferList {
    let mut bs = BufferList::new(width, height, 16);
    bs.add("net", "#chan");
    for i in 0..lines {
        bs.add_line("net", "#chan", message(i));
    }
    bs
}

fn append_line(c: &mut Criterion) {
    c.bench_function("append_line", |b| {
        let mut bs = create_list(200, 50, 0);
        let mut i = 0;
        b.iter(|| {
            bs.add_line("net", "#chan", message(i));
            i += 1;
        });
    });
}

fn merge_history_1000(c: &mut Criterion) {
    c.bench_function("merge_history_1000", |b| {
        b.iter_batched(
            || {
                let bs = create_list(200, 50, 1);
                let history: Vec<Line> = (0..1000).map(message).collect();
                (bs, history)
            },
            |(mut bs, history)| bs.add_lines("net", "#chan", history),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn draw_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_timeline");

    for (width, height) in [(80, 24), (200, 50)] {
        let mut bs = create_list(width, height, 500);
        let mut grid = Grid::new(width, height);
        group.bench_function(BenchmarkId::new("cached", format!("{width}x{height}")), |b| {
            b.iter(|| bs.draw_timeline(black_box(&mut grid), 0, 0));
        });
    }

    group.finish();
}

fn draw_after_resize(c: &mut Criterion) {
    let mut bs = create_list(200, 50, 500);
    let mut grid = Grid::new(200, 50);
    let mut wide = true;
    c.bench_function("draw_timeline_rewrap", |b| {
        b.iter(|| {
            wide = !wide;
            let width = if wide { 200 } else { 120 };
            bs.resize_timeline(width, 50, 16);
            bs.draw_timeline(black_box(&mut grid), 0, 0);
        });
    });
}

criterion_group!(benches, append_line, merge_history_1000, draw_timeline, draw_after_resize);
criterion_main!(benches);
