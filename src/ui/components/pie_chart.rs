//! Pie chart drawn on a braille canvas.
//!
//! Slices start at twelve o'clock and run clockwise in input order. The
//! geometry helpers are pure so slice assignment can be tested without a
//! terminal.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Block,
    },
    Frame,
};

use crate::ui::theme::palette_color;

/// Angular extent of one slice, in radians measured clockwise from twelve
/// o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceSpan {
    pub start: f64,
    pub end: f64,
}

/// Split the full circle between `values` in proportion.
///
/// Returns an empty list when the values sum to zero.
pub fn slice_spans(values: &[u64]) -> Vec<SliceSpan> {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    values
        .iter()
        .map(|&value| {
            let end = start + TAU * value as f64 / total as f64;
            let span = SliceSpan { start, end };
            start = end;
            span
        })
        .collect()
}

/// Clockwise angle from twelve o'clock of the point `(x, y)`.
pub fn clock_angle(x: f64, y: f64) -> f64 {
    // atan2 measures counter-clockwise from three o'clock.
    let angle = FRAC_PI_2 - y.atan2(x);
    angle.rem_euclid(TAU)
}

/// Index of the slice containing `angle`.
pub fn slice_at(spans: &[SliceSpan], angle: f64) -> Option<usize> {
    spans
        .iter()
        .position(|s| angle >= s.start && angle < s.end)
        .or_else(|| {
            // Rounding can leave the last span ending a hair short of TAU.
            spans
                .iter()
                .rposition(|s| s.end > s.start)
                .filter(|_| angle >= TAU - 1e-9)
        })
}

/// Bucket the sample points inside the unit circle by slice.
///
/// `columns` and `rows` are the sample grid size; the circle is scaled by
/// the shorter side so it stays round.
fn slice_points(spans: &[SliceSpan], columns: usize, rows: usize) -> Vec<Vec<(f64, f64)>> {
    let mut buckets = vec![Vec::new(); spans.len()];
    if columns == 0 || rows == 0 {
        return buckets;
    }

    let (x_extent, y_extent) = extents(columns, rows);
    for row in 0..rows {
        let y = y_extent - (row as f64 + 0.5) * 2.0 * y_extent / rows as f64;
        for col in 0..columns {
            let x = -x_extent + (col as f64 + 0.5) * 2.0 * x_extent / columns as f64;
            if x * x + y * y > 1.0 {
                continue;
            }
            if let Some(i) = slice_at(spans, clock_angle(x, y)) {
                buckets[i].push((x, y));
            }
        }
    }
    buckets
}

/// Canvas bounds that keep a unit circle round on a `columns` by `rows`
/// dot grid.
fn extents(columns: usize, rows: usize) -> (f64, f64) {
    let (c, r) = (columns as f64, rows as f64);
    if c >= r {
        (c / r, 1.0)
    } else {
        (1.0, r / c)
    }
}

/// Render a pie of `values`, coloring slice `i` with palette entry `i`.
pub fn render_pie(frame: &mut Frame, area: Rect, values: &[u64], block: Block<'_>) {
    let inner = block.inner(area);
    // Braille cells hold two dots across and four down.
    let columns = inner.width as usize * 2;
    let rows = inner.height as usize * 4;

    let spans = slice_spans(values);
    let buckets = slice_points(&spans, columns, rows);
    let (x_extent, y_extent) = if columns > 0 && rows > 0 {
        extents(columns, rows)
    } else {
        (1.0, 1.0)
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(Color::Reset)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(move |ctx| {
            for (i, coords) in buckets.iter().enumerate() {
                ctx.draw(&Points {
                    coords,
                    color: palette_color(i),
                });
            }
        });

    frame.render_widget(canvas, area);
}
