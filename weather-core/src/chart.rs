//! Temperature history chart, drawn with ratatui's `Chart` widget into an
//! off-screen buffer and flattened to text.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{Axis, Chart, Dataset, GraphType, Widget},
};

use crate::summary::display_number;

pub const CHART_TITLE: &str = "Temperature History (°C)";
pub const MIN_HEIGHT: usize = 3;
pub const MIN_WIDTH: usize = 30;

/// Rows taken by the x axis line and its labels.
const X_AXIS_ROWS: usize = 2;

/// Render `values` as a line chart whose plot area is `height` rows tall and
/// whose total width is `width` columns, whatever the number of updates.
///
/// Returns an empty string for an empty series.
pub fn render_line_chart(values: &[f64], width: usize, height: usize) -> String {
    if values.is_empty() {
        return String::new();
    }

    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT) + X_AXIS_ROWS;
    let area = Rect::new(0, 0, clamp_u16(width), clamp_u16(height));

    let points: Vec<(f64, f64)> =
        values.iter().enumerate().map(|(i, &t)| ((i + 1) as f64, t)).collect();

    let (x_bounds, x_labels) = x_axis(values.len());
    let (lo, hi) = value_range(values);
    let y_labels: Vec<String> =
        [lo, (lo + hi) / 2.0, hi].iter().map(|v| format!("{:.1}", display_number(*v))).collect();

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds(x_bounds).labels(x_labels))
        .y_axis(Axis::default().bounds([lo, hi]).labels(y_labels));

    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    let mut out = String::from(CHART_TITLE);
    out.push('\n');
    out.push_str(&buffer_to_text(&buf));
    out
}

/// X bounds and labels. Labels are spread evenly across the bounds, so only
/// positions that land on a whole update number get one.
fn x_axis(len: usize) -> ([f64; 2], Vec<String>) {
    let label = |n: usize| format!("Update {n}");

    match len {
        1 => ([0.0, 2.0], vec![String::new(), label(1), String::new()]),
        n if n % 2 == 1 => ([1.0, n as f64], vec![label(1), label(n.div_ceil(2)), label(n)]),
        n => ([1.0, n as f64], vec![label(1), label(n)]),
    }
}

/// Lowest and highest plotted value; flat series get one degree of headroom each way.
fn value_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (hi - lo).abs() < f64::EPSILON { (lo - 1.0, hi + 1.0) } else { (lo, hi) }
}

fn buffer_to_text(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width).max(1);
    let mut out = String::new();

    for row in buf.content.chunks(width) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn clamp_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
