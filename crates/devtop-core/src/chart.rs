//! Per-device two-color bar chart.
//!
//! ```text
//! GPU 0 NVIDIA GeForce RTX 4090
//! 100% │·· ·· ·· ·· ·· ··
//!  90% │·· ·· ·· ██ ·· ··
//!  80% │·· ·· █  ██  █ ··
//!  ...
//!      └─────────────────
//! ```
//!
//! Every column is two glyph cells (utilization, memory) plus a one-cell
//! separator. Row `r` counts from the bottom; a metric lights row `r` iff
//! `value * height / 100 > r` with integer division, so a value sitting exactly
//! on a row's lower bound leaves that row dark.

use crate::device::DeviceRecord;
use crate::render::{Line, Span, Tone, util_tone};
use crate::sample::Sample;

/// Chart rows.
pub const GRAPH_HEIGHT: usize = 10;

/// Width of the Y-axis gutter, rule included.
pub const Y_AXIS_WIDTH: usize = 6;

/// Character cells per column: two glyphs and a separator.
const CELLS_PER_COLUMN: i64 = 3;

/// Longest device name shown in the chart label.
const MAX_LABEL_NAME: usize = 30;

const PLACEHOLDER: &str = "··";
const BAR: &str = "█";

/// Chart geometry for one frame, derived from the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    /// Columns of samples. Also the history capacity.
    pub graph_width: usize,
    pub graph_height: usize,
    /// Terminal width minus the gutter. Reserved for layout.
    pub available_width: usize,
}

impl ChartLayout {
    /// `graph_width = floor((width - gutter) / 3) - 1`, zero when the
    /// terminal is too narrow for a single column.
    pub fn for_terminal_width(terminal_width: u16) -> Self {
        let available = i64::from(terminal_width) - Y_AXIS_WIDTH as i64;
        let graph_width = available.div_euclid(CELLS_PER_COLUMN) - 1;
        Self {
            graph_width: graph_width.max(0) as usize,
            graph_height: GRAPH_HEIGHT,
            available_width: available.max(0) as usize,
        }
    }

    /// Width of the baseline rule and of every bar row.
    pub fn chart_width(&self) -> usize {
        (self.graph_width * 3).saturating_sub(1)
    }
}

/// One chart row: Y-axis gutter and bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    pub axis: Line,
    pub bars: Line,
}

impl ChartRow {
    /// Gutter and bars joined into a single line.
    pub fn line(&self) -> Line {
        let mut line = self.axis.clone();
        for span in &self.bars.spans {
            line.push(span.clone());
        }
        line
    }
}

/// Renderable chart for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBlock {
    pub label: Line,
    /// Top row first.
    pub rows: Vec<ChartRow>,
    pub baseline: ChartRow,
}

impl ChartBlock {
    /// Label, rows top to bottom, then the baseline.
    pub fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.label.clone());
        lines.extend(self.rows.iter().map(ChartRow::line));
        lines.push(self.baseline.line());
        lines
    }

    pub fn height(&self) -> usize {
        self.rows.len() + 2
    }
}

/// Percentage represented by row `row` (0 = bottom).
pub fn row_percent(row: usize, height: usize) -> i64 {
    ((row + 1) as f64 * 100.0 / height as f64).round() as i64
}

/// Rows at multiples of 5% and the top row carry a Y-axis label.
pub fn is_gridline(row: usize, height: usize) -> bool {
    row_percent(row, height) % 5 == 0 || row + 1 == height
}

/// Whether a metric at `percent` lights row `row`.
pub fn lights(percent: i64, row: usize, height: usize) -> bool {
    percent.saturating_mul(height as i64) / 100 > row as i64
}

/// Render `samples` (oldest first) for `device`.
///
/// Fewer samples than columns are left-padded with placeholders so the newest
/// sample is always in the rightmost column. Extra samples are dropped from
/// the left.
pub fn render_chart(device: &DeviceRecord, samples: &[Sample], layout: &ChartLayout) -> ChartBlock {
    let width = layout.graph_width;
    let height = layout.graph_height;
    let visible = &samples[samples.len().saturating_sub(width)..];

    let label = Line::new()
        .with(Span::new(format!("{} {}", device.kind, device.id), Tone::Bold))
        .with(Span::plain(" "))
        .with(Span::dim(truncate(&device.name, MAX_LABEL_NAME)));

    let rows = (0..height)
        .rev()
        .map(|row| ChartRow {
            axis: gutter(row, height),
            bars: bar_row(visible, row, width, height),
        })
        .collect();

    let baseline = ChartRow {
        axis: Line::from(Span::plain("     └")),
        bars: Line::from(Span::dim("─".repeat(layout.chart_width()))),
    };

    ChartBlock {
        label,
        rows,
        baseline,
    }
}

fn gutter(row: usize, height: usize) -> Line {
    if is_gridline(row, height) {
        Line::new()
            .with(Span::dim(format!("{:>3}%", row_percent(row, height))))
            .with(Span::plain(" │"))
    } else {
        Line::from(Span::plain("     │"))
    }
}

fn bar_row(samples: &[Sample], row: usize, width: usize, height: usize) -> Line {
    let gridline = is_gridline(row, height);
    let pad = width - samples.len();
    let mut line = Line::new();

    for col in 0..width {
        if col > 0 {
            line.push(Span::plain(" "));
        }
        let Some(sample) = col.checked_sub(pad).map(|i| samples[i]) else {
            line.push(Span::dim(PLACEHOLDER));
            continue;
        };

        let util_on = lights(sample.utilization, row, height);
        let mem_on = lights(sample.memory_percent, row, height);
        if gridline && !util_on && !mem_on {
            line.push(Span::dim(PLACEHOLDER));
            continue;
        }
        line.push(if util_on {
            Span::new(BAR, util_tone(sample.utilization))
        } else {
            Span::plain(" ")
        });
        line.push(if mem_on {
            Span::new(BAR, Tone::Accent)
        } else {
            Span::plain(" ")
        });
    }
    line
}

/// Cut `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
