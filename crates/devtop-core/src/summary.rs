//! Summary table under the charts.

use std::time::Duration;

use chrono::NaiveTime;

use crate::device::DeviceRecord;
use crate::render::{Line, Span, Tone, temp_tone, util_tone};

pub const HEADER: [&str; 6] = ["Type", "ID", "Name", "Temp", "Util", "Mem"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    pub header: [&'static str; 6],
    /// One row per device, one cell per header column.
    pub rows: Vec<Vec<Line>>,
    pub footer: Line,
}

/// One row per device plus a footer with the wall-clock time and refresh interval.
pub fn render_summary(
    devices: &[DeviceRecord],
    display_interval: Duration,
    now: NaiveTime,
) -> SummaryTable {
    let rows = devices.iter().map(device_row).collect();

    let footer = Line::new()
        .with(Span::new("devtop", Tone::Bold))
        .with(Span::plain(" "))
        .with(Span::dim(format!("[{}]", now.format("%H:%M:%S"))))
        .with(Span::plain(format!(
            ", Refresh every {}s",
            display_interval.as_secs_f64()
        )));

    SummaryTable {
        header: HEADER,
        rows,
        footer,
    }
}

fn device_row(d: &DeviceRecord) -> Vec<Line> {
    vec![
        Line::from(Span::plain(d.kind.as_str())),
        Line::from(Span::new(d.id.as_str(), Tone::Bold)),
        Line::from(Span::plain(d.name.as_str())),
        Line::from(Span::new(
            format!("{}°C", d.temperature_c),
            temp_tone(d.temperature_c),
        )),
        Line::from(Span::new(
            format!("{}%", d.utilization),
            util_tone(d.utilization),
        )),
        Line::new()
            .with(Span::new(d.memory_used.to_string(), Tone::Accent))
            .with(Span::plain("/"))
            .with(Span::dim(d.memory_total.to_string())),
    ]
}
