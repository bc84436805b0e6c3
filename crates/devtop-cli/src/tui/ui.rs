//! Frame painting.
//!
//! ┌──────────────────────────────────────────────┐
//! │ GPU 0 NVIDIA GeForce RTX 4090                │
//! │ 100% │·· ·· ·· ·· ·· ·· ·· ·· ·· ··          │
//! │  ...                                         │
//! │      └─────────────────────────────          │
//! │ GPU 1 ...                                    │
//! │┌Type─ID─Name───────────Temp─Util─Mem───────┐ │
//! ││GPU  0  RTX 4090       45°C 10%  500/2000  │ │
//! │└───────────────────────────────────────────┘ │
//! │ devtop [12:34:56], Refresh every 3s          │
//! └──────────────────────────────────────────────┘

use ratatui::{prelude::*, widgets::*};

use devtop_core::{Frame as DashFrame, Line as DashLine, SummaryTable, Tone};

pub fn draw(f: &mut Frame, frame: &DashFrame) {
    let table_height = frame.summary.rows.len() + 3; // header + borders

    let mut constraints = Vec::with_capacity(frame.charts.len() + 4);
    if frame.status.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.extend(
        frame
            .charts
            .iter()
            .map(|c| Constraint::Length(c.height() as u16)),
    );
    constraints.push(Constraint::Length(table_height as u16));
    constraints.push(Constraint::Length(1)); // footer
    constraints.push(Constraint::Min(0));

    let areas = Layout::vertical(constraints).split(f.area());
    let mut next = areas.iter().copied();

    if let Some(status) = &frame.status {
        if let Some(area) = next.next() {
            let p = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow));
            f.render_widget(p, area);
        }
    }

    for chart in &frame.charts {
        let Some(area) = next.next() else { break };
        let lines: Vec<Line> = chart.lines().iter().map(to_line).collect();
        f.render_widget(Paragraph::new(lines), area);
    }

    if let Some(area) = next.next() {
        draw_table(f, area, &frame.summary);
    }
    if let Some(area) = next.next() {
        f.render_widget(Paragraph::new(to_line(&frame.summary.footer)), area);
    }
}

fn draw_table(f: &mut Frame, area: Rect, summary: &SummaryTable) {
    let widths = column_widths(summary);

    let header = Row::new(summary.header.iter().map(|h| Cell::from(*h)))
        .style(Style::default().bold());

    let rows: Vec<Row> = summary
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().map(|c| Cell::from(to_line(c)))))
        .collect();

    let table = Table::new(rows, widths.iter().map(|&w| Constraint::Length(w)))
        .header(header)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(table, area);
}

/// Widest cell (header included) per column.
fn column_widths(summary: &SummaryTable) -> Vec<u16> {
    summary
        .header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            summary
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(DashLine::width)
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0) as u16
        })
        .collect()
}

fn to_line(line: &DashLine) -> Line<'static> {
    Line::from(
        line.spans
            .iter()
            .map(|s| Span::styled(s.text.clone(), tone_style(s.tone)))
            .collect::<Vec<_>>(),
    )
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default(),
        Tone::Bold => Style::default().bold(),
        Tone::Dim => Style::default().fg(Color::DarkGray),
        Tone::Ok => Style::default().fg(Color::Green),
        Tone::Warn => Style::default().fg(Color::Yellow),
        Tone::Hot => Style::default().fg(Color::Red),
        Tone::Accent => Style::default().fg(Color::Cyan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use devtop_core::{DeviceRecord, Span as DashSpan, render_summary};

    fn device() -> DeviceRecord {
        DeviceRecord {
            id: "0".into(),
            name: "NVIDIA GeForce RTX 4090".into(),
            kind: "GPU".into(),
            temperature_c: 45,
            utilization: 10,
            memory_used: 500,
            memory_total: 24564,
        }
    }

    fn sample_summary() -> SummaryTable {
        let devices = vec![device()];
        let now = chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        render_summary(&devices, Duration::from_secs(3), now)
    }

    #[test]
    fn tone_styles() {
        assert_eq!(tone_style(Tone::Hot).fg, Some(Color::Red));
        assert_eq!(tone_style(Tone::Warn).fg, Some(Color::Yellow));
        assert_eq!(tone_style(Tone::Ok).fg, Some(Color::Green));
        assert_eq!(tone_style(Tone::Accent).fg, Some(Color::Cyan));
        assert_eq!(tone_style(Tone::Dim).fg, Some(Color::DarkGray));
        assert_eq!(tone_style(Tone::Plain), Style::default());
    }

    #[test]
    fn to_line_keeps_text_and_colors() {
        let line = DashLine::new()
            .with(DashSpan::new("█", Tone::Hot))
            .with(DashSpan::new("█", Tone::Accent));
        let tui = to_line(&line);
        assert_eq!(tui.spans.len(), 2);
        assert_eq!(tui.spans[0].content, "█");
        assert_eq!(tui.spans[1].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn column_widths_fit_content() {
        let widths = column_widths(&sample_summary());
        assert_eq!(widths, vec![4, 2, 23, 4, 4, 9]);
    }

    #[test]
    fn draw_renders_into_buffer() {
        use devtop_core::{ChartLayout, render_chart};
        use ratatui::backend::TestBackend;

        let summary = sample_summary();
        let dev = device();
        let layout = ChartLayout::for_terminal_width(60);
        let frame = DashFrame {
            layout,
            charts: vec![render_chart(&dev, &[], &layout)],
            summary,
            status: None,
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| draw(f, &frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let first: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(first.starts_with("GPU 0 NVIDIA GeForce RTX 4090"), "{first:?}");
        let second: String = (0..6).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert_eq!(second, "100% │");
    }
}
