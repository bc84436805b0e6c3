//! Poll → aggregate → render loop.
//!
//! One cooperative thread runs two cadences:
//! - every `sample_interval`: poll devices, buffer one raw sample per device;
//! - once `display_interval` has passed since the last frame: average the
//!   buffers into the histories and hand a [`Frame`] to the [`FrameSink`].
//!
//! Cancellation is observed between iterations and inside the sleep, so the
//! loop stops within one [`CANCEL_SLICE`](crate::cancel::CANCEL_SLICE) of a
//! request unless a poll is blocking.

use std::io;
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::chart::{ChartBlock, ChartLayout, render_chart};
use crate::error::Result;
use crate::query::DeviceQuery;
use crate::registry::DeviceRegistry;
use crate::summary::{SummaryTable, render_summary};

/// Default poll cadence.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Default redraw cadence.
pub const DEFAULT_DISPLAY_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub sample_interval: Duration,
    pub display_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            display_interval: DEFAULT_DISPLAY_INTERVAL,
        }
    }
}

/// Everything drawn in one redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub layout: ChartLayout,
    /// One chart per device, in poll order.
    pub charts: Vec<ChartBlock>,
    pub summary: SummaryTable,
    /// Shown instead of charts when there is nothing to chart.
    pub status: Option<String>,
}

/// Terminal-side collaborator: reports the current width and paints frames.
pub trait FrameSink {
    fn width(&mut self) -> io::Result<u16>;
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

pub struct Dashboard {
    config: DashboardConfig,
    registry: DeviceRegistry,
    last_render: Instant,
    last_error: Option<String>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self::starting_at(config, Instant::now())
    }

    /// The first frame is due one display interval after `start`.
    pub fn starting_at(config: DashboardConfig, start: Instant) -> Self {
        Self {
            config,
            registry: DeviceRegistry::new(),
            last_render: start,
            last_error: None,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Error text of the current failure streak, if the last poll failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Poll once and buffer the result.
    ///
    /// A failed poll clears the device list and is reported in the next
    /// frame. It is logged once per failure streak.
    pub fn poll(&mut self, query: &mut dyn DeviceQuery) {
        match query.query() {
            Ok(records) => {
                if self.last_error.take().is_some() {
                    log::info!("device query recovered, {} device(s)", records.len());
                }
                self.registry.record_poll(records);
            }
            Err(e) => {
                if self.last_error.is_none() {
                    log::warn!("device query failed: {e}");
                }
                self.last_error = Some(e.to_string());
                self.registry.clear_devices();
            }
        }
    }

    /// Produce a frame if the display interval has elapsed at `now`.
    ///
    /// Layout is recomputed from `terminal_width` on every call.
    pub fn tick(&mut self, terminal_width: u16, now: Instant) -> Option<Frame> {
        let layout = ChartLayout::for_terminal_width(terminal_width);
        if now.saturating_duration_since(self.last_render) < self.config.display_interval {
            return None;
        }

        self.registry.advance_histories(layout.graph_width);
        let frame = self.frame(layout);
        self.last_render = now;
        Some(frame)
    }

    fn frame(&self, layout: ChartLayout) -> Frame {
        let devices = self.registry.devices();
        let charts = devices
            .iter()
            .map(|d| render_chart(d, &self.registry.samples_for(&d.id), &layout))
            .collect();
        let summary = render_summary(
            devices,
            self.config.display_interval,
            chrono::Local::now().time(),
        );
        let status = match (&self.last_error, devices.is_empty()) {
            (Some(err), _) => Some(format!("no devices: {err}")),
            (None, true) => Some("no devices found".to_string()),
            (None, false) => None,
        };
        Frame {
            layout,
            charts,
            summary,
            status,
        }
    }

    /// Run until `cancel` fires.
    pub fn run<Q, S>(&mut self, query: &mut Q, sink: &mut S, cancel: &CancelToken) -> Result<()>
    where
        Q: DeviceQuery,
        S: FrameSink,
    {
        log::debug!(
            "dashboard started: sample every {:?}, display every {:?}",
            self.config.sample_interval,
            self.config.display_interval
        );
        while !cancel.is_cancelled() {
            self.poll(query);
            let width = sink.width()?;
            if let Some(frame) = self.tick(width, Instant::now()) {
                sink.present(&frame)?;
            }
            cancel.sleep(self.config.sample_interval);
        }
        log::debug!("dashboard stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceRecord, record};
    use crate::error::QueryError;
    use crate::sample::Sample;

    struct Fixed(Vec<DeviceRecord>);

    impl DeviceQuery for Fixed {
        fn query(&mut self) -> std::result::Result<Vec<DeviceRecord>, QueryError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl DeviceQuery for Failing {
        fn query(&mut self) -> std::result::Result<Vec<DeviceRecord>, QueryError> {
            Err(QueryError::Status {
                program: "nvidia-smi".to_string(),
                status: "exit status: 9".to_string(),
            })
        }
    }

    fn config() -> DashboardConfig {
        DashboardConfig {
            sample_interval: Duration::from_millis(100),
            display_interval: Duration::from_secs(3),
        }
    }

    #[test]
    fn no_frame_before_display_interval() {
        let start = Instant::now();
        let mut dash = Dashboard::starting_at(config(), start);
        dash.poll(&mut Fixed(vec![record("0", 10, 500, 2000)]));
        assert!(dash.tick(80, start + Duration::from_secs(1)).is_none());
        assert!(dash.tick(80, start + Duration::from_secs(3)).is_some());
    }

    #[test]
    fn frame_resets_render_clock() {
        let start = Instant::now();
        let mut dash = Dashboard::starting_at(config(), start);
        dash.poll(&mut Fixed(vec![record("0", 10, 500, 2000)]));
        let t1 = start + Duration::from_secs(3);
        assert!(dash.tick(80, t1).is_some());
        assert!(dash.tick(80, t1 + Duration::from_secs(2)).is_none());
        assert!(dash.tick(80, t1 + Duration::from_secs(3)).is_some());
    }

    #[test]
    fn polls_between_frames_are_averaged() {
        let start = Instant::now();
        let mut dash = Dashboard::starting_at(config(), start);
        dash.poll(&mut Fixed(vec![record("0", 20, 1000, 2000)]));
        dash.poll(&mut Fixed(vec![record("0", 40, 1000, 2000)]));
        dash.tick(80, start + Duration::from_secs(3));
        assert_eq!(dash.registry().samples_for("0"), vec![Sample::new(30, 50)]);
    }

    #[test]
    fn history_capacity_follows_terminal_width() {
        let start = Instant::now();
        let mut dash = Dashboard::starting_at(config(), start);
        let mut query = Fixed(vec![record("0", 50, 1, 2)]);
        for i in 1..=10u64 {
            dash.poll(&mut query);
            dash.tick(80, start + Duration::from_secs(3 * i));
        }
        assert_eq!(dash.registry().samples_for("0").len(), 10);

        // 18 columns → graph width 3.
        dash.poll(&mut query);
        let frame = dash.tick(18, start + Duration::from_secs(33)).unwrap();
        assert_eq!(frame.layout.graph_width, 3);
        assert_eq!(dash.registry().samples_for("0").len(), 3);
    }

    #[test]
    fn failed_poll_shows_status_and_keeps_going() {
        let start = Instant::now();
        let mut dash = Dashboard::starting_at(config(), start);
        dash.poll(&mut Fixed(vec![record("0", 10, 1, 2)]));
        dash.poll(&mut Failing);
        assert!(dash.last_error().is_some());
        let frame = dash.tick(80, start + Duration::from_secs(3)).unwrap();
        assert!(frame.charts.is_empty());
        assert!(frame.summary.rows.is_empty());
        let status = frame.status.unwrap();
        assert!(status.starts_with("no devices: "), "{status}");

        dash.poll(&mut Fixed(vec![record("0", 10, 1, 2)]));
        assert!(dash.last_error().is_none());
        let frame = dash.tick(80, start + Duration::from_secs(6)).unwrap();
        assert_eq!(frame.charts.len(), 1);
        assert!(frame.status.is_none());
    }

    #[test]
    fn empty_poll_reports_no_devices() {
        let start = Instant::now();
        let mut dash = Dashboard::starting_at(config(), start);
        dash.poll(&mut Fixed(vec![]));
        let frame = dash.tick(80, start + Duration::from_secs(3)).unwrap();
        assert_eq!(frame.status.as_deref(), Some("no devices found"));
    }

    #[test]
    fn narrow_terminal_renders_zero_width_charts() {
        let start = Instant::now();
        let mut dash = Dashboard::starting_at(config(), start);
        dash.poll(&mut Fixed(vec![record("0", 90, 1, 2)]));
        let frame = dash.tick(5, start + Duration::from_secs(3)).unwrap();
        assert_eq!(frame.layout.graph_width, 0);
        assert_eq!(frame.charts.len(), 1);
        assert!(dash.registry().samples_for("0").is_empty());
    }

    #[test]
    fn run_stops_when_cancelled() {
        struct Sink {
            presented: usize,
            cancel: CancelToken,
        }
        impl FrameSink for Sink {
            fn width(&mut self) -> io::Result<u16> {
                Ok(80)
            }
            fn present(&mut self, _frame: &Frame) -> io::Result<()> {
                self.presented += 1;
                self.cancel.cancel();
                Ok(())
            }
        }

        let cancel = CancelToken::new();
        let mut sink = Sink {
            presented: 0,
            cancel: cancel.clone(),
        };
        let mut dash = Dashboard::new(DashboardConfig {
            sample_interval: Duration::from_millis(10),
            display_interval: Duration::from_millis(30),
        });
        dash.run(&mut Fixed(vec![record("0", 10, 1, 2)]), &mut sink, &cancel)
            .unwrap();
        assert_eq!(sink.presented, 1);
        assert!(!dash.registry().samples_for("0").is_empty());
    }

    #[test]
    fn run_exits_immediately_if_already_cancelled() {
        struct NeverCalled;
        impl FrameSink for NeverCalled {
            fn width(&mut self) -> io::Result<u16> {
                panic!("width should not be queried");
            }
            fn present(&mut self, _frame: &Frame) -> io::Result<()> {
                panic!("present should not be called");
            }
        }
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut dash = Dashboard::new(config());
        dash.run(&mut Fixed(vec![]), &mut NeverCalled, &cancel).unwrap();
    }
}
