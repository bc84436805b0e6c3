//! # devtop-core
//!
//! **A `top`-style view of your accelerators.**
//!
//! `devtop-core` turns raw per-poll device telemetry into a bounded,
//! time-smoothed history and renders it as a fixed-geometry character chart
//! plus a summary table.
//!
//! ## Architecture
//!
//! Poll → SampleAggregator (per device) → History (per device) → Chart + Summary → Frame
//!
//! Two cadences drive the pipeline:
//! - **sample interval**: every poll appends one raw [`Sample`] per device.
//! - **display interval**: buffered samples are averaged into one history
//!   column per device and a new [`Frame`] is produced.
//!
//! The device query ([`DeviceQuery`]) and the painter ([`FrameSink`]) are
//! collaborators; the core only decides what to draw.
//!
//! ```no_run
//! use devtop_core::{CancelToken, Dashboard, DashboardConfig, NvidiaSmi};
//! # use devtop_core::{Frame, FrameSink};
//! # struct Stdout;
//! # impl FrameSink for Stdout {
//! #     fn width(&mut self) -> std::io::Result<u16> { Ok(120) }
//! #     fn present(&mut self, _frame: &Frame) -> std::io::Result<()> { Ok(()) }
//! # }
//!
//! let cancel = CancelToken::new();
//! let mut dashboard = Dashboard::new(DashboardConfig::default());
//! dashboard.run(&mut NvidiaSmi::default(), &mut Stdout, &cancel).unwrap();
//! ```

pub mod cancel;
pub mod chart;
pub mod dashboard;
pub mod device;
pub mod error;
pub mod history;
pub mod query;
pub mod registry;
pub mod render;
pub mod sample;
pub mod summary;

pub use cancel::{CANCEL_SLICE, CancelToken};
pub use chart::{ChartBlock, ChartLayout, ChartRow, GRAPH_HEIGHT, Y_AXIS_WIDTH, render_chart};
pub use dashboard::{Dashboard, DashboardConfig, Frame, FrameSink};
pub use device::DeviceRecord;
pub use error::{DashboardError, QueryError};
pub use history::History;
pub use query::{DeviceQuery, NvidiaSmi, parse_csv};
pub use registry::DeviceRegistry;
pub use render::{Line, Span, Tone, temp_tone, util_tone};
pub use sample::{Sample, SampleAggregator};
pub use summary::{SummaryTable, render_summary};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
