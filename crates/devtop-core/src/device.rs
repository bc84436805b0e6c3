//! Device records as reported by the query collaborator.

use serde::{Deserialize, Serialize};

use crate::sample::Sample;

/// One device as seen by a single poll.
///
/// Identity is `id`, never the name or the position in the poll output, so a
/// device that shows up at a different row is still tracked as the same one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Stable identifier (e.g. the `nvidia-smi` index `"0"`).
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Device type shown in the summary table (e.g. `"GPU"`).
    pub kind: String,
    /// Core temperature in °C.
    pub temperature_c: i64,
    /// Utilization percent, 0–100.
    pub utilization: i64,
    /// Memory in use, same unit as `memory_total`.
    pub memory_used: i64,
    /// Total memory, same unit as `memory_used`.
    pub memory_total: i64,
}

impl DeviceRecord {
    /// Memory use as a truncated integer percent.
    ///
    /// A zero (or negative) total reports 0%, as does a used value too large
    /// to scale. Values above 100 are passed through unclamped.
    pub fn memory_percent(&self) -> i64 {
        if self.memory_total <= 0 {
            return 0;
        }
        self.memory_used
            .checked_mul(100)
            .map_or(0, |scaled| scaled / self.memory_total)
    }

    /// Raw sample for this poll.
    pub fn sample(&self) -> Sample {
        Sample::new(self.utilization, self.memory_percent())
    }
}

#[cfg(test)]
pub(crate) fn record(id: &str, utilization: i64, memory_used: i64, memory_total: i64) -> DeviceRecord {
    DeviceRecord {
        id: id.to_string(),
        name: format!("Test Accelerator {id}"),
        kind: "GPU".to_string(),
        temperature_c: 50,
        utilization,
        memory_used,
        memory_total,
    }
}
