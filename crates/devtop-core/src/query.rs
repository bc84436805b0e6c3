//! Device query collaborator.
//!
//! [`DeviceQuery`] is the seam between the dashboard and whatever reports
//! device telemetry. [`NvidiaSmi`] shells out to `nvidia-smi` and parses its
//! CSV output. The call blocks; there is no timeout, so a hung command stalls
//! the dashboard until it returns.

use std::process::Command;

use crate::device::DeviceRecord;
use crate::error::QueryError;

/// Anything that can report the current device list.
pub trait DeviceQuery {
    fn query(&mut self) -> Result<Vec<DeviceRecord>, QueryError>;
}

/// Default query program.
pub const NVIDIA_SMI: &str = "nvidia-smi";

/// Arguments selecting the six CSV columns [`parse_csv`] expects.
pub const NVIDIA_SMI_ARGS: &[&str] = &[
    "--query-gpu=index,name,temperature.gpu,utilization.gpu,memory.used,memory.total",
    "--format=csv,noheader,nounits",
];

/// Number of columns per CSV row.
const FIELDS: usize = 6;

/// Largest value accepted for any numeric field (1 TiB in MiB).
const MAX_FIELD: i64 = 1 << 20;

/// Lowest accepted temperature in °C.
const MIN_TEMPERATURE: i64 = -273;

/// Queries NVIDIA GPUs through `nvidia-smi`.
#[derive(Debug, Clone)]
pub struct NvidiaSmi {
    program: String,
}

impl NvidiaSmi {
    /// Use a specific binary instead of `nvidia-smi` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for NvidiaSmi {
    fn default() -> Self {
        Self::with_program(NVIDIA_SMI)
    }
}

impl DeviceQuery for NvidiaSmi {
    fn query(&mut self) -> Result<Vec<DeviceRecord>, QueryError> {
        let output = Command::new(&self.program)
            .args(NVIDIA_SMI_ARGS)
            .output()
            .map_err(|source| QueryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(QueryError::Status {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        Ok(parse_csv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `index, name, temperature, utilization, memory.used, memory.total`
/// rows. Rows with the wrong field count, a non-integer field or a value out
/// of range are skipped.
pub fn parse_csv(text: &str) -> Vec<DeviceRecord> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let record = parse_row(line);
            if record.is_none() {
                log::debug!("skipping malformed device row: {line:?}");
            }
            record
        })
        .collect()
}

fn parse_row(line: &str) -> Option<DeviceRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELDS {
        return None;
    }
    let int = |s: &str, min: i64| {
        s.parse::<i64>()
            .ok()
            .filter(|v| (min..=MAX_FIELD).contains(v))
    };
    let index = int(fields[0], 0)?;
    Some(DeviceRecord {
        id: index.to_string(),
        name: fields[1].to_string(),
        kind: "GPU".to_string(),
        temperature_c: int(fields[2], MIN_TEMPERATURE)?,
        utilization: int(fields[3], 0)?,
        memory_used: int(fields[4], 0)?,
        memory_total: int(fields[5], 0)?,
    })
}
