//! Per-device state that lives across polls.
//!
//! The registry is owned by the dashboard and passed by `&mut` into each loop
//! iteration. Aggregators and histories are keyed by [`DeviceRecord::id`] and
//! created on first use through [`DeviceRegistry::aggregator_mut`] and
//! [`DeviceRegistry::history_mut`].

use std::collections::HashMap;

use crate::device::DeviceRecord;
use crate::history::History;
use crate::sample::{Sample, SampleAggregator};

#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<DeviceRecord>,
    aggregators: HashMap<String, SampleAggregator>,
    histories: HashMap<String, History>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devices from the most recent successful poll, in poll order.
    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    /// Get-or-create the aggregator for `id`.
    pub fn aggregator_mut(&mut self, id: &str) -> &mut SampleAggregator {
        self.aggregators.entry(id.to_string()).or_default()
    }

    /// Get-or-create the history for `id`.
    pub fn history_mut(&mut self, id: &str) -> &mut History {
        self.histories.entry(id.to_string()).or_default()
    }

    pub fn history(&self, id: &str) -> Option<&History> {
        self.histories.get(id)
    }

    /// Chart columns for `id`, oldest first. Unknown ids have no columns.
    pub fn samples_for(&self, id: &str) -> Vec<Sample> {
        self.histories
            .get(id)
            .map(History::samples)
            .unwrap_or_default()
    }

    /// Store a successful poll and buffer one raw sample per device.
    ///
    /// State for ids missing from this poll is dropped.
    pub fn record_poll(&mut self, records: Vec<DeviceRecord>) {
        for record in &records {
            let sample = record.sample();
            self.aggregator_mut(&record.id).add(sample);
        }
        self.devices = records;
        self.prune_stale();
    }

    /// Forget the device list after a failed poll. Histories are kept so a
    /// transient failure does not wipe the charts.
    pub fn clear_devices(&mut self) {
        self.devices.clear();
    }

    /// Average each current device's buffer into its history.
    ///
    /// Devices with nothing buffered since the last call are skipped.
    pub fn advance_histories(&mut self, capacity: usize) {
        let ids: Vec<String> = self.devices.iter().map(|d| d.id.clone()).collect();
        for id in ids {
            let Some(average) = self.aggregator_mut(&id).drain_average() else {
                log::debug!("device {id}: no samples since last render");
                continue;
            };
            self.history_mut(&id).add_sample(average, capacity);
        }
    }

    /// Drop aggregators and histories whose id is not in the current device list.
    pub fn prune_stale(&mut self) {
        let devices = &self.devices;
        let live = |id: &String| devices.iter().any(|d| &d.id == id);
        let before = self.aggregators.len() + self.histories.len();
        self.aggregators.retain(|id, _| live(id));
        self.histories.retain(|id, _| live(id));
        let dropped = before - (self.aggregators.len() + self.histories.len());
        if dropped > 0 {
            log::debug!("pruned {dropped} stale device entries");
        }
    }

    /// Number of ids with live per-device state.
    pub fn tracked(&self) -> usize {
        self.aggregators.len().max(self.histories.len())
    }
}
