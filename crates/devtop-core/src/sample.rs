//! Samples and the per-device buffer that smooths them between renders.

/// One (utilization, memory) observation for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    /// Utilization percent, 0–100.
    pub utilization: i64,
    /// Memory use percent. May exceed 100 if the device reports it that way.
    pub memory_percent: i64,
}

impl Sample {
    pub fn new(utilization: i64, memory_percent: i64) -> Self {
        Self {
            utilization,
            memory_percent,
        }
    }
}

/// Raw samples collected for one device since the last render.
#[derive(Debug, Clone, Default)]
pub struct SampleAggregator {
    buffer: Vec<Sample>,
}

impl SampleAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sample: Sample) {
        self.buffer.push(sample);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Average the buffered samples and clear the buffer.
    ///
    /// Both fields use truncating integer division: `[{1,1},{2,2}]` averages
    /// to `{1,1}`. Returns `None` when nothing was buffered since the last
    /// drain.
    pub fn drain_average(&mut self) -> Option<Sample> {
        if self.buffer.is_empty() {
            return None;
        }
        let n = self.buffer.len() as i64;
        let util_sum = self
            .buffer
            .iter()
            .fold(0i64, |acc, s| acc.saturating_add(s.utilization));
        let mem_sum = self
            .buffer
            .iter()
            .fold(0i64, |acc, s| acc.saturating_add(s.memory_percent));
        self.buffer.clear();
        Some(Sample::new(util_sum / n, mem_sum / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(samples: &[(i64, i64)]) -> SampleAggregator {
        let mut agg = SampleAggregator::new();
        for &(u, m) in samples {
            agg.add(Sample::new(u, m));
        }
        agg
    }

    #[test]
    fn drain_average_is_mean() {
        let mut agg = aggregate(&[(20, 50), (40, 50)]);
        assert_eq!(agg.drain_average(), Some(Sample::new(30, 50)));
    }

    #[test]
    fn drain_average_truncates() {
        let mut agg = aggregate(&[(1, 1), (2, 2)]);
        assert_eq!(agg.drain_average(), Some(Sample::new(1, 1)));

        let mut agg = aggregate(&[(99, 10), (100, 11), (100, 11)]);
        assert_eq!(agg.drain_average(), Some(Sample::new(99, 10)));
    }

    #[test]
    fn drain_clears_buffer() {
        let mut agg = aggregate(&[(10, 10), (20, 20)]);
        assert_eq!(agg.len(), 2);
        agg.drain_average();
        assert!(agg.is_empty());
        assert_eq!(agg.drain_average(), None);
    }

    #[test]
    fn drain_empty_is_none() {
        assert_eq!(SampleAggregator::new().drain_average(), None);
    }

    #[test]
    fn drain_average_saturates_instead_of_wrapping() {
        let mut agg = aggregate(&[(i64::MAX, 0), (i64::MAX, 0)]);
        assert_eq!(agg.drain_average(), Some(Sample::new(i64::MAX / 2, 0)));
    }

    #[test]
    fn single_sample_passes_through() {
        let mut agg = aggregate(&[(73, 120)]);
        assert_eq!(agg.drain_average(), Some(Sample::new(73, 120)));
    }
}
