//! Bounded per-device history of averaged samples.

use std::collections::VecDeque;

use crate::sample::Sample;

/// FIFO of averaged samples, oldest first.
///
/// The history does not own a capacity. Callers pass the current chart width
/// on every push: a narrower terminal truncates the oldest entries on the next
/// push, a wider one lets more accumulate without backfilling anything.
#[derive(Debug, Clone, Default)]
pub struct History {
    samples: VecDeque<Sample>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `sample`, then evict from the front until at most `capacity` remain.
    pub fn add_sample(&mut self, sample: Sample, capacity: usize) {
        self.samples.push_back(sample);
        while self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    /// Samples oldest to newest, i.e. chart columns left to right.
    pub fn samples(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(u: i64) -> Sample {
        Sample::new(u, u)
    }

    #[test]
    fn length_is_min_of_pushes_and_capacity() {
        for capacity in [1usize, 3, 10] {
            let mut h = History::new();
            for pushes in 1..=15 {
                h.add_sample(s(pushes as i64), capacity);
                assert_eq!(h.len(), pushes.min(capacity));
            }
        }
    }

    #[test]
    fn keeps_newest_in_order() {
        let mut h = History::new();
        for u in 0..6 {
            h.add_sample(s(u), 4);
        }
        let utils: Vec<i64> = h.samples().iter().map(|x| x.utilization).collect();
        assert_eq!(utils, vec![2, 3, 4, 5]);
    }

    #[test]
    fn shrink_truncates_on_next_push() {
        let mut h = History::new();
        for u in 0..8 {
            h.add_sample(s(u), 8);
        }
        h.add_sample(s(8), 3);
        let utils: Vec<i64> = h.samples().iter().map(|x| x.utilization).collect();
        assert_eq!(utils, vec![6, 7, 8]);
    }

    #[test]
    fn grow_does_not_restore_evicted() {
        let mut h = History::new();
        for u in 0..5 {
            h.add_sample(s(u), 2);
        }
        h.add_sample(s(5), 10);
        let utils: Vec<i64> = h.samples().iter().map(|x| x.utilization).collect();
        assert_eq!(utils, vec![3, 4, 5]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut h = History::new();
        h.add_sample(s(50), 0);
        assert!(h.is_empty());
    }
}
