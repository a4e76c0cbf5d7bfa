use chrono::{DateTime, Duration, Utc};
use pulsemon_common::types::Sample;
use std::collections::VecDeque;

/// Time-ordered sample buffer with trailing-window retention.
///
/// Samples are appended in ingestion order; `evict` drops every entry
/// older than `now - window`. Eviction scans the whole buffer rather than
/// only the front so that a stale out-of-order append is removed by the
/// same sweep instead of lingering at the back.
pub struct SlidingWindow {
    window: Duration,
    data: VecDeque<Sample>,
}

impl SlidingWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            data: VecDeque::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Updates the retention window. Takes effect on the next `evict`.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    pub fn push(&mut self, sample: Sample) {
        self.data.push_back(sample);
    }

    /// Removes every sample with `timestamp < now - window`.
    ///
    /// Returns the number of evicted samples.
    pub fn evict(&mut self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.window;
        let before = self.data.len();
        self.data.retain(|sample| sample.timestamp >= cutoff);
        before - self.data.len()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.data.back()
    }

    /// Snapshot copy of the retained samples in timestamp order.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.data.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
