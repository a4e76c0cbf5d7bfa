//! Sample generation for the pulsemon panel.
//!
//! A [`SampleSource`] produces one [`Sample`] per tick. The built-in
//! [`synthetic::SyntheticGenerator`] simulates a small production host
//! with occasional load spikes, seedable for reproducible runs.

pub mod synthetic;

use chrono::{DateTime, Utc};
use pulsemon_common::types::Sample;

/// A source of metric samples, driven by the panel's tick loop.
///
/// Implementations are called once per refresh interval with the tick
/// time; they must return timestamps that never decrease across calls.
pub trait SampleSource: Send {
    /// Source name, used for logging.
    fn name(&self) -> &str;

    /// Produces the sample for the tick at `now`.
    fn next_sample(&mut self, now: DateTime<Utc>) -> Sample;
}
