use crate::SampleSource;
use chrono::{DateTime, Utc};
use pulsemon_common::types::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic metrics source simulating one host under variable load.
///
/// Each metric follows a base range with jitter; cpu, network, response
/// time, and error rate occasionally spike to exercise alert thresholds.
/// Construct with [`SyntheticGenerator::new`] and a seed for reproducible
/// sequences in tests.
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible generator seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Spike value with probability `num/denom`, otherwise zero.
    fn spike(&mut self, num: u32, denom: u32, lo: f64, hi: f64) -> f64 {
        if self.rng.gen_ratio(num, denom) {
            self.rng.gen_range(lo..hi)
        } else {
            0.0
        }
    }
}

impl SampleSource for SyntheticGenerator {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn next_sample(&mut self, now: DateTime<Utc>) -> Sample {
        let mut sample = Sample::new(now);

        let cpu_base = self.rng.gen_range(30.0..60.0);
        let cpu_spike = self.spike(1, 4, 20.0, 40.0);
        let cpu_jitter = self.rng.gen_range(-5.0..5.0);
        let cpu = (cpu_base + cpu_spike + cpu_jitter).clamp(0.0, 100.0);

        let memory = (self.rng.gen_range(40.0_f64..70.0) + self.rng.gen_range(-3.0..8.0))
            .clamp(0.0, 100.0);

        let network_in = self.rng.gen_range(10.0..200.0) + self.spike(1, 3, 100.0, 400.0);
        let network_out = self.rng.gen_range(5.0..150.0) + self.spike(1, 3, 50.0, 300.0);

        // Disk usage moves slowly relative to the rest.
        let disk = self.rng.gen_range(45.0..75.0) + self.rng.gen_range(-2.0..2.0);

        let response_time = self.rng.gen_range(50.0..200.0) + self.spike(1, 3, 200.0, 800.0);
        let active_users = self.rng.gen_range(100..=500) as f64;
        let error_rate = self.rng.gen_range(0.0..0.5) + self.spike(1, 4, 0.5, 3.0);

        sample.metrics.insert("cpu_usage".to_string(), cpu);
        sample.metrics.insert("memory_usage".to_string(), memory);
        sample.metrics.insert("network_in".to_string(), network_in);
        sample.metrics.insert("network_out".to_string(), network_out);
        sample.metrics.insert("disk_usage".to_string(), disk);
        sample
            .metrics
            .insert("response_time".to_string(), response_time);
        sample
            .metrics
            .insert("active_users".to_string(), active_users);
        sample.metrics.insert("error_rate".to_string(), error_rate);

        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsemon_common::types::{is_known_metric, METRIC_NAMES};

    #[test]
    fn produces_full_metric_catalog() {
        let mut gen = SyntheticGenerator::new(7);
        let sample = gen.next_sample(Utc::now());

        assert_eq!(sample.metrics.len(), METRIC_NAMES.len());
        for metric in sample.metrics.keys() {
            assert!(is_known_metric(metric), "unexpected metric {metric}");
        }
    }

    #[test]
    fn same_seed_yields_same_sequence() {
        let now = Utc::now();
        let mut a = SyntheticGenerator::new(42);
        let mut b = SyntheticGenerator::new(42);

        for _ in 0..10 {
            assert_eq!(a.next_sample(now).metrics, b.next_sample(now).metrics);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let now = Utc::now();
        let mut a = SyntheticGenerator::new(1);
        let mut b = SyntheticGenerator::new(2);
        assert_ne!(a.next_sample(now).metrics, b.next_sample(now).metrics);
    }

    #[test]
    fn values_stay_in_physical_ranges() {
        let now = Utc::now();
        let mut gen = SyntheticGenerator::new(3);

        for _ in 0..200 {
            let sample = gen.next_sample(now);
            let cpu = sample.value("cpu_usage").unwrap();
            assert!((0.0..=100.0).contains(&cpu), "cpu out of range: {cpu}");
            let memory = sample.value("memory_usage").unwrap();
            assert!((0.0..=100.0).contains(&memory), "memory out of range: {memory}");
            assert!(sample.value("network_in").unwrap() >= 0.0);
            assert!(sample.value("network_out").unwrap() >= 0.0);
            assert!(sample.value("response_time").unwrap() >= 0.0);
            assert!(sample.value("error_rate").unwrap() >= 0.0);
            let users = sample.value("active_users").unwrap();
            assert!((100.0..=500.0).contains(&users), "users out of range: {users}");
        }
    }

    #[test]
    fn timestamp_is_passed_through() {
        let now = Utc::now();
        let mut gen = SyntheticGenerator::new(9);
        assert_eq!(gen.next_sample(now).timestamp, now);
    }
}
