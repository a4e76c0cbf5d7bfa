use crate::clock::{Clock, SystemClock};
use crate::error::{MonitorError, Result};
use crate::window::SlidingWindow;
use chrono::Duration;
use pulsemon_common::types::{is_known_metric, Aggregate, AlertEvent, AlertRule, Sample};

/// Bounded sliding-window history of metric samples with rolling
/// aggregates and threshold alerting.
///
/// The monitor assumes exclusive single-writer access: one logical caller
/// invokes [`ingest`](Self::ingest) with timestamp-non-decreasing samples.
/// Readers that need isolation from a concurrent sweep should take a
/// [`current_samples`](Self::current_samples) snapshot. All operations are
/// synchronous and in-memory; none can block or fail asynchronously.
pub struct SlidingWindowMonitor {
    history: SlidingWindow,
    clock: Box<dyn Clock>,
}

impl SlidingWindowMonitor {
    /// Creates an empty monitor retaining `window` of trailing samples,
    /// reading time from the system clock.
    pub fn new(window: Duration) -> Result<Self> {
        Self::with_clock(window, Box::new(SystemClock))
    }

    /// Creates an empty monitor with an injected time source.
    pub fn with_clock(window: Duration, clock: Box<dyn Clock>) -> Result<Self> {
        validate_window(window)?;
        Ok(Self {
            history: SlidingWindow::new(window),
            clock,
        })
    }

    /// Appends `sample` to the history, then runs the retention sweep.
    ///
    /// `now` is captured once per call so the whole sweep sees one cutoff.
    /// A sample older than the window is appended and then removed by the
    /// same sweep; stale or out-of-order input is normalized this way, not
    /// reported as an error.
    pub fn ingest(&mut self, sample: Sample) {
        self.history.push(sample);
        let evicted = self.history.evict(self.clock.now());
        if evicted > 0 {
            tracing::debug!(evicted, retained = self.history.len(), "retention sweep");
        }
    }

    /// Updates the retention window used by subsequent sweeps.
    ///
    /// Pruning is lazy: samples that are stale under the new window are
    /// dropped by the next `ingest`, not immediately.
    pub fn set_window_duration(&mut self, window: Duration) -> Result<()> {
        validate_window(window)?;
        self.history.set_window(window);
        Ok(())
    }

    pub fn window_duration(&self) -> Duration {
        self.history.window()
    }

    /// Snapshot of the retained history in timestamp order.
    pub fn current_samples(&self) -> Vec<Sample> {
        self.history.snapshot()
    }

    /// The most recently ingested sample still within the window.
    pub fn latest(&self) -> Option<&Sample> {
        self.history.latest()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Discards all retained samples. The window duration is kept.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Computes `op` over all retained values of `metric`.
    ///
    /// Returns `Ok(None)` when the history holds no value for the metric
    /// (empty history, or a catalog metric not carried by any retained
    /// sample). The mean is the plain arithmetic mean, not weighted by
    /// recency.
    ///
    /// # Errors
    ///
    /// [`MonitorError::UnknownMetric`] if `metric` is outside the metric
    /// catalog.
    pub fn aggregate(&self, metric: &str, op: Aggregate) -> Result<Option<f64>> {
        if !is_known_metric(metric) {
            return Err(MonitorError::UnknownMetric {
                metric: metric.to_string(),
            });
        }

        let values: Vec<f64> = self
            .history
            .iter()
            .filter_map(|sample| sample.value(metric))
            .collect();

        if values.is_empty() {
            return Ok(None);
        }

        let result = match op {
            Aggregate::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        };
        Ok(Some(result))
    }

    /// Evaluates `rules` in order against the latest sample.
    ///
    /// Output order matches input rule order; severity is passed through
    /// from the rule unchanged. An empty history yields an empty result,
    /// since no rule can fire without a current sample.
    ///
    /// # Errors
    ///
    /// [`MonitorError::UnknownMetric`] if a rule references a metric the
    /// latest sample does not carry.
    pub fn evaluate_alerts(&self, rules: &[AlertRule]) -> Result<Vec<AlertEvent>> {
        let Some(latest) = self.history.latest() else {
            return Ok(Vec::new());
        };

        let mut events = Vec::new();
        for rule in rules {
            let value = latest
                .value(&rule.metric)
                .ok_or_else(|| MonitorError::UnknownMetric {
                    metric: rule.metric.clone(),
                })?;

            if rule.op.check(value, rule.threshold) {
                events.push(AlertEvent {
                    rule_name: rule.name.clone(),
                    metric: rule.metric.clone(),
                    value,
                    threshold: rule.threshold,
                    severity: rule.severity,
                    message: format!(
                        "{} is {} {:.1} (current {:.1})",
                        rule.metric,
                        rule.op.describe(),
                        rule.threshold,
                        value,
                    ),
                    timestamp: latest.timestamp,
                });
            }
        }
        Ok(events)
    }
}

fn validate_window(window: Duration) -> Result<()> {
    if window <= Duration::zero() {
        return Err(MonitorError::InvalidWindow {
            secs: window.num_seconds(),
        });
    }
    Ok(())
}
