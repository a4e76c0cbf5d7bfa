use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed catalog of metric names produced by the sample generator.
///
/// Percentages are 0-100, network throughput is Mbps, response time is
/// milliseconds, active users is a plain count.
pub const METRIC_NAMES: [&str; 8] = [
    "cpu_usage",
    "memory_usage",
    "network_in",
    "network_out",
    "disk_usage",
    "response_time",
    "active_users",
    "error_rate",
];

/// Returns true if `name` is part of the metric catalog.
///
/// # Examples
///
/// ```
/// use pulsemon_common::types::is_known_metric;
///
/// assert!(is_known_metric("cpu_usage"));
/// assert!(!is_known_metric("gpu_usage"));
/// ```
pub fn is_known_metric(name: &str) -> bool {
    METRIC_NAMES.contains(&name)
}

/// One timestamped set of metric readings.
///
/// Timestamps are monotonically non-decreasing across successive samples
/// from one generator; values are stored uniformly as `f64` regardless of
/// the metric's natural unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub metrics: HashMap<String, f64>,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            metrics: HashMap::new(),
        }
    }

    /// Returns the reading for `metric`, if this sample carries one.
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }
}

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use pulsemon_common::types::Severity;
///
/// let sev: Severity = "warning".parse().unwrap();
/// assert_eq!(sev, Severity::Warning);
/// assert!(Severity::Critical > Severity::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// Comparison direction for a threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
}

impl CompareOp {
    /// Applies the comparison with the observed value on the left.
    pub fn check(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
            Self::GreaterEqual => value >= threshold,
            Self::LessEqual => value <= threshold,
        }
    }

    /// Short English phrasing used in alert messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::GreaterThan => "above",
            Self::LessThan => "below",
            Self::GreaterEqual => "at or above",
            Self::LessEqual => "at or below",
        }
    }
}

impl std::str::FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greater_than" | "gt" => Ok(Self::GreaterThan),
            "less_than" | "lt" => Ok(Self::LessThan),
            "greater_equal" | "gte" => Ok(Self::GreaterEqual),
            "less_equal" | "lte" => Ok(Self::LessEqual),
            _ => Err(format!("unknown compare operator: {s}")),
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GreaterThan => write!(f, "greater_than"),
            Self::LessThan => write!(f, "less_than"),
            Self::GreaterEqual => write!(f, "greater_equal"),
            Self::LessEqual => write!(f, "less_equal"),
        }
    }
}

/// A configured threshold condition on one metric.
///
/// Rules are owned by the panel configuration and evaluated against the
/// latest retained sample only; the monitor never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub name: String,
    pub metric: String,
    pub op: CompareOp,
    pub threshold: f64,
    pub severity: Severity,
}

/// A fired rule's observed value, threshold, and severity.
///
/// Produced transiently each time alerts are evaluated; never persisted
/// across ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub rule_name: String,
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Rolling aggregate operation over the retained window.
///
/// # Examples
///
/// ```
/// use pulsemon_common::types::Aggregate;
///
/// let op: Aggregate = "mean".parse().unwrap();
/// assert_eq!(op, Aggregate::Mean);
/// assert_eq!(op.to_string(), "mean");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Mean,
    Max,
    Min,
}

impl std::fmt::Display for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregate::Mean => write!(f, "mean"),
            Aggregate::Max => write!(f, "max"),
            Aggregate::Min => write!(f, "min"),
        }
    }
}

impl std::str::FromStr for Aggregate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" | "avg" => Ok(Aggregate::Mean),
            "max" => Ok(Aggregate::Max),
            "min" => Ok(Aggregate::Min),
            _ => Err(format!("unknown aggregate: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_op_truth_table() {
        assert!(CompareOp::GreaterThan.check(85.0, 80.0));
        assert!(!CompareOp::GreaterThan.check(80.0, 80.0));
        assert!(CompareOp::GreaterEqual.check(80.0, 80.0));
        assert!(CompareOp::LessThan.check(1.0, 2.0));
        assert!(!CompareOp::LessThan.check(2.0, 2.0));
        assert!(CompareOp::LessEqual.check(2.0, 2.0));
    }

    #[test]
    fn compare_op_parse_accepts_short_forms() {
        assert_eq!("gt".parse::<CompareOp>().unwrap(), CompareOp::GreaterThan);
        assert_eq!("lte".parse::<CompareOp>().unwrap(), CompareOp::LessEqual);
        assert!("between".parse::<CompareOp>().is_err());
    }

    #[test]
    fn compare_op_serde_uses_snake_case() {
        let rule = AlertRule {
            name: "cpu-high".into(),
            metric: "cpu_usage".into(),
            op: CompareOp::GreaterEqual,
            threshold: 80.0,
            severity: Severity::Warning,
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"greater_equal\""));
        assert!(json.contains("\"warning\""));
        let back: AlertRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.op, CompareOp::GreaterEqual);
    }

    #[test]
    fn metric_catalog_lookup() {
        for name in METRIC_NAMES {
            assert!(is_known_metric(name));
        }
        assert!(!is_known_metric("nonexistent_metric"));
    }

    #[test]
    fn sample_value_lookup() {
        let mut sample = Sample::new(Utc::now());
        sample.metrics.insert("cpu_usage".to_string(), 42.5);
        assert_eq!(sample.value("cpu_usage"), Some(42.5));
        assert_eq!(sample.value("memory_usage"), None);
    }
}
