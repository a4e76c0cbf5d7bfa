use pulsemon_common::types::{Aggregate, AlertEvent};
use pulsemon_monitor::{Result, SlidingWindowMonitor};
use std::fmt::Write;

/// Formats the monitor state as a plain-text panel: latest readings for
/// the configured metrics, fired alerts, and a mean/max summary over the
/// retained window.
pub struct Presenter {
    metrics: Vec<String>,
}

impl Presenter {
    pub fn new(metrics: Vec<String>) -> Self {
        Self { metrics }
    }

    pub fn render(&self, monitor: &SlidingWindowMonitor, alerts: &[AlertEvent]) -> Result<String> {
        let mut out = String::new();

        let Some(latest) = monitor.latest() else {
            out.push_str("no samples yet\n");
            return Ok(out);
        };

        let _ = writeln!(
            out,
            "-- system status @ {} ({} samples in window) --",
            latest.timestamp.format("%H:%M:%S"),
            monitor.len(),
        );
        for metric in &self.metrics {
            if let Some(value) = latest.value(metric) {
                let _ = writeln!(out, "  {metric:<14} {}", format_value(metric, value));
            }
        }

        if !alerts.is_empty() {
            out.push_str("alerts:\n");
            for event in alerts {
                let _ = writeln!(out, "  [{}] {}", event.severity, event.message);
            }
        }

        out.push_str("summary (mean / max):\n");
        for metric in &self.metrics {
            let mean = monitor.aggregate(metric, Aggregate::Mean)?;
            let max = monitor.aggregate(metric, Aggregate::Max)?;
            if let (Some(mean), Some(max)) = (mean, max) {
                let _ = writeln!(
                    out,
                    "  {metric:<14} {} / {}",
                    format_value(metric, mean),
                    format_value(metric, max),
                );
            }
        }

        Ok(out)
    }
}

/// Renders a value with its metric's natural unit.
fn format_value(metric: &str, value: f64) -> String {
    match metric {
        "cpu_usage" | "memory_usage" | "disk_usage" => format!("{value:.1}%"),
        "error_rate" => format!("{value:.2}%"),
        "network_in" | "network_out" => format!("{value:.1} Mbps"),
        "response_time" => format!("{value:.0}ms"),
        "active_users" => format!("{value:.0}"),
        _ => format!("{value:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pulsemon_common::types::Sample;

    fn seeded_monitor() -> SlidingWindowMonitor {
        let mut monitor = SlidingWindowMonitor::new(Duration::seconds(600)).unwrap();
        let mut sample = Sample::new(chrono::Utc::now());
        sample.metrics.insert("cpu_usage".to_string(), 42.5);
        sample.metrics.insert("response_time".to_string(), 123.4);
        monitor.ingest(sample);
        monitor
    }

    #[test]
    fn renders_latest_and_summary() {
        let monitor = seeded_monitor();
        let presenter = Presenter::new(vec![
            "cpu_usage".to_string(),
            "response_time".to_string(),
        ]);

        let text = presenter.render(&monitor, &[]).unwrap();
        assert!(text.contains("42.5%"));
        assert!(text.contains("123ms"));
        assert!(text.contains("summary"));
        assert!(!text.contains("alerts:"));
    }

    #[test]
    fn renders_alert_lines() {
        let monitor = seeded_monitor();
        let presenter = Presenter::new(vec!["cpu_usage".to_string()]);
        let rules = vec![pulsemon_common::types::AlertRule {
            name: "cpu-low".into(),
            metric: "cpu_usage".into(),
            op: pulsemon_common::types::CompareOp::LessThan,
            threshold: 50.0,
            severity: pulsemon_common::types::Severity::Info,
        }];
        let alerts = monitor.evaluate_alerts(&rules).unwrap();
        assert_eq!(alerts.len(), 1);

        let text = presenter.render(&monitor, &alerts).unwrap();
        assert!(text.contains("alerts:"));
        assert!(text.contains("[info]"));
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let monitor = SlidingWindowMonitor::new(Duration::seconds(600)).unwrap();
        let presenter = Presenter::new(vec!["cpu_usage".to_string()]);
        let text = presenter.render(&monitor, &[]).unwrap();
        assert!(text.contains("no samples yet"));
    }

    #[test]
    fn skips_metrics_missing_from_latest_sample() {
        let monitor = seeded_monitor();
        let presenter = Presenter::new(vec![
            "cpu_usage".to_string(),
            "memory_usage".to_string(),
        ]);
        let text = presenter.render(&monitor, &[]).unwrap();
        assert!(text.contains("cpu_usage"));
        assert!(!text.contains("memory_usage"));
    }
}
