use anyhow::Context;
use pulsemon_common::types::{is_known_metric, AlertRule, CompareOp, Severity};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PanelConfig {
    /// Trailing span of samples to retain, in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// When false the panel runs a single tick and exits.
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
    /// Seed for the synthetic generator; omit for a random run.
    pub seed: Option<u64>,
    /// Metrics shown by the presenter. Alerts may reference any metric.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RuleConfig {
    pub name: Option<String>,
    pub metric: String,
    pub op: CompareOp,
    pub threshold: f64,
    #[serde(default = "default_severity")]
    pub severity: Severity,
}

fn default_window_secs() -> u64 {
    600
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_auto_refresh() -> bool {
    true
}

fn default_metrics() -> Vec<String> {
    ["cpu_usage", "memory_usage", "network_in", "network_out", "disk_usage"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_severity() -> Severity {
    Severity::Warning
}

impl PanelConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.window_secs == 0 {
            anyhow::bail!("window_secs must be positive");
        }
        if self.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be positive");
        }
        for metric in &self.metrics {
            if !is_known_metric(metric) {
                anyhow::bail!("unknown metric in config: {metric}");
            }
        }
        for rule in &self.rules {
            if !is_known_metric(&rule.metric) {
                anyhow::bail!("alert rule references unknown metric: {}", rule.metric);
            }
        }
        Ok(())
    }

    /// Materializes the configured rules, defaulting each name from its
    /// metric and operator.
    pub fn alert_rules(&self) -> Vec<AlertRule> {
        self.rules
            .iter()
            .map(|rule| AlertRule {
                name: rule
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{}-{}", rule.metric, rule.op)),
                metric: rule.metric.clone(),
                op: rule.op,
                threshold: rule.threshold,
                severity: rule.severity,
            })
            .collect()
    }
}
