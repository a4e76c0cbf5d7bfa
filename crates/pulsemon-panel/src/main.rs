mod config;
mod presenter;

use anyhow::Result;
use chrono::{Duration, Utc};
use pulsemon_common::types::AlertRule;
use pulsemon_generator::synthetic::SyntheticGenerator;
use pulsemon_generator::SampleSource;
use pulsemon_monitor::SlidingWindowMonitor;
use tokio::signal;
use tokio::time::interval;
use tracing_subscriber::EnvFilter;

fn tick(
    monitor: &mut SlidingWindowMonitor,
    source: &mut dyn SampleSource,
    rules: &[AlertRule],
    presenter: &presenter::Presenter,
) -> Result<()> {
    let sample = source.next_sample(Utc::now());
    monitor.ingest(sample);

    let alerts = monitor.evaluate_alerts(rules)?;
    for event in &alerts {
        tracing::warn!(
            rule = %event.rule_name,
            metric = %event.metric,
            value = event.value,
            threshold = event.threshold,
            severity = %event.severity,
            "alert fired"
        );
    }

    print!("{}", presenter.render(monitor, &alerts)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pulsemon=info".parse()?))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/panel.toml".to_string());

    let config = config::PanelConfig::load(&config_path)?;
    let rules = config.alert_rules();

    let mut monitor = SlidingWindowMonitor::new(Duration::seconds(config.window_secs as i64))?;
    let mut source = match config.seed {
        Some(seed) => SyntheticGenerator::new(seed),
        None => SyntheticGenerator::from_entropy(),
    };
    let presenter = presenter::Presenter::new(config.metrics.clone());

    tracing::info!(
        window_secs = config.window_secs,
        refresh_secs = config.refresh_interval_secs,
        rules = rules.len(),
        source = source.name(),
        "pulsemon-panel starting"
    );

    if !config.auto_refresh {
        tick(&mut monitor, &mut source, &rules, &presenter)?;
        return Ok(());
    }

    let mut ticker = interval(std::time::Duration::from_secs(config.refresh_interval_secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick(&mut monitor, &mut source, &rules, &presenter)?;
            }
            _ = signal::ctrl_c() => {
                tracing::info!("Shutting down gracefully");
                break;
            }
        }
    }

    Ok(())
}
