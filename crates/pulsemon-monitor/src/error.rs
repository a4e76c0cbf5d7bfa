/// Errors surfaced by the monitor core.
///
/// Both variants are synchronous validation failures reported directly to
/// the caller; nothing is retried and no failure happens asynchronously.
///
/// # Examples
///
/// ```rust
/// use pulsemon_monitor::error::MonitorError;
///
/// let err = MonitorError::UnknownMetric {
///     metric: "gpu_usage".to_string(),
/// };
/// assert!(err.to_string().contains("gpu_usage"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// An aggregate query or alert rule referenced a metric that is not
    /// present in the data.
    #[error("Monitor: unknown metric '{metric}'")]
    UnknownMetric { metric: String },

    /// The requested retention window is not a positive duration.
    #[error("Monitor: window duration must be positive (got {secs}s)")]
    InvalidWindow { secs: i64 },
}

/// Convenience `Result` alias for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
