use chrono::{DateTime, Utc};

/// Time source used for retention sweeps.
///
/// The monitor captures `now()` once per sweep so every eviction decision
/// within one `ingest` call sees a consistent cutoff. Injecting the clock
/// keeps retention deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via [`Utc::now`]. The default for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
