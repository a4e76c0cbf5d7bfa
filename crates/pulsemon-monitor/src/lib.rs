//! Sliding-window monitoring core.
//!
//! [`monitor::SlidingWindowMonitor`] owns a bounded, time-windowed history
//! of metric samples, computes rolling aggregates over it, and evaluates
//! threshold alert rules against the latest sample. It is synchronous and
//! single-writer; the enclosing tick loop calls [`monitor::SlidingWindowMonitor::ingest`]
//! once per refresh and then reads aggregates and alerts for rendering.
//!
//! Time is read through the [`clock::Clock`] trait so retention behavior
//! can be tested without wall-clock dependencies.

pub mod clock;
pub mod error;
pub mod monitor;
pub mod window;


pub use error::{MonitorError, Result};
pub use monitor::SlidingWindowMonitor;
