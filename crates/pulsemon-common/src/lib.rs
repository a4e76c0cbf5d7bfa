//! Shared types for the pulsemon monitoring panel.
//!
//! Defines the metric sample model, the fixed metric catalog, and the
//! alert rule/event types exchanged between the generator, the monitor
//! core, and the panel driver.

pub mod types;
