//! Diagnostics for the depth body tracking adapter.
//!
//! Exposes counters describing what the frame pump did, so tracking problems
//! can be told apart without a debugger attached.

pub mod stats;

// Re-export commonly used types
pub use stats::{PumpStats, PumpStatsSnapshot};
