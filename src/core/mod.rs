//! Core functionality for the depth body tracking adapter.
//!
//! This module contains:
//! - The device/tracker lifecycle manager
//! - The per-tick frame pump
//! - Settings handling and the host-facing adapter

pub mod adapter;
pub mod error;
pub mod lifecycle;
pub mod pump;
pub mod settings;

// Re-export commonly used types
pub use adapter::{AdapterCapabilities, TrackingAdapter, CAPABILITIES, ERROR_DOCS_BASE};
pub use error::AdapterError;
pub use lifecycle::{DeviceLifecycleManager, LifecycleState};
pub use pump::{pump_frame, TickOutcome};
pub use settings::{settings_options, tracker_configuration, SettingChoice, SettingOption};
