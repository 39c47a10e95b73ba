//! Depth Body Adapter - a depth-camera body tracker as a generic skeleton source.
//!
//! This library opens a depth sensor and its body tracking engine, pumps one
//! frame per host tick and maps the sensor skeleton onto a fixed generic joint
//! schema that a host application polls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        TrackingAdapter                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────────┐     │
//! │  │  Lifecycle  │──▶│ Frame Pump  │──▶│  Joint Mapping  │     │
//! │  │ (dev+track) │   │ (1 / tick)  │   │ (sensor→generic)│     │
//! │  └─────────────┘   └─────────────┘   └─────────────────┘     │
//! │         │                 │                   │              │
//! │         ▼                 ▼                   ▼              │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────────┐     │
//! │  │   Sensor    │   │ Pump Stats  │   │   Joint Store   │     │
//! │  │  Backend    │   │             │   │  (host reads)   │     │
//! │  └─────────────┘   └─────────────┘   └─────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use depth_body_adapter::{host::MemoryHost, sensor::NoopBackend, TrackingAdapter};
//!
//! let mut adapter = TrackingAdapter::new(NoopBackend::new(), MemoryHost::new());
//! adapter.on_load();
//!
//! if adapter.initialize().is_ok() {
//!     adapter.update();
//! }
//! println!("{}", adapter.device_status_string());
//! adapter.shutdown();
//! ```

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod host;
pub mod joints;
pub mod math;
pub mod sensor;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use self::core::{
    AdapterCapabilities, AdapterError, DeviceLifecycleManager, LifecycleState, TickOutcome,
    TrackingAdapter, CAPABILITIES,
};
pub use diagnostics::{PumpStats, PumpStatsSnapshot};
pub use host::{ConsoleHost, Host, LogSeverity, MemoryHost, SettingsStore};
pub use joints::{
    TrackedJoint, TrackedJointState, TrackedJointStore, TrackedJointType, JOINT_MAPPING,
};
pub use math::{Quaternion, Vector3};
pub use sensor::{BodyTracker, SensorBackend, SensorDevice, SensorError};

#[cfg(feature = "simulator")]
pub use sensor::{SimulatedBackend, SimulatedProbe, SimulatedScene};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
