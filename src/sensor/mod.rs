//! Sensor access for the body tracking adapter.
//!
//! The vendor SDK sits behind three traits: a [`SensorBackend`] opens devices and
//! creates trackers, a [`SensorDevice`] streams captures and a [`BodyTracker`]
//! turns captures into tracking results. Handles are released by dropping them.

pub mod types;

pub mod noop;

#[cfg(feature = "simulator")]
pub mod simulated;

use std::time::Duration;

// Re-export commonly used types
pub use types::{
    Body, Calibration, Capture, DeviceConfiguration, JointConfidenceLevel, ProcessingMode,
    SensorError, SensorJoint, SensorJointId, SensorOrientation, Skeleton, TrackerConfiguration,
    TrackingFrame, SENSOR_JOINT_COUNT,
};

pub use noop::NoopBackend;

#[cfg(feature = "simulator")]
pub use simulated::{SimulatedBackend, SimulatedProbe, SimulatedScene, Stage};

/// An open sensor device.
pub trait SensorDevice {
    /// Start the camera stream with the given configuration.
    fn start_cameras(&mut self, config: &DeviceConfiguration) -> Result<(), SensorError>;

    /// Stop the camera stream. Stopping a stopped device is not an error.
    fn stop_cameras(&mut self) -> Result<(), SensorError>;

    /// Read the calibration for the running stream.
    fn calibration(&self) -> Result<Calibration, SensorError>;

    /// Get the next capture, blocking up to the device's own timeout.
    fn get_capture(&mut self) -> Result<Capture, SensorError>;

    /// Device serial number.
    fn serial_number(&self) -> String;
}

/// A running body tracking engine.
pub trait BodyTracker {
    /// Queue a capture for processing.
    fn enqueue_capture(&mut self, capture: &Capture) -> Result<(), SensorError>;

    /// Pop the next finished result, waiting at most `timeout`.
    ///
    /// `Ok(None)` means no result was ready in time.
    fn pop_result(&mut self, timeout: Duration) -> Result<Option<TrackingFrame>, SensorError>;

    /// Stop processing. Queued captures are discarded.
    fn shutdown(&mut self) -> Result<(), SensorError>;
}

/// Entry point into a sensor SDK.
pub trait SensorBackend {
    type Device: SensorDevice;
    type Tracker: BodyTracker;

    /// Number of attached devices.
    fn device_count(&self) -> u32;

    /// Open the device at `index`.
    fn open(&self, index: u32) -> Result<Self::Device, SensorError>;

    /// Create a tracker bound to a device calibration.
    fn create_tracker(
        &self,
        calibration: &Calibration,
        config: &TrackerConfiguration,
    ) -> Result<Self::Tracker, SensorError>;
}
