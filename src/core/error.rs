//! Adapter error type.

use crate::sensor::SensorError;

/// Errors surfaced by the adapter. None of them is ever thrown past the host
/// boundary; they come back as status values and are logged through the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// No device found, or opening it failed
    DeviceOpen(SensorError),
    /// The camera configuration was rejected
    StreamStart(SensorError),
    /// The tracking engine could not bind to the device calibration
    TrackerCreate(SensorError),
    /// Capture or result retrieval failed during an update tick
    FrameAcquisition(SensorError),
    /// Teardown steps that failed; teardown still completed
    Shutdown(Vec<SensorError>),
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterError::DeviceOpen(_) => write!(f, "Failed to open the sensor"),
            AdapterError::StreamStart(_) => write!(f, "Failed to start the camera stream"),
            AdapterError::TrackerCreate(_) => write!(f, "Failed to create the body tracker"),
            AdapterError::FrameAcquisition(_) => write!(f, "Failed to acquire a tracking frame"),
            AdapterError::Shutdown(errors) => {
                write!(f, "Shutdown finished with {} error(s)", errors.len())
            }
        }
    }
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdapterError::DeviceOpen(e)
            | AdapterError::StreamStart(e)
            | AdapterError::TrackerCreate(e)
            | AdapterError::FrameAcquisition(e) => Some(e),
            AdapterError::Shutdown(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
        }
    }
}
