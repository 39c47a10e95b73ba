//! Noop sensor backend.
//!
//! This exists so the crate (and binary) build and run without a sensor driver
//! linked in. It reports no attached devices, so initialization fails cleanly.

use crate::sensor::types::{
    Calibration, Capture, DeviceConfiguration, SensorError, TrackerConfiguration, TrackingFrame,
};
use crate::sensor::{BodyTracker, SensorBackend, SensorDevice};
use std::time::Duration;

/// A backend with no devices attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBackend;

impl NoopBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Device type of [`NoopBackend`]. Never constructed.
#[derive(Debug)]
pub enum NoopDevice {}

/// Tracker type of [`NoopBackend`]. Never constructed.
#[derive(Debug)]
pub enum NoopTracker {}

impl SensorBackend for NoopBackend {
    type Device = NoopDevice;
    type Tracker = NoopTracker;

    fn device_count(&self) -> u32 {
        0
    }

    fn open(&self, index: u32) -> Result<Self::Device, SensorError> {
        Err(SensorError::DeviceNotFound { index })
    }

    fn create_tracker(
        &self,
        _calibration: &Calibration,
        _config: &TrackerConfiguration,
    ) -> Result<Self::Tracker, SensorError> {
        Err(SensorError::TrackerUnavailable(
            "no body tracking runtime".to_string(),
        ))
    }
}

impl SensorDevice for NoopDevice {
    fn start_cameras(&mut self, _config: &DeviceConfiguration) -> Result<(), SensorError> {
        match *self {}
    }

    fn stop_cameras(&mut self) -> Result<(), SensorError> {
        match *self {}
    }

    fn calibration(&self) -> Result<Calibration, SensorError> {
        match *self {}
    }

    fn get_capture(&mut self) -> Result<Capture, SensorError> {
        match *self {}
    }

    fn serial_number(&self) -> String {
        match *self {}
    }
}

impl BodyTracker for NoopTracker {
    fn enqueue_capture(&mut self, _capture: &Capture) -> Result<(), SensorError> {
        match *self {}
    }

    fn pop_result(&mut self, _timeout: Duration) -> Result<Option<TrackingFrame>, SensorError> {
        match *self {}
    }

    fn shutdown(&mut self) -> Result<(), SensorError> {
        match *self {}
    }
}
