//! Device and tracker lifecycle.
//!
//! The manager is the only owner of the device and tracker handles. Handles are
//! released by dropping them, so anything opened along a failed path is gone by
//! the time `initialize` returns.

use crate::core::error::AdapterError;
use crate::core::pump::{pump_frame, TickOutcome};
use crate::diagnostics::PumpStats;
use crate::joints::TrackedJointStore;
use crate::sensor::{
    BodyTracker, DeviceConfiguration, SensorBackend, SensorDevice, TrackerConfiguration,
};
use tracing::debug;

/// Index of the device the adapter opens.
const DEVICE_INDEX: u32 = 0;

/// Lifecycle state of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Opening,
    Streaming,
    Failed,
    ShutDown,
}

/// Owns the device and tracker handles and moves them through their states.
pub struct DeviceLifecycleManager<B: SensorBackend> {
    backend: B,
    device: Option<B::Device>,
    tracker: Option<B::Tracker>,
    state: LifecycleState,
}

impl<B: SensorBackend> DeviceLifecycleManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            device: None,
            tracker: None,
            state: LifecycleState::Uninitialized,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether any handle is currently held.
    pub fn has_handles(&self) -> bool {
        self.device.is_some() || self.tracker.is_some()
    }

    /// 0 when a device handle is present, 1 otherwise.
    pub fn device_status(&self) -> i32 {
        if self.device.is_some() {
            0
        } else {
            1
        }
    }

    /// Serial number of the open device.
    pub fn serial_number(&self) -> Option<String> {
        self.device.as_ref().map(|d| d.serial_number())
    }

    /// Open the device, start the depth stream and create the tracker.
    ///
    /// Succeeds only if all three steps succeed. On failure nothing stays open.
    pub fn initialize(&mut self, config: &TrackerConfiguration) -> Result<(), AdapterError> {
        // A previous session is torn down before reopening
        if let Err(e) = self.shutdown() {
            debug!(error = %e, "releasing previous session");
        }
        self.state = LifecycleState::Opening;

        match self.open(config) {
            Ok((device, tracker)) => {
                debug!(serial = %device.serial_number(), ?config, "sensor streaming");
                self.device = Some(device);
                self.tracker = Some(tracker);
                self.state = LifecycleState::Streaming;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "sensor initialization failed");
                self.state = LifecycleState::Failed;
                Err(e)
            }
        }
    }

    fn open(
        &self,
        config: &TrackerConfiguration,
    ) -> Result<(B::Device, B::Tracker), AdapterError> {
        let mut device = self
            .backend
            .open(DEVICE_INDEX)
            .map_err(AdapterError::DeviceOpen)?;

        device
            .start_cameras(&DeviceConfiguration::body_tracking())
            .map_err(AdapterError::StreamStart)?;

        let tracker = device
            .calibration()
            .and_then(|calibration| self.backend.create_tracker(&calibration, config));

        match tracker {
            Ok(tracker) => Ok((device, tracker)),
            Err(e) => {
                if let Err(stop) = device.stop_cameras() {
                    debug!(error = %stop, "stopping cameras after tracker failure");
                }
                Err(AdapterError::TrackerCreate(e))
            }
        }
    }

    /// Stop the tracker and the cameras and release both handles.
    ///
    /// Every step is attempted even if an earlier one fails. Safe to call in
    /// any state, any number of times.
    pub fn shutdown(&mut self) -> Result<(), AdapterError> {
        let mut errors = Vec::new();

        if let Some(tracker) = self.tracker.as_mut() {
            if let Err(e) = tracker.shutdown() {
                errors.push(e);
            }
        }
        if let Some(device) = self.device.as_mut() {
            if let Err(e) = device.stop_cameras() {
                errors.push(e);
            }
        }

        let had_handles = self.has_handles();
        self.tracker = None;
        self.device = None;
        if had_handles || self.state != LifecycleState::Uninitialized {
            self.state = LifecycleState::ShutDown;
        }
        debug!(had_handles, failures = errors.len(), "sensor shut down");

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AdapterError::Shutdown(errors))
        }
    }

    /// Pump one frame into `store`. Without both handles this does nothing.
    pub fn pump(
        &mut self,
        store: &mut TrackedJointStore,
        stats: &PumpStats,
    ) -> Result<TickOutcome, AdapterError> {
        let (Some(device), Some(tracker)) = (self.device.as_mut(), self.tracker.as_mut()) else {
            return Ok(TickOutcome::Idle);
        };
        pump_frame(device, tracker, store, stats).map_err(AdapterError::FrameAcquisition)
    }
}
