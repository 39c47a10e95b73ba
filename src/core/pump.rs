//! Per-tick frame pump.
//!
//! One call acquires one capture, hands it to the tracker and polls the tracker
//! without waiting. The capture acquisition is the only call that may block.

use crate::core::error::AdapterError;
use crate::diagnostics::PumpStats;
use crate::joints::TrackedJointStore;
use crate::sensor::{BodyTracker, SensorDevice, SensorError};
use std::time::Duration;

/// What one update tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No device or tracker; nothing was done
    Idle,
    /// The capture was queued but no result was ready; joints kept their values
    Pending,
    /// A result arrived with no bodies; the skeleton is marked lost
    NoBodies,
    /// The first body was copied into the joint store
    Tracked { bodies: usize },
    /// The tick failed and was skipped
    Failed(AdapterError),
}

impl TickOutcome {
    /// Whether this tick wrote new joint values.
    pub fn updated_joints(&self) -> bool {
        matches!(self, TickOutcome::Tracked { .. })
    }
}

/// Advance tracking by one frame.
///
/// Body 0 is always the one copied; there is no track id continuity across frames.
///
/// When the tracker rejects the capture because its result queue is full, the
/// capture is dropped and the backlog is drained instead, applying only the
/// newest result. The next tick then has room to enqueue again.
pub fn pump_frame<D, T>(
    device: &mut D,
    tracker: &mut T,
    store: &mut TrackedJointStore,
    stats: &PumpStats,
) -> Result<TickOutcome, SensorError>
where
    D: SensorDevice + ?Sized,
    T: BodyTracker + ?Sized,
{
    // The capture is released once the tracker has it
    let enqueued = {
        let capture = device.get_capture()?;
        tracker.enqueue_capture(&capture)
    };

    let frame = match enqueued {
        Ok(()) => {
            stats.record_capture_enqueued();
            tracker.pop_result(Duration::ZERO)?
        }
        Err(SensorError::QueueFull) => {
            stats.record_capture_dropped();
            let mut newest = None;
            while let Some(frame) = tracker.pop_result(Duration::ZERO)? {
                newest = Some(frame);
            }
            newest
        }
        Err(e) => return Err(e),
    };

    let Some(frame) = frame else {
        stats.record_result_pending();
        return Ok(TickOutcome::Pending);
    };

    match frame.body_skeleton(0) {
        None => {
            store.mark_lost();
            stats.record_empty_frame();
            Ok(TickOutcome::NoBodies)
        }
        Some(skeleton) => {
            store.apply_skeleton(skeleton);
            stats.record_tracked_frame();
            Ok(TickOutcome::Tracked {
                bodies: frame.number_of_bodies(),
            })
        }
    }
}
