//! In-process simulated depth sensor.
//!
//! The simulated tracker runs its own result pipeline: captures are queued and
//! results only come out `latency` captures later, the way a real inference
//! engine lags behind the camera. Every stage can be made to fail through a
//! [`SimulatedProbe`], which also exposes what is currently open.

use crate::math::{Quaternion, Vector3};
use crate::sensor::types::{
    Body, Calibration, Capture, DepthMode, DeviceConfiguration, JointConfidenceLevel,
    SensorError, SensorJoint, SensorJointId, Skeleton, TrackerConfiguration, TrackingFrame,
};
use crate::sensor::{BodyTracker, SensorBackend, SensorDevice};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Device timestamp step between captures at 30 fps.
const FRAME_INTERVAL: Duration = Duration::from_micros(33_333);

/// Stages of the device pipeline where a failure can be injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Open,
    StartCameras,
    Calibration,
    CreateTracker,
    Capture,
    Enqueue,
    PopResult,
    TrackerShutdown,
    StopCameras,
}

/// What the simulated camera sees.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatedScene {
    /// Nobody in front of the camera
    Empty,
    /// One person standing still
    Standing,
    /// One person swaying side to side
    Walking,
    /// Explicit per-capture body lists, cycled by capture sequence
    Script(Vec<Vec<Skeleton>>),
}

impl SimulatedScene {
    /// Bodies visible in the capture with the given sequence number.
    pub fn bodies_at(&self, sequence: u64) -> Vec<Body> {
        match self {
            SimulatedScene::Empty => Vec::new(),
            SimulatedScene::Standing => vec![Body {
                id: 1,
                skeleton: standing_pose(Vector3::ZERO, 0.0),
            }],
            SimulatedScene::Walking => {
                let phase = sequence as f32 * 0.1;
                vec![Body {
                    id: 1,
                    skeleton: standing_pose(Vector3::new(phase.sin() * 150.0, 0.0, 0.0), phase.sin() * 0.2),
                }]
            }
            SimulatedScene::Script(frames) if frames.is_empty() => Vec::new(),
            SimulatedScene::Script(frames) => {
                let frame = &frames[(sequence % frames.len() as u64) as usize];
                frame
                    .iter()
                    .enumerate()
                    .map(|(i, skeleton)| Body {
                        id: i as u32 + 1,
                        skeleton: skeleton.clone(),
                    })
                    .collect()
            }
        }
    }
}

/// Joint positions of a neutral standing pose, in millimetres relative to the pelvis
/// (camera axes: x right, y down, z away from the camera).
const STANDING_OFFSETS: [(SensorJointId, [f32; 3]); 32] = [
    (SensorJointId::Pelvis, [0.0, 0.0, 0.0]),
    (SensorJointId::SpineNavel, [0.0, -180.0, -10.0]),
    (SensorJointId::SpineChest, [0.0, -340.0, -20.0]),
    (SensorJointId::Neck, [0.0, -520.0, -10.0]),
    (SensorJointId::ClavicleLeft, [-40.0, -490.0, -10.0]),
    (SensorJointId::ShoulderLeft, [-180.0, -470.0, 0.0]),
    (SensorJointId::ElbowLeft, [-200.0, -200.0, 20.0]),
    (SensorJointId::WristLeft, [-210.0, 40.0, 0.0]),
    (SensorJointId::HandLeft, [-210.0, 110.0, -10.0]),
    (SensorJointId::HandTipLeft, [-210.0, 170.0, -20.0]),
    (SensorJointId::ThumbLeft, [-180.0, 100.0, -50.0]),
    (SensorJointId::ClavicleRight, [40.0, -490.0, -10.0]),
    (SensorJointId::ShoulderRight, [180.0, -470.0, 0.0]),
    (SensorJointId::ElbowRight, [200.0, -200.0, 20.0]),
    (SensorJointId::WristRight, [210.0, 40.0, 0.0]),
    (SensorJointId::HandRight, [210.0, 110.0, -10.0]),
    (SensorJointId::HandTipRight, [210.0, 170.0, -20.0]),
    (SensorJointId::ThumbRight, [180.0, 100.0, -50.0]),
    (SensorJointId::HipLeft, [-95.0, 10.0, 0.0]),
    (SensorJointId::KneeLeft, [-100.0, 430.0, -20.0]),
    (SensorJointId::AnkleLeft, [-100.0, 820.0, 20.0]),
    (SensorJointId::FootLeft, [-110.0, 880.0, -110.0]),
    (SensorJointId::HipRight, [95.0, 10.0, 0.0]),
    (SensorJointId::KneeRight, [100.0, 430.0, -20.0]),
    (SensorJointId::AnkleRight, [100.0, 820.0, 20.0]),
    (SensorJointId::FootRight, [110.0, 880.0, -110.0]),
    (SensorJointId::Head, [0.0, -640.0, -30.0]),
    (SensorJointId::Nose, [0.0, -640.0, -120.0]),
    (SensorJointId::EyeLeft, [-35.0, -680.0, -100.0]),
    (SensorJointId::EarLeft, [-75.0, -660.0, -20.0]),
    (SensorJointId::EyeRight, [35.0, -680.0, -100.0]),
    (SensorJointId::EarRight, [75.0, -660.0, -20.0]),
];

/// Pelvis position of the standing pose, two metres in front of the camera.
const STANDING_PELVIS: Vector3 = Vector3::new(0.0, 250.0, 2000.0);

/// A standing skeleton shifted by `offset` and turned by `yaw` radians.
///
/// Face joints report medium confidence, everything else high.
pub fn standing_pose(offset: Vector3, yaw: f32) -> Skeleton {
    let orientation = Quaternion::from_yaw(yaw);
    Skeleton::from_fn(|id| {
        let [x, y, z] = STANDING_OFFSETS[id.index()].1;
        let confidence = match id {
            SensorJointId::Nose
            | SensorJointId::EyeLeft
            | SensorJointId::EarLeft
            | SensorJointId::EyeRight
            | SensorJointId::EarRight => JointConfidenceLevel::Medium,
            _ => JointConfidenceLevel::High,
        };
        SensorJoint {
            position: Vector3::new(
                STANDING_PELVIS.x + offset.x + x,
                STANDING_PELVIS.y + offset.y + y,
                STANDING_PELVIS.z + offset.z + z,
            ),
            orientation,
            confidence,
        }
    })
}

/// State shared between the backend, its handles and probes.
#[derive(Debug)]
struct SimState {
    scene: Mutex<SimulatedScene>,
    failing: Mutex<HashSet<Stage>>,
    open_devices: AtomicU32,
    live_trackers: AtomicU32,
    cameras_running: AtomicBool,
    captures_taken: AtomicU64,
    tracker_shutdowns: AtomicU32,
}

impl SimState {
    fn check(&self, stage: Stage) -> bool {
        self.failing
            .lock()
            .map(|failing| failing.contains(&stage))
            .unwrap_or(false)
    }

    fn bodies_at(&self, sequence: u64) -> Vec<Body> {
        self.scene
            .lock()
            .map(|scene| scene.bodies_at(sequence))
            .unwrap_or_default()
    }
}

/// Observes and steers a [`SimulatedBackend`] after it has been handed to an adapter.
#[derive(Debug, Clone)]
pub struct SimulatedProbe {
    state: Arc<SimState>,
}

impl SimulatedProbe {
    /// Make `stage` fail until [`SimulatedProbe::recover`] is called.
    pub fn fail(&self, stage: Stage) {
        if let Ok(mut failing) = self.state.failing.lock() {
            failing.insert(stage);
        }
    }

    /// Stop failing at `stage`.
    pub fn recover(&self, stage: Stage) {
        if let Ok(mut failing) = self.state.failing.lock() {
            failing.remove(&stage);
        }
    }

    /// Replace what the camera sees.
    pub fn set_scene(&self, scene: SimulatedScene) {
        if let Ok(mut current) = self.state.scene.lock() {
            *current = scene;
        }
    }

    pub fn open_devices(&self) -> u32 {
        self.state.open_devices.load(Ordering::SeqCst)
    }

    pub fn live_trackers(&self) -> u32 {
        self.state.live_trackers.load(Ordering::SeqCst)
    }

    pub fn cameras_running(&self) -> bool {
        self.state.cameras_running.load(Ordering::SeqCst)
    }

    pub fn captures_taken(&self) -> u64 {
        self.state.captures_taken.load(Ordering::SeqCst)
    }

    /// Number of times a tracker was asked to shut down.
    pub fn tracker_shutdowns(&self) -> u32 {
        self.state.tracker_shutdowns.load(Ordering::SeqCst)
    }
}

/// A sensor backend backed by a simulated scene.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    devices: u32,
    latency: usize,
    queue_capacity: usize,
    state: Arc<SimState>,
}

impl SimulatedBackend {
    /// Create a backend with one attached device watching `scene`.
    pub fn new(scene: SimulatedScene) -> Self {
        Self {
            devices: 1,
            latency: 0,
            queue_capacity: 3,
            state: Arc::new(SimState {
                scene: Mutex::new(scene),
                failing: Mutex::new(HashSet::new()),
                open_devices: AtomicU32::new(0),
                live_trackers: AtomicU32::new(0),
                cameras_running: AtomicBool::new(false),
                captures_taken: AtomicU64::new(0),
                tracker_shutdowns: AtomicU32::new(0),
            }),
        }
    }

    /// Set the number of attached devices.
    pub fn with_devices(mut self, devices: u32) -> Self {
        self.devices = devices;
        self
    }

    /// Results lag `frames` captures behind the camera.
    pub fn with_latency(mut self, frames: usize) -> Self {
        self.latency = frames;
        self
    }

    /// Number of finished results the tracker holds before rejecting captures.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Start with `stage` failing.
    pub fn failing_at(self, stage: Stage) -> Self {
        self.probe().fail(stage);
        self
    }

    pub fn probe(&self) -> SimulatedProbe {
        SimulatedProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl SensorBackend for SimulatedBackend {
    type Device = SimulatedDevice;
    type Tracker = SimulatedTracker;

    fn device_count(&self) -> u32 {
        self.devices
    }

    fn open(&self, index: u32) -> Result<Self::Device, SensorError> {
        if index >= self.devices {
            return Err(SensorError::DeviceNotFound { index });
        }
        if self.state.check(Stage::Open) {
            return Err(SensorError::Busy);
        }
        self.state.open_devices.fetch_add(1, Ordering::SeqCst);
        Ok(SimulatedDevice {
            state: Arc::clone(&self.state),
            serial: format!("SIM{:06}", index + 1),
            config: None,
            sequence: 0,
        })
    }

    fn create_tracker(
        &self,
        calibration: &Calibration,
        config: &TrackerConfiguration,
    ) -> Result<Self::Tracker, SensorError> {
        if self.state.check(Stage::CreateTracker) {
            return Err(SensorError::TrackerUnavailable(format!(
                "{:?} runtime failed to load",
                config.processing_mode
            )));
        }
        if calibration.depth_mode == DepthMode::Off {
            return Err(SensorError::TrackerUnavailable(
                "calibration has no depth camera".to_string(),
            ));
        }
        let (sender, receiver) = bounded(self.queue_capacity);
        self.state.live_trackers.fetch_add(1, Ordering::SeqCst);
        Ok(SimulatedTracker {
            state: Arc::clone(&self.state),
            latency: self.latency,
            in_flight: VecDeque::new(),
            sender,
            receiver,
            running: true,
        })
    }
}

/// An open simulated device.
#[derive(Debug)]
pub struct SimulatedDevice {
    state: Arc<SimState>,
    serial: String,
    config: Option<DeviceConfiguration>,
    sequence: u64,
}

impl SensorDevice for SimulatedDevice {
    fn start_cameras(&mut self, config: &DeviceConfiguration) -> Result<(), SensorError> {
        if self.state.check(Stage::StartCameras) {
            return Err(SensorError::StreamRejected(format!(
                "{:?} not supported by firmware",
                config.depth_mode
            )));
        }
        if config.depth_mode == DepthMode::Off {
            return Err(SensorError::StreamRejected(
                "depth camera must be enabled".to_string(),
            ));
        }
        self.config = Some(*config);
        self.state.cameras_running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_cameras(&mut self) -> Result<(), SensorError> {
        if self.state.check(Stage::StopCameras) {
            return Err(SensorError::Disconnected);
        }
        self.config = None;
        self.state.cameras_running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn calibration(&self) -> Result<Calibration, SensorError> {
        if self.state.check(Stage::Calibration) {
            return Err(SensorError::CalibrationUnavailable(
                "calibration blob unreadable".to_string(),
            ));
        }
        let config = self.config.ok_or_else(|| {
            SensorError::CalibrationUnavailable("cameras not started".to_string())
        })?;
        let depth_size = config.depth_mode.resolution().unwrap_or((0, 0));
        Ok(Calibration {
            depth_mode: config.depth_mode,
            depth_size,
            intrinsics: [504.0, 504.0, depth_size.0 as f32 / 2.0, depth_size.1 as f32 / 2.0],
        })
    }

    fn get_capture(&mut self) -> Result<Capture, SensorError> {
        let config = self
            .config
            .ok_or_else(|| SensorError::Other("cameras not started".to_string()))?;
        if self.state.check(Stage::Capture) {
            return Err(SensorError::Timeout);
        }
        let sequence = self.sequence;
        self.sequence += 1;
        self.state.captures_taken.fetch_add(1, Ordering::SeqCst);
        Ok(Capture {
            sequence,
            device_timestamp: FRAME_INTERVAL * sequence as u32,
            depth_size: config.depth_mode.resolution().unwrap_or((0, 0)),
        })
    }

    fn serial_number(&self) -> String {
        self.serial.clone()
    }
}

impl Drop for SimulatedDevice {
    fn drop(&mut self) {
        if self.config.is_some() {
            self.state.cameras_running.store(false, Ordering::SeqCst);
        }
        self.state.open_devices.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A simulated body tracker.
#[derive(Debug)]
pub struct SimulatedTracker {
    state: Arc<SimState>,
    latency: usize,
    in_flight: VecDeque<TrackingFrame>,
    sender: Sender<TrackingFrame>,
    receiver: Receiver<TrackingFrame>,
    running: bool,
}

impl BodyTracker for SimulatedTracker {
    fn enqueue_capture(&mut self, capture: &Capture) -> Result<(), SensorError> {
        if !self.running {
            return Err(SensorError::Other("tracker is shut down".to_string()));
        }
        if self.state.check(Stage::Enqueue) || self.sender.is_full() {
            return Err(SensorError::QueueFull);
        }

        let bodies = self.state.bodies_at(capture.sequence);
        self.in_flight.push_back(TrackingFrame::new(
            capture.sequence,
            capture.device_timestamp,
            bodies,
        ));

        while self.in_flight.len() > self.latency {
            let Some(frame) = self.in_flight.pop_front() else {
                break;
            };
            self.sender
                .try_send(frame)
                .map_err(|_| SensorError::QueueFull)?;
        }
        Ok(())
    }

    fn pop_result(&mut self, timeout: Duration) -> Result<Option<TrackingFrame>, SensorError> {
        if self.state.check(Stage::PopResult) {
            return Err(SensorError::Other("result retrieval failed".to_string()));
        }
        if timeout.is_zero() {
            return match self.receiver.try_recv() {
                Ok(frame) => Ok(Some(frame)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(SensorError::Disconnected),
            };
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(frame) => Ok(Some(frame)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(SensorError::Disconnected),
        }
    }

    fn shutdown(&mut self) -> Result<(), SensorError> {
        self.state.tracker_shutdowns.fetch_add(1, Ordering::SeqCst);
        self.running = false;
        self.in_flight.clear();
        while self.receiver.try_recv().is_ok() {}
        if self.state.check(Stage::TrackerShutdown) {
            return Err(SensorError::Other("tracker did not stop cleanly".to_string()));
        }
        Ok(())
    }
}

impl Drop for SimulatedTracker {
    fn drop(&mut self) {
        self.state.live_trackers.fetch_sub(1, Ordering::SeqCst);
    }
}
