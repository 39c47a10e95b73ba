//! Sensor-native data types: joint ids, confidence levels, captures and tracker results.
//!
//! These mirror what a depth-camera body tracking SDK hands back. Nothing in here
//! knows about the generic joint schema; the translation lives in `joints::mapping`.

use crate::math::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of joints in a sensor skeleton.
pub const SENSOR_JOINT_COUNT: usize = 32;

/// Joint identifiers of the sensor skeleton, in the SDK's index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorJointId {
    Pelvis = 0,
    SpineNavel,
    SpineChest,
    Neck,
    ClavicleLeft,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    HandTipLeft,
    ThumbLeft,
    ClavicleRight,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HandTipRight,
    ThumbRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
    Head,
    Nose,
    EyeLeft,
    EarLeft,
    EyeRight,
    EarRight,
}

impl SensorJointId {
    /// All sensor joints in index order.
    pub const ALL: [SensorJointId; SENSOR_JOINT_COUNT] = [
        SensorJointId::Pelvis,
        SensorJointId::SpineNavel,
        SensorJointId::SpineChest,
        SensorJointId::Neck,
        SensorJointId::ClavicleLeft,
        SensorJointId::ShoulderLeft,
        SensorJointId::ElbowLeft,
        SensorJointId::WristLeft,
        SensorJointId::HandLeft,
        SensorJointId::HandTipLeft,
        SensorJointId::ThumbLeft,
        SensorJointId::ClavicleRight,
        SensorJointId::ShoulderRight,
        SensorJointId::ElbowRight,
        SensorJointId::WristRight,
        SensorJointId::HandRight,
        SensorJointId::HandTipRight,
        SensorJointId::ThumbRight,
        SensorJointId::HipLeft,
        SensorJointId::KneeLeft,
        SensorJointId::AnkleLeft,
        SensorJointId::FootLeft,
        SensorJointId::HipRight,
        SensorJointId::KneeRight,
        SensorJointId::AnkleRight,
        SensorJointId::FootRight,
        SensorJointId::Head,
        SensorJointId::Nose,
        SensorJointId::EyeLeft,
        SensorJointId::EarLeft,
        SensorJointId::EyeRight,
        SensorJointId::EarRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-joint confidence reported by the body tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JointConfidenceLevel {
    /// The joint is out of range (too far from the camera)
    None = 0,
    /// The joint is not observed and was predicted
    Low = 1,
    /// Medium confidence, the current SDK ceiling
    Medium = 2,
    /// High confidence, reserved by the SDK
    High = 3,
}

impl JointConfidenceLevel {
    pub const ALL: [JointConfidenceLevel; 4] = [
        JointConfidenceLevel::None,
        JointConfidenceLevel::Low,
        JointConfidenceLevel::Medium,
        JointConfidenceLevel::High,
    ];
}

/// One joint of a sensor skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorJoint {
    /// Position in millimetres
    pub position: Vector3,
    /// Joint orientation (unit quaternion)
    pub orientation: Quaternion,
    pub confidence: JointConfidenceLevel,
}

impl Default for SensorJoint {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            orientation: Quaternion::IDENTITY,
            confidence: JointConfidenceLevel::None,
        }
    }
}

/// A full sensor skeleton, indexed by [`SensorJointId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    joints: [SensorJoint; SENSOR_JOINT_COUNT],
}

impl Skeleton {
    /// Create a skeleton from joints given in [`SensorJointId`] order.
    pub fn from_joints(joints: [SensorJoint; SENSOR_JOINT_COUNT]) -> Self {
        Self { joints }
    }

    /// Build a skeleton by evaluating `f` for every sensor joint.
    pub fn from_fn(mut f: impl FnMut(SensorJointId) -> SensorJoint) -> Self {
        Self {
            joints: std::array::from_fn(|i| f(SensorJointId::ALL[i])),
        }
    }

    pub fn joint(&self, id: SensorJointId) -> &SensorJoint {
        &self.joints[id.index()]
    }

    pub fn joint_mut(&mut self, id: SensorJointId) -> &mut SensorJoint {
        &mut self.joints[id.index()]
    }

    pub fn joints(&self) -> &[SensorJoint] {
        &self.joints
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::from_fn(|_| SensorJoint::default())
    }
}

/// A tracked body inside a tracker result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Tracker-assigned id, not guaranteed stable across frames
    pub id: u32,
    pub skeleton: Skeleton,
}

/// One capture obtained from the device. Depth only; color is never enabled.
#[derive(Debug, Clone)]
pub struct Capture {
    /// Monotonic capture counter assigned by the device
    pub sequence: u64,
    /// Device timestamp of the depth image
    pub device_timestamp: Duration,
    /// Depth image dimensions (width, height)
    pub depth_size: (u32, u32),
}

/// One result popped from the body tracker.
#[derive(Debug, Clone)]
pub struct TrackingFrame {
    /// Sequence of the capture this result was computed from
    pub capture_sequence: u64,
    pub device_timestamp: Duration,
    bodies: Vec<Body>,
}

impl TrackingFrame {
    pub fn new(capture_sequence: u64, device_timestamp: Duration, bodies: Vec<Body>) -> Self {
        Self {
            capture_sequence,
            device_timestamp,
            bodies,
        }
    }

    pub fn number_of_bodies(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_skeleton(&self, index: usize) -> Option<&Skeleton> {
        self.bodies.get(index).map(|b| &b.skeleton)
    }
}

/// Camera frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFps {
    Fps5,
    Fps15,
    Fps30,
}

/// Color camera resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorResolution {
    Off,
    R720p,
    R1080p,
}

/// Depth camera mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepthMode {
    Off,
    NfovBinned2x2,
    NfovUnbinned,
    WfovBinned2x2,
    WfovUnbinned,
    PassiveIr,
}

impl DepthMode {
    /// Depth image size for the mode, `None` when the depth camera is off.
    pub fn resolution(self) -> Option<(u32, u32)> {
        match self {
            DepthMode::Off => None,
            DepthMode::NfovBinned2x2 => Some((320, 288)),
            DepthMode::NfovUnbinned => Some((640, 576)),
            DepthMode::WfovBinned2x2 => Some((512, 512)),
            DepthMode::WfovUnbinned | DepthMode::PassiveIr => Some((1024, 1024)),
        }
    }
}

/// External sync behaviour of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WiredSyncMode {
    Standalone,
    Master,
    Subordinate,
}

/// Camera stream configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfiguration {
    pub camera_fps: CameraFps,
    pub color_resolution: ColorResolution,
    pub depth_mode: DepthMode,
    pub wired_sync_mode: WiredSyncMode,
}

impl DeviceConfiguration {
    /// The fixed configuration used for body tracking: 30 fps, depth only,
    /// narrow field of view unbinned, standalone sync.
    pub const fn body_tracking() -> Self {
        Self {
            camera_fps: CameraFps::Fps30,
            color_resolution: ColorResolution::Off,
            depth_mode: DepthMode::NfovUnbinned,
            wired_sync_mode: WiredSyncMode::Standalone,
        }
    }
}

/// Device calibration handed to the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub depth_mode: DepthMode,
    /// Depth image size the intrinsics apply to
    pub depth_size: (u32, u32),
    /// Focal lengths and principal point (fx, fy, cx, cy)
    pub intrinsics: [f32; 4],
}

/// Tracker inference backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingMode {
    Gpu = 0,
    Cpu = 1,
    Cuda = 2,
    TensorRt = 3,
    DirectMl = 4,
}

impl ProcessingMode {
    pub const ALL: [ProcessingMode; 5] = [
        ProcessingMode::Gpu,
        ProcessingMode::Cpu,
        ProcessingMode::Cuda,
        ProcessingMode::TensorRt,
        ProcessingMode::DirectMl,
    ];
}

impl TryFrom<i32> for ProcessingMode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(value)
    }
}

/// Physical mounting orientation of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorOrientation {
    Default = 0,
    Clockwise90 = 1,
    CounterClockwise90 = 2,
    Flip180 = 3,
}

impl SensorOrientation {
    pub const ALL: [SensorOrientation; 4] = [
        SensorOrientation::Default,
        SensorOrientation::Clockwise90,
        SensorOrientation::CounterClockwise90,
        SensorOrientation::Flip180,
    ];
}

impl TryFrom<i32> for SensorOrientation {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(value)
    }
}

/// Tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfiguration {
    pub processing_mode: ProcessingMode,
    pub sensor_orientation: SensorOrientation,
}

impl Default for TrackerConfiguration {
    fn default() -> Self {
        Self {
            processing_mode: ProcessingMode::DirectMl,
            sensor_orientation: SensorOrientation::Default,
        }
    }
}

/// Errors reported by a sensor backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    DeviceNotFound { index: u32 },
    Busy,
    StreamRejected(String),
    CalibrationUnavailable(String),
    TrackerUnavailable(String),
    Timeout,
    QueueFull,
    Disconnected,
    Other(String),
}

impl std::fmt::Display for SensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorError::DeviceNotFound { index } => write!(f, "No sensor device at index {index}"),
            SensorError::Busy => write!(f, "Sensor device is in use by another process"),
            SensorError::StreamRejected(e) => write!(f, "Camera configuration rejected: {e}"),
            SensorError::CalibrationUnavailable(e) => write!(f, "Calibration unavailable: {e}"),
            SensorError::TrackerUnavailable(e) => write!(f, "Body tracker unavailable: {e}"),
            SensorError::Timeout => write!(f, "Timed out waiting for the sensor"),
            SensorError::QueueFull => write!(f, "Tracker input queue is full"),
            SensorError::Disconnected => write!(f, "Sensor device disconnected"),
            SensorError::Other(e) => write!(f, "Sensor error: {e}"),
        }
    }
}

impl std::error::Error for SensorError {}
