//! The generic joint schema understood by the host.

use crate::math::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Generic joint roles, in schema enumeration order.
///
/// The discriminant doubles as the index into a [`TrackedJointStore`](super::TrackedJointStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrackedJointType {
    JointHead = 0,
    JointNeck,
    JointSpineShoulder,
    JointShoulderLeft,
    JointElbowLeft,
    JointWristLeft,
    JointHandLeft,
    JointHandTipLeft,
    JointThumbLeft,
    JointShoulderRight,
    JointElbowRight,
    JointWristRight,
    JointHandRight,
    JointHandTipRight,
    JointThumbRight,
    JointSpineMiddle,
    JointSpineWaist,
    JointHipLeft,
    JointKneeLeft,
    JointFootLeft,
    JointFootTipLeft,
    JointHipRight,
    JointKneeRight,
    JointFootRight,
    JointFootTipRight,
    /// Manually driven joint; never produced by a sensor
    JointManual,
}

impl TrackedJointType {
    /// Every role, including [`TrackedJointType::JointManual`].
    pub const ALL: [TrackedJointType; 26] = [
        TrackedJointType::JointHead,
        TrackedJointType::JointNeck,
        TrackedJointType::JointSpineShoulder,
        TrackedJointType::JointShoulderLeft,
        TrackedJointType::JointElbowLeft,
        TrackedJointType::JointWristLeft,
        TrackedJointType::JointHandLeft,
        TrackedJointType::JointHandTipLeft,
        TrackedJointType::JointThumbLeft,
        TrackedJointType::JointShoulderRight,
        TrackedJointType::JointElbowRight,
        TrackedJointType::JointWristRight,
        TrackedJointType::JointHandRight,
        TrackedJointType::JointHandTipRight,
        TrackedJointType::JointThumbRight,
        TrackedJointType::JointSpineMiddle,
        TrackedJointType::JointSpineWaist,
        TrackedJointType::JointHipLeft,
        TrackedJointType::JointKneeLeft,
        TrackedJointType::JointFootLeft,
        TrackedJointType::JointFootTipLeft,
        TrackedJointType::JointHipRight,
        TrackedJointType::JointKneeRight,
        TrackedJointType::JointFootRight,
        TrackedJointType::JointFootTipRight,
        TrackedJointType::JointManual,
    ];

    /// Roles a sensor can report: everything except the manual role.
    pub fn sensor_roles() -> impl Iterator<Item = TrackedJointType> {
        Self::ALL.into_iter().filter(|role| !role.is_manual())
    }

    pub fn is_manual(self) -> bool {
        self == TrackedJointType::JointManual
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TrackedJointType::JointHead => "JointHead",
            TrackedJointType::JointNeck => "JointNeck",
            TrackedJointType::JointSpineShoulder => "JointSpineShoulder",
            TrackedJointType::JointShoulderLeft => "JointShoulderLeft",
            TrackedJointType::JointElbowLeft => "JointElbowLeft",
            TrackedJointType::JointWristLeft => "JointWristLeft",
            TrackedJointType::JointHandLeft => "JointHandLeft",
            TrackedJointType::JointHandTipLeft => "JointHandTipLeft",
            TrackedJointType::JointThumbLeft => "JointThumbLeft",
            TrackedJointType::JointShoulderRight => "JointShoulderRight",
            TrackedJointType::JointElbowRight => "JointElbowRight",
            TrackedJointType::JointWristRight => "JointWristRight",
            TrackedJointType::JointHandRight => "JointHandRight",
            TrackedJointType::JointHandTipRight => "JointHandTipRight",
            TrackedJointType::JointThumbRight => "JointThumbRight",
            TrackedJointType::JointSpineMiddle => "JointSpineMiddle",
            TrackedJointType::JointSpineWaist => "JointSpineWaist",
            TrackedJointType::JointHipLeft => "JointHipLeft",
            TrackedJointType::JointKneeLeft => "JointKneeLeft",
            TrackedJointType::JointFootLeft => "JointFootLeft",
            TrackedJointType::JointFootTipLeft => "JointFootTipLeft",
            TrackedJointType::JointHipRight => "JointHipRight",
            TrackedJointType::JointKneeRight => "JointKneeRight",
            TrackedJointType::JointFootRight => "JointFootRight",
            TrackedJointType::JointFootTipRight => "JointFootTipRight",
            TrackedJointType::JointManual => "JointManual",
        }
    }
}

impl std::fmt::Display for TrackedJointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How much the host can trust a joint.
///
/// Ordered from least to most tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrackedJointState {
    StateNotTracked = 0,
    StateInferred = 1,
    StateTracked = 2,
}

/// One generic joint as seen by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedJoint {
    name: String,
    role: TrackedJointType,
    pub position: Vector3,
    pub orientation: Quaternion,
    pub tracking_state: TrackedJointState,
}

impl TrackedJoint {
    /// A joint at the origin with identity orientation, not tracked.
    pub fn new(role: TrackedJointType) -> Self {
        Self {
            name: role.name().to_string(),
            role,
            position: Vector3::ZERO,
            orientation: Quaternion::IDENTITY,
            tracking_state: TrackedJointState::StateNotTracked,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> TrackedJointType {
        self.role
    }
}
