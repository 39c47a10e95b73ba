//! Host-visible collection of tracked joints.

use crate::joints::mapping::{translate_confidence, JOINT_MAPPING};
use crate::joints::schema::{TrackedJoint, TrackedJointType};
use crate::sensor::types::Skeleton;

/// One [`TrackedJoint`] per sensor role, in schema order, never resized.
///
/// Entry `i` always holds the role whose discriminant is `i`.
#[derive(Debug, Clone)]
pub struct TrackedJointStore {
    joints: Vec<TrackedJoint>,
    skeleton_tracked: bool,
}

impl TrackedJointStore {
    pub fn new() -> Self {
        Self {
            joints: TrackedJointType::sensor_roles()
                .map(TrackedJoint::new)
                .collect(),
            skeleton_tracked: false,
        }
    }

    /// All joints in schema order.
    pub fn joints(&self) -> &[TrackedJoint] {
        &self.joints
    }

    /// The joint bound to `role`, `None` for the manual role.
    pub fn get(&self, role: TrackedJointType) -> Option<&TrackedJoint> {
        self.joints.get(role.index())
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn is_skeleton_tracked(&self) -> bool {
        self.skeleton_tracked
    }

    /// Record that the latest tracker result had no bodies.
    ///
    /// Joint values keep their last known state.
    pub fn mark_lost(&mut self) {
        self.skeleton_tracked = false;
    }

    /// Copy a sensor skeleton into the store through the joint mapping table.
    ///
    /// Writes position, orientation and tracking state of every mapped role.
    pub fn apply_skeleton(&mut self, skeleton: &Skeleton) {
        for (role, sensor_joint) in JOINT_MAPPING {
            let source = skeleton.joint(sensor_joint);
            let target = &mut self.joints[role.index()];
            target.position = source.position;
            target.orientation = source.orientation;
            target.tracking_state = translate_confidence(source.confidence);
        }
        self.skeleton_tracked = true;
    }
}

impl Default for TrackedJointStore {
    fn default() -> Self {
        Self::new()
    }
}
