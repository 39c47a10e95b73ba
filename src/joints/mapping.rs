//! Sensor joint to generic joint mapping tables.

use crate::joints::schema::{TrackedJointState, TrackedJointType};
use crate::sensor::types::{JointConfidenceLevel, SensorJointId};

/// Which sensor joint drives each generic role, in store write order.
///
/// Not injective: the neck and the spine-shoulder both read the sensor neck.
pub const JOINT_MAPPING: [(TrackedJointType, SensorJointId); 25] = [
    (TrackedJointType::JointHead, SensorJointId::Head),
    (TrackedJointType::JointNeck, SensorJointId::Neck),
    (TrackedJointType::JointSpineShoulder, SensorJointId::Neck),
    (TrackedJointType::JointShoulderLeft, SensorJointId::ShoulderLeft),
    (TrackedJointType::JointElbowLeft, SensorJointId::ElbowLeft),
    (TrackedJointType::JointWristLeft, SensorJointId::WristLeft),
    (TrackedJointType::JointHandLeft, SensorJointId::HandLeft),
    (TrackedJointType::JointHandTipLeft, SensorJointId::HandTipLeft),
    (TrackedJointType::JointThumbLeft, SensorJointId::ThumbLeft),
    (TrackedJointType::JointShoulderRight, SensorJointId::ShoulderRight),
    (TrackedJointType::JointElbowRight, SensorJointId::ElbowRight),
    (TrackedJointType::JointWristRight, SensorJointId::WristRight),
    (TrackedJointType::JointHandRight, SensorJointId::HandRight),
    (TrackedJointType::JointHandTipRight, SensorJointId::HandTipRight),
    (TrackedJointType::JointThumbRight, SensorJointId::ThumbRight),
    (TrackedJointType::JointSpineMiddle, SensorJointId::SpineChest),
    (TrackedJointType::JointSpineWaist, SensorJointId::SpineNavel),
    (TrackedJointType::JointHipLeft, SensorJointId::HipLeft),
    (TrackedJointType::JointKneeLeft, SensorJointId::KneeLeft),
    (TrackedJointType::JointFootLeft, SensorJointId::AnkleLeft),
    (TrackedJointType::JointFootTipLeft, SensorJointId::FootLeft),
    (TrackedJointType::JointHipRight, SensorJointId::HipRight),
    (TrackedJointType::JointKneeRight, SensorJointId::KneeRight),
    (TrackedJointType::JointFootRight, SensorJointId::AnkleRight),
    (TrackedJointType::JointFootTipRight, SensorJointId::FootRight),
];

/// Translate a sensor confidence level into a generic tracking state.
///
/// Medium and high confidence both count as tracked.
pub const fn translate_confidence(confidence: JointConfidenceLevel) -> TrackedJointState {
    match confidence {
        JointConfidenceLevel::None => TrackedJointState::StateNotTracked,
        JointConfidenceLevel::Low => TrackedJointState::StateInferred,
        JointConfidenceLevel::Medium | JointConfidenceLevel::High => {
            TrackedJointState::StateTracked
        }
    }
}

/// The sensor joint driving `role`, if any.
pub fn sensor_joint_for(role: TrackedJointType) -> Option<SensorJointId> {
    JOINT_MAPPING
        .iter()
        .find(|(generic, _)| *generic == role)
        .map(|&(_, sensor)| sensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::types::SENSOR_JOINT_COUNT;
    use std::collections::HashSet;

    #[test]
    fn test_confidence_translation() {
        let none = translate_confidence(JointConfidenceLevel::None);
        let low = translate_confidence(JointConfidenceLevel::Low);
        let medium = translate_confidence(JointConfidenceLevel::Medium);
        let high = translate_confidence(JointConfidenceLevel::High);

        assert_eq!(none, TrackedJointState::StateNotTracked);
        assert_eq!(low, TrackedJointState::StateInferred);
        assert_eq!(medium, TrackedJointState::StateTracked);
        assert_eq!(medium, high);
        assert!(medium > low);
        assert!(low > none);
    }

    #[test]
    fn test_confidence_translation_is_monotone() {
        let states: Vec<_> = JointConfidenceLevel::ALL
            .iter()
            .map(|&c| translate_confidence(c))
            .collect();
        assert!(states.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_mapping_covers_every_sensor_role_once() {
        let roles: HashSet<_> = JOINT_MAPPING.iter().map(|(role, _)| *role).collect();
        assert_eq!(roles.len(), JOINT_MAPPING.len());
        for role in TrackedJointType::sensor_roles() {
            assert!(roles.contains(&role), "{role} is not mapped");
        }
        assert!(!roles.contains(&TrackedJointType::JointManual));
    }

    #[test]
    fn test_mapping_sensor_ids_are_valid() {
        for (_, sensor) in JOINT_MAPPING {
            assert!(sensor.index() < SENSOR_JOINT_COUNT);
        }
    }

    #[test]
    fn test_mapping_is_not_injective() {
        assert_eq!(
            sensor_joint_for(TrackedJointType::JointNeck),
            sensor_joint_for(TrackedJointType::JointSpineShoulder)
        );
        assert_eq!(
            sensor_joint_for(TrackedJointType::JointFootLeft),
            Some(SensorJointId::AnkleLeft)
        );
        assert_eq!(sensor_joint_for(TrackedJointType::JointManual), None);
    }
}
