//! Generic joint schema and the sensor-to-generic joint mapping.
//!
//! This module contains:
//! - The ordered generic joint schema and joint value type
//! - The static joint mapping and confidence translation tables
//! - The tracked joint store the host reads every tick

pub mod mapping;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use mapping::{sensor_joint_for, translate_confidence, JOINT_MAPPING};
pub use schema::{TrackedJoint, TrackedJointState, TrackedJointType};
pub use store::TrackedJointStore;
