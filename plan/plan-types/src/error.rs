//! Error types for joint-space containers.

use thiserror::Error;

use crate::joint::JointType;

/// Errors that can occur while assembling joint-space containers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// Two joints in the same group share a name.
    #[error("duplicate joint name in group {group}: {joint}")]
    DuplicateJointName {
        /// The group being assembled.
        group: String,
        /// The name that appeared twice.
        joint: String,
    },

    /// A joint whose type cannot take part in the requested container.
    #[error("joint {joint} of type {joint_type} cannot take part in this container")]
    UnsupportedJointType {
        /// The offending joint.
        joint: String,
        /// Its declared type.
        joint_type: JointType,
    },
}

impl GroupError {
    /// Create a duplicate joint name error.
    pub fn duplicate_joint(group: impl Into<String>, joint: impl Into<String>) -> Self {
        Self::DuplicateJointName {
            group: group.into(),
            joint: joint.into(),
        }
    }

    /// Create an unsupported joint type error.
    pub fn unsupported_joint(joint: impl Into<String>, joint_type: JointType) -> Self {
        Self::UnsupportedJointType {
            joint: joint.into(),
            joint_type,
        }
    }
}

/// Result type for joint-space operations.
pub type Result<T> = std::result::Result<T, GroupError>;
