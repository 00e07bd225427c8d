//! Error types for manifold construction, mapping, and conversion.

use plan_types::JointType;
use thiserror::Error;

/// Errors that can occur while building manifolds and mappings or while
/// converting states and trajectories.
///
/// None of these are retryable: each reflects a mismatch between the robot
/// description and the state space that will not go away without fixing the
/// configuration. Callers treat any of them as planning failure for the
/// enclosing request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MappingError {
    /// A joint type with no representation in the composite state space.
    #[error("joint {joint} of type {joint_type} has no state-space representation")]
    UnclassifiableJoint {
        /// The joint that could not be classified.
        joint: String,
        /// Its declared type.
        joint_type: JointType,
    },

    /// Two submanifolds, or two real-vector dimensions, share a name.
    #[error("ambiguous name in composite manifold: {name}")]
    AmbiguousName {
        /// The name that appeared twice.
        name: String,
    },

    /// A joint matched neither a submanifold nor a real-vector dimension.
    #[error("no mapping found for joint {joint}")]
    UnmappedJoint {
        /// The joint with no counterpart.
        joint: String,
    },

    /// A submanifold matched no joint.
    #[error("no mapping found for submanifold {submanifold}")]
    UnmappedSubmanifold {
        /// The submanifold with no counterpart.
        submanifold: String,
    },

    /// A real-vector dimension matched no joint.
    ///
    /// Dimensions are derived from joints, so a miss means the descriptor
    /// and the joint set do not belong together. This is fatal under every
    /// match policy.
    #[error("no mapping found for real-vector dimension {dimension}")]
    UnmappedDimension {
        /// The dimension with no counterpart.
        dimension: String,
    },

    /// Trajectory conversion was attempted on a container whose joint-name
    /// lists have not been filled in.
    #[error("trajectory must be initialized with joint names before conversion")]
    UninitializedTrajectory,

    /// A state's layout does not match the mapping applied to it.
    #[error("state does not match mapping: {context}")]
    StateMismatch {
        /// What was inconsistent.
        context: String,
    },
}

impl MappingError {
    /// Create an unclassifiable joint error.
    pub fn unclassifiable(joint: impl Into<String>, joint_type: JointType) -> Self {
        Self::UnclassifiableJoint {
            joint: joint.into(),
            joint_type,
        }
    }

    /// Create an ambiguous name error.
    pub fn ambiguous(name: impl Into<String>) -> Self {
        Self::AmbiguousName { name: name.into() }
    }

    /// Create an unmapped joint error.
    pub fn unmapped_joint(joint: impl Into<String>) -> Self {
        Self::UnmappedJoint {
            joint: joint.into(),
        }
    }

    /// Create an unmapped submanifold error.
    pub fn unmapped_submanifold(submanifold: impl Into<String>) -> Self {
        Self::UnmappedSubmanifold {
            submanifold: submanifold.into(),
        }
    }

    /// Create an unmapped dimension error.
    pub fn unmapped_dimension(dimension: impl Into<String>) -> Self {
        Self::UnmappedDimension {
            dimension: dimension.into(),
        }
    }

    /// Create a state mismatch error.
    pub fn state_mismatch(context: impl Into<String>) -> Self {
        Self::StateMismatch {
            context: context.into(),
        }
    }
}

/// Result type for manifold and mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
