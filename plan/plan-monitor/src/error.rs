//! Error types for trajectory execution monitoring.

use thiserror::Error;

/// Errors that can occur while executing or recording trajectories.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// Execution was started with a goal naming no joints.
    #[error("goal trajectory names no joints")]
    EmptyGoal,

    /// A recorded sample was missing a joint the goal names.
    #[error("recorded sample missing joint {joint}")]
    MissingJointSample {
        /// The joint with no reading in the sample.
        joint: String,
    },

    /// A sample arrived while nothing was executing.
    #[error("no execution in progress")]
    NotExecuting,
}

impl MonitorError {
    /// Create a missing joint sample error.
    pub fn missing_joint(joint: impl Into<String>) -> Self {
        Self::MissingJointSample {
            joint: joint.into(),
        }
    }
}

/// Result type for monitoring operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
