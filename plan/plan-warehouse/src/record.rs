//! Planning-artifact records and their scene-stamp key.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use plan_types::{RobotState, RobotTrajectory};

/// Nanosecond timestamp identifying a planning scene.
///
/// Every artifact a planning request produces is filed under the stamp of
/// the scene the request started from, so associated artifacts can be
/// queried back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneStamp(u64);

impl SceneStamp {
    /// Create a stamp from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Create a stamp from seconds.
    ///
    /// Negative and non-finite inputs clamp to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self((secs * 1e9) as u64)
        } else {
            Self(0)
        }
    }

    /// Get the stamp as nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Get the stamp as seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1e9
    }

    /// The zero stamp.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

impl std::fmt::Display for SceneStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scene@{:.9}s", self.as_secs_f64())
    }
}

/// One artifact filed under a planning scene.
///
/// The variants mirror what a planning pipeline produces: the scene state
/// itself, per-stage plan requests, trajectories from each source
/// (planner, smoother, filter, execution recording), and per-stage
/// outcomes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlanningRecord {
    /// The robot state the planning scene captured.
    Scene {
        /// Full joint-space state of the scene.
        state: RobotState,
    },
    /// A motion-plan request, tagged with the pipeline stage that issued it.
    PlanRequest {
        /// Stage name (e.g. `"plan"`, `"retry"`).
        stage: String,
        /// The goal state of the request.
        goal: RobotState,
    },
    /// A trajectory, tagged with the source that produced it.
    Trajectory {
        /// Source name (e.g. `"planner"`, `"smoother"`, `"recorded"`).
        source: String,
        /// The trajectory itself.
        trajectory: RobotTrajectory,
    },
    /// The outcome of one pipeline stage.
    Outcome {
        /// Stage the outcome belongs to.
        pipeline_stage: String,
        /// Failure description, or `None` on success.
        error: Option<String>,
    },
}

impl PlanningRecord {
    /// Short name of the artifact family, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scene { .. } => "scene",
            Self::PlanRequest { .. } => "plan request",
            Self::Trajectory { .. } => "trajectory",
            Self::Outcome { .. } => "outcome",
        }
    }
}
