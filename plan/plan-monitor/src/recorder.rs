//! Recorded-trajectory assembly.
//!
//! Controllers report joint readings as unordered name-to-value maps. The
//! recorder turns that stream back into a [`JointTrajectory`] whose point
//! layout follows the goal's joint order, so recorded and goal trajectories
//! line up index for index.

use hashbrown::HashMap;

use plan_types::{JointTrajectory, JointTrajectoryPoint};

use crate::error::{MonitorError, Result};

/// Rebuilds a trajectory from per-sample joint readings.
///
/// The first sample anchors time zero; every later sample's
/// `time_from_start` is measured from it.
#[derive(Debug, Clone)]
pub struct TrajectoryRecorder {
    start_time: Option<f64>,
    trajectory: JointTrajectory,
}

impl TrajectoryRecorder {
    /// Create a recorder for the given joints, in goal order.
    #[must_use]
    pub const fn new(joint_names: Vec<String>) -> Self {
        Self {
            start_time: None,
            trajectory: JointTrajectory::new(joint_names),
        }
    }

    /// Append one sample of recorded joint readings.
    ///
    /// `time` is an absolute clock reading in seconds. Every joint the
    /// recorder tracks must appear in `positions`; joints without a
    /// velocity reading default to zero velocity.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::MissingJointSample`] if a tracked joint has
    /// no position reading; the sample is discarded whole.
    pub fn add_sample(
        &mut self,
        time: f64,
        positions: &HashMap<String, f64>,
        velocities: &HashMap<String, f64>,
    ) -> Result<()> {
        let mut point = JointTrajectoryPoint::zeroed(self.trajectory.joint_names.len());
        point.velocities = vec![0.0; self.trajectory.joint_names.len()];
        for (i, name) in self.trajectory.joint_names.iter().enumerate() {
            match positions.get(name) {
                Some(&position) => point.positions[i] = position,
                None => return Err(MonitorError::missing_joint(name.clone())),
            }
            if let Some(&velocity) = velocities.get(name) {
                point.velocities[i] = velocity;
            }
        }

        let start = *self.start_time.get_or_insert(time);
        point.time_from_start = time - start;
        self.trajectory.points.push(point);
        Ok(())
    }

    /// The recorded trajectory so far.
    #[must_use]
    pub const fn trajectory(&self) -> &JointTrajectory {
        &self.trajectory
    }

    /// Take the recorded trajectory, leaving the recorder empty.
    #[must_use]
    pub fn into_trajectory(self) -> JointTrajectory {
        self.trajectory
    }

    /// Get the number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trajectory.points.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trajectory.points.is_empty()
    }

    /// Index of the recorded point closest to a `time_from_start`.
    ///
    /// Returns `None` when nothing has been recorded. Used to find where an
    /// overshoot window begins in the recorded stream.
    #[must_use]
    pub fn closest_index(&self, time_from_start: f64) -> Option<usize> {
        self.trajectory
            .points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (a.time_from_start - time_from_start).abs();
                let db = (b.time_from_start - time_from_start).abs();
                da.total_cmp(&db)
            })
            .map(|(i, _)| i)
    }
}
