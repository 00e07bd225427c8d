//! Controller bookkeeping and the execution seam.

use hashbrown::HashMap;

use plan_types::JointTrajectory;

use crate::error::{MonitorError, Result};
use crate::recorder::TrajectoryRecorder;

/// Execution state of a trajectory controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Execution suspended.
    Paused,
    /// A goal trajectory is being executed and recorded.
    Executing,
    /// The goal finished; recording continues to capture overshoot.
    Overshooting,
}

/// Window for monitoring overshoot after a trajectory finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvershootWindow {
    /// Velocity magnitude below which the robot counts as settled.
    pub max_velocity_epsilon: f64,
    /// Minimum time to keep recording after the goal, in seconds.
    pub min_time: f64,
    /// Maximum time to keep recording after the goal, in seconds.
    pub max_time: f64,
}

impl OvershootWindow {
    /// Create an overshoot window.
    #[must_use]
    pub const fn new(max_velocity_epsilon: f64, min_time: f64, max_time: f64) -> Self {
        Self {
            max_velocity_epsilon,
            min_time,
            max_time,
        }
    }
}

/// Seam to the controller that actually moves the robot.
///
/// Implementations forward the goal to hardware or simulation and report
/// completion through [`ControllerHandle::finish_execution`]. Cancellation
/// must leave the controller safe to receive a new goal.
pub trait TrajectoryExecutor {
    /// Start executing a goal trajectory.
    fn execute(&mut self, goal: &JointTrajectory) -> Result<()>;

    /// Cancel the goal in flight, if any.
    fn cancel(&mut self);
}

/// Bookkeeping for one group/controller pair.
///
/// Tracks the execution state machine, the last goal, and the recorded and
/// overshoot trajectories assembled from controller feedback. The handle
/// does not talk to hardware itself; a [`TrajectoryExecutor`] does, and the
/// caller wires the two together.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    group_name: String,
    controller_name: String,
    state: ControllerState,
    overshoot: Option<OvershootWindow>,
    goal: JointTrajectory,
    recorder: Option<TrajectoryRecorder>,
    recorded: JointTrajectory,
    overshoot_trajectory: JointTrajectory,
}

impl ControllerHandle {
    /// Create a handle for a group/controller pair.
    #[must_use]
    pub fn new(group_name: impl Into<String>, controller_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            controller_name: controller_name.into(),
            state: ControllerState::Idle,
            overshoot: None,
            goal: JointTrajectory::default(),
            recorder: None,
            recorded: JointTrajectory::default(),
            overshoot_trajectory: JointTrajectory::default(),
        }
    }

    /// Combine group and controller names into the canonical combo name.
    #[must_use]
    pub fn combine_names(group_name: &str, controller_name: &str) -> String {
        format!("{group_name}_{controller_name}")
    }

    /// Get the group name.
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Get the controller name.
    #[must_use]
    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    /// Get the `"<group>_<controller>"` combo name.
    #[must_use]
    pub fn combo_name(&self) -> String {
        Self::combine_names(&self.group_name, &self.controller_name)
    }

    /// Get the current execution state.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Keep recording for a window after each goal finishes.
    pub fn enable_overshoot_monitoring(&mut self, window: OvershootWindow) {
        self.overshoot = Some(window);
    }

    /// Stop monitoring overshoot.
    pub fn disable_overshoot_monitoring(&mut self) {
        self.overshoot = None;
    }

    /// Get the overshoot window, if monitoring is enabled.
    #[must_use]
    pub const fn overshoot_window(&self) -> Option<OvershootWindow> {
        self.overshoot
    }

    /// Start executing a goal: remember it and begin recording.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::EmptyGoal`] if the goal names no joints.
    pub fn begin_execution(&mut self, goal: JointTrajectory) -> Result<()> {
        if goal.joint_names.is_empty() {
            return Err(MonitorError::EmptyGoal);
        }
        tracing::debug!(
            controller = %self.combo_name(),
            points = goal.points.len(),
            "starting trajectory execution"
        );
        self.recorder = Some(TrajectoryRecorder::new(goal.joint_names.clone()));
        self.goal = goal;
        self.state = ControllerState::Executing;
        Ok(())
    }

    /// Record one sample of controller feedback.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::NotExecuting`] outside execution and
    /// overshoot monitoring, and
    /// [`MonitorError::MissingJointSample`] if a goal joint has no reading.
    pub fn record_sample(
        &mut self,
        time: f64,
        positions: &HashMap<String, f64>,
        velocities: &HashMap<String, f64>,
    ) -> Result<()> {
        if !matches!(
            self.state,
            ControllerState::Executing | ControllerState::Overshooting
        ) {
            return Err(MonitorError::NotExecuting);
        }
        match self.recorder.as_mut() {
            Some(recorder) => recorder.add_sample(time, positions, velocities),
            None => Err(MonitorError::NotExecuting),
        }
    }

    /// Mark the goal finished.
    ///
    /// With overshoot monitoring enabled the handle keeps recording into a
    /// fresh overshoot trajectory and moves to
    /// [`ControllerState::Overshooting`]; otherwise it returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::NotExecuting`] if nothing was executing.
    pub fn finish_execution(&mut self) -> Result<()> {
        if self.state != ControllerState::Executing {
            return Err(MonitorError::NotExecuting);
        }
        if let Some(recorder) = self.recorder.take() {
            self.recorded = recorder.into_trajectory();
        }
        if self.overshoot.is_some() {
            self.recorder = Some(TrajectoryRecorder::new(self.goal.joint_names.clone()));
            self.state = ControllerState::Overshooting;
        } else {
            self.state = ControllerState::Idle;
        }
        Ok(())
    }

    /// Finish the overshoot window and return to idle.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::NotExecuting`] if no overshoot window was
    /// open.
    pub fn finish_overshoot(&mut self) -> Result<()> {
        if self.state != ControllerState::Overshooting {
            return Err(MonitorError::NotExecuting);
        }
        if let Some(recorder) = self.recorder.take() {
            self.overshoot_trajectory = recorder.into_trajectory();
        }
        self.state = ControllerState::Idle;
        Ok(())
    }

    /// Pause or resume recording without dropping the goal.
    pub fn set_paused(&mut self, paused: bool) {
        self.state = if paused {
            ControllerState::Paused
        } else if self.recorder.is_some() {
            ControllerState::Executing
        } else {
            ControllerState::Idle
        };
    }

    /// The last goal trajectory handed to execution.
    #[must_use]
    pub const fn last_goal(&self) -> &JointTrajectory {
        &self.goal
    }

    /// The trajectory recorded during the last execution.
    #[must_use]
    pub const fn last_recorded(&self) -> &JointTrajectory {
        &self.recorded
    }

    /// The trajectory recorded during the last overshoot window.
    #[must_use]
    pub const fn last_overshoot(&self) -> &JointTrajectory {
        &self.overshoot_trajectory
    }
}
