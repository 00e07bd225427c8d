//! Trajectory execution and recording interface.
//!
//! Converted trajectories leave the bridge as goals; what comes back from
//! the robot is a stream of per-joint readings. This crate defines the seam
//! between the two:
//!
//! - [`TrajectoryExecutor`] - the trait a real controller implements
//! - [`ControllerHandle`] - per group/controller bookkeeping: execution
//!   state machine, goal tracking, optional overshoot monitoring
//! - [`TrajectoryRecorder`] - reassembles recorded readings into a
//!   trajectory in goal joint order
//! - [`OvershootWindow`] - how long to keep recording after a goal finishes
//!
//! No conversion responsibility crosses this boundary: goals arrive already
//! in joint space, and recorded trajectories stay in joint space.
//!
//! # Example
//!
//! ```
//! use plan_monitor::ControllerHandle;
//! use plan_types::{JointTrajectory, JointTrajectoryPoint};
//!
//! let mut handle = ControllerHandle::new("right_arm", "follow_joint_trajectory");
//! assert_eq!(handle.combo_name(), "right_arm_follow_joint_trajectory");
//!
//! let mut goal = JointTrajectory::new(vec!["elbow".to_owned()]);
//! goal.points.push(JointTrajectoryPoint::new(vec![1.0]));
//! handle.begin_execution(goal).expect("goal has joints");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod controller;
mod error;
mod recorder;

pub use controller::{ControllerHandle, ControllerState, OvershootWindow, TrajectoryExecutor};
pub use error::{MonitorError, Result};
pub use recorder::TrajectoryRecorder;
