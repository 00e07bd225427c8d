//! Joint-space data types for the motion-planning bridge.
//!
//! This crate provides the flat, named-joint representation of a robot's
//! configuration shared by everything on the robot side of the planning
//! pipeline:
//!
//! - [`Joint`], [`JointType`], [`JointBounds`] - joint descriptions
//! - [`JointGroup`], [`GroupRegistry`] - ordered planning groups
//! - [`Pose`], [`PlanarPose`], [`JointPose`] - multi-DOF joint values
//! - [`RobotState`] - a configuration snapshot in joint space
//! - [`RobotTrajectory`] - timed sequences of configurations
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no planning behavior and no
//! knowledge of any state-space geometry. They're the common language
//! between:
//!
//! - Robot description loaders (which produce joints and groups)
//! - The state-space bridge (`plan-manifold`, which maps them onto a
//!   planner's composite manifold)
//! - Logging and replay (`plan-warehouse`, serialized snapshots)
//! - Trajectory execution (`plan-monitor`, goals and recorded states)
//!
//! Joints, groups, and registries are built once when the robot description
//! is loaded and are read-only afterwards. States and trajectories are
//! transient, created per planning request.
//!
//! # Example
//!
//! ```
//! use plan_types::{Joint, JointGroup, RobotState};
//!
//! let group = JointGroup::new(
//!     "arm",
//!     vec![
//!         Joint::continuous("shoulder"),
//!         Joint::revolute("elbow", 0.0, 3.14),
//!     ],
//! )
//! .expect("unique joint names");
//!
//! let state = RobotState::for_group(&group).expect("plannable group");
//! assert_eq!(state.joint_state.names, vec!["shoulder", "elbow"]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod group;
mod joint;
mod pose;
mod state;
mod trajectory;

pub use error::{GroupError, Result};
pub use group::{GroupRegistry, JointGroup};
pub use joint::{Joint, JointBounds, JointType};
pub use pose::{JointPose, PlanarPose, Pose};
pub use state::{MultiDofJointState, RobotState, ScalarJointState};
pub use trajectory::{
    JointTrajectory, JointTrajectoryPoint, MultiDofJointTrajectory, MultiDofTrajectoryPoint,
    RobotTrajectory,
};

// Re-export math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
