//! Joint-space trajectories.
//!
//! A trajectory pairs name lists with a sequence of timed points, split into
//! the same two sections as [`RobotState`](crate::RobotState): scalar
//! positions for single-DOF joints and pose values for multi-DOF joints.
//!
//! The name lists double as the pre-sizing contract for trajectory
//! conversion: conversion refuses to run until they are filled in, normally
//! via [`RobotTrajectory::for_group`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GroupError, Result};
use crate::group::JointGroup;
use crate::joint::JointType;
use crate::pose::JointPose;

/// One timed point of a single-DOF joint trajectory.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointTrajectoryPoint {
    /// Positions, parallel to the trajectory's joint names.
    pub positions: Vec<f64>,
    /// Velocities, parallel to the joint names; empty if unknown.
    pub velocities: Vec<f64>,
    /// Time from the start of the trajectory, in seconds.
    pub time_from_start: f64,
}

impl JointTrajectoryPoint {
    /// Create a point holding the given positions at time zero.
    #[must_use]
    pub const fn new(positions: Vec<f64>) -> Self {
        Self {
            positions,
            velocities: Vec::new(),
            time_from_start: 0.0,
        }
    }

    /// Create a zeroed point for the given number of joints.
    #[must_use]
    pub fn zeroed(joint_count: usize) -> Self {
        Self::new(vec![0.0; joint_count])
    }
}

/// Trajectory over the single-DOF joints of a group.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointTrajectory {
    /// Names of the joints each point spans.
    pub joint_names: Vec<String>,
    /// Timed points, in trajectory order.
    pub points: Vec<JointTrajectoryPoint>,
}

impl JointTrajectory {
    /// Create an empty trajectory over the given joints.
    #[must_use]
    pub const fn new(joint_names: Vec<String>) -> Self {
        Self {
            joint_names,
            points: Vec::new(),
        }
    }

    /// Get the index of a joint in this trajectory's point layout.
    #[must_use]
    pub fn joint_index(&self, name: &str) -> Option<usize> {
        self.joint_names.iter().position(|n| n == name)
    }

    /// Check if the per-point timestamps never decrease.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].time_from_start <= w[1].time_from_start)
    }
}

/// One timed point of a multi-DOF joint trajectory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiDofTrajectoryPoint {
    /// Poses, parallel to the trajectory's joint names.
    pub poses: Vec<JointPose>,
    /// Time from the start of the trajectory, in seconds.
    pub time_from_start: f64,
}

impl MultiDofTrajectoryPoint {
    /// Create a point holding the given poses at time zero.
    #[must_use]
    pub const fn new(poses: Vec<JointPose>) -> Self {
        Self {
            poses,
            time_from_start: 0.0,
        }
    }
}

/// Trajectory over the multi-DOF joints of a group.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiDofJointTrajectory {
    /// Names of the joints each point spans.
    pub joint_names: Vec<String>,
    /// Timed points, in trajectory order.
    pub points: Vec<MultiDofTrajectoryPoint>,
}

impl MultiDofJointTrajectory {
    /// Create an empty trajectory over the given joints.
    #[must_use]
    pub const fn new(joint_names: Vec<String>) -> Self {
        Self {
            joint_names,
            points: Vec::new(),
        }
    }

    /// Get the index of a joint in this trajectory's point layout.
    #[must_use]
    pub fn joint_index(&self, name: &str) -> Option<usize> {
        self.joint_names.iter().position(|n| n == name)
    }

    /// Check if the per-point timestamps never decrease.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].time_from_start <= w[1].time_from_start)
    }
}

/// Joint-space trajectory spanning both joint sections.
///
/// # Example
///
/// ```
/// use plan_types::{Joint, JointGroup, RobotTrajectory};
///
/// let group = JointGroup::new(
///     "arm",
///     vec![Joint::continuous("shoulder"), Joint::revolute("elbow", 0.0, 3.0)],
/// )
/// .expect("unique names");
///
/// let trajectory = RobotTrajectory::for_group(&group).expect("plannable group");
/// assert!(trajectory.is_initialized());
/// assert_eq!(trajectory.joint_trajectory.joint_names.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotTrajectory {
    /// Trajectory of the single-DOF joints.
    pub joint_trajectory: JointTrajectory,
    /// Trajectory of the multi-DOF joints.
    pub multi_dof: MultiDofJointTrajectory,
}

impl RobotTrajectory {
    /// Create an empty, uninitialized trajectory.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Initialize a trajectory's name lists from a joint group.
    ///
    /// Single-DOF joints feed the joint trajectory, planar and floating
    /// joints the multi-DOF trajectory, each in group declaration order. No
    /// points are created.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::UnsupportedJointType`] if the group contains a
    /// fixed joint.
    pub fn for_group(group: &JointGroup) -> Result<Self> {
        let mut scalar_names = Vec::new();
        let mut multi_names = Vec::new();
        for joint in group.joints() {
            match joint.joint_type {
                JointType::Revolute | JointType::Continuous | JointType::Prismatic => {
                    scalar_names.push(joint.name.clone());
                }
                JointType::Planar | JointType::Floating => {
                    multi_names.push(joint.name.clone());
                }
                JointType::Fixed => {
                    return Err(GroupError::unsupported_joint(
                        joint.name.clone(),
                        JointType::Fixed,
                    ));
                }
            }
        }
        Ok(Self {
            joint_trajectory: JointTrajectory::new(scalar_names),
            multi_dof: MultiDofJointTrajectory::new(multi_names),
        })
    }

    /// Check if the name lists have been filled in.
    ///
    /// Conversion into a trajectory requires this and fails otherwise.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.joint_trajectory.joint_names.is_empty() || !self.multi_dof.joint_names.is_empty()
    }

    /// Get the number of points in the longer section.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.joint_trajectory
            .points
            .len()
            .max(self.multi_dof.points.len())
    }

    /// Check if the per-point timestamps never decrease in either section.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.joint_trajectory.is_monotonic() && self.multi_dof.is_monotonic()
    }
}
