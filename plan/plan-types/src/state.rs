//! Robot configuration snapshots in joint space.
//!
//! A [`RobotState`] has two sections: scalar positions for single-DOF
//! joints, and full pose values for multi-DOF joints. Each section pairs a
//! name list with a value list of the same length.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GroupError, Result};
use crate::group::JointGroup;
use crate::joint::JointType;
use crate::pose::{JointPose, PlanarPose, Pose};

/// Scalar section of a robot state: one position per single-DOF joint.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarJointState {
    /// Joint names, parallel to `positions`.
    pub names: Vec<String>,
    /// Joint positions (radians or meters).
    pub positions: Vec<f64>,
}

impl ScalarJointState {
    /// Create a section from parallel name and position lists.
    #[must_use]
    pub const fn new(names: Vec<String>, positions: Vec<f64>) -> Self {
        Self { names, positions }
    }

    /// Create a zeroed section for the given joint names.
    #[must_use]
    pub fn zeroed(names: Vec<String>) -> Self {
        let positions = vec![0.0; names.len()];
        Self { names, positions }
    }

    /// Get the number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the section is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the position of a joint by name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == name)?;
        self.positions.get(i).copied()
    }

    /// Set the position of a joint by name.
    ///
    /// Returns `false` if the joint is not in this section.
    pub fn set_position(&mut self, name: &str, position: f64) -> bool {
        let Some(i) = self.names.iter().position(|n| n == name) else {
            return false;
        };
        match self.positions.get_mut(i) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Check that the name and position lists have equal length.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.names.len() == self.positions.len()
    }
}

/// Pose section of a robot state: one pose per multi-DOF joint.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiDofJointState {
    /// Joint names, parallel to `poses`.
    pub names: Vec<String>,
    /// Joint pose values.
    pub poses: Vec<JointPose>,
}

impl MultiDofJointState {
    /// Create a section from parallel name and pose lists.
    #[must_use]
    pub const fn new(names: Vec<String>, poses: Vec<JointPose>) -> Self {
        Self { names, poses }
    }

    /// Get the number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the section is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the pose of a joint by name.
    #[must_use]
    pub fn pose(&self, name: &str) -> Option<&JointPose> {
        let i = self.names.iter().position(|n| n == name)?;
        self.poses.get(i)
    }

    /// Set the pose of a joint by name.
    ///
    /// Returns `false` if the joint is not in this section.
    pub fn set_pose(&mut self, name: &str, pose: JointPose) -> bool {
        let Some(i) = self.names.iter().position(|n| n == name) else {
            return false;
        };
        match self.poses.get_mut(i) {
            Some(slot) => {
                *slot = pose;
                true
            }
            None => false,
        }
    }

    /// Check that the name and pose lists have equal length.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.names.len() == self.poses.len()
    }
}

/// Snapshot of a robot's configuration in joint space.
///
/// States are transient: one is created per planning request, converted, and
/// discarded (or handed to the logging collaborator).
///
/// # Example
///
/// ```
/// use plan_types::{Joint, JointGroup, RobotState};
///
/// let group = JointGroup::new(
///     "arm",
///     vec![Joint::continuous("shoulder"), Joint::revolute("elbow", 0.0, 3.0)],
/// )
/// .expect("unique names");
///
/// let mut state = RobotState::for_group(&group).expect("plannable group");
/// state.joint_state.set_position("elbow", 1.2);
/// assert_eq!(state.position("elbow"), Some(1.2));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotState {
    /// Positions of the single-DOF joints.
    pub joint_state: ScalarJointState,
    /// Poses of the multi-DOF joints.
    pub multi_dof: MultiDofJointState,
}

impl RobotState {
    /// Create a state from its two sections.
    #[must_use]
    pub const fn new(joint_state: ScalarJointState, multi_dof: MultiDofJointState) -> Self {
        Self {
            joint_state,
            multi_dof,
        }
    }

    /// Create a zeroed state laid out for a joint group.
    ///
    /// Single-DOF joints fill the scalar section and multi-DOF joints the
    /// pose section, each in group declaration order. Planar joints start at
    /// the identity planar pose, floating joints at the identity spatial
    /// pose.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::UnsupportedJointType`] if the group contains a
    /// fixed joint; fixed joints have no state to snapshot.
    pub fn for_group(group: &JointGroup) -> Result<Self> {
        let mut scalar_names = Vec::new();
        let mut multi_names = Vec::new();
        let mut poses = Vec::new();
        for joint in group.joints() {
            match joint.joint_type {
                JointType::Revolute | JointType::Continuous | JointType::Prismatic => {
                    scalar_names.push(joint.name.clone());
                }
                JointType::Planar => {
                    multi_names.push(joint.name.clone());
                    poses.push(JointPose::Planar(PlanarPose::identity()));
                }
                JointType::Floating => {
                    multi_names.push(joint.name.clone());
                    poses.push(JointPose::Spatial(Pose::identity()));
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
            joint_state: ScalarJointState::zeroed(scalar_names),
            multi_dof: MultiDofJointState::new(multi_names, poses),
        })
    }

    /// Get a single-DOF joint's position by name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<f64> {
        self.joint_state.position(name)
    }

    /// Get a multi-DOF joint's pose by name.
    #[must_use]
    pub fn pose(&self, name: &str) -> Option<&JointPose> {
        self.multi_dof.pose(name)
    }

    /// Check that both sections pair names and values one to one.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.joint_state.is_consistent() && self.multi_dof.is_consistent()
    }
}
