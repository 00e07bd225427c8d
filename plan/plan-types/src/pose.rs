//! Pose values for multi-DOF joints.
//!
//! Planar joints carry an in-plane pose, floating joints a full spatial
//! pose. Both appear as [`JointPose`] values in states and trajectories.

use nalgebra::{Point3, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and orientation of a floating joint in 3D space.
///
/// The orientation is a unit quaternion. The bridge never normalizes
/// quaternions on its own; whoever produces a pose is responsible for
/// supplying a valid unit quaternion.
///
/// # Example
///
/// ```
/// use plan_types::{Point3, Pose};
///
/// let pose = Pose::from_position(Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(pose.position.z, 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Position in the parent frame.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create an identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position only (identity rotation).
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position and rotation.
    #[must_use]
    pub const fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Check if the pose contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }
}

/// In-plane pose of a planar joint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanarPose {
    /// Translation along the plane's first axis.
    pub x: f64,
    /// Translation along the plane's second axis.
    pub y: f64,
    /// Rotation about the plane normal, in radians.
    pub yaw: f64,
}

impl PlanarPose {
    /// Create a planar pose.
    #[must_use]
    pub const fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    /// Create an identity planar pose.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Check if the pose contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.yaw.is_finite()
    }
}

/// Value of one multi-DOF joint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointPose {
    /// In-plane pose of a planar joint.
    Planar(PlanarPose),
    /// Spatial pose of a floating joint.
    Spatial(Pose),
}

impl JointPose {
    /// Get the planar pose, if this is a planar value.
    #[must_use]
    pub const fn as_planar(&self) -> Option<&PlanarPose> {
        match self {
            Self::Planar(pose) => Some(pose),
            Self::Spatial(_) => None,
        }
    }

    /// Get the spatial pose, if this is a spatial value.
    #[must_use]
    pub const fn as_spatial(&self) -> Option<&Pose> {
        match self {
            Self::Spatial(pose) => Some(pose),
            Self::Planar(_) => None,
        }
    }

    /// Check if the value contains `NaN` or `Inf` components.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Planar(pose) => pose.is_finite(),
            Self::Spatial(pose) => pose.is_finite(),
        }
    }
}
