//! State and trajectory conversion.
//!
//! Conversion applies a previously built mapping; it never searches names
//! itself. Each direction dispatches per submanifold or joint on the
//! mapping's typed targets. Unmapped targets are skipped in both
//! directions, which is what makes permissive partial-state conversion
//! work: untouched slots keep whatever values they already had.
//!
//! Angles are normalized into `(-π, π]` when written into the manifold and
//! copied back verbatim. Quaternions pass through untouched in both
//! directions; supplying unit quaternions is the caller's responsibility.

use std::f64::consts::PI;

use plan_types::{
    JointPose, JointTrajectoryPoint, MultiDofTrajectoryPoint, Pose, RobotState, RobotTrajectory,
};

use crate::error::{MappingError, Result};
use crate::manifold::CompositeManifold;
use crate::mapping::{ManifoldMapping, ScalarTarget, StateMapping, SubmanifoldSource};
use crate::state::{CompositeState, SubstateValue};

/// Normalize an angle into the canonical `(-π, π]` range.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut normalized = angle % two_pi;
    if normalized <= -PI {
        normalized += two_pi;
    } else if normalized > PI {
        normalized -= two_pi;
    }
    normalized
}

/// Convert a robot state into a composite state through a mapping.
///
/// Mapped angular joints are normalized into `(-π, π]` before storing;
/// real-vector slots and poses are copied verbatim. Unmapped joints are
/// skipped and their target slots left untouched.
///
/// # Errors
///
/// Returns [`MappingError::StateMismatch`] if the state's section lengths
/// or the composite's value kinds do not line up with the mapping.
pub fn robot_state_to_composite(
    state: &RobotState,
    mapping: &StateMapping,
    composite: &mut CompositeState,
) -> Result<()> {
    write_joint_values(
        &state.joint_state.positions,
        &state.multi_dof.poses,
        mapping,
        composite,
    )
}

/// Convert a composite state back into a robot state through a mapping.
///
/// Angular values are copied verbatim (no re-normalization). The real
/// vector fans out through the dense slot-to-joint table. Submanifolds with
/// no source are skipped.
///
/// # Errors
///
/// Returns [`MappingError::StateMismatch`] if the composite's layout does
/// not match the mapping, or a mapped joint index is out of range for the
/// state.
pub fn composite_to_robot_state(
    composite: &CompositeState,
    mapping: &ManifoldMapping,
    state: &mut RobotState,
) -> Result<()> {
    let (positions, poses) = (
        &mut state.joint_state.positions,
        &mut state.multi_dof.poses,
    );
    read_composite_values(composite, mapping, positions, poses)
}

/// Convert a manifold path into a robot trajectory through a mapping.
///
/// The destination trajectory must already carry its joint-name lists
/// (normally via [`RobotTrajectory::for_group`]); its points are replaced.
/// Every point's `time_from_start` is set to zero - assigning timing is a
/// collaborator's job, after conversion. Points are converted
/// independently, in path order.
///
/// Pose slots whose joints stay unmapped keep identity spatial poses.
///
/// # Errors
///
/// Returns [`MappingError::UninitializedTrajectory`] (before touching any
/// point) if the name lists are empty, or [`MappingError::StateMismatch`]
/// if a point's layout does not match the mapping.
pub fn manifold_path_to_robot_trajectory(
    path: &[CompositeState],
    mapping: &ManifoldMapping,
    trajectory: &mut RobotTrajectory,
) -> Result<()> {
    if !trajectory.is_initialized() {
        return Err(MappingError::UninitializedTrajectory);
    }
    let scalar_count = trajectory.joint_trajectory.joint_names.len();
    let pose_count = trajectory.multi_dof.joint_names.len();

    trajectory.joint_trajectory.points.clear();
    trajectory.multi_dof.points.clear();
    if scalar_count > 0 {
        trajectory.joint_trajectory.points.reserve(path.len());
    }
    if pose_count > 0 {
        trajectory.multi_dof.points.reserve(path.len());
    }

    for composite in path {
        let mut positions = vec![0.0; scalar_count];
        let mut poses = vec![JointPose::Spatial(Pose::identity()); pose_count];
        read_composite_values(composite, mapping, &mut positions, &mut poses)?;

        if scalar_count > 0 {
            trajectory.joint_trajectory.points.push(JointTrajectoryPoint {
                positions,
                velocities: Vec::new(),
                time_from_start: 0.0,
            });
        }
        if pose_count > 0 {
            trajectory.multi_dof.points.push(MultiDofTrajectoryPoint {
                poses,
                time_from_start: 0.0,
            });
        }
    }
    Ok(())
}

/// Convert a robot trajectory into a manifold path through a mapping.
///
/// One composite state is produced per trajectory point, zeroed from the
/// descriptor and then written through the mapping, in point order.
///
/// # Errors
///
/// Returns [`MappingError::UninitializedTrajectory`] if the trajectory's
/// name lists are empty, and [`MappingError::StateMismatch`] if the two
/// sections carry different point counts or a point's layout does not match
/// the mapping.
pub fn robot_trajectory_to_manifold_path(
    trajectory: &RobotTrajectory,
    mapping: &StateMapping,
    manifold: &CompositeManifold,
) -> Result<Vec<CompositeState>> {
    if !trajectory.is_initialized() {
        return Err(MappingError::UninitializedTrajectory);
    }
    let scalar_points = &trajectory.joint_trajectory.points;
    let multi_points = &trajectory.multi_dof.points;

    let has_scalar = !trajectory.joint_trajectory.joint_names.is_empty();
    let has_multi = !trajectory.multi_dof.joint_names.is_empty();
    if has_scalar && has_multi && scalar_points.len() != multi_points.len() {
        return Err(MappingError::state_mismatch(
            "trajectory sections carry different point counts",
        ));
    }
    let count = if has_scalar {
        scalar_points.len()
    } else {
        multi_points.len()
    };

    let mut path = Vec::with_capacity(count);
    for i in 0..count {
        let positions = scalar_points
            .get(i)
            .map_or(&[] as &[f64], |p| p.positions.as_slice());
        let poses = multi_points
            .get(i)
            .map_or(&[] as &[JointPose], |p| p.poses.as_slice());

        let mut composite = CompositeState::zeroed(manifold);
        write_joint_values(positions, poses, mapping, &mut composite)?;
        path.push(composite);
    }
    Ok(path)
}

/// Write joint-space values into a composite state through a mapping.
fn write_joint_values(
    positions: &[f64],
    poses: &[JointPose],
    mapping: &StateMapping,
    composite: &mut CompositeState,
) -> Result<()> {
    if positions.len() != mapping.scalar_targets().len() {
        return Err(MappingError::state_mismatch(
            "scalar section length does not match mapping",
        ));
    }
    if poses.len() != mapping.pose_targets().len() {
        return Err(MappingError::state_mismatch(
            "multi-DOF section length does not match mapping",
        ));
    }

    for (position, target) in positions.iter().zip(mapping.scalar_targets()) {
        let Some(target) = target else { continue };
        match *target {
            ScalarTarget::Angular { submanifold } => {
                match composite.value_mut(submanifold) {
                    Some(SubstateValue::Angular(value)) => *value = normalize_angle(*position),
                    _ => {
                        return Err(MappingError::state_mismatch(
                            "angular target does not hold an angular value",
                        ));
                    }
                }
            }
            ScalarTarget::VectorSlot { slot } => {
                let Some(index) = mapping.real_vector_index() else {
                    return Err(MappingError::state_mismatch(
                        "vector slot mapped without a real-vector submanifold",
                    ));
                };
                match composite.value_mut(index) {
                    Some(SubstateValue::RealVector(values)) => match values.get_mut(slot) {
                        Some(value) => *value = *position,
                        None => {
                            return Err(MappingError::state_mismatch(
                                "real-vector slot out of range",
                            ));
                        }
                    },
                    _ => {
                        return Err(MappingError::state_mismatch(
                            "real-vector target does not hold a real vector",
                        ));
                    }
                }
            }
        }
    }

    for (pose, target) in poses.iter().zip(mapping.pose_targets()) {
        let Some(target) = target else { continue };
        match (composite.value_mut(target.submanifold), pose) {
            (Some(SubstateValue::PlanarPose(value)), JointPose::Planar(planar)) => {
                *value = *planar;
            }
            (Some(SubstateValue::SpatialPose(value)), JointPose::Spatial(spatial)) => {
                *value = *spatial;
            }
            _ => {
                return Err(MappingError::state_mismatch(
                    "pose value kind does not match its target submanifold",
                ));
            }
        }
    }
    Ok(())
}

/// Read a composite state out into joint-space value slices.
fn read_composite_values(
    composite: &CompositeState,
    mapping: &ManifoldMapping,
    positions: &mut [f64],
    poses: &mut [JointPose],
) -> Result<()> {
    if composite.len() != mapping.sources().len() {
        return Err(MappingError::state_mismatch(
            "composite state length does not match mapping",
        ));
    }

    for (value, source) in composite.values().iter().zip(mapping.sources()) {
        match value {
            SubstateValue::Angular(angle) => match source {
                Some(SubmanifoldSource::ScalarJoint(joint)) => {
                    match positions.get_mut(*joint) {
                        Some(slot) => *slot = *angle,
                        None => {
                            return Err(MappingError::state_mismatch(
                                "mapped scalar joint out of range",
                            ));
                        }
                    }
                }
                Some(SubmanifoldSource::MultiDofJoint(_)) => {
                    return Err(MappingError::state_mismatch(
                        "angular submanifold mapped to a multi-DOF joint",
                    ));
                }
                None => {}
            },
            SubstateValue::PlanarPose(planar) => {
                write_pose_source(*source, JointPose::Planar(*planar), poses)?;
            }
            SubstateValue::SpatialPose(spatial) => {
                write_pose_source(*source, JointPose::Spatial(*spatial), poses)?;
            }
            SubstateValue::RealVector(values) => {
                for (slot, joint) in mapping.vector_slots().iter().enumerate() {
                    let Some(value) = values.get(slot) else {
                        return Err(MappingError::state_mismatch(
                            "real vector shorter than its slot table",
                        ));
                    };
                    match positions.get_mut(*joint) {
                        Some(position) => *position = *value,
                        None => {
                            return Err(MappingError::state_mismatch(
                                "mapped real-vector joint out of range",
                            ));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn write_pose_source(
    source: Option<SubmanifoldSource>,
    pose: JointPose,
    poses: &mut [JointPose],
) -> Result<()> {
    match source {
        Some(SubmanifoldSource::MultiDofJoint(joint)) => match poses.get_mut(joint) {
            Some(slot) => {
                *slot = pose;
                Ok(())
            }
            None => Err(MappingError::state_mismatch(
                "mapped multi-DOF joint out of range",
            )),
        },
        Some(SubmanifoldSource::ScalarJoint(_)) => Err(MappingError::state_mismatch(
            "pose submanifold mapped to a scalar joint",
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_into_half_open_range() {
        assert_relative_eq!(normalize_angle(0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(4.0), 4.0 - 2.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-4.0), 2.0 * PI - 4.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(5.0 * PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn normalized_angles_stay_in_range() {
        for i in -100..100 {
            let angle = f64::from(i) * 0.37;
            let normalized = normalize_angle(angle);
            assert!(normalized > -PI && normalized <= PI, "angle {angle}");
            // Same direction on the unit circle.
            assert_relative_eq!(normalized.sin(), angle.sin(), epsilon = 1e-9);
            assert_relative_eq!(normalized.cos(), angle.cos(), epsilon = 1e-9);
        }
    }
}
