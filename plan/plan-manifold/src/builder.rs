//! Composite-manifold construction from joint groups.
//!
//! One pass over the group in declaration order: continuous joints emit
//! angular submanifolds, planar and floating joints emit pose submanifolds,
//! and bounded scalar joints accumulate into a single real vector that is
//! appended last. Both mapping directions are assembled during the same
//! pass, so a build hands back everything a conversion pipeline needs.

use plan_types::{Joint, JointGroup};

use crate::error::Result;
use crate::manifold::{
    CompositeManifold, RealVectorDimension, Submanifold, SubmanifoldKind,
};
use crate::mapping::{
    ManifoldMapping, PoseTarget, ScalarTarget, StateMapping, SubmanifoldSource,
};

/// Everything produced by one manifold build.
#[derive(Debug, Clone)]
pub struct ManifoldBuild {
    /// The composite state-space descriptor.
    pub manifold: CompositeManifold,
    /// Joint-space to manifold correspondence, in group order.
    pub state_mapping: StateMapping,
    /// Manifold to joint-space correspondence.
    pub manifold_mapping: ManifoldMapping,
}

/// Build a composite manifold and both mappings for a joint group.
///
/// The real vector's dimension order is the visitation order of the bounded
/// scalar joints that fed it; slot indices handed out here stay valid for
/// the lifetime of the descriptor.
///
/// # Errors
///
/// Returns [`MappingError::UnclassifiableJoint`](crate::MappingError::UnclassifiableJoint)
/// if the group contains a joint with no state-space representation, and
/// [`MappingError::AmbiguousName`](crate::MappingError::AmbiguousName) if
/// two submanifolds would share a name.
pub fn build_manifold(group: &JointGroup) -> Result<ManifoldBuild> {
    let mut submanifolds = Vec::new();
    let mut pending_dimensions: Vec<RealVectorDimension> = Vec::new();
    let mut pending_slot_joints: Vec<usize> = Vec::new();

    let mut scalar_targets = Vec::new();
    let mut pose_targets = Vec::new();
    let mut sources = Vec::new();

    for joint in group.joints() {
        match SubmanifoldKind::for_joint(joint)? {
            SubmanifoldKind::Angular => {
                submanifolds.push(Submanifold::angular(&joint.name));
                let submanifold = submanifolds.len() - 1;
                sources.push(Some(SubmanifoldSource::ScalarJoint(scalar_targets.len())));
                scalar_targets.push(Some(ScalarTarget::Angular { submanifold }));
                tracing::debug!(joint = %joint.name, "added angular submanifold");
            }
            SubmanifoldKind::PlanarPose => {
                submanifolds.push(Submanifold::planar_pose(&joint.name));
                let submanifold = submanifolds.len() - 1;
                sources.push(Some(SubmanifoldSource::MultiDofJoint(pose_targets.len())));
                pose_targets.push(Some(PoseTarget {
                    submanifold,
                    kind: SubmanifoldKind::PlanarPose,
                }));
                tracing::debug!(joint = %joint.name, "added planar-pose submanifold");
            }
            SubmanifoldKind::SpatialPose => {
                submanifolds.push(Submanifold::spatial_pose(&joint.name));
                let submanifold = submanifolds.len() - 1;
                sources.push(Some(SubmanifoldSource::MultiDofJoint(pose_targets.len())));
                pose_targets.push(Some(PoseTarget {
                    submanifold,
                    kind: SubmanifoldKind::SpatialPose,
                }));
                tracing::debug!(joint = %joint.name, "added spatial-pose submanifold");
            }
            SubmanifoldKind::RealVector => {
                let bounds = joint.bounds_or_unbounded();
                let slot = pending_dimensions.len();
                pending_dimensions.push(RealVectorDimension::new(
                    &joint.name,
                    bounds.lower,
                    bounds.upper,
                ));
                pending_slot_joints.push(scalar_targets.len());
                scalar_targets.push(Some(ScalarTarget::VectorSlot { slot }));
                tracing::debug!(
                    joint = %joint.name,
                    slot,
                    lower = bounds.lower,
                    upper = bounds.upper,
                    "added real-vector dimension"
                );
            }
        }
    }

    let mut real_vector_index = None;
    if !pending_dimensions.is_empty() {
        submanifolds.push(Submanifold::real_vector(pending_dimensions));
        real_vector_index = Some(submanifolds.len() - 1);
        // The real vector as a whole has no single source joint; its slots
        // fan out through the dense table instead.
        sources.push(None);
    }

    let manifold = CompositeManifold::new(submanifolds)?;
    let state_mapping = StateMapping::from_parts(scalar_targets, pose_targets, real_vector_index);
    let manifold_mapping =
        ManifoldMapping::from_parts(sources, pending_slot_joints, real_vector_index);

    Ok(ManifoldBuild {
        manifold,
        state_mapping,
        manifold_mapping,
    })
}

/// Extend a descriptor with one more joint, returning a new descriptor.
///
/// Continuous, planar, and floating joints append a new submanifold named
/// after the joint. Bounded scalar joints append a dimension to the real
/// vector, creating it if the descriptor had none. The original descriptor
/// is left untouched.
///
/// # Errors
///
/// Returns [`MappingError::UnclassifiableJoint`](crate::MappingError::UnclassifiableJoint)
/// for joints with no state-space representation, and
/// [`MappingError::AmbiguousName`](crate::MappingError::AmbiguousName) if
/// the joint's name is already taken.
pub fn extend_with_joint(
    manifold: &CompositeManifold,
    joint: &Joint,
) -> Result<CompositeManifold> {
    let mut submanifolds = manifold.submanifolds().to_vec();
    match SubmanifoldKind::for_joint(joint)? {
        SubmanifoldKind::Angular => {
            submanifolds.push(Submanifold::angular(&joint.name));
        }
        SubmanifoldKind::PlanarPose => {
            submanifolds.push(Submanifold::planar_pose(&joint.name));
        }
        SubmanifoldKind::SpatialPose => {
            submanifolds.push(Submanifold::spatial_pose(&joint.name));
        }
        SubmanifoldKind::RealVector => {
            let bounds = joint.bounds_or_unbounded();
            let dimension = RealVectorDimension::new(&joint.name, bounds.lower, bounds.upper);
            match manifold.real_vector_index() {
                Some(i) => {
                    let mut dimensions = submanifolds[i].dimensions().to_vec();
                    dimensions.push(dimension);
                    submanifolds[i] = Submanifold::real_vector(dimensions);
                }
                None => submanifolds.push(Submanifold::real_vector(vec![dimension])),
            }
        }
    }
    CompositeManifold::new(submanifolds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use approx::assert_relative_eq;
    use plan_types::JointType;

    fn warehouse_arm() -> JointGroup {
        JointGroup::new(
            "arm",
            vec![
                Joint::continuous("shoulder"),
                Joint::revolute("elbow", 0.0, 3.14),
                Joint::revolute("wrist", -1.0, 1.0),
            ],
        )
        .expect("unique names")
    }

    #[test]
    fn build_folds_bounded_scalars_into_one_real_vector() {
        let build = build_manifold(&warehouse_arm()).expect("plannable group");
        let manifold = &build.manifold;

        assert_eq!(manifold.len(), 2);
        assert_eq!(manifold.submanifolds()[0].name(), "shoulder");
        assert_eq!(
            manifold.submanifolds()[0].kind(),
            SubmanifoldKind::Angular
        );

        let rv = manifold.real_vector().expect("real vector present");
        assert_eq!(rv.name(), "real_vector");
        let names: Vec<_> = rv.dimensions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["elbow", "wrist"]);
        assert_relative_eq!(rv.dimensions()[0].upper, 3.14, epsilon = 1e-12);
        assert_relative_eq!(rv.dimensions()[1].lower, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn build_assigns_slots_in_visitation_order() {
        let build = build_manifold(&warehouse_arm()).expect("plannable group");
        assert_eq!(
            build.state_mapping.scalar_targets(),
            &[
                Some(ScalarTarget::Angular { submanifold: 0 }),
                Some(ScalarTarget::VectorSlot { slot: 0 }),
                Some(ScalarTarget::VectorSlot { slot: 1 }),
            ]
        );
        assert_eq!(build.manifold_mapping.vector_slots(), &[1, 2]);
        assert_eq!(build.manifold_mapping.real_vector_index(), Some(1));
    }

    #[test]
    fn build_without_bounded_scalars_has_no_real_vector() {
        let group = JointGroup::new(
            "free",
            vec![Joint::continuous("spin"), Joint::floating("body")],
        )
        .expect("unique names");
        let build = build_manifold(&group).expect("plannable group");
        assert!(build.manifold.real_vector().is_none());
        assert_eq!(build.manifold.len(), 2);
        assert!(build.manifold_mapping.vector_slots().is_empty());
    }

    #[test]
    fn build_fails_on_fixed_joint() {
        let group = JointGroup::new(
            "welded",
            vec![Joint::continuous("shoulder"), Joint::fixed("weld")],
        )
        .expect("unique names");
        let err = build_manifold(&group).unwrap_err();
        assert_eq!(err, MappingError::unclassifiable("weld", JointType::Fixed));
    }

    #[test]
    fn build_twice_yields_identical_descriptors() {
        let group = warehouse_arm();
        let a = build_manifold(&group).expect("plannable group");
        let b = build_manifold(&group).expect("plannable group");
        assert_eq!(a.manifold.submanifolds(), b.manifold.submanifolds());
        assert_eq!(a.state_mapping, b.state_mapping);
        assert_eq!(a.manifold_mapping, b.manifold_mapping);
    }

    #[test]
    fn extension_matches_full_build() {
        let full = build_manifold(&warehouse_arm()).expect("plannable group").manifold;

        let mut incremental = CompositeManifold::new(Vec::new()).expect("empty manifold");
        for joint in warehouse_arm().joints() {
            incremental = extend_with_joint(&incremental, joint).expect("extendable");
        }

        assert_eq!(incremental.submanifolds(), full.submanifolds());
        assert_eq!(incremental.real_vector_index(), full.real_vector_index());
    }

    #[test]
    fn extension_creates_the_real_vector_on_first_bounded_scalar() {
        let manifold = CompositeManifold::new(vec![Submanifold::angular("spin")])
            .expect("unique names");
        assert!(manifold.real_vector().is_none());

        let extended = extend_with_joint(&manifold, &Joint::revolute("elbow", 0.0, 1.0))
            .expect("extendable");
        assert_eq!(extended.real_vector_index(), Some(1));
        assert_eq!(
            extended
                .real_vector()
                .and_then(|rv| rv.dimension_index("elbow")),
            Some(0)
        );
        // The original descriptor is untouched.
        assert!(manifold.real_vector().is_none());
    }

    #[test]
    fn extension_appends_dimensions_to_an_existing_real_vector() {
        let base = build_manifold(&warehouse_arm()).expect("plannable group").manifold;
        let extended = extend_with_joint(&base, &Joint::prismatic("lift", -0.2, 0.2))
            .expect("extendable");

        let rv = extended.real_vector().expect("real vector present");
        assert_eq!(rv.dimension_index("lift"), Some(2));
        assert_eq!(
            base.real_vector().map(|rv| rv.dimensions().len()),
            Some(2)
        );
    }

    #[test]
    fn extension_rejects_duplicate_names() {
        let base = build_manifold(&warehouse_arm()).expect("plannable group").manifold;
        let err = extend_with_joint(&base, &Joint::continuous("shoulder")).unwrap_err();
        assert_eq!(err, MappingError::ambiguous("shoulder"));

        let err = extend_with_joint(&base, &Joint::revolute("elbow", 0.0, 1.0)).unwrap_err();
        assert_eq!(err, MappingError::ambiguous("elbow"));
    }
}
