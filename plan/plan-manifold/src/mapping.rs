//! Bidirectional index correspondence between joint space and the
//! composite manifold.
//!
//! Each direction has its own lookup strategy because the two sides
//! enumerate degrees of freedom differently. Scalar joint names are matched
//! against non-real-vector submanifolds first, then against the real
//! vector's dimension names. Pose-valued joint names are matched against
//! non-real-vector submanifolds only. In the reverse direction every
//! submanifold searches the joint names, and every real-vector dimension
//! must resolve regardless of policy.
//!
//! Mappings are built once per (joint set, manifold) pair and reused across
//! arbitrarily many conversions; building is a pure function of its inputs,
//! so identical inputs always produce identical tables.

use hashbrown::HashMap;

use plan_types::{JointGroup, RobotState, RobotTrajectory};

use crate::error::{MappingError, Result};
use crate::manifold::{CompositeManifold, SubmanifoldKind};

/// How unresolved correspondences are treated while building a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Every name must resolve; a miss is an error. Used when converting
    /// motion constraints, where every referenced joint must round-trip.
    #[default]
    RequireAll,
    /// Unresolved names are left unmapped and silently skipped during
    /// conversion. Used for partial states that name only a subset of a
    /// group's joints. Real-vector dimensions must still resolve.
    SkipUnmatched,
}

impl MatchPolicy {
    /// Check if a miss is fatal under this policy.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::RequireAll)
    }
}

/// Target of one scalar joint inside the composite manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarTarget {
    /// The joint owns a whole angular submanifold.
    Angular {
        /// Index of the submanifold.
        submanifold: usize,
    },
    /// The joint fills one slot of the real-vector submanifold.
    VectorSlot {
        /// Slot inside the real vector.
        slot: usize,
    },
}

/// Target of one pose-valued joint: a pose submanifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseTarget {
    /// Index of the submanifold.
    pub submanifold: usize,
    /// Kind of the submanifold (planar or spatial pose).
    pub kind: SubmanifoldKind,
}

/// Joint-space to manifold index correspondence.
///
/// One optional target per joint, in joint-list order; `None` marks a joint
/// left unmapped under [`MatchPolicy::SkipUnmatched`].
#[derive(Debug, Clone, PartialEq)]
pub struct StateMapping {
    scalar_targets: Vec<Option<ScalarTarget>>,
    pose_targets: Vec<Option<PoseTarget>>,
    real_vector_index: Option<usize>,
}

impl StateMapping {
    pub(crate) const fn from_parts(
        scalar_targets: Vec<Option<ScalarTarget>>,
        pose_targets: Vec<Option<PoseTarget>>,
        real_vector_index: Option<usize>,
    ) -> Self {
        Self {
            scalar_targets,
            pose_targets,
            real_vector_index,
        }
    }

    /// Build a mapping from explicit joint-name lists.
    ///
    /// `scalar_names` are the single-DOF joint names in joint-space order;
    /// `pose_names` the multi-DOF joint names.
    ///
    /// # Errors
    ///
    /// Under [`MatchPolicy::RequireAll`], returns
    /// [`MappingError::UnmappedJoint`] for the first name with no
    /// counterpart in the manifold.
    pub fn build(
        scalar_names: &[String],
        pose_names: &[String],
        manifold: &CompositeManifold,
        policy: MatchPolicy,
    ) -> Result<Self> {
        let mut scalar_targets = Vec::with_capacity(scalar_names.len());
        for name in scalar_names {
            let target = Self::scalar_target_for(name, manifold);
            if target.is_none() && policy.is_strict() {
                return Err(MappingError::unmapped_joint(name.clone()));
            }
            scalar_targets.push(target);
        }

        let mut pose_targets = Vec::with_capacity(pose_names.len());
        for name in pose_names {
            let target = Self::pose_target_for(name, manifold);
            if target.is_none() && policy.is_strict() {
                return Err(MappingError::unmapped_joint(name.clone()));
            }
            pose_targets.push(target);
        }

        Ok(Self {
            scalar_targets,
            pose_targets,
            real_vector_index: manifold.real_vector_index(),
        })
    }

    /// Build a mapping for a joint group, in group declaration order.
    ///
    /// Group-based mappings are always strict: the manifold was built for
    /// the group, so every joint must resolve.
    pub fn for_group(group: &JointGroup, manifold: &CompositeManifold) -> Result<Self> {
        Self::build(
            &group.single_dof_names(),
            &group.pose_valued_names(),
            manifold,
            MatchPolicy::RequireAll,
        )
    }

    /// Build a mapping for a robot state's own name lists.
    pub fn for_state(
        state: &RobotState,
        manifold: &CompositeManifold,
        policy: MatchPolicy,
    ) -> Result<Self> {
        Self::build(
            &state.joint_state.names,
            &state.multi_dof.names,
            manifold,
            policy,
        )
    }

    /// Build a mapping for a trajectory's name lists.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UninitializedTrajectory`] if the trajectory's
    /// name lists are empty.
    pub fn for_trajectory(
        trajectory: &RobotTrajectory,
        manifold: &CompositeManifold,
        policy: MatchPolicy,
    ) -> Result<Self> {
        if !trajectory.is_initialized() {
            return Err(MappingError::UninitializedTrajectory);
        }
        Self::build(
            &trajectory.joint_trajectory.joint_names,
            &trajectory.multi_dof.joint_names,
            manifold,
            policy,
        )
    }

    fn scalar_target_for(name: &str, manifold: &CompositeManifold) -> Option<ScalarTarget> {
        // Non-real-vector submanifolds first; only an angular submanifold
        // can take a scalar value.
        if let Some(i) = manifold.index_of(name) {
            if manifold.submanifolds()[i].kind() == SubmanifoldKind::Angular {
                tracing::debug!(joint = name, submanifold = i, "mapped scalar joint to angle");
                return Some(ScalarTarget::Angular { submanifold: i });
            }
        }
        let slot = manifold.real_vector()?.dimension_index(name)?;
        tracing::debug!(joint = name, slot, "mapped scalar joint to real-vector slot");
        Some(ScalarTarget::VectorSlot { slot })
    }

    fn pose_target_for(name: &str, manifold: &CompositeManifold) -> Option<PoseTarget> {
        let i = manifold.index_of(name)?;
        let kind = manifold.submanifolds()[i].kind();
        kind.is_pose().then_some(PoseTarget {
            submanifold: i,
            kind,
        })
    }

    /// Per-scalar-joint targets, in joint-space order.
    #[must_use]
    pub fn scalar_targets(&self) -> &[Option<ScalarTarget>] {
        &self.scalar_targets
    }

    /// Per-pose-joint targets, in joint-space order.
    #[must_use]
    pub fn pose_targets(&self) -> &[Option<PoseTarget>] {
        &self.pose_targets
    }

    /// Index of the real-vector submanifold, if the manifold has one.
    #[must_use]
    pub const fn real_vector_index(&self) -> Option<usize> {
        self.real_vector_index
    }

    /// Check if every joint resolved to a target.
    #[must_use]
    pub fn is_fully_mapped(&self) -> bool {
        self.scalar_targets.iter().all(Option::is_some)
            && self.pose_targets.iter().all(Option::is_some)
    }
}

/// Source of one submanifold's value in joint space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmanifoldSource {
    /// A scalar joint, by index into the joint-space scalar section.
    ScalarJoint(usize),
    /// A pose-valued joint, by index into the multi-DOF section.
    MultiDofJoint(usize),
}

/// Manifold to joint-space index correspondence.
///
/// One optional source per submanifold, plus the dense slot-to-joint table
/// for the real vector. Every real-vector slot resolves; the table has one
/// entry per dimension, always.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifoldMapping {
    sources: Vec<Option<SubmanifoldSource>>,
    vector_slots: Vec<usize>,
    real_vector_index: Option<usize>,
}

impl ManifoldMapping {
    pub(crate) const fn from_parts(
        sources: Vec<Option<SubmanifoldSource>>,
        vector_slots: Vec<usize>,
        real_vector_index: Option<usize>,
    ) -> Self {
        Self {
            sources,
            vector_slots,
            real_vector_index,
        }
    }

    /// Build a reverse mapping from explicit joint-name lists.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnmappedDimension`] if any real-vector
    /// dimension has no counterpart among `scalar_names` - under every
    /// policy. Under [`MatchPolicy::RequireAll`], additionally returns
    /// [`MappingError::UnmappedSubmanifold`] for the first non-real-vector
    /// submanifold with no counterpart.
    pub fn build(
        manifold: &CompositeManifold,
        scalar_names: &[String],
        pose_names: &[String],
        policy: MatchPolicy,
    ) -> Result<Self> {
        // Name tables keep repeated builds linear; first occurrence wins.
        let mut scalar_index: HashMap<&str, usize> = HashMap::with_capacity(scalar_names.len());
        for (i, name) in scalar_names.iter().enumerate() {
            scalar_index.entry(name.as_str()).or_insert(i);
        }
        let mut pose_index: HashMap<&str, usize> = HashMap::with_capacity(pose_names.len());
        for (i, name) in pose_names.iter().enumerate() {
            pose_index.entry(name.as_str()).or_insert(i);
        }

        let mut sources = vec![None; manifold.len()];
        let mut vector_slots = Vec::new();
        for (i, submanifold) in manifold.submanifolds().iter().enumerate() {
            match submanifold.kind() {
                SubmanifoldKind::Angular => match scalar_index.get(submanifold.name()) {
                    Some(&j) => sources[i] = Some(SubmanifoldSource::ScalarJoint(j)),
                    None if policy.is_strict() => {
                        return Err(MappingError::unmapped_submanifold(submanifold.name()));
                    }
                    None => {}
                },
                SubmanifoldKind::PlanarPose | SubmanifoldKind::SpatialPose => {
                    match pose_index.get(submanifold.name()) {
                        Some(&j) => sources[i] = Some(SubmanifoldSource::MultiDofJoint(j)),
                        None if policy.is_strict() => {
                            return Err(MappingError::unmapped_submanifold(submanifold.name()));
                        }
                        None => {}
                    }
                }
                SubmanifoldKind::RealVector => {
                    for dimension in submanifold.dimensions() {
                        match scalar_index.get(dimension.name.as_str()) {
                            Some(&j) => vector_slots.push(j),
                            None => {
                                return Err(MappingError::unmapped_dimension(
                                    dimension.name.clone(),
                                ));
                            }
                        }
                    }
                }
            }
        }

        Ok(Self {
            sources,
            vector_slots,
            real_vector_index: manifold.real_vector_index(),
        })
    }

    /// Build a reverse mapping for a joint group, always strict.
    pub fn for_group(manifold: &CompositeManifold, group: &JointGroup) -> Result<Self> {
        Self::build(
            manifold,
            &group.single_dof_names(),
            &group.pose_valued_names(),
            MatchPolicy::RequireAll,
        )
    }

    /// Build a reverse mapping for a robot state's name lists.
    pub fn for_state(
        manifold: &CompositeManifold,
        state: &RobotState,
        policy: MatchPolicy,
    ) -> Result<Self> {
        Self::build(
            manifold,
            &state.joint_state.names,
            &state.multi_dof.names,
            policy,
        )
    }

    /// Build a reverse mapping for a trajectory's name lists.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UninitializedTrajectory`] if the trajectory's
    /// name lists are empty.
    pub fn for_trajectory(
        manifold: &CompositeManifold,
        trajectory: &RobotTrajectory,
        policy: MatchPolicy,
    ) -> Result<Self> {
        if !trajectory.is_initialized() {
            return Err(MappingError::UninitializedTrajectory);
        }
        Self::build(
            manifold,
            &trajectory.joint_trajectory.joint_names,
            &trajectory.multi_dof.joint_names,
            policy,
        )
    }

    /// Per-submanifold sources, in manifold order.
    #[must_use]
    pub fn sources(&self) -> &[Option<SubmanifoldSource>] {
        &self.sources
    }

    /// Dense slot-to-scalar-joint table for the real vector.
    #[must_use]
    pub fn vector_slots(&self) -> &[usize] {
        &self.vector_slots
    }

    /// Index of the real-vector submanifold, if the manifold has one.
    #[must_use]
    pub const fn real_vector_index(&self) -> Option<usize> {
        self.real_vector_index
    }
}
