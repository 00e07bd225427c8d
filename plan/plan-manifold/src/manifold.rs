//! Composite-manifold descriptors.
//!
//! A composite manifold describes the state space a planner samples over:
//! an ordered sequence of named submanifolds, each a continuous angle, an
//! in-plane pose, a spatial pose, or the single real vector that aggregates
//! every bounded scalar joint.
//!
//! Descriptors are immutable once built. Extension (adding one joint at a
//! time) returns a new descriptor value, so built descriptors can be shared
//! freely across concurrent conversions.

use hashbrown::HashMap;

use plan_types::{Joint, JointType};

use crate::error::{MappingError, Result};

/// Name of the submanifold that aggregates bounded scalar joints.
pub const REAL_VECTOR_NAME: &str = "real_vector";

/// Geometric kind of one submanifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmanifoldKind {
    /// A single wrapping angle.
    Angular,
    /// An in-plane pose: translation and rotation in a plane.
    PlanarPose,
    /// A spatial pose: 3D translation and quaternion orientation.
    SpatialPose,
    /// The dense vector of bounded scalar values.
    RealVector,
}

impl SubmanifoldKind {
    /// Classify a joint into the submanifold kind that represents it.
    ///
    /// Continuous joints become angles, planar joints in-plane poses,
    /// floating joints spatial poses, and bounded revolute or prismatic
    /// joints real-vector dimensions. Anything else cannot be represented.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnclassifiableJoint`] for fixed joints; this
    /// is fatal for the enclosing build.
    pub fn for_joint(joint: &Joint) -> Result<Self> {
        match joint.joint_type {
            JointType::Continuous => Ok(Self::Angular),
            JointType::Revolute | JointType::Prismatic => Ok(Self::RealVector),
            JointType::Planar => Ok(Self::PlanarPose),
            JointType::Floating => Ok(Self::SpatialPose),
            JointType::Fixed => Err(MappingError::unclassifiable(
                joint.name.clone(),
                JointType::Fixed,
            )),
        }
    }

    /// Check if this kind carries a pose value.
    #[must_use]
    pub const fn is_pose(self) -> bool {
        matches!(self, Self::PlanarPose | Self::SpatialPose)
    }
}

impl std::fmt::Display for SubmanifoldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Angular => write!(f, "angular"),
            Self::PlanarPose => write!(f, "planar pose"),
            Self::SpatialPose => write!(f, "spatial pose"),
            Self::RealVector => write!(f, "real vector"),
        }
    }
}

/// One dimension of the real-vector submanifold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealVectorDimension {
    /// Name of the joint that feeds this dimension.
    pub name: String,
    /// Lower position bound.
    pub lower: f64,
    /// Upper position bound.
    pub upper: f64,
}

impl RealVectorDimension {
    /// Create a dimension.
    #[must_use]
    pub fn new(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }
}

/// One named component of a composite manifold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submanifold {
    name: String,
    kind: SubmanifoldKind,
    dimensions: Vec<RealVectorDimension>,
}

impl Submanifold {
    /// Create an angular submanifold named after its joint.
    #[must_use]
    pub fn angular(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SubmanifoldKind::Angular,
            dimensions: Vec::new(),
        }
    }

    /// Create a planar-pose submanifold named after its joint.
    #[must_use]
    pub fn planar_pose(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SubmanifoldKind::PlanarPose,
            dimensions: Vec::new(),
        }
    }

    /// Create a spatial-pose submanifold named after its joint.
    #[must_use]
    pub fn spatial_pose(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SubmanifoldKind::SpatialPose,
            dimensions: Vec::new(),
        }
    }

    /// Create the real-vector submanifold from its dimensions.
    ///
    /// The dimension order is frozen here and stays stable for the lifetime
    /// of the descriptor; slot indices handed out elsewhere rely on it.
    #[must_use]
    pub fn real_vector(dimensions: Vec<RealVectorDimension>) -> Self {
        Self {
            name: REAL_VECTOR_NAME.to_owned(),
            kind: SubmanifoldKind::RealVector,
            dimensions,
        }
    }

    /// Get the submanifold name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the geometric kind.
    #[must_use]
    pub const fn kind(&self) -> SubmanifoldKind {
        self.kind
    }

    /// Get the real-vector dimensions (empty for other kinds).
    #[must_use]
    pub fn dimensions(&self) -> &[RealVectorDimension] {
        &self.dimensions
    }

    /// Look up a real-vector dimension slot by name.
    #[must_use]
    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.name == name)
    }

    /// Get the number of scalar values this submanifold holds.
    #[must_use]
    pub fn value_count(&self) -> usize {
        match self.kind {
            SubmanifoldKind::Angular => 1,
            SubmanifoldKind::PlanarPose => 3,
            SubmanifoldKind::SpatialPose => 7,
            SubmanifoldKind::RealVector => self.dimensions.len(),
        }
    }
}

/// Immutable descriptor of a planner's composite state space.
///
/// Holds at most one real-vector submanifold. Submanifold names are unique,
/// as are the dimension names inside the real vector; both are enforced at
/// construction so later name matching is never ambiguous.
///
/// # Example
///
/// ```
/// use plan_manifold::{CompositeManifold, RealVectorDimension, Submanifold};
///
/// let manifold = CompositeManifold::new(vec![
///     Submanifold::angular("shoulder"),
///     Submanifold::real_vector(vec![RealVectorDimension::new("elbow", 0.0, 3.0)]),
/// ])
/// .expect("unique names");
///
/// assert_eq!(manifold.len(), 2);
/// assert_eq!(manifold.real_vector_index(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct CompositeManifold {
    submanifolds: Vec<Submanifold>,
    index: HashMap<String, usize>,
    real_vector_index: Option<usize>,
}

impl CompositeManifold {
    /// Create a descriptor from submanifolds in order.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::AmbiguousName`] if two submanifolds or two
    /// real-vector dimensions share a name. A second real-vector submanifold
    /// always collides on the aggregate name.
    pub fn new(submanifolds: Vec<Submanifold>) -> Result<Self> {
        let mut index = HashMap::with_capacity(submanifolds.len());
        let mut real_vector_index = None;
        for (i, submanifold) in submanifolds.iter().enumerate() {
            if index.insert(submanifold.name().to_owned(), i).is_some() {
                return Err(MappingError::ambiguous(submanifold.name()));
            }
            if submanifold.kind() == SubmanifoldKind::RealVector {
                let mut seen = HashMap::with_capacity(submanifold.dimensions().len());
                for (slot, dimension) in submanifold.dimensions().iter().enumerate() {
                    if seen.insert(dimension.name.clone(), slot).is_some() {
                        return Err(MappingError::ambiguous(dimension.name.clone()));
                    }
                }
                real_vector_index = Some(i);
            }
        }
        Ok(Self {
            submanifolds,
            index,
            real_vector_index,
        })
    }

    /// Get the number of submanifolds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.submanifolds.len()
    }

    /// Check if the descriptor has no submanifolds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submanifolds.is_empty()
    }

    /// Get the submanifolds in order.
    #[must_use]
    pub fn submanifolds(&self) -> &[Submanifold] {
        &self.submanifolds
    }

    /// Get a submanifold by index.
    #[must_use]
    pub fn submanifold(&self, index: usize) -> Option<&Submanifold> {
        self.submanifolds.get(index)
    }

    /// Look up a submanifold by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Submanifold> {
        self.index.get(name).map(|&i| &self.submanifolds[i])
    }

    /// Get a submanifold's index by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Get the index of the real-vector submanifold, if one exists.
    #[must_use]
    pub const fn real_vector_index(&self) -> Option<usize> {
        self.real_vector_index
    }

    /// Get the real-vector submanifold, if one exists.
    #[must_use]
    pub fn real_vector(&self) -> Option<&Submanifold> {
        self.real_vector_index.map(|i| &self.submanifolds[i])
    }

    /// Get the total number of scalar values across all submanifolds.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.submanifolds.iter().map(Submanifold::value_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_plannable_type() {
        assert_eq!(
            SubmanifoldKind::for_joint(&Joint::continuous("a")).ok(),
            Some(SubmanifoldKind::Angular)
        );
        assert_eq!(
            SubmanifoldKind::for_joint(&Joint::revolute("b", 0.0, 1.0)).ok(),
            Some(SubmanifoldKind::RealVector)
        );
        assert_eq!(
            SubmanifoldKind::for_joint(&Joint::prismatic("c", 0.0, 1.0)).ok(),
            Some(SubmanifoldKind::RealVector)
        );
        assert_eq!(
            SubmanifoldKind::for_joint(&Joint::planar("d")).ok(),
            Some(SubmanifoldKind::PlanarPose)
        );
        assert_eq!(
            SubmanifoldKind::for_joint(&Joint::floating("e")).ok(),
            Some(SubmanifoldKind::SpatialPose)
        );
    }

    #[test]
    fn classify_rejects_fixed_joints() {
        let err = SubmanifoldKind::for_joint(&Joint::fixed("weld")).unwrap_err();
        assert_eq!(
            err,
            MappingError::unclassifiable("weld", JointType::Fixed)
        );
    }

    #[test]
    fn unbounded_revolute_still_classifies_as_real_vector() {
        let joint = Joint::new("bare", JointType::Revolute);
        assert_eq!(
            SubmanifoldKind::for_joint(&joint).ok(),
            Some(SubmanifoldKind::RealVector)
        );
    }

    #[test]
    fn submanifold_value_counts() {
        assert_eq!(Submanifold::angular("a").value_count(), 1);
        assert_eq!(Submanifold::planar_pose("b").value_count(), 3);
        assert_eq!(Submanifold::spatial_pose("c").value_count(), 7);
        let rv = Submanifold::real_vector(vec![
            RealVectorDimension::new("x", 0.0, 1.0),
            RealVectorDimension::new("y", 0.0, 1.0),
        ]);
        assert_eq!(rv.value_count(), 2);
        assert_eq!(rv.name(), REAL_VECTOR_NAME);
    }

    #[test]
    fn manifold_lookup_by_name_and_index() {
        let manifold = CompositeManifold::new(vec![
            Submanifold::angular("shoulder"),
            Submanifold::spatial_pose("base"),
            Submanifold::real_vector(vec![RealVectorDimension::new("elbow", 0.0, 3.0)]),
        ])
        .expect("unique names");

        assert_eq!(manifold.len(), 3);
        assert_eq!(manifold.index_of("base"), Some(1));
        assert_eq!(manifold.real_vector_index(), Some(2));
        assert_eq!(
            manifold.real_vector().and_then(|rv| rv.dimension_index("elbow")),
            Some(0)
        );
        assert_eq!(manifold.value_count(), 1 + 7 + 1);
        assert!(manifold.by_name("nonexistent").is_none());
    }

    #[test]
    fn manifold_rejects_duplicate_submanifold_names() {
        let result = CompositeManifold::new(vec![
            Submanifold::angular("shoulder"),
            Submanifold::planar_pose("shoulder"),
        ]);
        assert_eq!(result.err(), Some(MappingError::ambiguous("shoulder")));
    }

    #[test]
    fn manifold_rejects_duplicate_dimension_names() {
        let result = CompositeManifold::new(vec![Submanifold::real_vector(vec![
            RealVectorDimension::new("elbow", 0.0, 1.0),
            RealVectorDimension::new("elbow", -1.0, 1.0),
        ])]);
        assert_eq!(result.err(), Some(MappingError::ambiguous("elbow")));
    }

    #[test]
    fn second_real_vector_collides_on_the_aggregate_name() {
        let result = CompositeManifold::new(vec![
            Submanifold::real_vector(vec![RealVectorDimension::new("a", 0.0, 1.0)]),
            Submanifold::real_vector(vec![RealVectorDimension::new("b", 0.0, 1.0)]),
        ]);
        assert!(result.is_err());
    }
}
