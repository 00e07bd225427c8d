//! Composite-state snapshots.
//!
//! A composite state holds one typed value per submanifold of a descriptor,
//! in descriptor order. Values are a closed enum, so conversion dispatch is
//! a total match rather than a cast chain.

use plan_types::{PlanarPose, Pose};

use crate::manifold::{CompositeManifold, Submanifold, SubmanifoldKind};

/// Value of one submanifold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubstateValue {
    /// A single wrapping angle, in radians.
    Angular(f64),
    /// An in-plane pose.
    PlanarPose(PlanarPose),
    /// A spatial pose.
    SpatialPose(Pose),
    /// The dense real vector, one entry per dimension in dimension order.
    RealVector(Vec<f64>),
}

impl SubstateValue {
    /// Get the kind of submanifold this value belongs to.
    #[must_use]
    pub const fn kind(&self) -> SubmanifoldKind {
        match self {
            Self::Angular(_) => SubmanifoldKind::Angular,
            Self::PlanarPose(_) => SubmanifoldKind::PlanarPose,
            Self::SpatialPose(_) => SubmanifoldKind::SpatialPose,
            Self::RealVector(_) => SubmanifoldKind::RealVector,
        }
    }

    /// Create the zero value for a submanifold.
    #[must_use]
    pub fn zeroed_for(submanifold: &Submanifold) -> Self {
        match submanifold.kind() {
            SubmanifoldKind::Angular => Self::Angular(0.0),
            SubmanifoldKind::PlanarPose => Self::PlanarPose(PlanarPose::identity()),
            SubmanifoldKind::SpatialPose => Self::SpatialPose(Pose::identity()),
            SubmanifoldKind::RealVector => {
                Self::RealVector(vec![0.0; submanifold.dimensions().len()])
            }
        }
    }
}

/// Snapshot of the composite state space: one value per submanifold.
///
/// States are transient; they are allocated per planning request (usually
/// via [`CompositeState::zeroed`]) and written through a mapping.
///
/// # Example
///
/// ```
/// use plan_manifold::{CompositeManifold, CompositeState, Submanifold, SubstateValue};
///
/// let manifold =
///     CompositeManifold::new(vec![Submanifold::angular("spin")]).expect("unique names");
/// let state = CompositeState::zeroed(&manifold);
/// assert_eq!(state.value(0), Some(&SubstateValue::Angular(0.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeState {
    values: Vec<SubstateValue>,
}

impl CompositeState {
    /// Create a state from values in submanifold order.
    #[must_use]
    pub const fn new(values: Vec<SubstateValue>) -> Self {
        Self { values }
    }

    /// Create a zeroed state matching a descriptor's layout.
    #[must_use]
    pub fn zeroed(manifold: &CompositeManifold) -> Self {
        Self {
            values: manifold
                .submanifolds()
                .iter()
                .map(SubstateValue::zeroed_for)
                .collect(),
        }
    }

    /// Get the number of submanifold values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the state holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the values in submanifold order.
    #[must_use]
    pub fn values(&self) -> &[SubstateValue] {
        &self.values
    }

    /// Get one value by submanifold index.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&SubstateValue> {
        self.values.get(index)
    }

    /// Get one value mutably by submanifold index.
    pub fn value_mut(&mut self, index: usize) -> Option<&mut SubstateValue> {
        self.values.get_mut(index)
    }

    /// Get an angular value by submanifold index.
    #[must_use]
    pub fn angular(&self, index: usize) -> Option<f64> {
        match self.values.get(index) {
            Some(SubstateValue::Angular(value)) => Some(*value),
            _ => None,
        }
    }

    /// Get a planar-pose value by submanifold index.
    #[must_use]
    pub fn planar_pose(&self, index: usize) -> Option<&PlanarPose> {
        match self.values.get(index) {
            Some(SubstateValue::PlanarPose(pose)) => Some(pose),
            _ => None,
        }
    }

    /// Get a spatial-pose value by submanifold index.
    #[must_use]
    pub fn spatial_pose(&self, index: usize) -> Option<&Pose> {
        match self.values.get(index) {
            Some(SubstateValue::SpatialPose(pose)) => Some(pose),
            _ => None,
        }
    }

    /// Get the real-vector value by submanifold index.
    #[must_use]
    pub fn real_vector(&self, index: usize) -> Option<&[f64]> {
        match self.values.get(index) {
            Some(SubstateValue::RealVector(values)) => Some(values),
            _ => None,
        }
    }
}
