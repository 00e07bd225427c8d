//! Bridge between joint space and a planner's composite state space.
//!
//! Sampling-based motion planners work over a composite manifold of typed
//! geometric components; robots report and accept flat, named-joint values.
//! This crate establishes and applies the correspondence between the two:
//!
//! - [`SubmanifoldKind::for_joint`] - classify a joint into its geometric
//!   representation
//! - [`build_manifold`] / [`extend_with_joint`] - construct a
//!   [`CompositeManifold`] descriptor from a joint group, in one pass or one
//!   joint at a time
//! - [`StateMapping`] / [`ManifoldMapping`] - the bidirectional index
//!   correspondence, built once per (joint set, manifold) pair
//! - [`robot_state_to_composite`] and friends - apply a mapping to single
//!   states and whole trajectories, in either direction
//!
//! # Mapping before converting
//!
//! Conversion never matches names; it only follows a mapping. Build the
//! mapping once and reuse it for every state and every trajectory point of
//! a request - builds are infrequent, conversions are not.
//!
//! Descriptors and mappings are immutable once built and can be shared
//! across threads freely; conversions touch only their own output state.
//!
//! # Strict and permissive matching
//!
//! [`MatchPolicy::RequireAll`] makes any unresolved joint an error; use it
//! when every referenced joint must round-trip (goal constraints).
//! [`MatchPolicy::SkipUnmatched`] leaves misses unmapped, and conversion
//! then skips them without touching the target slots; use it for partial
//! states (path constraints naming a subset of joints). Real-vector
//! dimensions are derived from joints, so an unresolved dimension is an
//! error under both policies.
//!
//! # Example
//!
//! ```
//! use plan_manifold::{build_manifold, robot_state_to_composite, CompositeState};
//! use plan_types::{Joint, JointGroup, RobotState};
//!
//! let group = JointGroup::new(
//!     "arm",
//!     vec![
//!         Joint::continuous("shoulder"),
//!         Joint::revolute("elbow", 0.0, 3.14),
//!     ],
//! )
//! .expect("unique names");
//!
//! let build = build_manifold(&group).expect("plannable group");
//! let mut state = RobotState::for_group(&group).expect("plannable group");
//! state.joint_state.set_position("elbow", 1.0);
//!
//! let mut composite = CompositeState::zeroed(&build.manifold);
//! robot_state_to_composite(&state, &build.state_mapping, &mut composite)
//!     .expect("state matches mapping");
//! assert_eq!(composite.real_vector(1), Some(&[1.0][..]));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod builder;
mod convert;
mod error;
mod manifold;
mod mapping;
mod state;

pub use builder::{build_manifold, extend_with_joint, ManifoldBuild};
pub use convert::{
    composite_to_robot_state, manifold_path_to_robot_trajectory, normalize_angle,
    robot_state_to_composite, robot_trajectory_to_manifold_path,
};
pub use error::{MappingError, Result};
pub use manifold::{
    CompositeManifold, RealVectorDimension, Submanifold, SubmanifoldKind, REAL_VECTOR_NAME,
};
pub use mapping::{
    ManifoldMapping, MatchPolicy, PoseTarget, ScalarTarget, StateMapping, SubmanifoldSource,
};
pub use state::{CompositeState, SubstateValue};
