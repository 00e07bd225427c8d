//! Planning-artifact log interface.
//!
//! Each planning request produces artifacts worth keeping: the scene state
//! it started from, the goal it was asked to reach per pipeline stage, the
//! trajectories produced along the way, and the outcome of every stage.
//! This crate defines how those artifacts are keyed and queried:
//!
//! - [`SceneStamp`] - the planning-scene timestamp every artifact hangs off
//! - [`PlanningRecord`] - the artifact families and their auxiliary tags
//! - [`PlanningLog`] - the sink/query seam a storage backend implements
//! - [`MemoryWarehouse`] - the in-memory implementation
//!
//! Artifacts arrive fully formed from the conversion pipeline; this crate
//! performs no conversion and no persistence beyond memory. A durable
//! document-store backend implements [`PlanningLog`] elsewhere.
//!
//! # Example
//!
//! ```
//! use plan_types::RobotState;
//! use plan_warehouse::{MemoryWarehouse, PlanningLog, PlanningRecord, SceneStamp};
//!
//! let mut log = MemoryWarehouse::new();
//! let stamp = SceneStamp::from_secs_f64(17.25);
//! log.push(
//!     "lab-robot-1",
//!     stamp,
//!     PlanningRecord::Scene {
//!         state: RobotState::default(),
//!     },
//! );
//!
//! assert_eq!(log.scene_stamps("lab-robot-1"), vec![stamp]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod record;
mod store;

pub use error::{Result, WarehouseError};
pub use record::{PlanningRecord, SceneStamp};
pub use store::{MemoryWarehouse, PlanningLog};
