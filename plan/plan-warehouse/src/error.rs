//! Error types for planning-log queries.

use thiserror::Error;

use crate::record::SceneStamp;

/// Errors that can occur while querying a planning log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WarehouseError {
    /// No planning scene was filed under the given host and stamp.
    #[error("no planning scene for host {hostname} at {stamp}")]
    SceneNotFound {
        /// Host the scene was expected from.
        hostname: String,
        /// The scene stamp that was queried.
        stamp: SceneStamp,
    },

    /// A scene exists but carries no record with the requested tag.
    #[error("no {kind} record tagged {tag} for host {hostname} at {stamp}")]
    RecordNotFound {
        /// Artifact family that was queried.
        kind: &'static str,
        /// The tag (stage name or trajectory source) that missed.
        tag: String,
        /// Host the record was expected from.
        hostname: String,
        /// The scene stamp that was queried.
        stamp: SceneStamp,
    },
}

impl WarehouseError {
    /// Create a scene-not-found error.
    pub fn scene_not_found(hostname: impl Into<String>, stamp: SceneStamp) -> Self {
        Self::SceneNotFound {
            hostname: hostname.into(),
            stamp,
        }
    }

    /// Create a record-not-found error.
    pub fn record_not_found(
        kind: &'static str,
        tag: impl Into<String>,
        hostname: impl Into<String>,
        stamp: SceneStamp,
    ) -> Self {
        Self::RecordNotFound {
            kind,
            tag: tag.into(),
            hostname: hostname.into(),
            stamp,
        }
    }
}

/// Result type for planning-log operations.
pub type Result<T> = std::result::Result<T, WarehouseError>;
