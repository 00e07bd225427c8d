//! The planning-log seam and its in-memory implementation.

use plan_types::{RobotState, RobotTrajectory};

use crate::error::{Result, WarehouseError};
use crate::record::{PlanningRecord, SceneStamp};

/// Sink and query surface for planning artifacts.
///
/// Artifacts are filed under `(hostname, scene stamp)` and queried back by
/// their tags. Implementations decide where the records actually live; the
/// pipeline only talks to this trait.
pub trait PlanningLog {
    /// File one artifact under a host and scene stamp.
    fn push(&mut self, hostname: &str, stamp: SceneStamp, record: PlanningRecord);

    /// Stamps of the scenes filed for a host, oldest first.
    fn scene_stamps(&self, hostname: &str) -> Vec<SceneStamp>;

    /// The scene state filed under a stamp.
    fn scene(&self, hostname: &str, stamp: SceneStamp) -> Result<&RobotState>;

    /// Sources of the trajectories associated with a scene.
    fn trajectory_sources(&self, hostname: &str, stamp: SceneStamp) -> Vec<String>;

    /// The trajectory a given source filed under a scene.
    fn trajectory(
        &self,
        hostname: &str,
        stamp: SceneStamp,
        source: &str,
    ) -> Result<&RobotTrajectory>;

    /// Stage names of the plan requests associated with a scene.
    fn request_stages(&self, hostname: &str, stamp: SceneStamp) -> Vec<String>;

    /// The goal state a given stage requested under a scene.
    fn request(&self, hostname: &str, stamp: SceneStamp, stage: &str) -> Result<&RobotState>;

    /// Stage outcomes associated with a scene, in filing order.
    fn outcomes(&self, hostname: &str, stamp: SceneStamp) -> Vec<(&str, Option<&str>)>;
}

#[derive(Debug, Clone)]
struct LogEntry {
    hostname: String,
    stamp: SceneStamp,
    record: PlanningRecord,
}

/// In-memory planning log.
///
/// Keeps records in filing order; queries scan the entries. Suited to tests
/// and to buffering artifacts before a durable backend takes them.
#[derive(Debug, Clone, Default)]
pub struct MemoryWarehouse {
    entries: Vec<LogEntry>,
}

impl MemoryWarehouse {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of filed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been filed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn associated<'a>(
        &'a self,
        hostname: &str,
        stamp: SceneStamp,
    ) -> impl Iterator<Item = &'a PlanningRecord> + 'a {
        let hostname = hostname.to_owned();
        self.entries
            .iter()
            .filter(move |e| e.hostname == hostname && e.stamp == stamp)
            .map(|e| &e.record)
    }
}

impl PlanningLog for MemoryWarehouse {
    fn push(&mut self, hostname: &str, stamp: SceneStamp, record: PlanningRecord) {
        tracing::debug!(
            hostname,
            %stamp,
            kind = record.kind(),
            "filing planning record"
        );
        self.entries.push(LogEntry {
            hostname: hostname.to_owned(),
            stamp,
            record,
        });
    }

    fn scene_stamps(&self, hostname: &str) -> Vec<SceneStamp> {
        let mut stamps: Vec<SceneStamp> = self
            .entries
            .iter()
            .filter(|e| e.hostname == hostname)
            .filter(|e| matches!(e.record, PlanningRecord::Scene { .. }))
            .map(|e| e.stamp)
            .collect();
        stamps.sort_unstable();
        stamps.dedup();
        stamps
    }

    fn scene(&self, hostname: &str, stamp: SceneStamp) -> Result<&RobotState> {
        self.associated(hostname, stamp)
            .find_map(|record| match record {
                PlanningRecord::Scene { state } => Some(state),
                _ => None,
            })
            .ok_or_else(|| WarehouseError::scene_not_found(hostname, stamp))
    }

    fn trajectory_sources(&self, hostname: &str, stamp: SceneStamp) -> Vec<String> {
        self.associated(hostname, stamp)
            .filter_map(|record| match record {
                PlanningRecord::Trajectory { source, .. } => Some(source.clone()),
                _ => None,
            })
            .collect()
    }

    fn trajectory(
        &self,
        hostname: &str,
        stamp: SceneStamp,
        source: &str,
    ) -> Result<&RobotTrajectory> {
        self.associated(hostname, stamp)
            .find_map(|record| match record {
                PlanningRecord::Trajectory {
                    source: s,
                    trajectory,
                } if s == source => Some(trajectory),
                _ => None,
            })
            .ok_or_else(|| WarehouseError::record_not_found("trajectory", source, hostname, stamp))
    }

    fn request_stages(&self, hostname: &str, stamp: SceneStamp) -> Vec<String> {
        self.associated(hostname, stamp)
            .filter_map(|record| match record {
                PlanningRecord::PlanRequest { stage, .. } => Some(stage.clone()),
                _ => None,
            })
            .collect()
    }

    fn request(&self, hostname: &str, stamp: SceneStamp, stage: &str) -> Result<&RobotState> {
        self.associated(hostname, stamp)
            .find_map(|record| match record {
                PlanningRecord::PlanRequest { stage: s, goal } if s == stage => Some(goal),
                _ => None,
            })
            .ok_or_else(|| WarehouseError::record_not_found("plan request", stage, hostname, stamp))
    }

    fn outcomes(&self, hostname: &str, stamp: SceneStamp) -> Vec<(&str, Option<&str>)> {
        self.associated(hostname, stamp)
            .filter_map(|record| match record {
                PlanningRecord::Outcome {
                    pipeline_stage,
                    error,
                } => Some((pipeline_stage.as_str(), error.as_deref())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_types::{Joint, JointGroup};

    const HOST: &str = "lab-robot-1";

    fn arm_state() -> RobotState {
        let group = JointGroup::new(
            "arm",
            vec![
                Joint::continuous("shoulder"),
                Joint::revolute("elbow", 0.0, 3.0),
            ],
        )
        .expect("unique names");
        RobotState::for_group(&group).expect("plannable group")
    }

    fn populated_log() -> (MemoryWarehouse, SceneStamp) {
        let mut log = MemoryWarehouse::new();
        let stamp = SceneStamp::from_secs_f64(10.0);

        log.push(HOST, stamp, PlanningRecord::Scene { state: arm_state() });
        log.push(
            HOST,
            stamp,
            PlanningRecord::PlanRequest {
                stage: "plan".to_owned(),
                goal: arm_state(),
            },
        );
        log.push(
            HOST,
            stamp,
            PlanningRecord::Trajectory {
                source: "planner".to_owned(),
                trajectory: RobotTrajectory::empty(),
            },
        );
        log.push(
            HOST,
            stamp,
            PlanningRecord::Trajectory {
                source: "smoother".to_owned(),
                trajectory: RobotTrajectory::empty(),
            },
        );
        log.push(
            HOST,
            stamp,
            PlanningRecord::Outcome {
                pipeline_stage: "plan".to_owned(),
                error: None,
            },
        );
        (log, stamp)
    }

    #[test]
    fn scene_stamps_are_sorted_and_unique() {
        let mut log = MemoryWarehouse::new();
        let late = SceneStamp::from_secs_f64(20.0);
        let early = SceneStamp::from_secs_f64(5.0);
        log.push(HOST, late, PlanningRecord::Scene { state: arm_state() });
        log.push(HOST, early, PlanningRecord::Scene { state: arm_state() });
        log.push(HOST, early, PlanningRecord::Scene { state: arm_state() });

        assert_eq!(log.scene_stamps(HOST), vec![early, late]);
        assert!(log.scene_stamps("other-host").is_empty());
    }

    #[test]
    fn associated_artifacts_come_back_by_tag() {
        let (log, stamp) = populated_log();

        assert!(log.scene(HOST, stamp).is_ok());
        assert_eq!(
            log.trajectory_sources(HOST, stamp),
            vec!["planner", "smoother"]
        );
        assert!(log.trajectory(HOST, stamp, "smoother").is_ok());
        assert_eq!(log.request_stages(HOST, stamp), vec!["plan"]);
        assert!(log.request(HOST, stamp, "plan").is_ok());
        assert_eq!(log.outcomes(HOST, stamp), vec![("plan", None)]);
    }

    #[test]
    fn queries_miss_cleanly() {
        let (log, stamp) = populated_log();
        let other = SceneStamp::from_secs_f64(99.0);

        assert_eq!(
            log.scene(HOST, other),
            Err(WarehouseError::scene_not_found(HOST, other))
        );
        assert_eq!(
            log.trajectory(HOST, stamp, "filter"),
            Err(WarehouseError::record_not_found(
                "trajectory",
                "filter",
                HOST,
                stamp
            ))
        );
        assert!(log.request(HOST, stamp, "retry").is_err());
    }

    #[test]
    fn records_separate_by_host() {
        let (mut log, stamp) = populated_log();
        log.push(
            "other-host",
            stamp,
            PlanningRecord::Outcome {
                pipeline_stage: "plan".to_owned(),
                error: Some("timeout".to_owned()),
            },
        );

        assert_eq!(log.outcomes(HOST, stamp), vec![("plan", None)]);
        assert_eq!(
            log.outcomes("other-host", stamp),
            vec![("plan", Some("timeout"))]
        );
        assert_eq!(log.len(), 6);
        assert!(!log.is_empty());
    }
}
