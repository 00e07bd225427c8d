//! Joint groups and the planning-group registry.
//!
//! A joint group is the ordered set of joints a planner operates over. Order
//! is declaration order from the robot description; downstream code relies
//! on it for deterministic indexing, so it is preserved exactly.

use hashbrown::{HashMap, HashSet};

use crate::error::{GroupError, Result};
use crate::joint::Joint;

/// Named, ordered collection of joints.
///
/// Joint names must be unique within a group; duplicates are rejected at
/// construction so later name lookups are never ambiguous.
///
/// # Example
///
/// ```
/// use plan_types::{Joint, JointGroup};
///
/// let group = JointGroup::new(
///     "arm",
///     vec![Joint::continuous("shoulder"), Joint::revolute("elbow", 0.0, 2.6)],
/// )
/// .expect("unique names");
///
/// assert_eq!(group.len(), 2);
/// assert_eq!(group.index_of("elbow"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct JointGroup {
    name: String,
    joints: Vec<Joint>,
    index: HashMap<String, usize>,
}

impl JointGroup {
    /// Create a group from joints in declaration order.
    pub fn new(name: impl Into<String>, joints: Vec<Joint>) -> Result<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(joints.len());
        for (i, joint) in joints.iter().enumerate() {
            if index.insert(joint.name.clone(), i).is_some() {
                return Err(GroupError::duplicate_joint(name, joint.name.clone()));
            }
        }
        Ok(Self {
            name,
            joints,
            index,
        })
    }

    /// Get the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Check if the group has no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Get the joints in declaration order.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Look up a joint by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.index.get(name).map(|&i| &self.joints[i])
    }

    /// Get a joint's position in declaration order.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check if the group contains a joint.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names of the single-DOF joints, in declaration order.
    #[must_use]
    pub fn single_dof_names(&self) -> Vec<String> {
        self.joints
            .iter()
            .filter(|j| j.joint_type.is_single_dof())
            .map(|j| j.name.clone())
            .collect()
    }

    /// Names of the pose-valued joints, in declaration order.
    #[must_use]
    pub fn pose_valued_names(&self) -> Vec<String> {
        self.joints
            .iter()
            .filter(|j| j.joint_type.is_pose_valued())
            .map(|j| j.name.clone())
            .collect()
    }
}

/// The planning groups a robot description declares.
///
/// Groups keep their registration order. The registry also tracks the union
/// of all joints across groups, in first-seen order, for callers that need
/// the full plannable joint set.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: Vec<JointGroup>,
    index: HashMap<String, usize>,
    joint_union: Vec<String>,
}

impl GroupRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group, replacing any previous group with the same name.
    pub fn insert(&mut self, group: JointGroup) {
        if let Some(&i) = self.index.get(group.name()) {
            self.groups[i] = group;
            self.rebuild_union();
        } else {
            self.index.insert(group.name().to_owned(), self.groups.len());
            for joint in group.joints() {
                if !self.joint_union.iter().any(|n| n == &joint.name) {
                    self.joint_union.push(joint.name.clone());
                }
            }
            self.groups.push(group);
        }
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&JointGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    /// Get the registered groups in registration order.
    #[must_use]
    pub fn groups(&self) -> &[JointGroup] {
        &self.groups
    }

    /// Get the number of registered groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no groups are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The union of all joint names across groups, in first-seen order.
    #[must_use]
    pub fn joint_union(&self) -> &[String] {
        &self.joint_union
    }

    fn rebuild_union(&mut self) {
        let mut seen = HashSet::new();
        self.joint_union.clear();
        for group in &self.groups {
            for joint in group.joints() {
                if seen.insert(joint.name.clone()) {
                    self.joint_union.push(joint.name.clone());
                }
            }
        }
    }
}
