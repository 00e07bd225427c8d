//! End-to-end conversions between joint space and the composite manifold.
//!
//! Exercises the full pipeline the way a planning request does: build the
//! manifold for a group, build the mappings once, then push states and
//! trajectories through in both directions.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::f64::consts::PI;

use approx::assert_relative_eq;
use plan_manifold::{
    build_manifold, composite_to_robot_state, manifold_path_to_robot_trajectory,
    robot_state_to_composite, robot_trajectory_to_manifold_path, CompositeState, ManifoldBuild,
    ManifoldMapping, MappingError, MatchPolicy, StateMapping, SubmanifoldKind, SubstateValue,
};
use plan_types::{
    Joint, JointGroup, JointPose, PlanarPose, Pose, Point3, RobotState, RobotTrajectory,
    ScalarJointState, UnitQuaternion, Vector3,
};

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

fn mobile_arm() -> JointGroup {
    JointGroup::new(
        "mobile_arm",
        vec![
            Joint::floating("body"),
            Joint::planar("cart"),
            Joint::continuous("shoulder"),
            Joint::revolute("elbow", 0.0, 3.0),
        ],
    )
    .expect("unique names")
}

#[test]
fn arm_group_builds_the_expected_descriptor() {
    let ManifoldBuild { manifold, .. } = build_manifold(&warehouse_arm()).expect("built");

    assert_eq!(manifold.len(), 2);
    assert_eq!(manifold.submanifolds()[0].name(), "shoulder");
    assert_eq!(manifold.submanifolds()[0].kind(), SubmanifoldKind::Angular);
    assert_eq!(manifold.submanifolds()[1].name(), "real_vector");

    let dimensions: Vec<_> = manifold.real_vector().expect("real vector")
        .dimensions()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(dimensions, vec!["elbow", "wrist"]);
}

#[test]
fn out_of_range_shoulder_angle_is_normalized_on_write() {
    let build = build_manifold(&warehouse_arm()).expect("built");

    let mut state = RobotState::for_group(&warehouse_arm()).expect("state");
    state.joint_state.set_position("shoulder", 4.0);
    state.joint_state.set_position("elbow", 1.0);
    state.joint_state.set_position("wrist", -0.5);

    let mut composite = CompositeState::zeroed(&build.manifold);
    robot_state_to_composite(&state, &build.state_mapping, &mut composite).expect("converted");

    assert_relative_eq!(composite.angular(0).unwrap(), 4.0 - 2.0 * PI, epsilon = 1e-12);
    assert_eq!(composite.real_vector(1), Some(&[1.0, -0.5][..]));
}

#[test]
fn mapped_values_round_trip_modulo_normalization() {
    let build = build_manifold(&warehouse_arm()).expect("built");

    let mut state = RobotState::for_group(&warehouse_arm()).expect("state");
    state.joint_state.set_position("shoulder", 4.0);
    state.joint_state.set_position("elbow", 1.0);
    state.joint_state.set_position("wrist", -0.5);

    let mut composite = CompositeState::zeroed(&build.manifold);
    robot_state_to_composite(&state, &build.state_mapping, &mut composite).expect("converted");

    let mut restored = RobotState::for_group(&warehouse_arm()).expect("state");
    composite_to_robot_state(&composite, &build.manifold_mapping, &mut restored)
        .expect("converted back");

    // The shoulder comes back normalized; the bounded joints come back exact.
    assert_relative_eq!(
        restored.position("shoulder").unwrap(),
        4.0 - 2.0 * PI,
        epsilon = 1e-12
    );
    assert_relative_eq!(restored.position("elbow").unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(restored.position("wrist").unwrap(), -0.5, epsilon = 1e-12);

    // A second pass is exact: normalization is idempotent.
    let mut composite2 = CompositeState::zeroed(&build.manifold);
    robot_state_to_composite(&restored, &build.state_mapping, &mut composite2)
        .expect("converted");
    assert_eq!(composite, composite2);
}

#[test]
fn poses_round_trip_exactly() {
    let build = build_manifold(&mobile_arm()).expect("built");

    let body_pose = Pose::new(
        Point3::new(0.5, -1.0, 0.25),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.7),
    );
    let cart_pose = PlanarPose::new(2.0, 3.0, -0.4);

    let mut state = RobotState::for_group(&mobile_arm()).expect("state");
    state.multi_dof.set_pose("body", JointPose::Spatial(body_pose));
    state.multi_dof.set_pose("cart", JointPose::Planar(cart_pose));
    state.joint_state.set_position("shoulder", 0.3);
    state.joint_state.set_position("elbow", 1.1);

    let mut composite = CompositeState::zeroed(&build.manifold);
    robot_state_to_composite(&state, &build.state_mapping, &mut composite).expect("converted");

    assert_eq!(composite.spatial_pose(0), Some(&body_pose));
    assert_eq!(composite.planar_pose(1), Some(&cart_pose));

    let mut restored = RobotState::for_group(&mobile_arm()).expect("state");
    composite_to_robot_state(&composite, &build.manifold_mapping, &mut restored)
        .expect("converted back");
    assert_eq!(restored.pose("body"), Some(&JointPose::Spatial(body_pose)));
    assert_eq!(restored.pose("cart"), Some(&JointPose::Planar(cart_pose)));
    assert_relative_eq!(restored.position("elbow").unwrap(), 1.1, epsilon = 1e-12);
}

#[test]
fn every_real_vector_dimension_maps_to_a_distinct_joint() {
    let joints: Vec<Joint> = (0..8)
        .map(|i| Joint::revolute(format!("joint_{i}"), -1.0, 1.0))
        .collect();
    let group = JointGroup::new("chain", joints).expect("unique names");
    let build = build_manifold(&group).expect("built");

    let slots = build.manifold_mapping.vector_slots();
    assert_eq!(slots.len(), 8);
    let mut seen = slots.to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 8, "no two dimensions share a joint");
}

#[test]
fn strict_mapping_rejects_a_state_naming_an_unknown_joint() {
    let build = build_manifold(&warehouse_arm()).expect("built");

    let state = RobotState::new(
        ScalarJointState::new(
            vec!["shoulder".to_owned(), "nonexistent_joint".to_owned()],
            vec![0.1, 0.2],
        ),
        plan_types::MultiDofJointState::default(),
    );

    let err = StateMapping::for_state(&state, &build.manifold, MatchPolicy::RequireAll)
        .unwrap_err();
    assert_eq!(
        err,
        MappingError::UnmappedJoint {
            joint: "nonexistent_joint".to_owned()
        }
    );
}

#[test]
fn permissive_partial_state_leaves_unmapped_slots_untouched() {
    let build = build_manifold(&warehouse_arm()).expect("built");

    // A path constraint naming only the elbow.
    let partial = RobotState::new(
        ScalarJointState::new(vec!["elbow".to_owned()], vec![0.75]),
        plan_types::MultiDofJointState::default(),
    );

    let mapping = StateMapping::for_state(&partial, &build.manifold, MatchPolicy::SkipUnmatched)
        .expect("permissive mapping");

    let mut composite = CompositeState::zeroed(&build.manifold);
    if let Some(SubstateValue::Angular(value)) = composite.value_mut(0) {
        *value = 0.9;
    }
    robot_state_to_composite(&partial, &mapping, &mut composite).expect("converted");

    // Elbow written, shoulder and wrist untouched.
    assert_relative_eq!(composite.angular(0).unwrap(), 0.9, epsilon = 1e-12);
    assert_eq!(composite.real_vector(1), Some(&[0.75, 0.0][..]));

    // The partial state itself still maps strictly: every name it carries
    // resolves. Strictness bites only on names the manifold does not know.
    let strict = StateMapping::for_state(&partial, &build.manifold, MatchPolicy::RequireAll);
    assert!(strict.is_ok(), "every named joint resolves");
    let unknown = RobotState::new(
        ScalarJointState::new(vec!["phantom".to_owned()], vec![0.0]),
        plan_types::MultiDofJointState::default(),
    );
    assert_eq!(
        StateMapping::for_state(&unknown, &build.manifold, MatchPolicy::RequireAll).unwrap_err(),
        MappingError::UnmappedJoint {
            joint: "phantom".to_owned()
        }
    );
}

#[test]
fn trajectory_conversion_requires_a_presized_container() {
    let build = build_manifold(&warehouse_arm()).expect("built");
    let path = vec![
        CompositeState::zeroed(&build.manifold),
        CompositeState::zeroed(&build.manifold),
        CompositeState::zeroed(&build.manifold),
    ];

    let mut uninitialized = RobotTrajectory::empty();
    let err =
        manifold_path_to_robot_trajectory(&path, &build.manifold_mapping, &mut uninitialized)
            .unwrap_err();
    assert_eq!(err, MappingError::UninitializedTrajectory);
    assert_eq!(uninitialized.point_count(), 0, "no point was touched");
}

#[test]
fn manifold_path_converts_point_by_point_with_zeroed_timing() {
    let group = warehouse_arm();
    let build = build_manifold(&group).expect("built");

    let mut path = Vec::new();
    for i in 0..3 {
        let mut state = RobotState::for_group(&group).expect("state");
        state.joint_state.set_position("shoulder", 0.1 * f64::from(i));
        state.joint_state.set_position("elbow", 0.5 + 0.1 * f64::from(i));
        state.joint_state.set_position("wrist", -0.2 * f64::from(i));
        let mut composite = CompositeState::zeroed(&build.manifold);
        robot_state_to_composite(&state, &build.state_mapping, &mut composite).expect("converted");
        path.push(composite);
    }

    let mut trajectory = RobotTrajectory::for_group(&group).expect("initialized");
    manifold_path_to_robot_trajectory(&path, &build.manifold_mapping, &mut trajectory)
        .expect("converted");

    assert_eq!(trajectory.joint_trajectory.points.len(), 3);
    assert!(trajectory.multi_dof.points.is_empty());
    for (i, point) in trajectory.joint_trajectory.points.iter().enumerate() {
        assert_relative_eq!(point.time_from_start, 0.0, epsilon = 1e-12);
        assert_relative_eq!(point.positions[0], 0.1 * i as f64, epsilon = 1e-12);
        assert_relative_eq!(point.positions[1], 0.5 + 0.1 * i as f64, epsilon = 1e-12);
    }
}

#[test]
fn trajectories_round_trip_through_the_manifold() {
    let group = mobile_arm();
    let build = build_manifold(&group).expect("built");

    let mut trajectory = RobotTrajectory::for_group(&group).expect("initialized");
    for i in 0..4 {
        let mut state = RobotState::for_group(&group).expect("state");
        state.joint_state.set_position("shoulder", 0.2 * f64::from(i));
        state.joint_state.set_position("elbow", 1.0 - 0.1 * f64::from(i));
        state.multi_dof.set_pose(
            "cart",
            JointPose::Planar(PlanarPose::new(f64::from(i), 0.0, 0.1 * f64::from(i))),
        );
        state.multi_dof.set_pose(
            "body",
            JointPose::Spatial(Pose::from_position(Point3::new(0.0, f64::from(i), 1.0))),
        );

        trajectory
            .joint_trajectory
            .points
            .push(plan_types::JointTrajectoryPoint::new(
                state.joint_state.positions.clone(),
            ));
        trajectory
            .multi_dof
            .points
            .push(plan_types::MultiDofTrajectoryPoint::new(
                state.multi_dof.poses.clone(),
            ));
    }

    let forward = StateMapping::for_trajectory(&trajectory, &build.manifold, MatchPolicy::RequireAll)
        .expect("mapped");
    let path = robot_trajectory_to_manifold_path(&trajectory, &forward, &build.manifold)
        .expect("converted");
    assert_eq!(path.len(), 4);

    let reverse =
        ManifoldMapping::for_trajectory(&build.manifold, &trajectory, MatchPolicy::RequireAll)
            .expect("mapped");
    let mut restored = RobotTrajectory::for_group(&group).expect("initialized");
    manifold_path_to_robot_trajectory(&path, &reverse, &mut restored).expect("converted back");

    assert_eq!(restored.joint_trajectory.points.len(), 4);
    assert_eq!(restored.multi_dof.points.len(), 4);
    for i in 0..4 {
        // All angles already in (-π, π], so positions come back exact.
        let original = &trajectory.joint_trajectory.points[i];
        let returned = &restored.joint_trajectory.points[i];
        for (a, b) in original.positions.iter().zip(&returned.positions) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        assert_eq!(
            trajectory.multi_dof.points[i].poses,
            restored.multi_dof.points[i].poses
        );
    }
}

#[test]
fn one_mapping_serves_many_conversions() {
    let group = warehouse_arm();
    let build = build_manifold(&group).expect("built");

    let mut composite = CompositeState::zeroed(&build.manifold);
    for i in 0..100 {
        let mut state = RobotState::for_group(&group).expect("state");
        state.joint_state.set_position("elbow", f64::from(i) * 0.01);
        robot_state_to_composite(&state, &build.state_mapping, &mut composite)
            .expect("converted");
    }
    assert_relative_eq!(
        composite.real_vector(1).unwrap()[0],
        0.99,
        epsilon = 1e-12
    );
}
