//! Integration tests for the linear hand-eye solver.
//!
//! These validate:
//! 1. Exact recovery of a synthetic ground truth in both mounting modes
//! 2. Validity of every successful estimate
//! 3. Rejection of too few samples, degenerate motion, and non-rigid input
//! 4. Graceful degradation under pose noise
//! 5. The two-sample scenario collected on the original rig
//! 6. Half-turn hand-eye rotations and discarded near-duplicate samples

use handeye_core::synthetic::handeye::{
    make_transform, perturb_samples, pose_error, robot_poses_about_z, robot_poses_varied,
    samples_from_ground_truth,
};
use handeye_core::synthetic::noise::PoseNoise;
use handeye_core::{rotation_deviation, Mat3, Real, RigidTransform, Sample, Vec3};
use handeye_linear::{
    estimate_handeye, ErrorKind, HandEyeConfig, HandEyeError, HandEyeMode, HandEyeSolver,
};
use nalgebra::Rotation3;
use std::f64::consts::PI;

fn ground_truth() -> (RigidTransform, RigidTransform) {
    (
        make_transform((0.2, -0.1, 0.05), (0.1, -0.05, 0.2)),
        make_transform((-0.1, 0.05, 0.2), (-0.2, 0.1, 1.0)),
    )
}

fn assert_valid(t: &RigidTransform) {
    assert!(t.rotation.iter().all(|v| v.is_finite()));
    assert!(t.translation.iter().all(|v| v.is_finite()));
    assert!(rotation_deviation(&t.rotation) < 1e-6);
    assert!((t.rotation.determinant() - 1.0).abs() < 1e-6);
}

fn rot_z_deg(deg: Real) -> Mat3 {
    Rotation3::from_axis_angle(&Vec3::z_axis(), deg.to_radians()).into_inner()
}

#[test]
fn eye_in_hand_recovers_ground_truth() {
    let (x_gt, target_in_base) = ground_truth();
    let samples = samples_from_ground_truth(
        &x_gt,
        &target_in_base,
        &robot_poses_varied(5),
        HandEyeMode::EyeInHand,
    );

    let est = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap();
    let (dt, ang) = pose_error(&est.transform, &x_gt);
    assert!(dt < 1e-6, "translation error too large: {}", dt);
    assert!(ang < 1e-6, "rotation error too large: {}", ang);
    assert_eq!(est.mode, HandEyeMode::EyeInHand);
    assert_eq!(est.report.num_samples, 5);
    assert_eq!(est.report.pairs_used, 10);
    assert_eq!(est.report.pairs_discarded, 0);
    assert_valid(&est.transform);
}

#[test]
fn eye_to_hand_recovers_base_to_camera() {
    let (x_gt, target_in_gripper) = ground_truth();
    let samples = samples_from_ground_truth(
        &x_gt,
        &target_in_gripper,
        &robot_poses_varied(4),
        HandEyeMode::EyeToHand,
    );

    let config = HandEyeConfig::default().with_mode(HandEyeMode::EyeToHand);
    let est = HandEyeSolver::new(config).solve(&samples).unwrap();
    let (dt, ang) = pose_error(&est.transform, &x_gt);
    assert!(dt < 1e-6, "translation error too large: {}", dt);
    assert!(ang < 1e-6, "rotation error too large: {}", ang);
    assert_valid(&est.transform);
}

#[test]
fn wrong_mode_does_not_recover_ground_truth() {
    let (x_gt, target_in_gripper) = ground_truth();
    let samples = samples_from_ground_truth(
        &x_gt,
        &target_in_gripper,
        &robot_poses_varied(5),
        HandEyeMode::EyeToHand,
    );

    let est = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap();
    assert!(est.report.rotation_rms_rad > 1e-3);
}

#[test]
fn fewer_than_two_samples_is_rejected() {
    let (x_gt, anchor) = ground_truth();
    let samples = samples_from_ground_truth(
        &x_gt,
        &anchor,
        &robot_poses_varied(1),
        HandEyeMode::EyeInHand,
    );

    for input in [&samples[..0], &samples[..1]] {
        let err = estimate_handeye(input, &HandEyeConfig::default()).unwrap_err();
        assert!(matches!(err, HandEyeError::NotEnoughSamples(n) if n == input.len()));
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }
}

#[test]
fn translation_only_motion_is_degenerate() {
    let robot: Vec<RigidTransform> = (0..4)
        .map(|k| make_transform((0.1, 0.0, 0.3), (0.1 * k as Real, -0.05 * k as Real, 0.8)))
        .collect();
    let (x_gt, anchor) = ground_truth();
    let samples = samples_from_ground_truth(&x_gt, &anchor, &robot, HandEyeMode::EyeInHand);

    let err = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        HandEyeError::DegenerateMotion {
            informative_pairs: 0,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::DegenerateMotion);
}

#[test]
fn parallel_rotation_axes_are_degenerate() {
    let (x_gt, anchor) = ground_truth();
    let samples = samples_from_ground_truth(
        &x_gt,
        &anchor,
        &robot_poses_about_z(5),
        HandEyeMode::EyeInHand,
    );

    let err = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateMotion, "{err}");
}

#[test]
fn eye_to_hand_recovers_half_turn_camera() {
    // Overhead camera looking down: a half turn about the base x axis.
    let (_, target_in_gripper) = ground_truth();
    for x_gt in [
        make_transform((PI, 0.0, 0.3), (0.5, 0.0, 1.2)),
        make_transform((0.0, 0.0, PI), (0.5, 0.0, 1.2)),
    ] {
        let samples = samples_from_ground_truth(
            &x_gt,
            &target_in_gripper,
            &robot_poses_varied(6),
            HandEyeMode::EyeToHand,
        );

        let config = HandEyeConfig::default().with_mode(HandEyeMode::EyeToHand);
        let est = estimate_handeye(&samples, &config).unwrap();
        let (dt, ang) = pose_error(&est.transform, &x_gt);
        assert!(dt < 1e-6, "translation error too large: {}", dt);
        assert!(ang < 1e-6, "rotation error too large: {}", ang);
        assert_eq!(est.report.pairs_used, 15);
        assert!(est.report.singular_ratio > 1e-3);
        assert_valid(&est.transform);
    }
}

#[test]
fn repeated_pose_is_discarded_and_rest_still_used() {
    let (x_gt, anchor) = ground_truth();
    let mut robot = robot_poses_varied(6);
    robot.push(robot[2]);
    let samples = samples_from_ground_truth(&x_gt, &anchor, &robot, HandEyeMode::EyeInHand);

    let est = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap();
    assert!(est.report.pairs_discarded >= 1);
    assert_eq!(
        est.report.pairs_used + est.report.pairs_discarded,
        7 * 6 / 2
    );
    let (dt, ang) = pose_error(&est.transform, &x_gt);
    assert!(dt < 1e-6, "translation error too large: {}", dt);
    assert!(ang < 1e-6, "rotation error too large: {}", ang);
}

#[test]
fn rank_ratio_controls_near_parallel_rejection() {
    // Rotations about z with a 1e-4 rad wobble of the axis.
    let tilt = 1e-4;
    let robot: Vec<RigidTransform> = (0..5)
        .map(|k| {
            let kf = k as Real;
            make_transform(
                (tilt * (1.7 * kf).sin(), tilt * (1.1 * kf).cos(), 0.2 * kf),
                (0.1 * kf, 0.05 * kf, 0.8),
            )
        })
        .collect();
    let (x_gt, anchor) = ground_truth();
    let samples = samples_from_ground_truth(&x_gt, &anchor, &robot, HandEyeMode::EyeInHand);

    let est = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap();
    assert!(est.report.singular_ratio < 1e-2);
    let (dt, ang) = pose_error(&est.transform, &x_gt);
    assert!(dt < 1e-6 && ang < 1e-6, "dt {dt}, ang {ang}");

    let strict = HandEyeConfig {
        rank_ratio: 1e-2,
        ..HandEyeConfig::default()
    };
    let err = estimate_handeye(&samples, &strict).unwrap_err();
    assert!(matches!(
        err,
        HandEyeError::DegenerateMotion {
            informative_pairs: 10,
            ..
        }
    ));
}

#[test]
fn scaled_rotation_is_rejected() {
    let (x_gt, anchor) = ground_truth();
    let mut samples = samples_from_ground_truth(
        &x_gt,
        &anchor,
        &robot_poses_varied(4),
        HandEyeMode::EyeInHand,
    );
    samples[2].camera_se3_target.rotation *= 1.05;

    let err = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        HandEyeError::InvalidSample {
            index: 2,
            side: handeye_core::SampleSide::Camera,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InputValidation);
}

#[test]
fn solve_is_deterministic() {
    let (x_gt, anchor) = ground_truth();
    let noise = PoseNoise {
        seed: 11,
        rotation_sigma: 0.002,
        translation_sigma: 0.002,
    };
    let samples = perturb_samples(
        &samples_from_ground_truth(
            &x_gt,
            &anchor,
            &robot_poses_varied(12),
            HandEyeMode::EyeInHand,
        ),
        &noise,
    );

    let solver = HandEyeSolver::default();
    let first = solver.solve(&samples).unwrap();
    for _ in 0..4 {
        assert_eq!(solver.solve(&samples).unwrap(), first);
    }
}

#[test]
fn error_grows_with_noise_and_stays_valid() {
    let (x_gt, anchor) = ground_truth();
    let clean = samples_from_ground_truth(
        &x_gt,
        &anchor,
        &robot_poses_varied(8),
        HandEyeMode::EyeInHand,
    );
    let seeds = 8;

    let mut previous = (0.0, 0.0);
    for sigma in [0.0, 0.001, 0.003, 0.01] {
        let mut mean_dt = 0.0;
        let mut mean_ang = 0.0;
        for seed in 0..seeds {
            let noise = PoseNoise {
                seed,
                rotation_sigma: sigma,
                translation_sigma: sigma,
            };
            let est = estimate_handeye(&perturb_samples(&clean, &noise), &HandEyeConfig::default())
                .unwrap();
            assert_valid(&est.transform);
            let (dt, ang) = pose_error(&est.transform, &x_gt);
            mean_dt += dt / seeds as Real;
            mean_ang += ang / seeds as Real;
        }

        assert!(mean_dt >= previous.0, "sigma {sigma}: {mean_dt} < {}", previous.0);
        assert!(mean_ang >= previous.1, "sigma {sigma}: {mean_ang} < {}", previous.1);
        assert!(mean_dt < 0.2 && mean_ang < 0.2, "sigma {sigma}: {mean_dt}, {mean_ang}");
        previous = (mean_dt, mean_ang);
    }
}

fn original_rig_samples(r1: Mat3, r1_cam: Mat3, r2_cam: Mat3) -> Vec<Sample> {
    let robot_1 = RigidTransform::from_parts(r1, Vec3::new(1.0, 0.5, 1.5));
    let robot_2 = RigidTransform::from_parts(Mat3::identity(), Vec3::new(1.5, 0.8, 1.3));
    let camera_1 = RigidTransform::from_parts(r1_cam, Vec3::new(0.8, 0.6, 1.2));
    let camera_2 = RigidTransform::from_parts(r2_cam, Vec3::new(0.9, 0.7, 1.4));
    vec![
        Sample::new(robot_1, camera_1),
        Sample::new(robot_2, camera_2),
    ]
}

#[test]
fn two_sample_scenario_yields_valid_transform() {
    let samples = original_rig_samples(rot_z_deg(30.0), rot_z_deg(45.0), rot_z_deg(30.0));

    for mode in [HandEyeMode::EyeInHand, HandEyeMode::EyeToHand] {
        let config = HandEyeConfig::default().with_mode(mode);
        let est = estimate_handeye(&samples, &config).unwrap();
        assert_valid(&est.transform);
        assert_eq!(est.report.pairs_used, 1);
    }
}

#[test]
fn rounded_matrices_need_a_looser_tolerance() {
    let r30 = Mat3::new(0.866, -0.5, 0.0, 0.5, 0.866, 0.0, 0.0, 0.0, 1.0);
    let r45 = Mat3::new(0.707, -0.707, 0.0, 0.707, 0.707, 0.0, 0.0, 0.0, 1.0);
    let samples = original_rig_samples(r30, r45, r30);

    let err = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap_err();
    assert!(matches!(err, HandEyeError::InvalidSample { index: 0, .. }));

    let config = HandEyeConfig {
        rotation_tolerance: 1e-3,
        ..HandEyeConfig::default()
    };
    let est = estimate_handeye(&samples, &config).unwrap();
    assert_valid(&est.transform);
}

#[test]
fn estimate_serializes_to_json() {
    let (x_gt, anchor) = ground_truth();
    let samples = samples_from_ground_truth(
        &x_gt,
        &anchor,
        &robot_poses_varied(4),
        HandEyeMode::EyeInHand,
    );
    let est = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap();

    let json = serde_json::to_string_pretty(&est).unwrap();
    let restored: handeye_linear::HandEyeEstimate = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.mode, est.mode);
    assert_eq!(restored.report.pairs_used, est.report.pairs_used);
    assert!((restored.report.singular_ratio - est.report.singular_ratio).abs() < 1e-12);
    assert!((restored.transform.to_matrix4() - est.transform.to_matrix4()).norm() < 1e-12);
}
