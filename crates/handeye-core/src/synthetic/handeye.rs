//! Synthetic hand-eye sample generation.
//!
//! Given a ground-truth hand-eye transform `X` and a fixed "anchor" transform,
//! the helpers here produce [`Sample`]s that satisfy `AX = XB` exactly:
//! - [`HandEyeMode::EyeInHand`]: `X = ^G T_C`, anchor is the target pose in the
//!   base frame `^B T_T`, and `^C T_T = (^B T_G · X)^-1 · ^B T_T`.
//! - [`HandEyeMode::EyeToHand`]: `X = ^B T_C`, anchor is the target pose in
//!   the gripper frame `^G T_T`, and `^C T_T = X^-1 · ^B T_G · ^G T_T`.

use super::noise::PoseNoise;
use crate::{rotation_angle, HandEyeMode, Real, RigidTransform, Sample, Vec3};
use nalgebra::Rotation3;

/// Transform from roll/pitch/yaw Euler angles (radians) and a translation.
pub fn make_transform(angles: (Real, Real, Real), t: (Real, Real, Real)) -> RigidTransform {
    let rot = Rotation3::from_euler_angles(angles.0, angles.1, angles.2);
    RigidTransform::from_parts(rot.into_inner(), Vec3::new(t.0, t.1, t.2))
}

/// `n` robot poses (`^B T_G`) with rotations about varying axes.
///
/// The sequence is deterministic; consecutive poses differ by rotations of
/// roughly 0.1–0.5 rad so that every motion pair is informative.
pub fn robot_poses_varied(n: usize) -> Vec<RigidTransform> {
    (0..n)
        .map(|k| {
            let kf = k as Real;
            make_transform(
                (
                    0.3 * (1.3 * kf).sin(),
                    0.25 * (0.7 * kf + 0.4).cos(),
                    0.4 * (2.1 * kf + 1.0).sin(),
                ),
                (0.1 * kf.cos(), -0.05 * kf, 0.8 + 0.04 * kf),
            )
        })
        .collect()
}

/// `n` robot poses whose relative rotations all share the Z axis.
///
/// Useful to exercise degenerate-motion handling.
pub fn robot_poses_about_z(n: usize) -> Vec<RigidTransform> {
    (0..n)
        .map(|k| {
            let kf = k as Real;
            make_transform((0.0, 0.0, 0.2 * kf), (0.1 * kf, 0.05 * kf, 0.8))
        })
        .collect()
}

/// Noise-free samples for the given ground truth; see the module docs for the
/// meaning of `anchor` in each mode.
pub fn samples_from_ground_truth(
    x: &RigidTransform,
    anchor: &RigidTransform,
    robot_se3_gripper: &[RigidTransform],
    mode: HandEyeMode,
) -> Vec<Sample> {
    robot_se3_gripper
        .iter()
        .map(|g| {
            let camera_se3_target = match mode {
                HandEyeMode::EyeInHand => (g * x).inverse() * *anchor,
                HandEyeMode::EyeToHand => x.inverse() * *g * *anchor,
            };
            Sample::new(*g, camera_se3_target)
        })
        .collect()
}

/// Perturb both sides of every sample with deterministic noise.
///
/// Sample `k` uses stream `2k` for the robot side and `2k + 1` for the camera
/// side, so the perturbation of a sample does not depend on the others.
pub fn perturb_samples(samples: &[Sample], noise: &PoseNoise) -> Vec<Sample> {
    samples
        .iter()
        .enumerate()
        .map(|(k, s)| {
            Sample::new(
                noise.apply(2 * k, &s.robot_se3_target),
                noise.apply(2 * k + 1, &s.camera_se3_target),
            )
        })
        .collect()
}

/// Compare two SE(3) poses via translation norm + rotation angle.
pub fn pose_error(a: &RigidTransform, b: &RigidTransform) -> (Real, Real) {
    let dt = (a.translation - b.translation).norm();
    let r_diff = a.rotation.transpose() * b.rotation;
    (dt, rotation_angle(&r_diff))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground_truth() -> (RigidTransform, RigidTransform) {
        (
            make_transform((0.2, -0.1, 0.05), (0.1, -0.05, 0.2)),
            make_transform((-0.1, 0.05, 0.2), (-0.2, 0.1, 1.0)),
        )
    }

    fn assert_ax_eq_xb(samples: &[Sample], x: &RigidTransform, invert_robot: bool) {
        let robot = |s: &Sample| {
            if invert_robot {
                s.robot_se3_target.inverse()
            } else {
                s.robot_se3_target
            }
        };
        for i in 0..samples.len() {
            for j in (i + 1)..samples.len() {
                let a = robot(&samples[i]).inverse() * robot(&samples[j]);
                let b = samples[i].camera_se3_target * samples[j].camera_se3_target.inverse();
                let lhs = (a * *x).to_matrix4();
                let rhs = (*x * b).to_matrix4();
                assert!((lhs - rhs).norm() < 1e-12, "pair ({i},{j})");
            }
        }
    }

    #[test]
    fn eye_in_hand_samples_satisfy_constraint() {
        let (x, anchor) = ground_truth();
        let samples = samples_from_ground_truth(
            &x,
            &anchor,
            &robot_poses_varied(5),
            HandEyeMode::EyeInHand,
        );
        assert_ax_eq_xb(&samples, &x, false);
    }

    #[test]
    fn eye_to_hand_samples_satisfy_constraint_on_inverted_robot_poses() {
        let (x, anchor) = ground_truth();
        let samples = samples_from_ground_truth(
            &x,
            &anchor,
            &robot_poses_varied(5),
            HandEyeMode::EyeToHand,
        );
        assert_ax_eq_xb(&samples, &x, true);
    }

    #[test]
    fn pose_error_is_zero_for_identical_poses() {
        let (x, _) = ground_truth();
        let (dt, ang) = pose_error(&x, &x);
        assert!(dt < 1e-15);
        assert!(ang < 1e-7);
    }
}
