//! Hand-eye calibration (AX = XB) using Tsai–Lenz.
//!
//! Provides a closed-form estimate from paired robot/camera samples, returning
//! the rigid transform between the robot-side and camera frames.
//!
//! Pipeline:
//! 1. validate every input transform is rigid,
//! 2. build all informative motion pairs `(A, B)`,
//! 3. solve the rotation by modified-Rodrigues rotation averaging,
//! 4. solve the translation by linear least squares,
//! 5. re-orthonormalise and validate the result.

use crate::{
    build_motion_pairs, estimate_rotation, estimate_translation, finalize_transform,
    motion_residuals, report::rms, HandEyeConfig, HandEyeError, HandEyeReport,
};
use handeye_core::{HandEyeMode, RigidTransform, Sample};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Result of a hand-eye solve.
///
/// `transform` is `^G T_C` in [`HandEyeMode::EyeInHand`] and `^B T_C` in
/// [`HandEyeMode::EyeToHand`]. It is only valid for the mechanical setup the
/// samples were collected under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandEyeEstimate {
    pub transform: RigidTransform,
    pub mode: HandEyeMode,
    pub report: HandEyeReport,
}

/// Linear hand–eye solver using the Tsai–Lenz formulation.
///
/// Stateless apart from its configuration; every call to [`Self::solve`] is
/// independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEyeSolver {
    config: HandEyeConfig,
}

impl HandEyeSolver {
    pub fn new(config: HandEyeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HandEyeConfig {
        &self.config
    }

    /// Estimate the hand-eye transform from `samples`.
    pub fn solve(&self, samples: &[Sample]) -> Result<HandEyeEstimate, HandEyeError> {
        let config = &self.config;
        config.validate()?;

        if samples.len() < 2 {
            return Err(HandEyeError::NotEnoughSamples(samples.len()));
        }
        for (index, sample) in samples.iter().enumerate() {
            sample
                .validate(config.rotation_tolerance)
                .map_err(|(side, source)| HandEyeError::InvalidSample {
                    index,
                    side,
                    source,
                })?;
        }

        let robot: Vec<RigidTransform> = samples
            .iter()
            .map(|s| match config.mode {
                HandEyeMode::EyeInHand => s.robot_se3_target,
                HandEyeMode::EyeToHand => s.robot_se3_target.inverse(),
            })
            .collect();
        let camera: Vec<RigidTransform> = samples.iter().map(|s| s.camera_se3_target).collect();

        let motions = build_motion_pairs(&robot, &camera, config.min_motion_angle_rad)?;
        debug!(
            "{} motion pairs from {} samples ({} discarded)",
            motions.pairs.len(),
            samples.len(),
            motions.discarded
        );

        let rot = estimate_rotation(&motions.pairs, config.rank_ratio)?;
        let tra = estimate_translation(&motions.pairs, &rot.rotation, config.rank_ratio)?;
        let transform = finalize_transform(&rot.rotation, &tra, config.rotation_tolerance)?;

        let residuals = motion_residuals(&motions.pairs, &transform);
        let report = HandEyeReport {
            num_samples: samples.len(),
            pairs_used: motions.pairs.len(),
            pairs_discarded: motions.discarded,
            singular_ratio: rot.singular_ratio,
            rotation_rms_rad: rms(residuals.iter().map(|r| r.rotation_rad)),
            translation_rms: rms(residuals.iter().map(|r| r.translation)),
        };
        info!(
            "hand-eye ({:?}): {} pairs, rotation rms {:.3e} rad, translation rms {:.3e}",
            config.mode, report.pairs_used, report.rotation_rms_rad, report.translation_rms
        );

        Ok(HandEyeEstimate {
            transform,
            mode: config.mode,
            report,
        })
    }
}

/// Main linear hand–eye entry point: Tsai–Lenz with all pairs.
pub fn estimate_handeye(
    samples: &[Sample],
    config: &HandEyeConfig,
) -> Result<HandEyeEstimate, HandEyeError> {
    HandEyeSolver::new(*config).solve(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use handeye_core::synthetic::handeye::{
        make_transform, pose_error, robot_poses_varied, samples_from_ground_truth,
    };

    #[test]
    fn handeye_recovers_ground_truth() {
        // Ground-truth hand-eye (gripper -> camera) and base->target
        let x_gt = make_transform((0.2, -0.1, 0.05), (0.1, -0.05, 0.2)); // ^G T_C
        let y_gt = make_transform((-0.1, 0.05, 0.2), (-0.2, 0.1, 1.0)); // ^B T_T

        let samples = samples_from_ground_truth(
            &x_gt,
            &y_gt,
            &robot_poses_varied(6),
            HandEyeMode::EyeInHand,
        );

        let est = estimate_handeye(&samples, &HandEyeConfig::default()).unwrap();

        let (dt, ang) = pose_error(&est.transform, &x_gt);
        assert!(dt < 1e-6, "translation error too large: {}", dt);
        assert!(ang < 1e-6, "rotation error too large: {}", ang);
        assert_eq!(est.report.pairs_used, 15);
        assert!(est.report.rotation_rms_rad < 1e-9);
        assert!(est.report.translation_rms < 1e-9);
    }

    #[test]
    fn invalid_config_is_reported_before_solving() {
        let config = HandEyeConfig {
            rotation_tolerance: -1.0,
            ..HandEyeConfig::default()
        };
        let err = HandEyeSolver::new(config).solve(&[]).unwrap_err();
        assert!(matches!(err, HandEyeError::InvalidConfig(_)));
    }
}
