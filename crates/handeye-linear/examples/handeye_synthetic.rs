//! Linear hand-eye calibration with synthetic data.
//!
//! This example demonstrates the calibration workflow:
//! 1. Generate robot poses and the matching camera observations of a target
//! 2. Perturb both with a little pose noise
//! 3. Estimate the hand-eye transform (Tsai-Lenz)
//! 4. Compare the result with ground truth
//!
//! Note: Hand-eye calibration is highly sensitive to robot pose diversity.
//! The closed-form solve requires rotations about several distinct axes.
//!
//! Run with: `cargo run -p handeye-linear --example handeye_synthetic`

use anyhow::Result;
use handeye_core::synthetic::handeye::{
    make_transform, perturb_samples, pose_error, robot_poses_varied, samples_from_ground_truth,
};
use handeye_core::synthetic::noise::PoseNoise;
use handeye_linear::{HandEyeConfig, HandEyeMode, HandEyeSolver};

fn main() -> Result<()> {
    println!("=== Hand-Eye Calibration (Synthetic) ===\n");

    // Ground truth hand-eye transform: T_G_C (gripper-to-camera)
    let handeye_gt = make_transform((0.1, -0.05, 0.02), (0.05, -0.03, 0.1));
    // Ground truth target pose in base frame: T_B_T (target 1m in front of base)
    let target_in_base_gt = make_transform((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));

    let robot_poses = robot_poses_varied(10);
    let clean = samples_from_ground_truth(
        &handeye_gt,
        &target_in_base_gt,
        &robot_poses,
        HandEyeMode::EyeInHand,
    );

    let solver = HandEyeSolver::new(HandEyeConfig::default());
    for (label, sigma) in [("noise-free", 0.0), ("0.1 mrad / 0.1 mm", 1e-4), ("1 mrad / 1 mm", 1e-3)] {
        let noise = PoseNoise {
            seed: 7,
            rotation_sigma: sigma,
            translation_sigma: sigma,
        };
        let samples = perturb_samples(&clean, &noise);
        let estimate = solver.solve(&samples)?;
        let (dt, ang) = pose_error(&estimate.transform, &handeye_gt);

        println!("--- {label} ---");
        println!(
            "  pairs used: {} (discarded {}), sigma ratio {:.3e}",
            estimate.report.pairs_used,
            estimate.report.pairs_discarded,
            estimate.report.singular_ratio
        );
        println!(
            "  residual rms: {:.3e} rad, {:.3e} m",
            estimate.report.rotation_rms_rad, estimate.report.translation_rms
        );
        println!("  error vs GT: |dt| = {:.3e} m, angle = {:.3e} rad", dt, ang);
        println!("  T_G_C =\n{}", estimate.transform.to_matrix4());
    }

    Ok(())
}
