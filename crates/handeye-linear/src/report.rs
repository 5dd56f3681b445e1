use crate::MotionPair;
use handeye_core::{rotation_angle, Real, RigidTransform};
use serde::{Deserialize, Serialize};

/// Diagnostics of one hand-eye solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandEyeReport {
    /// Number of input samples.
    pub num_samples: usize,
    /// Motion pairs that entered the least-squares systems.
    pub pairs_used: usize,
    /// Motion pairs dropped for rotating less than the configured minimum.
    pub pairs_discarded: usize,
    /// `σ_min / σ_max` of the stacked rotation system.
    pub singular_ratio: Real,
    /// RMS of the rotation residual angle of `A·X` vs `X·B` (radians).
    pub rotation_rms_rad: Real,
    /// RMS of the translation residual `‖(R_A − I)·t_X − (R_X·t_B − t_A)‖`.
    pub translation_rms: Real,
}

/// Residual of `AX = XB` for a single motion pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionResidual {
    pub i: usize,
    pub j: usize,
    pub rotation_rad: Real,
    pub translation: Real,
}

/// Per-pair residuals of `x` against the given motions.
pub fn motion_residuals(pairs: &[MotionPair], x: &RigidTransform) -> Vec<MotionResidual> {
    pairs
        .iter()
        .map(|p| {
            let lhs = p.rot_a * x.rotation;
            let rhs = x.rotation * p.rot_b;
            let rotation_rad = rotation_angle(&(lhs.transpose() * rhs));
            let translation = ((p.rot_a * x.translation + p.tra_a)
                - (x.rotation * p.tra_b + x.translation))
                .norm();
            MotionResidual {
                i: p.i,
                j: p.j,
                rotation_rad,
                translation,
            }
        })
        .collect()
}

pub(crate) fn rms(values: impl Iterator<Item = Real>) -> Real {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v * v, n + 1));
    if n == 0 {
        0.0
    } else {
        (sum / n as Real).sqrt()
    }
}
