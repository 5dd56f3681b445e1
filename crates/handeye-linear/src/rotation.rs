//! Tsai–Lenz rotation over all motion pairs.
//!
//! Each pair contributes `skew(p_A + p_B) · p' = p_B − p_A`, where `p` are
//! modified Rodrigues vectors (`2 sin(θ/2) · axis`). The stacked system is
//! solved by SVD and the result mapped back to a rotation matrix.

use crate::{HandEyeError, MotionPair};
use handeye_core::{from_axis_angle, rotation_to_quaternion, skew, Mat3, Real, Vec3};
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::FRAC_PI_2;

/// Modified Rodrigues vector `2 sin(θ/2) · axis` with `θ ∈ [0, π]`.
pub fn modified_rodrigues(r: &Mat3) -> Vec3 {
    rotation_to_quaternion(r).imag() * 2.0
}

/// Rotation matrix from a modified Rodrigues vector (`|p| ≤ 2`).
pub fn from_modified_rodrigues(p: &Vec3) -> Mat3 {
    let n2 = p.norm_squared();
    let cos_half = (4.0 - n2).max(0.0).sqrt();
    Mat3::identity() * (1.0 - 0.5 * n2) + (p * p.transpose() + skew(p) * cos_half) * 0.5
}

/// Rotation estimate plus the conditioning of the system it came from.
#[derive(Debug, Clone, Copy)]
pub struct RotationEstimate {
    pub rotation: Mat3,
    /// `σ_min / σ_max` of the stacked coefficient matrix.
    pub singular_ratio: Real,
}

/// Quarter-turn offsets tried when the unshifted system is rank-deficient.
///
/// `X · R0` is still a half turn when the axis of `X` is perpendicular to the
/// axis of `R0`, so three orthogonal offsets are needed to cover every axis.
fn retry_offsets() -> [Mat3; 3] {
    [
        from_axis_angle(&Vec3::new(FRAC_PI_2, 0.0, 0.0)),
        from_axis_angle(&Vec3::new(0.0, FRAC_PI_2, 0.0)),
        from_axis_angle(&Vec3::new(0.0, 0.0, FRAC_PI_2)),
    ]
}

/// Solve the rotational part of `AX = XB` over all pairs.
///
/// With two or more pairs, fails with [`HandEyeError::DegenerateMotion`] when
/// `σ_min / σ_max < rank_ratio` (all rotation axes parallel). A single pair
/// always yields a rank-2 system; it is solved with the minimum-norm
/// pseudo-inverse and a warning.
///
/// A half-turn `X` makes every `p_A + p_B` parallel to its axis. The system
/// is then re-solved for `X · R0` with `B` conjugated by a fixed quarter turn
/// `R0`, and only reported degenerate if every offset fails as well.
pub fn estimate_rotation(
    pairs: &[MotionPair],
    rank_ratio: Real,
) -> Result<RotationEstimate, HandEyeError> {
    if pairs.is_empty() {
        return Err(HandEyeError::DegenerateMotion {
            informative_pairs: 0,
            singular_ratio: 0.0,
        });
    }

    let num_pairs = pairs.len();
    let direct = solve_with_offset(pairs, &Mat3::identity(), rank_ratio)?;
    if num_pairs == 1 {
        warn!(
            "only one informative motion pair; rotation is under-determined, \
             using the minimum-norm solution"
        );
        return Ok(direct);
    }
    if direct.singular_ratio >= rank_ratio {
        return Ok(direct);
    }

    for offset in retry_offsets() {
        let shifted = solve_with_offset(pairs, &offset, rank_ratio)?;
        if shifted.singular_ratio >= rank_ratio {
            debug!(
                "rotation system rank-deficient (ratio {:.3e}), solved with camera-side offset \
                 (ratio {:.3e})",
                direct.singular_ratio, shifted.singular_ratio
            );
            return Ok(shifted);
        }
    }

    Err(HandEyeError::DegenerateMotion {
        informative_pairs: num_pairs,
        singular_ratio: direct.singular_ratio,
    })
}

/// Solve `A · (X R0) = (X R0) · (R0ᵀ B R0)` and map the result back to `X`.
fn solve_with_offset(
    pairs: &[MotionPair],
    offset: &Mat3,
    rank_ratio: Real,
) -> Result<RotationEstimate, HandEyeError> {
    let num_pairs = pairs.len();
    let mut m = DMatrix::<Real>::zeros(3 * num_pairs, 3);
    let mut rhs = DVector::<Real>::zeros(3 * num_pairs);

    for (idx, p) in pairs.iter().enumerate() {
        let p_a = modified_rodrigues(&p.rot_a);
        let p_b = modified_rodrigues(&(offset.transpose() * p.rot_b * offset));

        m.view_mut((3 * idx, 0), (3, 3))
            .copy_from(&skew(&(p_a + p_b)));
        rhs.rows_mut(3 * idx, 3).copy_from(&(p_b - p_a));
    }

    let svd = m.svd(true, true);
    let sigma_max = svd.singular_values.max();
    let sigma_min = svd.singular_values.min();
    if !(sigma_max.is_finite() && sigma_max > Real::EPSILON) {
        return Err(HandEyeError::DegenerateMotion {
            informative_pairs: num_pairs,
            singular_ratio: 0.0,
        });
    }
    let singular_ratio = sigma_min / sigma_max;
    debug!(
        "rotation system: {} pairs, sigma_max {:.3e}, sigma ratio {:.3e}",
        num_pairs, sigma_max, singular_ratio
    );

    let x = svd
        .solve(&rhs, rank_ratio * sigma_max)
        .map_err(|_| HandEyeError::SvdFailed("rotation estimation"))?;
    let p_prime = Vec3::new(x[0], x[1], x[2]);

    let p_x = p_prime * (2.0 / (1.0 + p_prime.norm_squared()).sqrt());
    Ok(RotationEstimate {
        rotation: from_modified_rodrigues(&p_x) * offset.transpose(),
        singular_ratio,
    })
}
