//! Tsai–Lenz translation over all pairs, given the rotation.

use crate::{HandEyeError, MotionPair};
use handeye_core::{Mat3, Real, Vec3};
use log::debug;
use nalgebra::{DMatrix, DVector};

/// Solve `(R_A − I) · t_X = R_X · t_B − t_A` stacked over all pairs.
///
/// Singular values below `rank_ratio · σ_max` are dropped, so an
/// under-determined system yields the minimum-norm solution.
pub fn estimate_translation(
    pairs: &[MotionPair],
    rot_x: &Mat3,
    rank_ratio: Real,
) -> Result<Vec3, HandEyeError> {
    if pairs.is_empty() {
        return Err(HandEyeError::DegenerateMotion {
            informative_pairs: 0,
            singular_ratio: 0.0,
        });
    }

    let num_pairs = pairs.len();
    let mut mat_c = DMatrix::<Real>::zeros(3 * num_pairs, 3);
    let mut vec_w = DVector::<Real>::zeros(3 * num_pairs);

    for (idx, p) in pairs.iter().enumerate() {
        mat_c
            .view_mut((3 * idx, 0), (3, 3))
            .copy_from(&(p.rot_a - Mat3::identity()));
        vec_w
            .rows_mut(3 * idx, 3)
            .copy_from(&(rot_x * p.tra_b - p.tra_a));
    }

    llsq(&mat_c, &vec_w, rank_ratio)
}

/// Least squares `min ‖A x − b‖²` for a 3-column `A` via SVD pseudo-inverse.
fn llsq(a: &DMatrix<Real>, b: &DVector<Real>, rank_ratio: Real) -> Result<Vec3, HandEyeError> {
    if a.ncols() != 3 {
        return Err(HandEyeError::SvdFailed("translation estimation"));
    }

    let svd = a.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    debug!(
        "translation system: {} rows, sigma ratio {:.3e}",
        a.nrows(),
        svd.singular_values.min() / sigma_max
    );
    let x = svd
        .solve(b, rank_ratio * sigma_max)
        .map_err(|_| HandEyeError::SvdFailed("translation estimation"))?;

    Ok(Vec3::new(x[0], x[1], x[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use handeye_core::{from_axis_angle, RigidTransform};

    #[test]
    fn recovers_translation_for_known_rotation() {
        let x = RigidTransform::from_parts(
            from_axis_angle(&Vec3::new(0.1, 0.2, -0.3)),
            Vec3::new(0.05, -0.1, 0.2),
        );
        let motions = [
            RigidTransform::from_parts(
                from_axis_angle(&Vec3::new(0.4, 0.0, 0.0)),
                Vec3::new(0.1, 0.0, 0.3),
            ),
            RigidTransform::from_parts(
                from_axis_angle(&Vec3::new(0.0, -0.3, 0.2)),
                Vec3::new(-0.2, 0.1, 0.0),
            ),
        ];
        let pairs: Vec<MotionPair> = motions
            .iter()
            .map(|a| {
                // B = X^-1 A X
                let b = x.inverse() * *a * x;
                MotionPair {
                    i: 0,
                    j: 1,
                    rot_a: a.rotation,
                    rot_b: b.rotation,
                    tra_a: a.translation,
                    tra_b: b.translation,
                }
            })
            .collect();

        let t = estimate_translation(&pairs, &x.rotation, 1e-8).unwrap();
        assert!((t - x.translation).norm() < 1e-9, "{t:?}");
    }
}
