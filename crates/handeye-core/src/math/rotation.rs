//! SO(3) helpers: skew matrices, rotation checks, axis-angle conversion and
//! projection of near-rotations back onto the manifold.

use crate::{Mat3, Real, TransformError, Vec3};
use nalgebra::{Rotation3, UnitQuaternion};

/// Cross-product matrix `[v]×` such that `[v]× w = v × w`.
pub fn skew(v: &Vec3) -> Mat3 {
    Mat3::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
}

/// Frobenius norm of `RᵀR − I`.
pub fn rotation_deviation(r: &Mat3) -> Real {
    (r.transpose() * r - Mat3::identity()).norm()
}

/// Check that `r` is a proper rotation within `eps`.
///
/// Requires finite entries, `‖RᵀR − I‖ < eps` and `|det R − 1| < eps`.
pub fn check_rotation(r: &Mat3, eps: Real) -> Result<(), TransformError> {
    if r.iter().any(|v| !v.is_finite()) {
        return Err(TransformError::NonFinite);
    }
    let deviation = rotation_deviation(r);
    if deviation >= eps {
        return Err(TransformError::NotOrthonormal(deviation));
    }
    let det = r.determinant();
    if (det - 1.0).abs() >= eps {
        return Err(TransformError::NotProperRotation(det));
    }
    Ok(())
}

/// Project a general 3x3 matrix to the closest rotation matrix (SO(3))
/// using SVD.
///
/// Only meant for cleaning up estimated rotations; inputs are never
/// passed through this.
pub fn orthonormalize(m: &Mat3) -> Result<Mat3, TransformError> {
    if m.iter().any(|v| !v.is_finite()) {
        return Err(TransformError::NonFinite);
    }
    let svd = m.svd(true, true);
    let u = svd.u.ok_or(TransformError::NonFinite)?;
    let v_t = svd.v_t.ok_or(TransformError::NonFinite)?;
    let mut r = u * v_t;

    // Ensure det(R) > 0
    if r.determinant() < 0.0 {
        let mut u_flipped = u;
        u_flipped.column_mut(2).neg_mut();
        r = u_flipped * v_t;
    }
    Ok(r)
}

/// Unit quaternion of `r` with a non-negative scalar part.
pub fn rotation_to_quaternion(r: &Mat3) -> UnitQuaternion<Real> {
    let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*r));
    if q.w < 0.0 {
        UnitQuaternion::new_unchecked(-q.into_inner())
    } else {
        q
    }
}

/// Rotation angle of `r` in `[0, π]`.
///
/// Computed from the quaternion half-angle with `atan2`, which stays accurate
/// for both tiny and near-π rotations.
pub fn rotation_angle(r: &Mat3) -> Real {
    let q = rotation_to_quaternion(r);
    2.0 * q.imag().norm().atan2(q.w)
}

/// log: SO(3) -> so(3) as a 3-vector (axis * angle).
///
/// Fails if `r` is not a rotation within `eps`.
pub fn to_axis_angle(r: &Mat3, eps: Real) -> Result<Vec3, TransformError> {
    check_rotation(r, eps)?;
    let q = rotation_to_quaternion(r);
    let imag = q.imag();
    let half_sin = imag.norm();
    if half_sin < 1e-12 {
        // First-order: imag ≈ axis * θ / 2.
        return Ok(imag * 2.0);
    }
    let angle = 2.0 * half_sin.atan2(q.w);
    Ok(imag * (angle / half_sin))
}

/// exp: so(3) -> SO(3), the inverse of [`to_axis_angle`].
pub fn from_axis_angle(v: &Vec3) -> Mat3 {
    Rotation3::new(*v).into_inner()
}
