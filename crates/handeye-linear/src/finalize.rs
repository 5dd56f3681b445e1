use crate::HandEyeError;
use handeye_core::{check_rotation, orthonormalize, Mat3, Real, RigidTransform, Vec3};

/// Assemble the final transform, re-orthonormalising the rotation.
///
/// Fails with [`HandEyeError::Numerical`] if any entry is non-finite or the
/// cleaned rotation still misses `‖RᵀR − I‖ < eps`, `|det R − 1| < eps`.
pub fn finalize_transform(
    rotation: &Mat3,
    translation: &Vec3,
    eps: Real,
) -> Result<RigidTransform, HandEyeError> {
    if rotation.iter().chain(translation.iter()).any(|v| !v.is_finite()) {
        return Err(HandEyeError::Numerical(
            "estimate contains non-finite values".into(),
        ));
    }
    let rotation = orthonormalize(rotation)
        .map_err(|e| HandEyeError::Numerical(format!("orthonormalization failed: {e}")))?;
    check_rotation(&rotation, eps)
        .map_err(|e| HandEyeError::Numerical(format!("invalid rotation estimate: {e}")))?;

    Ok(RigidTransform::from_parts(rotation, *translation))
}
