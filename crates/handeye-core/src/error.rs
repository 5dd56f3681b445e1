use crate::Real;
use thiserror::Error;

/// Errors raised when a matrix does not describe a rigid transform.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    /// `‖RᵀR − I‖` exceeds the tolerance.
    #[error("rotation block is not orthonormal (|R^T R - I| = {0:.3e})")]
    NotOrthonormal(Real),
    /// The rotation block is a reflection or has drifted away from `det = +1`.
    #[error("rotation determinant is {0:.6}, expected +1")]
    NotProperRotation(Real),
    /// A NaN or infinite entry was found.
    #[error("transform contains non-finite values")]
    NonFinite,
    /// The bottom row of a homogeneous matrix is not `[0, 0, 0, 1]`.
    #[error("homogeneous matrix bottom row must be [0, 0, 0, 1]")]
    NotHomogeneous,
}
