//! Mathematical utilities and type definitions.
//!
//! This module provides fundamental types used throughout the library
//! and SO(3) helpers shared by the hand-eye solver.

use nalgebra::{Isometry3, Matrix3, Matrix4, Vector3};

pub mod rotation;

pub use rotation::{
    check_rotation, from_axis_angle, orthonormalize, rotation_angle, rotation_deviation,
    rotation_to_quaternion, skew, to_axis_angle,
};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 4×4 matrix with [`Real`] entries.
pub type Mat4 = Matrix4<Real>;
/// 3D rigid transform (SE(3)) using [`Real`].
pub type Iso3 = Isometry3<Real>;
