//! Core math and geometry primitives for hand-eye calibration.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec3`, `Mat3`, ...),
//! - rotation helpers (skew matrices, axis-angle conversion, SO(3) projection),
//! - [`RigidTransform`], a validated rotation + translation pair serialized as
//!   a 4×4 homogeneous matrix,
//! - [`Sample`], one paired robot/camera observation of the calibration target,
//! - deterministic synthetic data generators used by tests and demos.

mod error;
/// Linear algebra type aliases and rotation helpers.
pub mod math;
mod sample;
pub mod synthetic;
mod transform;

pub use error::TransformError;
pub use math::*;
pub use sample::{HandEyeMode, Sample, SampleSide};
pub use transform::RigidTransform;

/// Default tolerance for rotation orthonormality checks (ε_rot).
pub const DEFAULT_ROTATION_TOLERANCE: Real = 1e-6;
