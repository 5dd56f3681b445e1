//! Deterministic synthetic data generation helpers.
//!
//! This module provides small, reusable building blocks for constructing
//! synthetic hand-eye problems used in tests and demos:
//! - transform constructors from Euler angles,
//! - sample generators that satisfy `AX = XB` exactly for a known `X`,
//! - pose comparison helpers,
//! - deterministic pseudo-random noise utilities.
//!
//! The helpers are intentionally lightweight (no heavy dependencies) and
//! deterministic (explicit seeds; stable ordering).
//!
//! # Example
//!
//! ```
//! use handeye_core::{synthetic::handeye, HandEyeMode};
//!
//! let x = handeye::make_transform((0.1, -0.2, 0.3), (0.05, 0.0, 0.1));
//! let anchor = handeye::make_transform((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
//! let robot = handeye::robot_poses_varied(6);
//! let samples = handeye::samples_from_ground_truth(&x, &anchor, &robot, HandEyeMode::EyeInHand);
//! assert_eq!(samples.len(), 6);
//! ```

pub mod handeye;
pub mod noise;
