//! Closed-form hand-eye calibration.
//!
//! Solves `A·X = X·B` from paired robot/camera pose samples: Tsai–Lenz
//! rotation averaging over modified Rodrigues parameters followed by a linear
//! least-squares translation solve, both on top of nalgebra's SVD.
//!
//! ```
//! use handeye_core::{synthetic::handeye, HandEyeMode};
//! use handeye_linear::{HandEyeConfig, HandEyeSolver};
//!
//! let x = handeye::make_transform((0.1, 0.2, -0.1), (0.02, 0.0, 0.1));
//! let target = handeye::make_transform((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
//! let samples = handeye::samples_from_ground_truth(
//!     &x,
//!     &target,
//!     &handeye::robot_poses_varied(5),
//!     HandEyeMode::EyeInHand,
//! );
//!
//! let estimate = HandEyeSolver::new(HandEyeConfig::default()).solve(&samples).unwrap();
//! let (dt, angle) = handeye::pose_error(&estimate.transform, &x);
//! assert!(dt < 1e-6 && angle < 1e-6);
//! ```

mod config;
mod error;
mod finalize;
mod handeye;
mod motion;
mod report;
mod rotation;
mod translation;

pub use config::HandEyeConfig;
pub use error::{ErrorKind, HandEyeError};
pub use finalize::finalize_transform;
pub use handeye::{estimate_handeye, HandEyeEstimate, HandEyeSolver};
pub use motion::{build_motion_pairs, MotionPair, MotionPairs};
pub use report::{motion_residuals, HandEyeReport, MotionResidual};
pub use rotation::{
    estimate_rotation, from_modified_rodrigues, modified_rodrigues, RotationEstimate,
};
pub use translation::estimate_translation;

pub use handeye_core::{HandEyeMode, RigidTransform, Sample};
