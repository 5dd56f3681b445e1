use crate::HandEyeError;
use handeye_core::{HandEyeMode, Real, DEFAULT_ROTATION_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Configuration for the linear hand-eye solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandEyeConfig {
    /// Mounting convention (eye-in-hand or eye-to-hand).
    pub mode: HandEyeMode,

    /// Orthonormality tolerance ε_rot applied to every input rotation and to
    /// the final estimate.
    pub rotation_tolerance: Real,

    /// Smallest accepted `σ_min / σ_max` of the stacked rotation system.
    /// Singular values below `rank_ratio · σ_max` are also treated as zero in
    /// both least-squares solves.
    pub rank_ratio: Real,

    /// Motion pairs rotating less than this (radians) are discarded.
    pub min_motion_angle_rad: Real,
}

impl Default for HandEyeConfig {
    fn default() -> Self {
        Self {
            mode: HandEyeMode::EyeInHand,
            rotation_tolerance: DEFAULT_ROTATION_TOLERANCE,
            rank_ratio: 1e-8,
            min_motion_angle_rad: 1e-3,
        }
    }
}

impl HandEyeConfig {
    pub fn with_mode(mut self, mode: HandEyeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), HandEyeError> {
        if !(self.rotation_tolerance.is_finite() && self.rotation_tolerance > 0.0) {
            return Err(HandEyeError::InvalidConfig(format!(
                "rotation_tolerance must be positive, got {}",
                self.rotation_tolerance
            )));
        }
        if !(self.rank_ratio.is_finite() && self.rank_ratio > 0.0 && self.rank_ratio < 1.0) {
            return Err(HandEyeError::InvalidConfig(format!(
                "rank_ratio must lie in (0, 1), got {}",
                self.rank_ratio
            )));
        }
        if !(self.min_motion_angle_rad.is_finite() && self.min_motion_angle_rad >= 0.0) {
            return Err(HandEyeError::InvalidConfig(format!(
                "min_motion_angle_rad must be non-negative, got {}",
                self.min_motion_angle_rad
            )));
        }
        Ok(())
    }
}
