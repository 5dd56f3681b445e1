use crate::{Real, RigidTransform, TransformError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of a [`Sample`] a transform belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSide {
    Robot,
    Camera,
}

impl fmt::Display for SampleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSide::Robot => f.write_str("robot"),
            SampleSide::Camera => f.write_str("camera"),
        }
    }
}

/// Hand-eye calibration mode.
///
/// Specifies the mounting, and with it how the robot-side pose of a
/// [`Sample`] enters the `AX = XB` constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandEyeMode {
    /// Camera mounted on the robot end-effector, target fixed in the cell.
    ///
    /// Robot-side poses are used as given; the result is `^G T_C`, the
    /// camera pose in the gripper frame.
    #[default]
    EyeInHand,
    /// Camera fixed in the cell, target carried by the end-effector.
    ///
    /// Robot-side poses are inverted before building motion pairs; the
    /// result is `^B T_C`, the camera pose in the robot base frame.
    EyeToHand,
}

/// One paired observation captured at a single robot configuration.
///
/// `robot_se3_target` is the pose reported by the motion side (the gripper or
/// target holder expressed in the robot base frame), `camera_se3_target` is
/// the target pose estimated by the vision side, expressed in the camera
/// frame. How the robot-side pose relates to the unknown transform depends on
/// the mounting; the solver's mode selects the convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(alias = "base_se3_gripper", alias = "robot_pose")]
    pub robot_se3_target: RigidTransform,
    #[serde(alias = "cam_se3_target")]
    pub camera_se3_target: RigidTransform,
}

impl Sample {
    pub fn new(robot_se3_target: RigidTransform, camera_se3_target: RigidTransform) -> Self {
        Self {
            robot_se3_target,
            camera_se3_target,
        }
    }

    /// Check both transforms are rigid within `eps`, reporting the first
    /// offending side.
    pub fn validate(&self, eps: Real) -> Result<(), (SampleSide, TransformError)> {
        self.robot_se3_target
            .validate(eps)
            .map_err(|e| (SampleSide::Robot, e))?;
        self.camera_se3_target
            .validate(eps)
            .map_err(|e| (SampleSide::Camera, e))
    }
}
