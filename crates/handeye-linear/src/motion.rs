//! Relative-motion pairs for `AX = XB`.

use crate::HandEyeError;
use handeye_core::{rotation_angle, Mat3, Real, RigidTransform, Vec3};
use log::debug;
use rayon::prelude::*;

/// Motion pair for Tsai–Lenz AX = XB:
/// A: relative motion in robot/hand chain
/// B: relative motion in camera/target chain
///
/// `i < j` are the indices of the samples the pair was built from.
#[derive(Debug, Clone, Copy)]
pub struct MotionPair {
    pub i: usize,
    pub j: usize,
    pub rot_a: Mat3,
    pub rot_b: Mat3,
    pub tra_a: Vec3,
    pub tra_b: Vec3,
}

impl MotionPair {
    /// Smaller of the two rotation angles (radians).
    pub fn rotation_magnitude(&self) -> Real {
        rotation_angle(&self.rot_a).min(rotation_angle(&self.rot_b))
    }
}

/// Informative motion pairs plus the count of discarded ones.
#[derive(Debug, Clone)]
pub struct MotionPairs {
    pub pairs: Vec<MotionPair>,
    pub discarded: usize,
}

/// Build a single motion pair from two pose samples.
///
/// A = (T_robot,i)^(-1) (T_robot,j)
/// B = (T_cam,i) (T_cam,j)^(-1)
fn make_motion_pair(
    (i, j): (usize, usize),
    robot_i: &RigidTransform,
    camera_i: &RigidTransform,
    robot_j: &RigidTransform,
    camera_j: &RigidTransform,
) -> MotionPair {
    let a = robot_i.inverse() * *robot_j;
    let b = *camera_i * camera_j.inverse();

    MotionPair {
        i,
        j,
        rot_a: a.rotation,
        rot_b: b.rotation,
        tra_a: a.translation,
        tra_b: b.translation,
    }
}

/// Build all informative motion pairs from pose streams.
///
/// Every unordered pair `i < j` is considered. Pairs whose rotation (the
/// smaller of the A and B angles) is below `min_angle` radians carry no
/// rotational information and are dropped.
///
/// Pairs are built in parallel but returned in lexicographic `(i, j)` order,
/// so downstream accumulation is reproducible.
pub fn build_motion_pairs(
    robot: &[RigidTransform],
    camera: &[RigidTransform],
    min_angle: Real,
) -> Result<MotionPairs, HandEyeError> {
    if robot.len() != camera.len() {
        return Err(HandEyeError::MismatchedInputs {
            robot: robot.len(),
            camera: camera.len(),
        });
    }
    let num_poses = robot.len();
    if num_poses < 2 {
        return Err(HandEyeError::NotEnoughSamples(num_poses));
    }

    let index_pairs: Vec<(usize, usize)> = (0..num_poses - 1)
        .flat_map(|i| ((i + 1)..num_poses).map(move |j| (i, j)))
        .collect();

    let candidates: Vec<(MotionPair, Real)> = index_pairs
        .par_iter()
        .map(|&(i, j)| {
            let pair = make_motion_pair((i, j), &robot[i], &camera[i], &robot[j], &camera[j]);
            let magnitude = pair.rotation_magnitude();
            (pair, magnitude)
        })
        .collect();

    let mut pairs = Vec::with_capacity(candidates.len());
    let mut discarded = 0;
    for (pair, magnitude) in candidates {
        if magnitude < min_angle {
            debug!(
                "skipping pair ({},{}): small rotation {:.3e} rad",
                pair.i, pair.j, magnitude
            );
            discarded += 1;
        } else {
            pairs.push(pair);
        }
    }

    Ok(MotionPairs { pairs, discarded })
}
