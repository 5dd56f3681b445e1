//! Deterministic noise helpers for synthetic datasets.
//!
//! The functions here avoid `thread_rng` and do not depend on the internal
//! algorithm of `rand` RNGs. This keeps synthetic datasets stable across
//! versions and platforms.

use crate::{from_axis_angle, Real, RigidTransform, Vec3};

/// Deterministic Gaussian pose noise.
///
/// Rotations are perturbed by a left-multiplied rotation whose axis-angle
/// components are i.i.d. `N(0, rotation_sigma²)` (radians); translations get
/// i.i.d. `N(0, translation_sigma²)` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseNoise {
    /// Base seed controlling the pseudo-random sequence.
    pub seed: u64,
    /// Per-axis rotation noise standard deviation (radians).
    pub rotation_sigma: Real,
    /// Per-axis translation noise standard deviation (length units).
    pub translation_sigma: Real,
}

impl Default for PoseNoise {
    fn default() -> Self {
        Self {
            seed: 0,
            rotation_sigma: 0.0,
            translation_sigma: 0.0,
        }
    }
}

impl PoseNoise {
    /// Unit-variance Gaussian 3-vector for a given `(stream, slot)` key.
    #[inline]
    pub fn standard_normal3(&self, stream: usize, slot: usize) -> Vec3 {
        let key = mix_key(self.seed, stream, slot);
        let (a, b) = box_muller(key);
        let (c, _) = box_muller(key ^ 0xD6E8_FEB8_6659_FD93);
        Vec3::new(a, b, c)
    }

    /// Apply deterministic noise to a transform; `stream` selects an
    /// independent sequence.
    pub fn apply(&self, stream: usize, t: &RigidTransform) -> RigidTransform {
        let mut out = *t;
        if self.rotation_sigma != 0.0 {
            let omega = self.standard_normal3(stream, 0) * self.rotation_sigma.abs();
            out.rotation = from_axis_angle(&omega) * t.rotation;
        }
        if self.translation_sigma != 0.0 {
            out.translation += self.standard_normal3(stream, 1) * self.translation_sigma.abs();
        }
        out
    }
}

#[inline]
fn mix_key(seed: u64, stream: usize, slot: usize) -> u64 {
    // SplitMix64 stream selection via a stable integer mix.
    seed ^ (stream as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (slot as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

/// Two independent standard normals from one key.
#[inline]
fn box_muller(key: u64) -> (Real, Real) {
    let u1 = u64_to_unit_f64(splitmix64(key));
    let u2 = u64_to_unit_f64(splitmix64(key ^ 0x94D0_49BB_1331_11EB));
    // Map [0, 1) -> (0, 1] so the log stays finite.
    let r = (-2.0 * (1.0 - u1).ln()).sqrt();
    let phi = 2.0 * std::f64::consts::PI * u2;
    (r * phi.cos(), r * phi.sin())
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn u64_to_unit_f64(x: u64) -> Real {
    // Convert the top 53 bits to a double in [0, 1).
    let mantissa = x >> 11;
    (mantissa as Real) * (1.0 / ((1u64 << 53) as Real))
}
