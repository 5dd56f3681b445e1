//! Rigid transforms stored as an explicit rotation matrix and translation.
//!
//! Unlike [`Iso3`], whose unit quaternion silently normalises whatever it is
//! built from, [`RigidTransform`] keeps the raw rotation block so that a
//! non-rigid input (scaling, shear, reflection) can be detected and rejected.

use crate::{check_rotation, Iso3, Mat3, Mat4, Real, TransformError, Vec3};
use nalgebra::{Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Rotation + translation, `p' = R p + t`.
///
/// Serialized as a row-major 4×4 homogeneous matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[[Real; 4]; 4]", try_from = "[[Real; 4]; 4]")]
pub struct RigidTransform {
    pub rotation: Mat3,
    pub translation: Vec3,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    pub fn identity() -> Self {
        Self {
            rotation: Mat3::identity(),
            translation: Vec3::zeros(),
        }
    }

    /// Build from parts without checking rigidity; see [`Self::validate`].
    pub fn from_parts(rotation: Mat3, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Build from parts, rejecting rotations that are not orthonormal
    /// within `eps`.
    pub fn try_new(rotation: Mat3, translation: Vec3, eps: Real) -> Result<Self, TransformError> {
        let t = Self::from_parts(rotation, translation);
        t.validate(eps)?;
        Ok(t)
    }

    /// Split a homogeneous matrix into rotation and translation.
    ///
    /// Only the homogeneous structure and finiteness are checked here;
    /// rigidity is a tolerance-dependent property left to [`Self::validate`].
    pub fn from_matrix4(m: &Mat4) -> Result<Self, TransformError> {
        if m.iter().any(|v| !v.is_finite()) {
            return Err(TransformError::NonFinite);
        }
        let bottom = m.fixed_view::<1, 4>(3, 0);
        if bottom[0] != 0.0 || bottom[1] != 0.0 || bottom[2] != 0.0 || bottom[3] != 1.0 {
            return Err(TransformError::NotHomogeneous);
        }
        Ok(Self {
            rotation: m.fixed_view::<3, 3>(0, 0).into_owned(),
            translation: m.fixed_view::<3, 1>(0, 3).into_owned(),
        })
    }

    pub fn to_matrix4(&self) -> Mat4 {
        let mut m = Mat4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        m
    }

    /// Row-major homogeneous matrix.
    pub fn to_rows(&self) -> [[Real; 4]; 4] {
        let m = self.to_matrix4();
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = m[(r, c)];
            }
        }
        rows
    }

    pub fn from_rows(rows: &[[Real; 4]; 4]) -> Result<Self, TransformError> {
        Self::from_matrix4(&Mat4::from_fn(|r, c| rows[r][c]))
    }

    pub fn from_isometry(iso: &Iso3) -> Self {
        Self {
            rotation: iso.rotation.to_rotation_matrix().into_inner(),
            translation: iso.translation.vector,
        }
    }

    /// Convert to an [`Iso3`]. The rotation is re-normalised through a unit
    /// quaternion, so call this only on validated transforms.
    pub fn to_isometry(&self) -> Iso3 {
        let rot =
            UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(self.rotation));
        Iso3::from_parts(Translation3::from(self.translation), rot)
    }

    /// Check the transform is rigid: finite translation and a proper rotation
    /// within `eps`.
    pub fn validate(&self, eps: Real) -> Result<(), TransformError> {
        if self.translation.iter().any(|v| !v.is_finite()) {
            return Err(TransformError::NonFinite);
        }
        check_rotation(&self.rotation, eps)
    }

    /// Exact inverse `(Rᵀ, −Rᵀ t)`.
    pub fn inverse(&self) -> Self {
        let rt = self.rotation.transpose();
        Self {
            rotation: rt,
            translation: -(rt * self.translation),
        }
    }

    /// `self · other`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Apply to a point given by its coordinate vector.
    pub fn transform_point(&self, p: &Vec3) -> Vec3 {
        self.rotation * p + self.translation
    }
}

impl Mul for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<'a> Mul<&'a RigidTransform> for &'a RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: &'a RigidTransform) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Iso3> for RigidTransform {
    fn from(iso: Iso3) -> Self {
        Self::from_isometry(&iso)
    }
}

impl From<RigidTransform> for [[Real; 4]; 4] {
    fn from(t: RigidTransform) -> Self {
        t.to_rows()
    }
}

impl TryFrom<[[Real; 4]; 4]> for RigidTransform {
    type Error = TransformError;

    fn try_from(rows: [[Real; 4]; 4]) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}
