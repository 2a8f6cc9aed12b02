//! Rigid transforms (rotation + translation) for bone world/local state

use glam::{Quat, Vec3};
use std::ops::Mul;

/// Rotation followed by translation. Never carries scale or shear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    /// Unit quaternion rotation
    pub rotation: Quat,
    /// Translation applied after rotation
    pub translation: Vec3,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub const fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub const fn from_rotation(rotation: Quat) -> Self {
        Self::from_rotation_translation(rotation, Vec3::ZERO)
    }

    /// Inverse transform: `self * self.inverse() == IDENTITY` (up to rounding)
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }
}

impl Mul for RigidTransform {
    type Output = RigidTransform;

    /// `(a * b)` applies `b` first, then `a` (same convention as glam matrices)
    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        RigidTransform {
            rotation: self.rotation * rhs.rotation,
            translation: self.rotation * rhs.translation + self.translation,
        }
    }
}
