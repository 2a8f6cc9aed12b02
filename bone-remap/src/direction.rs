//! Canonical bone directions and the declarative task table

use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// One of the six world axes a bone can be aimed along
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::PosX,
        Axis::NegX,
        Axis::PosY,
        Axis::NegY,
        Axis::PosZ,
        Axis::NegZ,
    ];

    /// Unit vector of this axis
    pub fn vector(self) -> Vec3 {
        match self {
            Axis::PosX => Vec3::X,
            Axis::NegX => Vec3::NEG_X,
            Axis::PosY => Vec3::Y,
            Axis::NegY => Vec3::NEG_Y,
            Axis::PosZ => Vec3::Z,
            Axis::NegZ => Vec3::NEG_Z,
        }
    }

    /// Fixed world rotation for a bone aimed along this axis.
    ///
    /// Bones point down their local +Y, so +Y is the identity and every other
    /// axis is a single quarter or half turn (XYZ Euler presets):
    ///
    /// | axis | euler (x, y, z) |
    /// |------|-----------------|
    /// | +X   | (0, 0, -π/2)    |
    /// | -X   | (0, 0, π/2)     |
    /// | +Y   | (0, 0, 0)       |
    /// | -Y   | (0, 0, π)       |
    /// | +Z   | (π/2, 0, 0)     |
    /// | -Z   | (-π/2, 0, 0)    |
    pub fn world_rotation(self) -> Quat {
        match self {
            Axis::PosX => Quat::from_rotation_z(-FRAC_PI_2),
            Axis::NegX => Quat::from_rotation_z(FRAC_PI_2),
            Axis::PosY => Quat::IDENTITY,
            Axis::NegY => Quat::from_rotation_z(PI),
            Axis::PosZ => Quat::from_rotation_x(FRAC_PI_2),
            Axis::NegZ => Quat::from_rotation_x(-FRAC_PI_2),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Axis::PosX => "+X",
            Axis::NegX => "-X",
            Axis::PosY => "+Y",
            Axis::NegY => "-Y",
            Axis::PosZ => "+Z",
            Axis::NegZ => "-Z",
        };
        f.write_str(s)
    }
}

/// Requested world direction for a bone
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    Axis(Axis),
    /// Anything that does not normalize onto one of the six axes
    Unsupported([f32; 3]),
}

impl Direction {
    /// Classify a raw direction vector.
    ///
    /// The vector is normalized first and then compared exactly against the
    /// unit axes, so `(0, 0, 2)` is `+Z` while `(1, 1, 0)` and the zero
    /// vector are unsupported.
    pub fn from_vector(v: [f32; 3]) -> Self {
        let n = Vec3::from_array(v).normalize_or_zero();
        Axis::ALL
            .into_iter()
            .find(|axis| axis.vector() == n)
            .map(Direction::Axis)
            .unwrap_or(Direction::Unsupported(v))
    }

    pub fn axis(&self) -> Option<Axis> {
        match self {
            Direction::Axis(axis) => Some(*axis),
            Direction::Unsupported(_) => None,
        }
    }

    /// Raw vector form (unit vector for supported axes)
    pub fn to_array(&self) -> [f32; 3] {
        match self {
            Direction::Axis(axis) => axis.vector().to_array(),
            Direction::Unsupported(v) => *v,
        }
    }
}

impl From<Axis> for Direction {
    fn from(axis: Axis) -> Self {
        Direction::Axis(axis)
    }
}

/// One row of the task table: aim `bone` along `direction`, then twist it
#[derive(Clone, Debug, PartialEq)]
pub struct BoneTask {
    pub bone: String,
    pub direction: Direction,
    /// Twist about the bone's own Y axis, in degrees (0 = none)
    pub twist_degrees: i32,
}

impl BoneTask {
    pub fn new(bone: impl Into<String>, direction: impl Into<Direction>, twist_degrees: i32) -> Self {
        Self {
            bone: bone.into(),
            direction: direction.into(),
            twist_degrees,
        }
    }

    /// Build a task from a raw vector, as written in task tables
    pub fn from_vector(bone: impl Into<String>, vector: [f32; 3], twist_degrees: i32) -> Self {
        Self::new(bone, Direction::from_vector(vector), twist_degrees)
    }
}
