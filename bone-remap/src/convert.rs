//! Coordinate conversion quaternion
//!
//! Closed form of: build the rotation matrix of `A`, swap its second and
//! third rows, transpose, invert, and convert back to a quaternion. No
//! matrix is ever built; the four components are linear in `A`.

use glam::Quat;

/// 1/√2, the only constant in the conversion
const C: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Conversion quaternion `B` for a bind rotation `A`.
///
/// ```text
/// B.w =  c * (A.y - A.z)
/// B.x =  c * (-A.y - A.z)
/// B.y = -c * (A.w - A.x)
/// B.z =  c * (A.w + A.x)
/// ```
///
/// Unit input gives unit output: the rows are orthogonal with norm √2.
pub fn coordinate_conversion(a: Quat) -> Quat {
    let w = C * (a.y - a.z);
    let x = C * (-a.y - a.z);
    let y = -C * (a.w - a.x);
    let z = C * (a.w + a.x);
    Quat::from_xyzw(x, y, z, w)
}
