//! Small vector helpers shared by the mesh generators and the tangent builder.

use crate::Vec3;

/// Vectors shorter than this (relative to their source) are treated as zero.
pub const RELATIVE_EPSILON: f32 = 1e-2;

/// Unit vector orthogonal to `n`, built by crossing with a fixed world axis.
/// Uses +Z unless `n` is (nearly) parallel to it, then +X.
#[inline]
pub fn orthogonal_axis(n: Vec3) -> Vec3 {
    let up = if n.z.abs() < 0.999 { Vec3::Z } else { Vec3::X };
    n.cross(up).normalize()
}

/// Normalize `v` unless it collapsed to (relative) zero.
///
/// `reference` is the magnitude of the vector `v` was derived from; a
/// projection that removed nearly everything is rejected the same way as
/// an exact zero. Non-finite input yields `None`.
#[inline]
pub fn normalize_relative(v: Vec3, reference: f32) -> Option<Vec3> {
    let len = v.length();
    if !len.is_finite() || !reference.is_finite() || len <= RELATIVE_EPSILON * reference {
        return None;
    }
    Some(v / len)
}
