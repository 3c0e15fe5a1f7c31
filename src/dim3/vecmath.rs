//! Geometric primitives on [`DVec3`] used by hull construction.
//!
//! Every function here is pure. Normalization is the only fallible operation:
//! it divides by the vector length and refuses to do so for zero-length or
//! non-finite vectors instead of producing NaNs.

use glam::DVec3;

use crate::dim3::{ConvexHull3dError, DegenerateInput};

/// Returns `v / |v|`.
///
/// # Errors
///
/// Returns [`ConvexHull3dError::DegenerateGeometry`] if the length of `v` is zero or not finite.
#[inline]
pub fn normalize(v: DVec3) -> Result<DVec3, ConvexHull3dError> {
    let length = v.length();
    if length == 0.0 || !length.is_finite() {
        return Err(ConvexHull3dError::DegenerateGeometry(
            DegenerateInput::ZeroLengthVector,
        ));
    }
    Ok(v / length)
}

/// Distance from `p` to the infinite line through `q` and `r`.
///
/// The result is NaN if `q == r`; callers check for distinct line points first.
#[inline]
pub fn dist_to_line(p: DVec3, q: DVec3, r: DVec3) -> f64 {
    let u = r - q;
    (p - q).cross(u).length() / u.length()
}

/// Signed distance from `point` to the plane `dot(x, unit_normal) = offset`.
#[inline]
pub fn dist_to_plane(point: DVec3, unit_normal: DVec3, offset: f64) -> f64 {
    point.dot(unit_normal) - offset
}

/// Unit normal of the triangle `(p, q, r)` pointing away from `viewpoint`.
///
/// The raw normal is `cross(q - p, r - p)`. It is negated when the viewpoint lies on its
/// positive side or on the plane itself.
///
/// # Errors
///
/// Returns [`ConvexHull3dError::DegenerateGeometry`] if the triangle has zero area.
#[inline]
pub fn face_normal(
    p: DVec3,
    q: DVec3,
    r: DVec3,
    viewpoint: DVec3,
) -> Result<DVec3, ConvexHull3dError> {
    let normal = normalize((q - p).cross(r - p))?;
    if (viewpoint - p).dot(normal) < 0.0 {
        Ok(normal)
    } else {
        Ok(-normal)
    }
}

/// Orients `normal` so that `reference_point` lies on its non-negative side.
///
/// Returns the oriented normal together with the sign that was applied to it (`1.0` or `-1.0`).
#[inline]
pub fn orient_plane(normal: DVec3, reference_point: DVec3) -> (DVec3, f64) {
    if reference_point.dot(normal) >= 0.0 {
        (normal, 1.0)
    } else {
        (-normal, -1.0)
    }
}
