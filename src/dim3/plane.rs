use glam::DVec3;

use crate::dim3::vecmath::{dist_to_plane, orient_plane};

/// A face plane together with the sign that turns raw signed distances into
/// "outside" distances.
///
/// `sign * (dot(point, normal) - offset) > 0` means the point is outside the face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal of the plane, oriented towards the reference point it was built from.
    pub normal: DVec3,
    /// The plane constant `d` such that `dot(x, normal) = d` on the plane.
    pub offset: f64,
    /// `1.0` or `-1.0`, selecting which side of `normal` is outside.
    pub sign: f64,
}

impl Plane {
    /// Creates a plane from its raw parts.
    #[inline]
    pub fn new(normal: DVec3, offset: f64, sign: f64) -> Self {
        debug_assert!(sign == 1.0 || sign == -1.0);
        Self {
            normal,
            offset,
            sign,
        }
    }

    /// Builds the plane through `reference_point` for an outward unit normal.
    ///
    /// The normal is stored oriented towards the reference point and the
    /// sign remembers whether that flipped it.
    #[inline]
    pub fn oriented(outward_normal: DVec3, reference_point: DVec3) -> Self {
        let (normal, sign) = orient_plane(outward_normal, reference_point);
        Self::new(normal, reference_point.dot(normal), sign)
    }

    /// Signed distance of `point` measured towards the outside of the face.
    #[inline]
    pub fn outside_distance(&self, point: DVec3) -> f64 {
        self.sign * dist_to_plane(point, self.normal, self.offset)
    }

    /// The outward unit normal of the face.
    #[inline]
    pub fn outward_normal(&self) -> DVec3 {
        self.normal * self.sign
    }

    /// The plane constant of the outward normal, `dot(x, outward_normal) = outward_offset`.
    #[inline]
    pub fn outward_offset(&self) -> f64 {
        self.offset * self.sign
    }
}
