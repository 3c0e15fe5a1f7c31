use glam::DVec3;

use crate::dim3::plane::Plane;

/// The index of a point in the input point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u32);

impl PointId {
    /// Returns the underlying index of the point as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PointId {
    #[inline]
    fn from(value: u32) -> Self {
        PointId(value)
    }
}

/// The index of a face, either in the construction arena or in the committed face list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub u32);

impl FaceId {
    /// Returns the underlying index of the face as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for FaceId {
    #[inline]
    fn from(value: u32) -> Self {
        FaceId(value)
    }
}

/// A face that has not been committed to the hull yet.
///
/// The vertex order is significant: refinement derives the child faces and
/// their orientation viewpoints from it.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingFace {
    /// The ordered vertices of the face.
    pub(crate) points: [PointId; 3],
    /// The face plane with its outside sign.
    pub(crate) plane: Plane,
    /// The points strictly outside this face that were assigned to it.
    pub(crate) outside_points: Vec<PointId>,
    /// Whether the face is still part of the hull under construction.
    pub(crate) valid: bool,
}

impl PendingFace {
    #[inline]
    pub fn new(points: [PointId; 3], plane: Plane) -> Self {
        Self {
            points,
            plane,
            outside_points: Vec::new(),
            valid: true,
        }
    }

    /// Returns the distance of the given point along the outward direction of the face.
    #[inline]
    pub fn distance_to_point(&self, point_id: PointId, points: &[DVec3]) -> f64 {
        self.plane.outside_distance(points[point_id.index()])
    }

    /// Returns the distance to the given point if it is outside the face by more than `epsilon`.
    #[inline]
    pub fn distance_to_visible_point(
        &self,
        point_id: PointId,
        points: &[DVec3],
        epsilon: f64,
    ) -> Option<f64> {
        let distance = self.distance_to_point(point_id, points);
        (distance > epsilon).then_some(distance)
    }

    /// Returns the outside point that is furthest from the face.
    ///
    /// Ties keep the earliest point in the outside set.
    #[inline]
    pub fn furthest_outside_point(&self, points: &[DVec3]) -> Option<(PointId, f64)> {
        let mut furthest = None;
        let mut max_distance = 0.0;

        for &point_id in &self.outside_points {
            let distance = self.distance_to_point(point_id, points);
            if distance > max_distance {
                max_distance = distance;
                furthest = Some((point_id, distance));
            }
        }

        furthest
    }

    /// The edges of the face, each paired with the opposite vertex.
    ///
    /// For the face `(p, q, r)` these are `(p, q | r)`, `(p, r | q)` and `(r, q | p)`.
    #[inline]
    pub fn edges_with_opposite(&self) -> [(PointId, PointId, PointId); 3] {
        let [p, q, r] = self.points;
        [(p, q, r), (p, r, q), (r, q, p)]
    }
}

/// Assigns each point to the face with the smallest distance that is still strictly
/// greater than `epsilon`.
///
/// Faces are visited in order and only a strictly smaller distance replaces the
/// current choice, so equal distances resolve to the earlier face.
/// Points outside none of the faces are interior and are dropped.
pub fn partition_outside_points(
    candidates: impl IntoIterator<Item = PointId>,
    faces: &mut [PendingFace],
    points: &[DVec3],
    epsilon: f64,
) {
    for point_id in candidates {
        let mut nearest: Option<(usize, f64)> = None;

        for (i, face) in faces.iter().enumerate() {
            let Some(distance) = face.distance_to_visible_point(point_id, points, epsilon) else {
                continue;
            };
            if nearest.is_none_or(|(_, d)| distance < d) {
                nearest = Some((i, distance));
            }
        }

        if let Some((i, _)) = nearest {
            faces[i].outside_points.push(point_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tetrahedron() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn furthest_point_prefers_first_maximum() {
        let mut points = unit_tetrahedron();
        points.push(DVec3::new(0.2, 0.2, 3.0));
        points.push(DVec3::new(0.4, 0.1, 3.0));
        points.push(DVec3::new(0.1, 0.1, 1.0));

        let plane = Plane::oriented(DVec3::Z, points[0]);
        let mut face = PendingFace::new([PointId(0), PointId(1), PointId(2)], plane);
        face.outside_points = vec![PointId(6), PointId(4), PointId(5)];

        assert_eq!(face.furthest_outside_point(&points), Some((PointId(4), 3.0)));
    }

    #[test]
    fn furthest_point_of_empty_set() {
        let points = unit_tetrahedron();
        let plane = Plane::oriented(DVec3::Z, points[0]);
        let face = PendingFace::new([PointId(0), PointId(1), PointId(2)], plane);
        assert_eq!(face.furthest_outside_point(&points), None);
    }

    #[test]
    fn smallest_positive_distance_wins() {
        let points = vec![
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(0.0, 0.0, 0.0),
        ];

        // Two parallel faces at z = 0 and z = 1, both pointing up.
        let mut faces = vec![
            PendingFace::new([PointId(0); 3], Plane::new(DVec3::Z, 0.0, 1.0)),
            PendingFace::new([PointId(0); 3], Plane::new(DVec3::Z, 1.0, 1.0)),
        ];

        partition_outside_points([PointId(0), PointId(1), PointId(2)], &mut faces, &points, 0.0);

        // The point at z = 2 sees both faces and joins the nearer one.
        assert!(faces[0].outside_points.is_empty());
        assert_eq!(faces[1].outside_points, vec![PointId(0)]);
    }

    #[test]
    fn ties_and_interior_points() {
        let points = vec![DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, -1.0)];

        let mut faces = vec![
            PendingFace::new([PointId(0); 3], Plane::new(DVec3::Z, 0.0, 1.0)),
            PendingFace::new([PointId(0); 3], Plane::new(DVec3::Z, 0.0, 1.0)),
        ];

        partition_outside_points([PointId(0), PointId(1)], &mut faces, &points, 0.0);

        assert_eq!(faces[0].outside_points, vec![PointId(0)]);
        assert!(faces[1].outside_points.is_empty());
    }

    #[test]
    fn epsilon_excludes_near_points() {
        let points = vec![DVec3::new(0.0, 0.0, 1e-12), DVec3::new(0.0, 0.0, 1.0)];
        let mut faces = vec![PendingFace::new(
            [PointId(0); 3],
            Plane::new(DVec3::Z, 0.0, 1.0),
        )];

        partition_outside_points([PointId(0), PointId(1)], &mut faces, &points, 1e-9);
        assert_eq!(faces[0].outside_points, vec![PointId(1)]);
    }
}
