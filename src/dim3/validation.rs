use glam::DVec3;
use thiserror::Error;

use crate::dim3::{edge_registry::Edge, ConvexHull3d};

/// A violated hull invariant, reported by [`ConvexHull3d::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An edge is not shared by exactly two faces, so the mesh is not closed.
    #[error("Edge {edge:?} is shared by {} faces instead of 2.", .faces.len())]
    OpenEdge {
        /// The offending edge.
        edge: Edge,
        /// The faces incident to the edge.
        faces: Vec<u32>,
    },
    /// An input point lies in front of a face.
    #[error("Point {point} is {distance} in front of face {face}.")]
    NotConvex {
        /// The face index.
        face: u32,
        /// The point index.
        point: u32,
        /// The distance of the point in front of the face plane.
        distance: f64,
    },
    /// A face normal does not have unit length.
    #[error("Normal of face {face} is not unit length.")]
    NonUnitNormal {
        /// The face index.
        face: u32,
    },
}

impl ConvexHull3d {
    /// Checks that the hull is closed, that every normal has unit length and that every
    /// input point lies on or behind every face, allowing a slack of `tolerance`.
    ///
    /// Edges are checked in ascending order and faces in index order, so the
    /// reported violation is deterministic.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self, tolerance: f64) -> Result<(), ValidationError> {
        validate_closed(self)?;
        validate_normals(self.normals(), tolerance)?;
        validate_convex(self, tolerance)
    }
}

fn validate_closed(hull: &ConvexHull3d) -> Result<(), ValidationError> {
    for (edge, faces) in hull.shared_edges().sorted() {
        if faces.len() != 2 {
            return Err(ValidationError::OpenEdge { edge, faces });
        }
    }
    Ok(())
}

fn validate_normals(normals: &[DVec3], tolerance: f64) -> Result<(), ValidationError> {
    match normals
        .iter()
        .position(|n| (n.length() - 1.0).abs() > tolerance.max(f64::EPSILON * 4.0))
    {
        Some(face) => Err(ValidationError::NonUnitNormal { face: face as u32 }),
        None => Ok(()),
    }
}

fn validate_convex(hull: &ConvexHull3d, tolerance: f64) -> Result<(), ValidationError> {
    for (face, (normal, offset)) in hull.normals().iter().zip(hull.offsets()).enumerate() {
        for (point, p) in hull.points().iter().enumerate() {
            let distance = p.dot(*normal) - offset;
            if distance > tolerance {
                return Err(ValidationError::NotConvex {
                    face: face as u32,
                    point: point as u32,
                    distance,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HullConfig, Refinement};

    fn unit_cube() -> Vec<DVec3> {
        let mut points = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    points.push(DVec3::new(x, y, z));
                }
            }
        }
        points
    }

    #[test]
    fn horizon_hull_is_valid() {
        let hull = ConvexHull3d::try_from_points(&unit_cube()).unwrap();
        assert_eq!(hull.validate(1e-9), Ok(()));
    }

    #[test]
    fn face_local_hull_of_cube_is_not_convex() {
        let config = HullConfig::default().with_refinement(Refinement::FaceLocal);
        let hull = ConvexHull3d::try_from_points_with_config(&unit_cube(), config).unwrap();

        // Closed, but some face cuts through the cube.
        assert!(hull.shared_edges().is_closed());
        assert!(matches!(
            hull.validate(1e-9),
            Err(ValidationError::NotConvex { .. })
        ));
    }

    #[test]
    fn open_edges_are_reported() {
        let mut hull = ConvexHull3d::try_from_points(&unit_cube()).unwrap();
        hull.shared_edges.unregister(Edge(0, 1), 0);

        let Err(ValidationError::OpenEdge { edge, faces }) = hull.validate(1e-9) else {
            panic!("expected an open edge");
        };
        assert_eq!(edge, Edge(0, 1));
        assert_eq!(faces.len(), 1);
    }

    #[test]
    fn non_unit_normals_are_reported() {
        let mut hull = ConvexHull3d::try_from_points(&unit_cube()).unwrap();
        hull.normals[3] *= 2.0;
        assert_eq!(
            hull.validate(1e-9),
            Err(ValidationError::NonUnitNormal { face: 3 })
        );
    }
}
