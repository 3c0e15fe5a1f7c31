//! Refinement of the initial simplex into the final hull.
//!
//! Both strategies take the four faces of the initial simplex with their outside
//! sets and drive an explicit worklist until no face has outside points left.
//!
//! 1. Pop a face and select its outside point that is furthest from the face, the "apex".
//! 2. Replace faces by cones from the apex to their edges.
//! 3. Reassign the orphaned outside points to the new faces. A point goes to the
//!    face it is *least* far outside of, points outside of no new face are interior.
//! 4. Repeat.
//!
//! [`refine_horizon`] replaces every face the apex can see and cones the horizon,
//! [`refine_face_local`] only ever replaces the popped face.

use glam::DVec3;
use hashbrown::HashSet;

use crate::dim3::{
    edge_registry::{Edge, SharedEdges},
    plane::Plane,
    triangle_face::{partition_outside_points, FaceId, PendingFace, PointId},
    vecmath::face_normal,
    ConvexHull3d, ConvexHull3dError,
};

/// Creates the face `(apex, a, b)` facing away from `viewpoint`.
fn cone_face(
    apex: PointId,
    a: PointId,
    b: PointId,
    viewpoint: PointId,
    points: &[DVec3],
) -> Result<PendingFace, ConvexHull3dError> {
    let s = points[apex.index()];
    let normal = face_normal(s, points[a.index()], points[b.index()], points[viewpoint.index()])?;
    Ok(PendingFace::new([apex, a, b], Plane::oriented(normal, s)))
}

/// Selects the apex of a face, which must have a non-empty outside set.
fn select_apex(face: &PendingFace, points: &[DVec3]) -> Result<(PointId, f64), ConvexHull3dError> {
    face.furthest_outside_point(points)
        .ok_or(ConvexHull3dError::InternalError(
            "Outside set without a point in front of the face.",
        ))
}

/// Refines every face against its own outside set only.
///
/// Each step splits the popped face `(p, q, r)` into `(s, p, q)`, `(s, p, r)` and `(s, r, q)`,
/// facing away from `r`, `q` and `p` respectively, and faces are committed as soon as their
/// outside set is empty. Neighboring faces are never consulted, so the result is closed
/// but in general not convex.
pub(crate) fn refine_face_local(
    points: &[DVec3],
    initial_faces: [PendingFace; 4],
    epsilon: f64,
    hull: &mut ConvexHull3d,
) -> Result<(), ConvexHull3dError> {
    // Depth-first, visiting faces in their construction order.
    let mut stack: Vec<PendingFace> = initial_faces.into_iter().rev().collect();

    while let Some(face) = stack.pop() {
        if face.outside_points.is_empty() {
            hull.commit(&face);
            continue;
        }

        let (apex, apex_distance) = select_apex(&face, points)?;

        let mut children = Vec::with_capacity(3);
        for (a, b, viewpoint) in face.edges_with_opposite() {
            children.push(cone_face(apex, a, b, viewpoint, points)?);
        }

        partition_outside_points(
            face.outside_points.iter().copied().filter(|&id| id != apex),
            &mut children,
            points,
            epsilon,
        );

        tracing::trace!(
            apex = apex.0,
            apex_distance,
            outside_points = face.outside_points.len(),
            "split face"
        );

        stack.extend(children.into_iter().rev());
    }

    Ok(())
}

/// Refines the hull by replacing all faces visible from each apex.
///
/// Faces stay in an arena until the worklist is empty, and the surviving faces are
/// committed in creation order.
pub(crate) fn refine_horizon(
    points: &[DVec3],
    initial_faces: [PendingFace; 4],
    epsilon: f64,
    hull: &mut ConvexHull3d,
) -> Result<(), ConvexHull3dError> {
    let mut faces: Vec<PendingFace> = Vec::from(initial_faces);

    // Adjacency of the faces that are currently part of the hull.
    let mut adjacency = SharedEdges::new();
    for (i, face) in faces.iter().enumerate() {
        adjacency.register_triangle(face.points.map(|id| id.0), i as u32);
    }

    let mut stack: Vec<FaceId> = (0..faces.len())
        .rev()
        .filter(|&i| !faces[i].outside_points.is_empty())
        .map(|i| FaceId(i as u32))
        .collect();

    let mut visible: Vec<FaceId> = Vec::new();
    let mut visited: HashSet<FaceId> = HashSet::new();
    let mut horizon: Vec<(PointId, PointId, PointId)> = Vec::new();
    let mut orphans: Vec<PointId> = Vec::new();

    while let Some(face_id) = stack.pop() {
        let face = &faces[face_id.index()];
        if !face.valid || face.outside_points.is_empty() {
            continue;
        }

        let (apex, apex_distance) = select_apex(face, points)?;
        let eye = points[apex.index()];

        // Flood-fill the faces that can see the apex, starting from the popped face.
        // Edges leading to faces that cannot see it form the horizon, each stored
        // with the vertex of its visible face that is not on the edge.
        visible.clear();
        visited.clear();
        horizon.clear();
        visible.push(face_id);
        visited.insert(face_id);

        let mut next = 0;
        while next < visible.len() {
            let current = visible[next];
            next += 1;

            for (a, b, opposite) in faces[current.index()].edges_with_opposite() {
                let neighbor = adjacency
                    .opposite_face(Edge::between(a, b), current)
                    .ok_or(ConvexHull3dError::InternalError(
                        "Hull edge is not shared by exactly two faces.",
                    ))?;

                if visited.contains(&neighbor) {
                    continue;
                }

                if faces[neighbor.index()].plane.outside_distance(eye) > epsilon {
                    visited.insert(neighbor);
                    visible.push(neighbor);
                } else {
                    horizon.push((a, b, opposite));
                }
            }
        }

        // Remove the visible faces, collecting their outside points.
        orphans.clear();
        for &removed in &visible {
            let face = &mut faces[removed.index()];
            face.valid = false;
            for edge in Edge::of_triangle(face.points.map(|id| id.0)) {
                adjacency.unregister(edge, removed.0);
            }
            orphans.append(&mut face.outside_points);
        }

        // Cone the horizon from the apex. The removed face owning each horizon edge
        // lies behind the new face, so its third vertex orients it.
        let mut new_faces = Vec::with_capacity(horizon.len());
        for &(a, b, opposite) in &horizon {
            new_faces.push(cone_face(apex, a, b, opposite, points)?);
        }

        partition_outside_points(
            orphans.iter().copied().filter(|&id| id != apex),
            &mut new_faces,
            points,
            epsilon,
        );

        tracing::trace!(
            apex = apex.0,
            apex_distance,
            visible_faces = visible.len(),
            new_faces = new_faces.len(),
            "expanded hull"
        );

        let index_offset = faces.len();
        for (i, face) in new_faces.into_iter().enumerate() {
            adjacency.register_triangle(face.points.map(|id| id.0), (index_offset + i) as u32);
            faces.push(face);
        }

        for i in (index_offset..faces.len()).rev() {
            if !faces[i].outside_points.is_empty() {
                stack.push(FaceId(i as u32));
            }
        }
    }

    for face in faces.iter().filter(|face| face.valid) {
        hull.commit(face);
    }

    Ok(())
}
