use glam::DVec3;

use crate::dim3::{
    plane::Plane,
    triangle_face::{partition_outside_points, PendingFace, PointId},
    vecmath::{dist_to_line, dist_to_plane, face_normal, normalize, orient_plane},
    ConvexHull3dError, DegenerateInput,
};

/// The tetrahedron seeding the refinement, with every remaining point assigned
/// to the outside set of at most one of its faces.
#[derive(Clone, Debug)]
pub struct InitialSimplex {
    /// The simplex vertices: minimum x, maximum x, base apex, tetrahedron apex.
    pub vertices: [PointId; 4],
    /// The base face followed by the three faces meeting at the apex.
    pub faces: [PendingFace; 4],
}

/// Finds the indices of the points with the minimum and maximum `x` coordinate.
///
/// The first occurrence wins on ties.
fn x_extremes(points: &[DVec3]) -> (usize, usize) {
    let mut min_index = 0;
    let mut max_index = 0;

    for (i, point) in points.iter().enumerate().skip(1) {
        if point.x < points[min_index].x {
            min_index = i;
        }
        if point.x > points[max_index].x {
            max_index = i;
        }
    }

    (min_index, max_index)
}

/// Builds the initial tetrahedron and partitions the remaining points across its faces.
///
/// The caller guarantees at least four finite points.
pub fn init_tetrahedron(
    points: &[DVec3],
    epsilon: f64,
) -> Result<InitialSimplex, ConvexHull3dError> {
    debug_assert!(
        points.len() > 3,
        "This should be checked before this function"
    );

    // The first two vertices are the extreme points along the x axis.
    let (i_min, i_max) = x_extremes(points);
    if i_min == i_max {
        // Every point has the same x coordinate, so there is no line to start from.
        return Err(ConvexHull3dError::DegenerateGeometry(
            DegenerateInput::Coincident,
        ));
    }
    let q = points[i_min];
    let r = points[i_max];

    // The third vertex is the one farthest from the line through the first two.
    let mut max_line_distance = 0.0;
    let mut i_base = None;
    for (i, &point) in points.iter().enumerate() {
        if i == i_min || i == i_max {
            continue;
        }

        let distance = dist_to_line(point, q, r);
        if distance > max_line_distance {
            max_line_distance = distance;
            i_base = Some(i);
        }
    }
    let i_base = i_base.ok_or(ConvexHull3dError::DegenerateGeometry(
        DegenerateInput::Collinear,
    ))?;
    let s = points[i_base];

    // The base plane, oriented so that the minimum-x point is on its non-negative side.
    let (base_normal, _) = orient_plane(normalize((r - q).cross(s - q))?, q);
    let base_offset = q.dot(base_normal);

    // The fourth vertex is the one farthest from the base plane, on either side.
    let mut apex_distance: f64 = 0.0;
    let mut i_apex = None;
    for (i, &point) in points.iter().enumerate() {
        if i == i_min || i == i_max || i == i_base {
            continue;
        }

        let distance = dist_to_plane(point, base_normal, base_offset);
        if distance.abs() > apex_distance.abs() {
            apex_distance = distance;
            i_apex = Some(i);
        }
    }
    let i_apex = i_apex.ok_or(ConvexHull3dError::DegenerateGeometry(
        DegenerateInput::Coplanar,
    ))?;
    let t = points[i_apex];

    // The base face faces away from the apex. Its plane keeps the base normal
    // and records the flip in the sign when the apex is on the positive side.
    let base_sign = if apex_distance > 0.0 { -1.0 } else { 1.0 };
    let base_face = PendingFace::new(
        [i_min, i_max, i_base].map(to_point_id),
        Plane::new(base_normal, base_offset, base_sign),
    );

    // The faces meeting at the apex, each facing away from the vertex it does not contain.
    let face_min_max = PendingFace::new(
        [i_min, i_max, i_apex].map(to_point_id),
        Plane::oriented(face_normal(t, q, r, s)?, t),
    );
    let face_min_base = PendingFace::new(
        [i_min, i_base, i_apex].map(to_point_id),
        Plane::oriented(face_normal(s, q, t, r)?, s),
    );
    let face_max_base = PendingFace::new(
        [i_max, i_base, i_apex].map(to_point_id),
        Plane::oriented(face_normal(r, s, t, q)?, r),
    );

    let mut faces = [base_face, face_min_max, face_min_base, face_max_base];

    // Assign the remaining points to the outside sets.
    let vertices = [i_min, i_max, i_base, i_apex];
    partition_outside_points(
        (0..points.len())
            .filter(|i| !vertices.contains(i))
            .map(to_point_id),
        &mut faces,
        points,
        epsilon,
    );

    tracing::debug!(
        ?vertices,
        apex_distance,
        outside_points = ?faces.each_ref().map(|f| f.outside_points.len()),
        "initial simplex"
    );

    Ok(InitialSimplex {
        vertices: vertices.map(to_point_id),
        faces,
    })
}

#[inline]
fn to_point_id(index: usize) -> PointId {
    PointId(index as u32)
}
