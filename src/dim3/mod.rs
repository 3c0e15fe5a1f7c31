// The hull is seeded with a tetrahedron spanned by the x-extremes, the point farthest
// from their line and the point farthest from the resulting base plane, and then
// refined with an explicit worklist.

mod edge_registry;
mod initial_hull;
mod plane;
mod refine;
mod triangle_face;
mod validation;
pub mod vecmath;

pub use edge_registry::{Edge, SharedEdges};
pub use validation::ValidationError;

use glam::DVec3;
use thiserror::Error;

use crate::config::{HullConfig, Refinement};
use crate::dim3::{
    initial_hull::init_tetrahedron,
    refine::{refine_face_local, refine_horizon},
    triangle_face::PendingFace,
};

/// An error returned during [`ConvexHull3d`] construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvexHull3dError {
    /// The input points or the configuration are unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    /// The input points do not span a volume, or a required normalization
    /// hit a zero-length vector.
    #[error("Degenerate input: {0}")]
    DegenerateGeometry(DegenerateInput),
    /// [`HullBuilder::generate`] was called on a builder that already generated its hull.
    #[error("The hull has already been generated.")]
    AlreadyGenerated,
    /// The generated hull violates a hull invariant.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// An error in the algorithm itself. Please report is as a bug
    /// with a minimal reproducible example.
    #[error("Internal error: {0}")]
    InternalError(&'static str),
}

/// The type of degeneracy for invalid inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegenerateInput {
    /// All input points have the same `x` coordinate.
    Coincident,
    /// All input points lie on the line through the x-extremes.
    Collinear,
    /// All input points lie on a plane.
    Coplanar,
    /// A vector to normalize has zero length.
    ZeroLengthVector,
}

impl core::fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DegenerateInput::Coincident => write!(f, "Input points are coincident"),
            DegenerateInput::Collinear => write!(f, "Input points are collinear"),
            DegenerateInput::Coplanar => write!(f, "Input points are coplanar"),
            DegenerateInput::ZeroLengthVector => write!(f, "Cannot normalize a zero-length vector"),
        }
    }
}

/// A 3D [convex hull] as a closed triangle mesh over the input points.
///
/// Faces reference the input points by index, and each face has a unit normal
/// pointing out of the hull.
///
/// [convex hull]: https://en.wikipedia.org/wiki/Convex_hull
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use quickhull3d::ConvexHull3d;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(0.1, 0.1, 0.1),
/// ];
///
/// let hull = ConvexHull3d::try_from_points(&points).unwrap();
///
/// // The interior point is not part of the hull.
/// assert_eq!(hull.faces(), &[[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]);
/// assert_eq!(hull.vertex_indices(), vec![0, 1, 2, 3]);
/// assert!(hull.shared_edges().is_closed());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHull3d {
    /// The input points.
    points: Vec<DVec3>,
    /// The faces, as indices into `points`.
    faces: Vec<[u32; 3]>,
    /// Outward unit normals, parallel to `faces`.
    normals: Vec<DVec3>,
    /// Plane constants of the outward normals, parallel to `faces`.
    offsets: Vec<f64>,
    shared_edges: SharedEdges,
}

impl ConvexHull3d {
    /// Computes the convex hull of the given points with the default [`HullConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConvexHull3dError::InvalidInput`] for fewer than four points or
    /// non-finite coordinates, and [`ConvexHull3dError::DegenerateGeometry`] if the
    /// points do not span a volume.
    #[inline]
    pub fn try_from_points(points: &[DVec3]) -> Result<Self, ConvexHull3dError> {
        Self::try_from_points_with_config(points, HullConfig::default())
    }

    /// Computes the convex hull of the given points with the given configuration.
    ///
    /// # Errors
    ///
    /// See [`try_from_points`](Self::try_from_points). Additionally returns
    /// [`ConvexHull3dError::Validation`] if validation is enabled and fails.
    pub fn try_from_points_with_config(
        points: &[DVec3],
        config: HullConfig,
    ) -> Result<Self, ConvexHull3dError> {
        let _span = tracing::debug_span!(
            "quickhull",
            points = points.len(),
            refinement = ?config.refinement
        )
        .entered();

        config.check()?;
        if points.is_empty() {
            return Err(ConvexHull3dError::InvalidInput("The point set is empty."));
        }
        if points.len() < 4 {
            return Err(ConvexHull3dError::InvalidInput(
                "At least four points are required.",
            ));
        }
        if points.len() > u32::MAX as usize {
            return Err(ConvexHull3dError::InvalidInput(
                "Point indices must fit in a u32.",
            ));
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(ConvexHull3dError::InvalidInput(
                "Point coordinates must be finite.",
            ));
        }

        let simplex = init_tetrahedron(points, config.epsilon)?;

        let mut hull = ConvexHull3d::empty(points);
        match config.refinement {
            Refinement::Horizon => refine_horizon(points, simplex.faces, config.epsilon, &mut hull)?,
            Refinement::FaceLocal => {
                refine_face_local(points, simplex.faces, config.epsilon, &mut hull)?
            }
        }

        tracing::debug!(
            simplex = ?simplex.vertices.map(|id| id.0),
            faces = hull.faces.len(),
            edges = hull.shared_edges.len(),
            "generated hull"
        );

        if config.validate {
            hull.validate(config.validation_tolerance)?;
        }

        Ok(hull)
    }

    /// A hull over `points` without any faces.
    pub(crate) fn empty(points: &[DVec3]) -> Self {
        Self {
            points: points.to_vec(),
            ..Default::default()
        }
    }

    /// Appends a finished face, its outward normal and its edges.
    pub(crate) fn commit(&mut self, face: &PendingFace) {
        let index = self.faces.len() as u32;
        let indices = face.points.map(|id| id.0);
        self.faces.push(indices);
        self.normals.push(face.plane.outward_normal());
        self.offsets.push(face.plane.outward_offset());
        self.shared_edges.register_triangle(indices, index);
    }

    /// Returns the input points. Faces index into this slice.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns the faces of the hull in commit order.
    ///
    /// The vertex order of a face is the order it was constructed in and does not
    /// necessarily wind counterclockwise around its normal. Use
    /// [`oriented_faces`](Self::oriented_faces) for consistently wound triangles.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Returns the outward unit normals, one per face.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    #[inline]
    pub(crate) fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Returns the edge registry mapping each edge to the faces incident to it.
    #[inline]
    pub fn shared_edges(&self) -> &SharedEdges {
        &self.shared_edges
    }

    /// Returns the plane constant `d` of a face, such that `dot(x, normal) = d` on the face.
    #[inline]
    pub fn plane_offset(&self, face: usize) -> Option<f64> {
        self.offsets.get(face).copied()
    }

    /// Returns the faces with their vertices ordered counterclockwise when viewed
    /// from outside, so that `cross(q - p, r - p)` points along the face normal.
    pub fn oriented_faces(&self) -> Vec<[u32; 3]> {
        self.faces
            .iter()
            .zip(&self.normals)
            .map(|(&[a, b, c], normal)| {
                let p = self.points[a as usize];
                let q = self.points[b as usize];
                let r = self.points[c as usize];
                if (q - p).cross(r - p).dot(*normal) < 0.0 {
                    [a, c, b]
                } else {
                    [a, b, c]
                }
            })
            .collect()
    }

    /// Returns the sorted indices of the points that are vertices of the hull.
    pub fn vertex_indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.faces.iter().flatten().copied().collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Computes the enclosed volume.
    ///
    /// Sums the signed volumes of the cones from the origin to every face, using
    /// the outward normals. Only meaningful for closed and convex hulls.
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;
        for (&[a, b, c], normal) in self.faces.iter().zip(&self.normals) {
            let p = self.points[a as usize];
            let q = self.points[b as usize];
            let r = self.points[c as usize];
            let double_area = (q - p).cross(r - p).length();
            volume += double_area * normal.dot(p);
        }
        volume / 6.0
    }

    /// Computes the hull vertex that is furthest in the given direction.
    ///
    /// Returns `None` if the hull has no faces.
    pub fn support_point(&self, direction: DVec3) -> Option<DVec3> {
        let mut support = None;
        let mut max = f64::NEG_INFINITY;

        for index in self.vertex_indices() {
            let point = self.points[index as usize];
            let dot_product = point.dot(direction);
            if dot_product > max {
                max = dot_product;
                support = Some(point);
            }
        }

        support
    }

    /// Returns the indices of the faces whose normal points downwards (negative `z`).
    ///
    /// For points lifted onto the paraboloid `z = x² + y²`, these faces project to the
    /// Delaunay triangulation of the original 2D points.
    pub fn lower_faces(&self) -> Vec<u32> {
        self.normals
            .iter()
            .enumerate()
            .filter(|(_, normal)| normal.z < 0.0)
            .map(|(i, _)| i as u32)
            .collect()
    }
}

/// Owns a point set and generates its convex hull exactly once.
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use quickhull3d::{ConvexHull3dError, HullBuilder};
///
/// let mut builder = HullBuilder::new(vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ]);
/// assert!(builder.faces().is_empty());
///
/// builder.generate().unwrap();
/// assert_eq!(builder.faces().len(), 4);
/// assert_eq!(builder.normals().len(), 4);
///
/// // A builder cannot generate twice.
/// assert_eq!(builder.generate().unwrap_err(), ConvexHull3dError::AlreadyGenerated);
/// ```
#[derive(Clone, Debug)]
pub struct HullBuilder {
    points: Vec<DVec3>,
    config: HullConfig,
    hull: Option<ConvexHull3d>,
}

impl HullBuilder {
    /// Creates a builder for the given points with the default [`HullConfig`].
    #[inline]
    pub fn new(points: impl Into<Vec<DVec3>>) -> Self {
        Self::with_config(points, HullConfig::default())
    }

    /// Creates a builder for the given points and configuration.
    #[inline]
    pub fn with_config(points: impl Into<Vec<DVec3>>, config: HullConfig) -> Self {
        Self {
            points: points.into(),
            config,
            hull: None,
        }
    }

    /// Returns the input points.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    /// Generates the hull.
    ///
    /// A failed generation leaves the builder without a hull, so calling this again
    /// reruns the computation and fails the same way.
    ///
    /// # Errors
    ///
    /// Returns [`ConvexHull3dError::AlreadyGenerated`] if the hull was already generated,
    /// and otherwise any error of [`ConvexHull3d::try_from_points_with_config`].
    pub fn generate(&mut self) -> Result<&ConvexHull3d, ConvexHull3dError> {
        if self.hull.is_some() {
            return Err(ConvexHull3dError::AlreadyGenerated);
        }
        let hull = ConvexHull3d::try_from_points_with_config(&self.points, self.config)?;
        Ok(self.hull.insert(hull))
    }

    /// Returns the generated hull, if any.
    #[inline]
    pub fn hull(&self) -> Option<&ConvexHull3d> {
        self.hull.as_ref()
    }

    /// Consumes the builder, returning the generated hull, if any.
    #[inline]
    pub fn into_hull(self) -> Option<ConvexHull3d> {
        self.hull
    }

    /// Returns the generated faces, or an empty slice before generation.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        self.hull.as_ref().map(ConvexHull3d::faces).unwrap_or_default()
    }

    /// Returns the generated face normals, or an empty slice before generation.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        self.hull.as_ref().map(ConvexHull3d::normals).unwrap_or_default()
    }

    /// Returns the generated edge registry, or `None` before generation.
    #[inline]
    pub fn shared_edges(&self) -> Option<&SharedEdges> {
        self.hull.as_ref().map(ConvexHull3d::shared_edges)
    }
}
