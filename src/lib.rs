//! # Quickhull3d
//!
//! A Rust implementation of the Quickhull algorithm for computing 3D convex hulls of point sets.
//!
//! The hull is a closed triangle mesh over the input points, with a unit outward normal per
//! face and a registry mapping every edge to the faces sharing it. Construction is a pure,
//! deterministic function of the input points and the [`HullConfig`].
//!
//! ```
//! use glam::DVec3;
//! use quickhull3d::HullBuilder;
//!
//! let mut points = Vec::new();
//! for x in [0.0, 1.0] {
//!     for y in [0.0, 1.0] {
//!         for z in [0.0, 1.0] {
//!             points.push(DVec3::new(x, y, z));
//!         }
//!     }
//! }
//!
//! let mut builder = HullBuilder::new(points);
//! let hull = builder.generate().unwrap();
//!
//! assert_eq!(hull.faces().len(), 12);
//! assert_eq!(hull.shared_edges().len(), 18);
//! assert!(hull.shared_edges().is_closed());
//! ```
//!
//! Points are assumed to be in general position. Sidedness tests are plain floating-point
//! comparisons against [`HullConfig::epsilon`], which is zero by default.
//!
//! ## References
//!
//! - C. Bradford Barber et al. 1996. [The Quickhull Algorithm for Convex Hulls](https://www.cise.ufl.edu/~ungor/courses/fall06/papers/QuickHull.pdf) (the original paper)
//! - Dirk Gregorius. GDC 2014. [Physics for Game Programmers: Implementing Quickhull](https://archive.org/details/GDC2014Gregorius)

#![warn(missing_docs)]

mod config;
mod dim3;
pub mod export;

pub use config::{HullConfig, ObjOptions, Refinement, DEFAULT_OBJ_SCALE};
pub use dim3::{
    vecmath, ConvexHull3d, ConvexHull3dError, DegenerateInput, Edge, HullBuilder, SharedEdges,
    ValidationError,
};
