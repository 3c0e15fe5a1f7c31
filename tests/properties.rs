//! Randomized checks of the hull invariants on point clouds in general position.

use glam::DVec3;
use proptest::prelude::*;
use quickhull3d::{ConvexHull3d, HullBuilder, HullConfig, Refinement};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn point() -> impl Strategy<Value = DVec3> {
    (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

fn point_cloud() -> impl Strategy<Value = Vec<DVec3>> {
    prop::collection::vec(point(), 4..120)
}

fn lifted_points(n: usize, seed: u64) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x: f64 = rng.random();
            let y: f64 = rng.random();
            DVec3::new(x, y, x * x + y * y)
        })
        .collect()
}

fn sorted_triples(faces: &[[u32; 3]]) -> Vec<[u32; 3]> {
    let mut triples: Vec<_> = faces
        .iter()
        .map(|face| {
            let mut face = *face;
            face.sort_unstable();
            face
        })
        .collect();
    triples.sort_unstable();
    triples
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the hull is closed, convex and has unit outward normals
    #[test]
    fn prop_hull_is_valid(points in point_cloud()) {
        let hull = ConvexHull3d::try_from_points(&points).unwrap();
        prop_assert_eq!(hull.faces().len(), hull.normals().len());
        prop_assert_eq!(hull.shared_edges().len() * 2, hull.faces().len() * 3);
        prop_assert!(hull.shared_edges().is_closed());
        prop_assert_eq!(hull.validate(1e-7), Ok(()));

        // Euler characteristic of a triangulated sphere.
        let vertices = hull.vertex_indices().len();
        prop_assert_eq!(hull.faces().len(), 2 * vertices - 4);
    }

    /// Property: a point strictly inside the hull does not change its faces
    #[test]
    fn prop_interior_point_is_ignored(points in point_cloud()) {
        let hull = ConvexHull3d::try_from_points(&points).unwrap();
        let vertices = hull.vertex_indices();
        let centroid = vertices.iter().map(|&i| points[i as usize]).sum::<DVec3>() / vertices.len() as f64;

        let mut with_interior = points.clone();
        with_interior.push(centroid);
        let grown = ConvexHull3d::try_from_points(&with_interior).unwrap();

        prop_assert_eq!(sorted_triples(hull.faces()), sorted_triples(grown.faces()));
    }

    /// Property: generation is a deterministic function of the input
    #[test]
    fn prop_deterministic(points in point_cloud()) {
        let mut first = HullBuilder::new(points.clone());
        let mut second = HullBuilder::new(points);
        first.generate().unwrap();
        second.generate().unwrap();

        prop_assert_eq!(first.faces(), second.faces());
        prop_assert_eq!(first.normals(), second.normals());
        prop_assert_eq!(
            first.shared_edges().map(|edges| edges.sorted()),
            second.shared_edges().map(|edges| edges.sorted())
        );
    }

    /// Property: face-local refinement yields a closed mesh over the same simplex
    #[test]
    fn prop_face_local_is_closed(points in point_cloud()) {
        let config = HullConfig::default().with_refinement(Refinement::FaceLocal);
        let hull = ConvexHull3d::try_from_points_with_config(&points, config).unwrap();
        prop_assert!(hull.shared_edges().is_closed());
        for normal in hull.normals() {
            prop_assert!((normal.length() - 1.0).abs() < 1e-12);
        }
    }

    /// Property: every point lifted onto the paraboloid is a hull vertex
    #[test]
    fn prop_paraboloid_lift(n in 4usize..200, seed in any::<u64>()) {
        let points = lifted_points(n, seed);
        let hull = ConvexHull3d::try_from_points(&points).unwrap();

        prop_assert_eq!(hull.vertex_indices().len(), n);
        prop_assert_eq!(hull.faces().len(), 2 * n - 4);
        prop_assert_eq!(hull.validate(1e-9), Ok(()));

        let lower = hull.lower_faces();
        prop_assert!(!lower.is_empty() && lower.len() < hull.faces().len());
    }
}

#[test]
fn epsilon_drops_near_coplanar_points() {
    // A point barely above the top face of a tetrahedron.
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0 / 3.0 + 1e-10, 1.0 / 3.0, 1.0 / 3.0),
    ];

    let strict = ConvexHull3d::try_from_points(&points).unwrap();
    assert_eq!(strict.vertex_indices(), vec![0, 1, 2, 3, 4]);

    let config = HullConfig::default().with_epsilon(1e-6);
    let tolerant = ConvexHull3d::try_from_points_with_config(&points, config).unwrap();
    assert_eq!(tolerant.vertex_indices(), vec![0, 1, 2, 3]);
    assert_eq!(tolerant.faces().len(), 4);
}
