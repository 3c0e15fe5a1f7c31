use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::dim3::triangle_face::{FaceId, PointId};

/// Fixed seed for the edge map, so iteration order does not change between runs.
///
/// Seed was randomly generated with a fair dice roll.
const EDGE_HASHER_SEED: u64 = 0b1001010111101110000001001100010000000011001001101011001001111000;

/// An undirected edge between two points, stored with the smaller index first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub u32, pub u32);

impl Edge {
    /// Creates the canonical edge between `a` and `b`.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        if a < b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }

    #[inline]
    pub(crate) fn between(a: PointId, b: PointId) -> Self {
        Self::new(a.0, b.0)
    }

    /// The three canonical edges of a triangle.
    #[inline]
    pub fn of_triangle([p, q, r]: [u32; 3]) -> [Edge; 3] {
        [Edge::new(p, q), Edge::new(q, r), Edge::new(p, r)]
    }
}

/// Maps each undirected edge of a mesh to the faces incident to it, in registration order.
///
/// In a closed hull every edge is shared by exactly two faces.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedEdges {
    edges: HashMap<Edge, Vec<u32>, FixedState>,
}

impl Default for SharedEdges {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedEdges {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            edges: HashMap::with_hasher(FixedState::with_seed(EDGE_HASHER_SEED)),
        }
    }

    /// Records that `face` is incident to `edge`.
    #[inline]
    pub fn register(&mut self, edge: Edge, face: u32) {
        self.edges.entry(edge).or_default().push(face);
    }

    /// Registers the three edges of the triangle `indices` for `face`.
    #[inline]
    pub fn register_triangle(&mut self, indices: [u32; 3], face: u32) {
        for edge in Edge::of_triangle(indices) {
            self.register(edge, face);
        }
    }

    /// Removes `face` from the incidence list of `edge`, dropping the edge once no face uses it.
    pub(crate) fn unregister(&mut self, edge: Edge, face: u32) {
        if let Some(faces) = self.edges.get_mut(&edge) {
            faces.retain(|&f| f != face);
            if faces.is_empty() {
                self.edges.remove(&edge);
            }
        }
    }

    /// Returns the faces incident to the edge between `a` and `b`, if any.
    #[inline]
    pub fn faces(&self, a: u32, b: u32) -> Option<&[u32]> {
        self.get(Edge::new(a, b))
    }

    /// Returns the faces incident to `edge`, if any.
    #[inline]
    pub fn get(&self, edge: Edge) -> Option<&[u32]> {
        self.edges.get(&edge).map(Vec::as_slice)
    }

    /// Returns the face across `edge` from `face` in a two-manifold mesh.
    ///
    /// Returns `None` unless the edge is shared by exactly `face` and one other face.
    pub(crate) fn opposite_face(&self, edge: Edge, face: FaceId) -> Option<FaceId> {
        match self.get(edge)? {
            &[a, b] if a == face.0 => Some(FaceId(b)),
            &[a, b] if b == face.0 => Some(FaceId(a)),
            _ => None,
        }
    }

    /// The number of distinct edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if no edge has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over all edges and their incident faces in an unspecified but fixed order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &[u32])> + '_ {
        self.edges.iter().map(|(edge, faces)| (*edge, faces.as_slice()))
    }

    /// Returns all edges with their incident faces, sorted by edge.
    pub fn sorted(&self) -> Vec<(Edge, Vec<u32>)> {
        let mut edges: Vec<_> = self
            .edges
            .iter()
            .map(|(edge, faces)| (*edge, faces.clone()))
            .collect();
        edges.sort_unstable_by_key(|(edge, _)| *edge);
        edges
    }

    /// Returns `true` if every registered edge is shared by exactly two faces.
    #[inline]
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty() && self.edges.values().all(|faces| faces.len() == 2)
    }
}
