use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::core::{Point3, acos_clamped};

/// Vertex index into a mesh's point list.
pub type VertexIdx = u32;
/// Face index into a mesh's triangle list.
pub type FaceIdx = u32;

/// Upper bound on vertex and face counts; construction fails beyond it.
pub const MAX_INDEX: usize = 100_000_000;

/// Sentinel for the not-yet-seen second face of an edge during construction.
const NO_FACE: FaceIdx = FaceIdx::MAX;

/// Ordered vertex triple, orientation as given by the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub a: VertexIdx,
    pub b: VertexIdx,
    pub c: VertexIdx,
}

impl Triangle {
    #[must_use]
    pub const fn new(a: VertexIdx, b: VertexIdx, c: VertexIdx) -> Self {
        Self { a, b, c }
    }

    #[must_use]
    pub const fn vertices(self) -> [VertexIdx; 3] {
        [self.a, self.b, self.c]
    }

    /// The vertex of this triangle that lies opposite the edge `{a, b}`.
    pub(crate) fn vertex_opposite(self, a: VertexIdx, b: VertexIdx) -> VertexIdx {
        for v in self.vertices() {
            if v != a && v != b {
                return v;
            }
        }
        panic!("triangle {self:?} has no vertex opposite edge {a}-{b}");
    }
}

/// Unordered vertex pair. The constructor normalises the endpoint order, so
/// the derived `Eq` and `Hash` treat `{a, b}` and `{b, a}` as the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(pub VertexIdx, pub VertexIdx);

impl EdgeKey {
    #[must_use]
    pub fn new(a: VertexIdx, b: VertexIdx) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("too many points ({0}, limit {MAX_INDEX})")]
    TooManyPoints(usize),
    #[error("too many faces ({0}, limit {MAX_INDEX})")]
    TooManyFaces(usize),
    #[error("point {0} has duplicates")]
    DuplicatePoint(usize),
    #[error("face {0} references missing vertex {1}")]
    MissingVertex(FaceIdx, VertexIdx),
    #[error("faces {0}, {1} and {2} occupy the same edge")]
    ThreeFacesOnEdge(FaceIdx, FaceIdx, FaceIdx),
    #[error("floating edge {0}-{1}")]
    FloatingEdge(VertexIdx, VertexIdx),
    #[error("floating vertex {0}")]
    FloatingVertex(VertexIdx),
}

/// Immutable indexed triangle mesh with derived adjacency.
///
/// Construction validates that the mesh is a closed manifold surface: every
/// edge has exactly two incident faces and every vertex appears in at least
/// one face. All queries after that are pure geometry reads.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    points: Vec<Point3>,
    triangles: Vec<Triangle>,
    incident_faces: Vec<Vec<FaceIdx>>,
    edge_faces: HashMap<EdgeKey, [FaceIdx; 2]>,
}

impl TriangleMesh {
    pub fn new(points: Vec<Point3>, triangles: Vec<Triangle>) -> Result<Self, MeshError> {
        if points.len() > MAX_INDEX {
            return Err(MeshError::TooManyPoints(points.len()));
        }
        if triangles.len() > MAX_INDEX {
            return Err(MeshError::TooManyFaces(triangles.len()));
        }

        let mut seen = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if seen.insert(p.bit_key(), i).is_some() {
                return Err(MeshError::DuplicatePoint(i));
            }
        }

        let mut incident_faces = vec![Vec::new(); points.len()];
        // one slot pair per edge of a closed surface (Euler characteristic)
        let mut edge_faces: HashMap<EdgeKey, [FaceIdx; 2]> =
            HashMap::with_capacity((points.len() + triangles.len()).saturating_sub(2));

        for (i, tri) in triangles.iter().enumerate() {
            let face = i as FaceIdx;
            for v in tri.vertices() {
                let Some(at_vertex) = incident_faces.get_mut(v as usize) else {
                    return Err(MeshError::MissingVertex(face, v));
                };
                at_vertex.push(face);
            }
            for [a, b] in [[tri.a, tri.b], [tri.b, tri.c], [tri.c, tri.a]] {
                match edge_faces.entry(EdgeKey::new(a, b)) {
                    Entry::Vacant(e) => {
                        e.insert([face, NO_FACE]);
                    }
                    Entry::Occupied(e) => {
                        let slots = e.into_mut();
                        if slots[1] != NO_FACE {
                            return Err(MeshError::ThreeFacesOnEdge(slots[0], slots[1], face));
                        }
                        slots[1] = face;
                    }
                }
            }
        }

        for (&edge, &faces) in &edge_faces {
            if faces[1] == NO_FACE {
                return Err(MeshError::FloatingEdge(edge.0, edge.1));
            }
        }
        for (v, faces) in incident_faces.iter().enumerate() {
            if faces.is_empty() {
                return Err(MeshError::FloatingVertex(v as VertexIdx));
            }
        }

        Ok(Self { points, triangles, incident_faces, edge_faces })
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn point(&self, v: VertexIdx) -> Point3 {
        self.points[v as usize]
    }

    #[must_use]
    pub fn triangle(&self, f: FaceIdx) -> Triangle {
        self.triangles[f as usize]
    }

    /// Faces containing vertex `v`, in input order.
    #[must_use]
    pub fn incident_faces(&self, v: VertexIdx) -> &[FaceIdx] {
        &self.incident_faces[v as usize]
    }

    /// The two faces incident to edge `{a, b}`.
    ///
    /// # Panics
    /// If no such edge exists. After validation that means a corrupted mesh
    /// or a caller bug, both fatal.
    #[must_use]
    pub fn edge_faces(&self, a: VertexIdx, b: VertexIdx) -> [FaceIdx; 2] {
        self.edge_faces[&EdgeKey::new(a, b)]
    }

    /// Iterator over every recorded edge and its face pair.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, [FaceIdx; 2])> + '_ {
        self.edge_faces.iter().map(|(&e, &f)| (e, f))
    }

    /// Euclidean distance between two vertices.
    #[must_use]
    pub fn distance(&self, a: VertexIdx, b: VertexIdx) -> f64 {
        self.point(a).distance_to(self.point(b))
    }

    /// Interior angle at vertex `b` in the corner `a-b-c`, clamped against
    /// floating drift.
    #[must_use]
    pub fn corner_angle(&self, a: VertexIdx, b: VertexIdx, c: VertexIdx) -> f64 {
        let u = self.point(a).sub_point(self.point(b));
        let w = self.point(c).sub_point(self.point(b));
        acos_clamped(u.dot(w) / (u.length_squared() * w.length_squared()).sqrt())
    }
}
