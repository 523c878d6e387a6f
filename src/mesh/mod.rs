mod plates;
mod primitives;
mod properties;

pub use plates::Plate;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{MeshError, Result};
use crate::math::Point3;

/// One face's use of an edge, with the direction the face traverses it.
///
/// For an outward-wound closed surface the two uses of an edge run in
/// opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeUse {
    /// Index of the face.
    pub face: usize,
    /// Vertex the face leaves the edge from.
    pub from: usize,
    /// Vertex the face reaches along the edge.
    pub to: usize,
}

/// An undirected mesh edge, keyed by its vertex pair (smaller index first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshEdge {
    /// The two vertex indices, `vertices[0] < vertices[1]`.
    pub vertices: [usize; 2],
    /// Every face that uses this edge. Exactly two on a closed manifold.
    pub uses: Vec<EdgeUse>,
}

/// Immutable triangulated surface of a body, with the per-vertex, per-face
/// and per-edge data the gravity methods consult on every field point.
///
/// Lengths are in kilometers. The surface is assumed to be a closed,
/// outward-wound 2-manifold; only face indices are validated.
#[derive(Debug, Clone)]
pub struct ShapeModel {
    vertices: Vec<Point3>,
    faces: Vec<[usize; 3]>,
    edges: Vec<MeshEdge>,
    plates: Vec<Plate>,
}

impl ShapeModel {
    /// Builds the shape model cache from vertex positions and face index triples.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no vertices or faces, a face references a
    /// vertex that does not exist, or a face repeats a vertex index.
    pub fn new(vertices: Vec<Point3>, faces: Vec<[usize; 3]>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(MeshError::Empty("vertices").into());
        }
        if faces.is_empty() {
            return Err(MeshError::Empty("faces").into());
        }

        let vertex_count = vertices.len();
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                }
                .into());
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return Err(MeshError::RepeatedVertex { face }.into());
            }
        }

        let edges = build_edges(&faces);
        let plates = plates::compute_plates(&vertices, &faces);

        let model = Self {
            vertices,
            faces,
            edges,
            plates,
        };

        let open = model.open_edge_count();
        debug!(
            vertices = model.vertices.len(),
            faces = model.faces.len(),
            edges = model.edges.len(),
            "built shape model"
        );
        if open > 0 {
            warn!(open, "shape model has edges without exactly two faces");
        }

        Ok(model)
    }

    /// Vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Face vertex-index triples.
    #[must_use]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Unique undirected edges, in order of first appearance.
    #[must_use]
    pub fn edges(&self) -> &[MeshEdge] {
        &self.edges
    }

    /// Per-face center, unit normal and area.
    #[must_use]
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (plates).
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The three vertex positions of a face.
    #[must_use]
    pub fn face_points(&self, face: usize) -> [Point3; 3] {
        self.faces[face].map(|i| self.vertices[i])
    }

    /// Number of edges that do not have exactly two incident faces.
    ///
    /// Zero for a closed manifold.
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.uses.len() != 2).count()
    }
}

/// Deduplicates the three directed edges of every face into undirected edges.
fn build_edges(faces: &[[usize; 3]]) -> Vec<MeshEdge> {
    let mut index: HashMap<(usize, usize), usize> = HashMap::with_capacity(faces.len() * 3 / 2);
    let mut edges: Vec<MeshEdge> = Vec::with_capacity(faces.len() * 3 / 2);

    for (face, tri) in faces.iter().enumerate() {
        for k in 0..3 {
            let from = tri[k];
            let to = tri[(k + 1) % 3];
            let key = (from.min(to), from.max(to));
            let edge_use = EdgeUse { face, from, to };

            match index.get(&key) {
                Some(&e) => edges[e].uses.push(edge_use),
                None => {
                    index.insert(key, edges.len());
                    edges.push(MeshEdge {
                        vertices: [key.0, key.1],
                        uses: vec![edge_use],
                    });
                }
            }
        }
    }

    edges
}
