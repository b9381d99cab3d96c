//! The mesh: an ordered vertex list and an ordered face list.

use std::collections::HashMap;

use crate::geometry::Vertex;
use crate::mesh::face::Face;

/// An ordered vertex list and an ordered face list.
///
/// Face order is established at construction and never reshuffled —
/// shortest-path results and cluster state key on faces (or, in the
/// distance oracle and dual graph, on a face's index into this list), so
/// reordering faces mid-pipeline would silently invalidate cached results.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    vertex_index: HashMap<Vertex, usize>,
}

impl Mesh {
    /// Builds a mesh from a vertex list and a face list.
    ///
    /// Does not validate manifoldness. Duplicate faces (identical ordered
    /// vertex triples) are deduplicated, keeping exactly one; which
    /// duplicate survives is unspecified.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut deduped = Vec::with_capacity(faces.len());
        for face in faces {
            let key = (face.v1, face.v2, face.v3);
            if seen.insert(key) {
                deduped.push(face);
            }
        }

        let vertex_index = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, i))
            .collect();

        Self {
            vertices,
            faces: deduped,
            vertex_index,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Looks up a vertex's index in amortised O(1), for PLY writing.
    pub fn vertex_index(&self, vertex: &Vertex) -> Option<usize> {
        self.vertex_index.get(vertex).copied()
    }

    /// Builds a new mesh containing only the given subset of faces
    /// (referenced by index into [`Self::faces`]), retaining the original
    /// vertex list so vertex indices stay stable across partitioning.
    pub fn subset(&self, face_indices: &[usize]) -> Mesh {
        let faces = face_indices.iter().map(|&i| self.faces[i].clone()).collect();
        Mesh::new(self.vertices.clone(), faces)
    }
}
