//! Construction of the weighted face-adjacency (dual) graph.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::config::DualGraphConfig;
use crate::config::ConvexityTest;
use crate::error::GeometryError;
use crate::geometry::Vertex;
use crate::graph::edge::Edge;
use crate::mesh::Mesh;

/// A weighted, symmetric graph over a mesh's faces.
///
/// Faces are referenced by their index into [`Mesh::faces`] rather than by
/// value — the mesh owns the faces, the graph only describes how they
/// relate. Every face index in `0..mesh.num_faces()` is a key here, even
/// faces with no neighbours.
#[derive(Debug, Clone)]
pub struct DualGraph {
    neighbours: Vec<HashMap<usize, Edge>>,
    /// Per-face neighbour list sorted ascending by edge weight, then by
    /// face index (a stable tie-break), for the distance oracle's pruned
    /// Dijkstra search.
    sorted_neighbours: Vec<Vec<(usize, Edge)>>,
}

impl DualGraph {
    /// Builds the dual graph for `mesh`.
    ///
    /// Uses the O(F^2) all-pairs vertex-set intersection below
    /// `config.edge_hash_threshold` faces, and an O(F) edge-hash approach
    /// above it; both produce identical adjacency.
    ///
    /// Errors if any face is degenerate (zero-length normal) or if a
    /// discovered adjacency shares a zero-length edge.
    pub fn build(mesh: &Mesh, config: DualGraphConfig) -> Result<DualGraph, GeometryError> {
        let num_faces = mesh.num_faces();

        let normals = mesh
            .faces()
            .iter()
            .enumerate()
            .map(|(i, f)| f.normal().map_err(|_| GeometryError::DegenerateFace { face_index: i }))
            .collect::<Result<Vec<_>, _>>()?;
        let centers: Vec<Vertex> = mesh.faces().iter().map(|f| f.center()).collect();

        let pairs = if num_faces > config.edge_hash_threshold {
            Self::discover_adjacency_edge_hash(mesh)
        } else {
            Self::discover_adjacency_quadratic(mesh)
        };

        let mut raw = Vec::with_capacity(pairs.len());
        let mut ang_total = 0.0;
        let mut geod_total = 0.0;
        for (i, j, c1, c2) in pairs {
            let ang = angular_distance(normals[i], normals[j], (c1, c2), &config);
            let geod = geodesic_distance(centers[i], centers[j], c1, c2)
                .map_err(|_| GeometryError::ZeroLengthEdge { face_one: i, face_two: j })?;
            ang_total += ang;
            geod_total += geod;
            raw.push((i, j, ang, geod));
        }

        let n = raw.len() as f64;
        let ang_avg = if n > 0.0 { ang_total / n } else { 0.0 };
        let geod_avg = if n > 0.0 { geod_total / n } else { 0.0 };

        let mut neighbours: Vec<HashMap<usize, Edge>> = vec![HashMap::new(); num_faces];
        for (i, j, ang, geod) in raw {
            let ang_term = if ang_avg == 0.0 { 0.0 } else { ang / ang_avg };
            let geod_term = if geod_avg == 0.0 { 0.0 } else { geod / geod_avg };
            let weight = (1.0 - config.delta) * ang_term + config.delta * geod_term;
            let edge = Edge::new(ang, geod, weight);
            neighbours[i].insert(j, edge);
            neighbours[j].insert(i, edge);
        }

        let sorted_neighbours = neighbours
            .iter()
            .map(|m| {
                let mut v: Vec<(usize, Edge)> = m.iter().map(|(&k, &e)| (k, e)).collect();
                v.sort_by(|a, b| {
                    a.1.weight
                        .partial_cmp(&b.1.weight)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.0.cmp(&b.0))
                });
                v
            })
            .collect();

        Ok(DualGraph {
            neighbours,
            sorted_neighbours,
        })
    }

    /// O(F^2) reference algorithm: for every unordered face pair, intersect
    /// vertex sets and accept the pair iff the intersection has exactly two
    /// elements. Parallelised over the outer face index.
    ///
    /// Works off a plain `Vec<[Vertex; 3]>` snapshot rather than `&[Face]`
    /// directly: `Face` holds its colour behind a `Cell`, which makes
    /// `Face` (and so `&[Face]`) `!Sync`, and rayon requires the closure
    /// handed to `par_iter` to be `Send + Sync`. `Vertex` has no such
    /// interior mutability, so the snapshot is safe to share across
    /// worker threads.
    fn discover_adjacency_quadratic(mesh: &Mesh) -> Vec<(usize, usize, Vertex, Vertex)> {
        let triangles: Vec<[Vertex; 3]> = mesh.faces().iter().map(|f| f.vertices()).collect();
        let num_faces = triangles.len();
        (0..num_faces)
            .into_par_iter()
            .flat_map_iter(|i| {
                let triangles = &triangles;
                (i + 1..num_faces).filter_map(move |j| {
                    let shared = shared_vertices(&triangles[i], &triangles[j]);
                    if shared.len() == 2 {
                        Some((i, j, shared[0], shared[1]))
                    } else {
                        None
                    }
                })
            })
            .collect()
    }

    /// O(F) approach: map each undirected edge `{a, b}` to the faces that
    /// contain it, then emit one adjacency pair per edge shared by exactly
    /// two faces. Edges shared by more than two faces (non-manifold input)
    /// are skipped best-effort rather than treated as an error.
    fn discover_adjacency_edge_hash(mesh: &Mesh) -> Vec<(usize, usize, Vertex, Vertex)> {
        let faces = mesh.faces();
        let mut edge_faces: HashMap<(Vertex, Vertex), Vec<usize>> = HashMap::new();

        for (idx, face) in faces.iter().enumerate() {
            for (a, b) in [(face.v1, face.v2), (face.v2, face.v3), (face.v3, face.v1)] {
                let key = canonical_edge(a, b);
                edge_faces.entry(key).or_default().push(idx);
            }
        }

        let mut pairs = Vec::new();
        for ((a, b), owners) in edge_faces {
            if owners.len() == 2 {
                let (i, j) = (owners[0].min(owners[1]), owners[0].max(owners[1]));
                pairs.push((i, j, a, b));
            }
        }
        pairs
    }

    pub fn num_faces(&self) -> usize {
        self.neighbours.len()
    }

    /// All neighbours of `face_idx`, unordered.
    pub fn neighbours(&self, face_idx: usize) -> impl Iterator<Item = (usize, Edge)> + '_ {
        self.neighbours[face_idx].iter().map(|(&k, &e)| (k, e))
    }

    /// Neighbours of `face_idx` sorted ascending by weight, then by face
    /// index. Used by the pruned Dijkstra search.
    pub fn sorted_neighbours(&self, face_idx: usize) -> &[(usize, Edge)] {
        &self.sorted_neighbours[face_idx]
    }

    pub fn get_edge(&self, a: usize, b: usize) -> Option<Edge> {
        self.neighbours[a].get(&b).copied()
    }
}

/// The vertices `one` has in common with `two`, in `one`'s order. Mirrors
/// [`crate::mesh::Face::shared_vertices`] but over plain vertex triples, so
/// it can run inside a `Sync` parallel closure without touching `Face`.
fn shared_vertices(one: &[Vertex; 3], two: &[Vertex; 3]) -> Vec<Vertex> {
    one.iter().copied().filter(|v| two.contains(v)).collect()
}

fn vertex_sort_key(v: &Vertex) -> (u64, u64, u64) {
    (v.x.to_bits(), v.y.to_bits(), v.z.to_bits())
}

fn canonical_edge(a: Vertex, b: Vertex) -> (Vertex, Vertex) {
    if vertex_sort_key(&a) <= vertex_sort_key(&b) {
        (a, b)
    } else {
        (b, a)
    }
}

/// `ang(F,G) = mu * (1 - cos(theta))`, `theta` the angle between face
/// normals. `mu` de-emphasises convex dihedrals (`ETA`) versus concave or
/// flat ones (`1.0`). See [`ConvexityTest`] for the two interpretations of
/// "convex" this crate supports.
fn angular_distance(
    n_f: Vertex,
    n_g: Vertex,
    edge: (Vertex, Vertex),
    config: &DualGraphConfig,
) -> f64 {
    let theta = n_f.angle(&n_g);
    let is_convex = match config.convexity_test {
        ConvexityTest::AngleThreshold => theta > config.convex_limit,
        ConvexityTest::SignedDihedral => {
            let edge_vector = edge.1 - edge.0;
            n_f.cross(&n_g).dot(&edge_vector) > 0.0
        }
    };
    let mu = if is_convex { config.eta } else { 1.0 };
    mu * (1.0 - theta.cos())
}

/// Geodesic distance between two adjacent faces' centroids, approximated by
/// unfolding both triangles flat into the plane containing their shared
/// edge `(c1, c2)` and measuring straight-line distance between the
/// unfolded centroids.
///
/// Let `m` be the midpoint of `c1c2`. For each face, `h` is the
/// perpendicular distance from its centroid to the edge line and `p` is the
/// centroid's signed position along the edge direction, measured from `m`.
/// Then `geod = sqrt((p_f - p_g)^2 + (h_f + h_g)^2)`.
fn geodesic_distance(
    center_f: Vertex,
    center_g: Vertex,
    c1: Vertex,
    c2: Vertex,
) -> Result<f64, ()> {
    let edge_vector = c2 - c1;
    let edge_len = edge_vector.length();
    if edge_len == 0.0 {
        return Err(());
    }
    let edge_dir = edge_vector.divide(edge_len);
    let midpoint = (c1 + c2).scale(0.5);

    let project = |center: Vertex| -> (f64, f64) {
        let to_center = center - midpoint;
        let p = to_center.dot(&edge_dir);
        let perpendicular = to_center - edge_dir.scale(p);
        (p, perpendicular.length())
    };

    let (p_f, h_f) = project(center_f);
    let (p_g, h_g) = project(center_g);

    Ok(((p_f - p_g).powi(2) + (h_f + h_g).powi(2)).sqrt())
}
