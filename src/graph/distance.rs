//! All-pairs shortest paths over the dual graph, computed by a pruned
//! Dijkstra search fanned out in parallel across source faces.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rayon::prelude::*;

use crate::cancel::CancellationToken;
use crate::config::DistanceOracleConfig;
use crate::error::{InternalError, SegmentError};
use crate::graph::dual_graph::DualGraph;

/// Dense `F x F` shortest-path table, `distance(a, a) == 0` and
/// `distance(a, b) == f64::INFINITY` when `b` is unreachable from `a`.
///
/// Distances are computed by a Dijkstra search that only relaxes each
/// node's `n_smallest` lowest-weight outgoing edges (see
/// [`DistanceOracleConfig::n_smallest`]); this is a deliberate
/// approximation that may overestimate true shortest paths. The clustering
/// that consumes these distances only needs a stable dissimilarity
/// measure, not exact metric truth, so the pruning is preserved rather
/// than treated as a bug.
#[derive(Debug, Clone)]
pub struct DistanceOracle {
    table: Vec<Vec<f64>>,
}

impl DistanceOracle {
    /// Runs one Dijkstra search per source face, distributed across a
    /// rayon worker pool (hardware parallelism by default, or
    /// `config.num_workers` threads if set).
    ///
    /// If `cancel` is set and cancelled mid-computation, returns
    /// [`SegmentError::Cancelled`] and discards any partial results.
    pub fn build(
        graph: &DualGraph,
        config: DistanceOracleConfig,
        cancel: Option<&CancellationToken>,
    ) -> Result<DistanceOracle, SegmentError> {
        let num_faces = graph.num_faces();

        let compute = || -> Result<Vec<(usize, Vec<f64>)>, SegmentError> {
            (0..num_faces)
                .into_par_iter()
                .map(|source| {
                    dijkstra_single_source(graph, source, config.n_smallest, cancel)
                        .map(|row| (source, row))
                })
                .collect()
        };

        let rows = match config.num_workers {
            Some(num_workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_workers)
                    .build()
                    .map_err(|e| {
                        SegmentError::Internal(InternalError::InvariantViolation(format!(
                            "failed to build a {num_workers}-thread pool: {e}"
                        )))
                    })?;
                pool.install(compute)?
            }
            None => compute()?,
        };

        let mut table = vec![Vec::new(); num_faces];
        for (source, row) in rows {
            table[source] = row;
        }

        Ok(DistanceOracle { table })
    }

    /// Shortest-path weight from face `a` to face `b`, or `f64::INFINITY`
    /// if unreachable. `distance(a, a)` is always `0.0`.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.table[a][b]
    }

    pub fn num_faces(&self) -> usize {
        self.table.len()
    }
}

/// Min-heap entry ordered by ascending distance (`BinaryHeap` is a
/// max-heap by default, so comparison is reversed).
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    distance: f64,
    face: usize,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.face.cmp(&self.face))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra_single_source(
    graph: &DualGraph,
    source: usize,
    n_smallest: usize,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<f64>, SegmentError> {
    let num_faces = graph.num_faces();
    let mut dist = vec![f64::INFINITY; num_faces];
    let mut visited = vec![false; num_faces];
    dist[source] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        distance: 0.0,
        face: source,
    });

    while let Some(HeapEntry { distance, face }) = heap.pop() {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                return Err(SegmentError::Cancelled);
            }
        }

        if visited[face] {
            continue;
        }
        visited[face] = true;

        for &(neighbour, edge) in graph.sorted_neighbours(face).iter().take(n_smallest) {
            if visited[neighbour] {
                continue;
            }
            let candidate = distance + edge.weight;
            if candidate < dist[neighbour] {
                dist[neighbour] = candidate;
                heap.push(HeapEntry {
                    distance: candidate,
                    face: neighbour,
                });
            }
        }
    }

    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DualGraphConfig;
    use crate::geometry::Vertex;
    use crate::mesh::{Face, Mesh};

    fn v(x: f64, y: f64, z: f64) -> Vertex {
        Vertex::new(x, y, z)
    }

    fn quad_mesh() -> Mesh {
        let verts = vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(0.0, 1.0, 0.0),
        ];
        let f1 = Face::new(verts[0], verts[1], verts[2]);
        let f2 = Face::new(verts[0], verts[2], verts[3]);
        Mesh::new(verts, vec![f1, f2])
    }

    #[test]
    fn self_distance_is_zero() {
        let mesh = quad_mesh();
        let graph = DualGraph::build(&mesh, DualGraphConfig::default()).unwrap();
        let oracle = DistanceOracle::build(&graph, DistanceOracleConfig::default(), None).unwrap();
        assert_eq!(oracle.distance(0, 0), 0.0);
        assert_eq!(oracle.distance(1, 1), 0.0);
    }

    #[test]
    fn adjacent_faces_have_finite_symmetric_distance() {
        let mesh = quad_mesh();
        let graph = DualGraph::build(&mesh, DualGraphConfig::default()).unwrap();
        let oracle = DistanceOracle::build(&graph, DistanceOracleConfig::default(), None).unwrap();
        assert!(oracle.distance(0, 1).is_finite());
        assert_eq!(oracle.distance(0, 1), oracle.distance(1, 0));
    }

    #[test]
    fn disconnected_faces_are_unreachable() {
        let verts = vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(10.0, 10.0, 10.0),
            v(11.0, 10.0, 10.0),
            v(10.0, 11.0, 10.0),
        ];
        let f1 = Face::new(verts[0], verts[1], verts[2]);
        let f2 = Face::new(verts[3], verts[4], verts[5]);
        let mesh = Mesh::new(verts, vec![f1, f2]);
        let graph = DualGraph::build(&mesh, DualGraphConfig::default()).unwrap();
        let oracle = DistanceOracle::build(&graph, DistanceOracleConfig::default(), None).unwrap();
        assert_eq!(oracle.distance(0, 1), f64::INFINITY);
    }

    #[test]
    fn cancellation_short_circuits() {
        let mesh = quad_mesh();
        let graph = DualGraph::build(&mesh, DualGraphConfig::default()).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let result = DistanceOracle::build(&graph, DistanceOracleConfig::default(), Some(&token));
        assert!(matches!(result, Err(SegmentError::Cancelled)));
    }
}
