//! Fuzzy 2-medoid clustering over face-to-face distances.

use crate::cancel::CancellationToken;
use crate::config::BinarySegmenterConfig;
use crate::error::SegmentError;
use crate::graph::DistanceOracle;
use crate::mesh::Mesh;

/// Segments a subset of a mesh's faces into two fuzzy clusters via
/// iterative medoid refinement, colouring each face by its dominant
/// cluster (or the saturating blend of both colours, for faces that
/// favour neither).
///
/// Operates on global face indices into a [`DistanceOracle`] built once
/// for the whole mesh, rather than on a private, re-derived distance
/// table — this is what lets [`crate::segment::recursive::RecursiveSegmenter`]
/// reuse one oracle across every level and sub-mesh of the recursion
/// instead of rebuilding the dual graph and all-pairs distances at each
/// split. Colours are written through [`crate::mesh::Face`]'s `Cell`, in
/// place; [`BinarySegmenter::segment`] does not return a mesh.
#[derive(Debug, Clone)]
pub struct BinarySegmenter {
    config: BinarySegmenterConfig,
}

impl BinarySegmenter {
    pub fn new(config: BinarySegmenterConfig) -> Self {
        Self { config }
    }

    /// Runs the full `INIT -> PICK_MEDOIDS -> {UPDATE_PROBS -> UPDATE_MEDOIDS}* -> COLOUR`
    /// state machine over `face_indices` (indices into both `mesh.faces()`
    /// and `distances`), colouring each of those faces in place.
    ///
    /// `face_indices` may be the full `0..mesh.num_faces()` range or any
    /// subset; a subset of size one colours its sole face "unsure" (its
    /// distance to itself is zero on both sides of the split).
    pub fn segment(
        &self,
        mesh: &Mesh,
        face_indices: &[usize],
        distances: &DistanceOracle,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), SegmentError> {
        let mut reprs = init_medoids(face_indices, distances);
        let mut probs = vec![(0.0_f64, 0.0_f64); face_indices.len()];

        for _ in 0..self.config.max_iters {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return Err(SegmentError::Cancelled);
                }
            }

            let current = reprs;
            probs = update_probs(reprs, face_indices, distances);
            reprs = update_medoids(&probs, face_indices, distances, reprs);

            if reprs == current {
                break;
            }
        }

        let (colour0, colour1) = self.config.cluster_colours;
        let colour_unsure = colour0 + colour1;
        let threshold = self.config.prob_threshold;

        for (&idx, &(p0, p1)) in face_indices.iter().zip(probs.iter()) {
            let face = &mesh.faces()[idx];
            if p0 > threshold {
                face.set_colour(colour0);
            } else if p1 > threshold {
                face.set_colour(colour1);
            } else {
                face.set_colour(colour_unsure);
            }
        }

        Ok(())
    }

    /// Convenience entry point for segmenting a whole mesh in one pass: clones
    /// `mesh`, colours every face of the clone, and returns it, leaving the
    /// original untouched.
    pub fn segment_full(
        &self,
        mesh: &Mesh,
        distances: &DistanceOracle,
        cancel: Option<&CancellationToken>,
    ) -> Result<Mesh, SegmentError> {
        let segmented = mesh.clone();
        let all: Vec<usize> = (0..segmented.num_faces()).collect();
        self.segment(&segmented, &all, distances, cancel)?;
        Ok(segmented)
    }
}

/// Picks the index pair maximising pairwise distance, O(n^2) over
/// `face_indices`. Ties are broken by ascending position in `face_indices`,
/// which falls out naturally from scanning pairs `(i, j)` with `i < j` in
/// order and only replacing the best pair on a strictly greater distance. A
/// singleton subset falls back to `(face_indices[0], face_indices[0])`.
fn init_medoids(face_indices: &[usize], distances: &DistanceOracle) -> (usize, usize) {
    let mut best = (face_indices[0], face_indices[0]);
    let mut best_dist = f64::NEG_INFINITY;
    for (i, &a) in face_indices.iter().enumerate() {
        for &b in &face_indices[i + 1..] {
            let d = distances.distance(a, b);
            if d > best_dist {
                best_dist = d;
                best = (a, b);
            }
        }
    }
    best
}

/// `p0(f) = d(f, R1) / (d(f, R0) + d(f, R1))`, `p1(f) = 1 - p0(f)`, with the
/// degenerate cases spelled out in the module-level docs: equal 0.5/0.5
/// when both distances are zero or both infinite, and a hard 1.0/0.0 split
/// when exactly one side is unreachable.
fn update_probs(
    (r0, r1): (usize, usize),
    face_indices: &[usize],
    distances: &DistanceOracle,
) -> Vec<(f64, f64)> {
    face_indices
        .iter()
        .map(|&f| {
            let d0 = distances.distance(f, r0);
            let d1 = distances.distance(f, r1);
            if d0.is_infinite() && d1.is_infinite() {
                (0.5, 0.5)
            } else if d0.is_infinite() {
                (0.0, 1.0)
            } else if d1.is_infinite() {
                (1.0, 0.0)
            } else if d0 + d1 == 0.0 {
                (0.5, 0.5)
            } else {
                (d1 / (d0 + d1), d0 / (d0 + d1))
            }
        })
        .collect()
}

/// `S_k(f) = sum_g p_k(g) * d(g, f)`, new medoid `R_k' = argmin_f S_k(f)`
/// over every face in `face_indices` (not only those already closer to
/// `R_k`). Ties favour the current medoid index.
///
/// An unreachable `g` (`d(g, f) == +inf`) with positive membership
/// `p_k(g)` makes `S_k(f)` itself `+inf` rather than being skipped: a face
/// that can't see some positive-probability mass of the cluster must not
/// look like a good medoid just because the unreachable terms were
/// dropped. This is what disqualifies an isolated face from being chosen
/// as the medoid for a cluster it has no path into, matching the
/// original's `prob * inf -> inf` propagation.
fn update_medoids(
    probs: &[(f64, f64)],
    face_indices: &[usize],
    distances: &DistanceOracle,
    (r0, r1): (usize, usize),
) -> (usize, usize) {
    let mut sums0 = Vec::with_capacity(face_indices.len());
    let mut sums1 = Vec::with_capacity(face_indices.len());

    for &f in face_indices {
        let mut sum0 = 0.0;
        let mut sum1 = 0.0;
        for (g_pos, &g) in face_indices.iter().enumerate() {
            let d = distances.distance(g, f);
            let (p0, p1) = probs[g_pos];
            if d.is_infinite() {
                if p0 > 0.0 {
                    sum0 += f64::INFINITY;
                }
                if p1 > 0.0 {
                    sum1 += f64::INFINITY;
                }
            } else {
                sum0 += p0 * d;
                sum1 += p1 * d;
            }
        }
        sums0.push((f, sum0));
        sums1.push((f, sum1));
    }

    (
        argmin_with_current_tiebreak(&sums0, r0),
        argmin_with_current_tiebreak(&sums1, r1),
    )
}

/// Finds the index minimising `values`' second element, preferring `current`
/// on ties (a tie being exact equality with the current minimum, not just
/// "close enough").
fn argmin_with_current_tiebreak(values: &[(usize, f64)], current: usize) -> usize {
    let current_val = values
        .iter()
        .find(|&&(idx, _)| idx == current)
        .map(|&(_, v)| v)
        .expect("current medoid must be a member of the indexed set");

    let mut best = current;
    let mut best_val = current_val;
    for &(idx, val) in values {
        if val < best_val {
            best_val = val;
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DualGraphConfig;
    use crate::config::{COLOUR_BLUE, COLOUR_RED};
    use crate::config::DistanceOracleConfig;
    use crate::geometry::Vertex;
    use crate::graph::DualGraph;
    use crate::mesh::Face;

    fn v(x: f64, y: f64, z: f64) -> Vertex {
        Vertex::new(x, y, z)
    }

    fn build_distances(mesh: &Mesh) -> DistanceOracle {
        let graph = DualGraph::build(mesh, DualGraphConfig::default()).unwrap();
        DistanceOracle::build(&graph, DistanceOracleConfig::default(), None).unwrap()
    }

    #[test]
    fn single_triangle_is_unsure() {
        let verts = vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)];
        let f = Face::new(verts[0], verts[1], verts[2]);
        let mesh = Mesh::new(verts, vec![f]);
        let distances = build_distances(&mesh);

        let segmenter = BinarySegmenter::new(BinarySegmenterConfig::default());
        let out = segmenter.segment_full(&mesh, &distances, None).unwrap();

        assert_eq!(out.faces()[0].colour(), COLOUR_BLUE + COLOUR_RED);
    }

    #[test]
    fn adjacent_pair_splits_into_two_clusters() {
        let verts = vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(0.0, 1.0, 0.0),
        ];
        let f1 = Face::new(verts[0], verts[1], verts[2]);
        let f2 = Face::new(verts[0], verts[2], verts[3]);
        let mesh = Mesh::new(verts, vec![f1, f2]);
        let distances = build_distances(&mesh);

        let segmenter = BinarySegmenter::new(BinarySegmenterConfig::default());
        let out = segmenter.segment_full(&mesh, &distances, None).unwrap();

        assert_ne!(out.faces()[0].colour(), out.faces()[1].colour());
    }

    #[test]
    fn disconnected_pair_assigns_each_to_a_different_cluster() {
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
        let distances = build_distances(&mesh);

        let segmenter = BinarySegmenter::new(BinarySegmenterConfig::default());
        let out = segmenter.segment_full(&mesh, &distances, None).unwrap();

        assert_ne!(out.faces()[0].colour(), out.faces()[1].colour());
        assert_ne!(out.faces()[0].colour(), COLOUR_BLUE + COLOUR_RED);
        assert_ne!(out.faces()[1].colour(), COLOUR_BLUE + COLOUR_RED);
    }

    #[test]
    fn segmenting_a_subset_only_recolours_that_subset() {
        let verts = vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(2.0, 0.0, 0.0),
        ];
        let f1 = Face::new(verts[0], verts[1], verts[2]);
        let f2 = Face::new(verts[0], verts[2], verts[3]);
        let f3 = Face::new(verts[1], verts[4], verts[2]);
        let mesh = Mesh::new(verts, vec![f1, f2, f3]);
        let distances = build_distances(&mesh);

        let segmenter = BinarySegmenter::new(BinarySegmenterConfig::default());
        segmenter.segment(&mesh, &[0, 1], &distances, None).unwrap();

        assert_eq!(mesh.faces()[2].colour(), crate::config::COLOUR_WHITE);
    }

    #[test]
    fn segment_full_does_not_mutate_the_original_mesh() {
        let verts = vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(0.0, 1.0, 0.0),
        ];
        let f1 = Face::new(verts[0], verts[1], verts[2]);
        let f2 = Face::new(verts[0], verts[2], verts[3]);
        let mesh = Mesh::new(verts, vec![f1, f2]);
        let distances = build_distances(&mesh);

        let segmenter = BinarySegmenter::new(BinarySegmenterConfig::default());
        let _ = segmenter.segment_full(&mesh, &distances, None).unwrap();

        assert_eq!(mesh.faces()[0].colour(), crate::config::COLOUR_WHITE);
        assert_eq!(mesh.faces()[1].colour(), crate::config::COLOUR_WHITE);
    }
}
