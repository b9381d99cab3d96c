//! Tunable constants and per-run configuration.
//!
//! The named constants mirror the defaults table in the CLI's reference
//! documentation; they are plain `const`s rather than environment-derived
//! values because the segmenter has no runtime config file, only CLI flags
//! (see `src/cli.rs`).

use crate::geometry::Colour;

/// Weighting between angular and geodesic distance when blending edge
/// weights. `w = (1 - DELTA) * ang/ang_avg + DELTA * geod/geod_avg`.
pub const DELTA: f64 = 0.5;

/// Attenuation factor applied to the angular distance of a convex dihedral.
pub const ETA: f64 = 0.01;

/// Dihedral-angle threshold used by [`ConvexityTest::AngleThreshold`].
pub const CONVEX_LIMIT: f64 = std::f64::consts::PI;

/// Number of lowest-weight outgoing edges considered per node during the
/// pruned Dijkstra search.
pub const DIST_N_SMALLEST: usize = 5;

/// Maximum number of medoid-refinement iterations per binary segmentation.
pub const MAX_NUM_ITERS: usize = 10;

/// Membership-probability cutoff for assigning a face to a cluster colour.
pub const PROB_THRESHOLD: f64 = 0.5;

pub const COLOUR_BLUE: Colour = Colour::new(0, 0, 255);
pub const COLOUR_RED: Colour = Colour::new(255, 0, 0);
pub const COLOUR_GREEN: Colour = Colour::new(0, 255, 0);
pub const COLOUR_BLACK: Colour = Colour::new(0, 0, 0);
pub const COLOUR_WHITE: Colour = Colour::new(255, 255, 255);

/// Above this many faces, [`crate::graph::DualGraph::build`] switches from
/// the O(F^2) all-pairs adjacency scan to the O(F) edge-hash approach.
pub const EDGE_HASH_THRESHOLD: usize = 2000;

/// Default seed for the deterministic segment-colour palette and for the
/// random distribution of "unsure" faces during recursive partitioning.
pub const DEFAULT_SEED: u64 = 0xC0FFEE;

/// Selects how a dihedral angle is classified as convex or concave in
/// [`crate::graph::dual_graph::angular_distance`].
///
/// The original implementation tests `theta > CONVEX_LIMIT` where `theta`
/// comes from `acos`, which only ever returns values in `[0, pi]` — so with
/// `CONVEX_LIMIT = pi` that branch can never trigger and every dihedral is
/// treated as concave. `AngleThreshold` preserves that literal behaviour
/// for parity with the original; `SignedDihedral` implements the correct
/// signed test. Neither is "more correct" per the spec, which leaves this
/// an explicit, documented choice rather than silently picking one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvexityTest {
    #[default]
    AngleThreshold,
    SignedDihedral,
}

/// Configuration for [`crate::graph::DualGraph::build`].
#[derive(Debug, Clone, Copy)]
pub struct DualGraphConfig {
    pub delta: f64,
    pub eta: f64,
    pub convex_limit: f64,
    pub convexity_test: ConvexityTest,
    pub edge_hash_threshold: usize,
}

impl Default for DualGraphConfig {
    fn default() -> Self {
        Self {
            delta: DELTA,
            eta: ETA,
            convex_limit: CONVEX_LIMIT,
            convexity_test: ConvexityTest::default(),
            edge_hash_threshold: EDGE_HASH_THRESHOLD,
        }
    }
}

/// Configuration for [`crate::graph::distance::DistanceOracle::build`].
#[derive(Debug, Clone, Copy)]
pub struct DistanceOracleConfig {
    pub n_smallest: usize,
    /// `None` uses rayon's global thread pool (hardware parallelism).
    pub num_workers: Option<usize>,
}

impl Default for DistanceOracleConfig {
    fn default() -> Self {
        Self {
            n_smallest: DIST_N_SMALLEST,
            num_workers: None,
        }
    }
}

/// Configuration for [`crate::segment::binary::BinarySegmenter`].
#[derive(Debug, Clone)]
pub struct BinarySegmenterConfig {
    pub max_iters: usize,
    pub prob_threshold: f64,
    pub cluster_colours: (Colour, Colour),
}

impl Default for BinarySegmenterConfig {
    fn default() -> Self {
        Self {
            max_iters: MAX_NUM_ITERS,
            prob_threshold: PROB_THRESHOLD,
            cluster_colours: (COLOUR_BLUE, COLOUR_RED),
        }
    }
}
