//! # mesh-segmenter
//!
//! Hierarchical fuzzy segmentation of triangular surface meshes into
//! spatially coherent patches, following the Katz-Tal style of shape
//! decomposition.
//!
//! The pipeline:
//!
//! 1. **Dual graph** ([`graph::DualGraph`]) — a weighted graph over a
//!    mesh's faces, blending angular and geodesic distance across shared
//!    edges.
//! 2. **Distance oracle** ([`graph::DistanceOracle`]) — all-pairs shortest
//!    paths over the dual graph, one pruned Dijkstra search per source
//!    face, fanned out across a worker pool.
//! 3. **Binary segmenter** ([`segment::BinarySegmenter`]) — fuzzy 2-medoid
//!    clustering driven by those distances.
//! 4. **Recursive segmenter** ([`segment::RecursiveSegmenter`]) — repeated
//!    binary subdivision to obtain `2^L` segments.
//!
//! ```no_run
//! use std::path::Path;
//! use mesh_segmenter::config::{BinarySegmenterConfig, DistanceOracleConfig, DualGraphConfig};
//! use mesh_segmenter::graph::{DistanceOracle, DualGraph};
//! use mesh_segmenter::ply::{read_ply, write_ply};
//! use mesh_segmenter::segment::RecursiveSegmenter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mesh = read_ply(Path::new("input.ply"))?;
//! let graph = DualGraph::build(&mesh, DualGraphConfig::default())?;
//! let distances = DistanceOracle::build(&graph, DistanceOracleConfig::default(), None)?;
//! let segmenter = RecursiveSegmenter::new(2, 0xC0FFEE, BinarySegmenterConfig::default())?;
//! let result = segmenter.segment(&mesh, &distances, None)?;
//! write_ply(&result, Path::new("output.ply"))?;
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod mesh;
pub mod ply;
pub mod segment;

pub use error::SegmentError;
pub use geometry::{Colour, Vertex};
pub use graph::{DistanceOracle, DualGraph, Edge};
pub use mesh::{Face, Mesh};
pub use segment::{BinarySegmenter, RecursiveSegmenter};
