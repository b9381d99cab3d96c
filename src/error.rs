//! Error taxonomy for the segmentation pipeline.
//!
//! Each variant maps to one of the CLI's exit codes (see `src/bin/segment.rs`):
//! `Input` -> 2, `Geometry` -> 3, `Config` -> 2, `Internal` -> 4,
//! `Cancelled` -> 130.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type returned by every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error("segmentation cancelled")]
    Cancelled,
}

impl SegmentError {
    /// Process exit code per the error taxonomy.
    pub fn exit_code(&self) -> i32 {
        match self {
            SegmentError::Input(_) => 2,
            SegmentError::Geometry(_) => 3,
            SegmentError::Config(_) => 2,
            SegmentError::Internal(_) => 4,
            SegmentError::Cancelled => 130,
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0} does not exist")]
    FileNotFound(PathBuf),

    #[error("input file should have a .ply extension, got {0}")]
    WrongExtension(PathBuf),

    #[error("malformed PLY header: {0}")]
    MalformedHeader(String),

    #[error("face {face_index} references vertex index {vertex_index}, but the mesh has only {num_vertices} vertices")]
    VertexIndexOutOfRange {
        face_index: usize,
        vertex_index: usize,
        num_vertices: usize,
    },

    #[error("face {0} is not a triangle (only triangles are supported)")]
    NonTriangularFace(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length normal encountered while normalizing a degenerate face")]
    ZeroLengthNormal,

    #[error("face {face_index} is degenerate (zero area)")]
    DegenerateFace { face_index: usize },

    #[error("zero-length shared edge between faces {face_one} and {face_two}")]
    ZeroLengthEdge { face_one: usize, face_two: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("recursion depth (levels) must be >= 1, got {0}")]
    LevelsTooLow(u32),

    #[error("thread count must be >= 1, got {0}")]
    ThreadsTooLow(usize),

    #[error("unknown segmenter kind {0:?} (only \"binary\" is defined)")]
    UnknownSegmenterKind(String),
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("recursive assembly produced {actual} faces, expected {expected}")]
    FaceCountMismatch { expected: usize, actual: usize },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
