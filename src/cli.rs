//! Command-line argument surface for the `segment` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ConvexityTest;

/// Hierarchical fuzzy segmentation of a triangular surface mesh.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Input mesh, ASCII PLY 1.0.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output mesh, ASCII PLY 1.0 with per-face colour.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Segmenter kind. Only "binary" is defined.
    #[arg(short = 's', long, value_enum, default_value_t = SegmenterKind::Binary)]
    pub segmenter: SegmenterKind,

    /// Recursion depth; `2^levels` segments in the output.
    #[arg(short = 'k', long, default_value_t = 1)]
    pub levels: u32,

    /// Worker count for the distance oracle. Defaults to the number of
    /// logical CPUs.
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Log verbosity.
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Seed for the deterministic segment-colour palette and for
    /// distributing "unsure" faces across a recursive split.
    #[arg(long, default_value_t = crate::config::DEFAULT_SEED)]
    pub seed: u64,

    /// Which test decides a dihedral angle is convex (see
    /// `mesh_segmenter::config::ConvexityTest`).
    #[arg(long, value_enum, default_value_t = ConvexityArg::Angle)]
    pub convexity: ConvexityArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmenterKind {
    Binary,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvexityArg {
    Angle,
    Signed,
}

impl From<ConvexityArg> for ConvexityTest {
    fn from(value: ConvexityArg) -> Self {
        match value {
            ConvexityArg::Angle => ConvexityTest::AngleThreshold,
            ConvexityArg::Signed => ConvexityTest::SignedDihedral,
        }
    }
}
