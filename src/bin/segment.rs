//! `segment` — CLI front end for hierarchical fuzzy mesh segmentation.

use std::process::ExitCode;

use clap::Parser;
use log::info;

use mesh_segmenter::cli::{Args, SegmenterKind};
use mesh_segmenter::config::{BinarySegmenterConfig, DistanceOracleConfig, DualGraphConfig};
use mesh_segmenter::error::{ConfigError, SegmentError};
use mesh_segmenter::graph::{DistanceOracle, DualGraph};
use mesh_segmenter::ply::{read_ply, write_ply};
use mesh_segmenter::segment::RecursiveSegmenter;

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.as_filter())
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("segment: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(args: &Args) -> Result<(), SegmentError> {
    let SegmenterKind::Binary = args.segmenter;

    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err(ConfigError::ThreadsTooLow(threads).into());
        }
    }

    info!("reading mesh from {}", args.input.display());
    let mesh = read_ply(&args.input)?;
    info!("{} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let dual_graph_config = DualGraphConfig {
        convexity_test: args.convexity.into(),
        ..DualGraphConfig::default()
    };
    info!("building dual graph");
    let graph = DualGraph::build(&mesh, dual_graph_config)?;

    let distance_config = DistanceOracleConfig {
        num_workers: args.threads,
        ..DistanceOracleConfig::default()
    };
    info!("computing all-pairs distances");
    let distances = DistanceOracle::build(&graph, distance_config, None)?;

    info!("segmenting into 2^{} = {} parts", args.levels, 1u64 << args.levels);
    let segmenter = RecursiveSegmenter::new(args.levels, args.seed, BinarySegmenterConfig::default())?;
    let result = segmenter.segment(&mesh, &distances, None)?;

    info!("writing mesh to {}", args.output.display());
    write_ply(&result, &args.output)?;

    Ok(())
}
