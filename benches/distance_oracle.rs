//! Benchmarks for the dual graph build and the all-pairs distance oracle,
//! the two phases the spec calls out as the dominant cost (O(F^2) adjacency
//! discovery, quadratic distance storage).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use mesh_segmenter::config::{DistanceOracleConfig, DualGraphConfig};
use mesh_segmenter::geometry::Vertex;
use mesh_segmenter::graph::{DistanceOracle, DualGraph};
use mesh_segmenter::mesh::{Face, Mesh};

/// A strip of `n` adjacent triangles, each sharing one edge with the next —
/// cheap to build at any size, and connected enough that the distance
/// oracle has real shortest paths to compute.
fn triangle_strip(n: usize) -> Mesh {
    let mut vertices = Vec::with_capacity(n + 2);
    vertices.push(Vertex::new(0.0, 0.0, 0.0));
    vertices.push(Vertex::new(0.0, 1.0, 0.0));
    for i in 0..n {
        let x = (i + 1) as f64;
        let y = if i % 2 == 0 { 0.0 } else { 1.0 };
        vertices.push(Vertex::new(x, y, 0.0));
    }

    let mut faces = Vec::with_capacity(n);
    for i in 0..n {
        faces.push(Face::new(vertices[i], vertices[i + 1], vertices[i + 2]));
    }

    Mesh::new(vertices, faces)
}

fn bench_dual_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("dual_graph_build");
    for &size in &[50usize, 200, 800] {
        let mesh = triangle_strip(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &mesh, |b, mesh| {
            b.iter(|| {
                let graph = DualGraph::build(mesh, DualGraphConfig::default()).unwrap();
                black_box(graph.num_faces())
            })
        });
    }
    group.finish();
}

fn bench_distance_oracle_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_oracle_build");
    for &size in &[50usize, 200, 800] {
        let mesh = triangle_strip(size);
        let graph = DualGraph::build(&mesh, DualGraphConfig::default()).unwrap();
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let oracle =
                    DistanceOracle::build(graph, DistanceOracleConfig::default(), None).unwrap();
                black_box(oracle.num_faces())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dual_graph_build, bench_distance_oracle_build);
criterion_main!(benches);
