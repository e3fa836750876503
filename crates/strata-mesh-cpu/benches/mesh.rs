use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use strata_mesh_cpu::{build_chunk_mesh, merge_meshes};
use strata_world::{ChunkCoord, World};

fn bench_build_chunk_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_mesh");
    let world = World::new(1337);
    let coord = ChunkCoord::new(0, 0);
    let grid = world.generate_chunk(coord);
    group.bench_function("generated_16x384x16", |b| {
        b.iter(|| black_box(build_chunk_mesh(&grid, coord)))
    });
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_meshes");
    group.measurement_time(Duration::from_secs(8));
    let world = World::new(1337);
    let meshes: Vec<_> = ChunkCoord::new(0, 0)
        .square(2)
        .map(|coord| build_chunk_mesh(&world.generate_chunk(coord), coord))
        .collect();
    group.bench_function("radius_2", |b| b.iter(|| black_box(merge_meshes(&meshes))));
    group.finish();
}

fn bench_generate_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_chunk");
    let world = World::new(1337);
    group.bench_function("normal", |b| {
        b.iter(|| black_box(world.generate_chunk(ChunkCoord::new(3, -4))))
    });
    group.finish();
}

criterion_group!(benches, bench_build_chunk_mesh, bench_merge, bench_generate_chunk);
criterion_main!(benches);
