use criterion::{criterion_group, criterion_main, Criterion, black_box};
use rand::SeedableRng;
use rand::rngs::StdRng;

use meadow::grass::scatter;
use meadow::terrain::{Footprint, HeightField, NoiseKind, NoiseParams, TerrainMesh};

fn field(kind: NoiseKind) -> HeightField {
    HeightField::new(&NoiseParams { kind, ..Default::default() }).unwrap()
}

fn bench_mesh_build_50(c: &mut Criterion) {
    let footprint = Footprint::new(20.0, 20.0, 50, 50).unwrap();
    let field = field(NoiseKind::Perlin);

    c.bench_function("mesh_build_50x50", |b| {
        b.iter(|| TerrainMesh::build(black_box(&footprint), black_box(&field)));
    });
}

fn bench_mesh_build_256(c: &mut Criterion) {
    let footprint = Footprint::new(100.0, 100.0, 256, 256).unwrap();
    let field = field(NoiseKind::Perlin);

    c.bench_function("mesh_build_256x256", |b| {
        b.iter(|| TerrainMesh::build(black_box(&footprint), black_box(&field)));
    });
}

fn bench_mesh_build_fbm(c: &mut Criterion) {
    let footprint = Footprint::new(20.0, 20.0, 50, 50).unwrap();
    let field = field(NoiseKind::Fbm);

    c.bench_function("mesh_build_50x50_fbm", |b| {
        b.iter(|| TerrainMesh::build(black_box(&footprint), black_box(&field)));
    });
}

fn bench_scatter_50k(c: &mut Criterion) {
    let footprint = Footprint::new(20.0, 20.0, 50, 50).unwrap();
    let field = field(NoiseKind::Perlin);

    c.bench_function("scatter_50000", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            scatter(black_box(&footprint), black_box(&field), 50_000, &mut rng)
        });
    });
}

criterion_group!(
    benches,
    bench_mesh_build_50,
    bench_mesh_build_256,
    bench_mesh_build_fbm,
    bench_scatter_50k,
);
criterion_main!(benches);
