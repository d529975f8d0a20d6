//! Criterion benchmarks for tile classification and model building.
//!
//! Benchmarks:
//!   - floor_type_for_sides over all 256 neighbour masks
//!   - TileGenerator::new (every model of every group)
//!   - create_model for a 64x64 block of mixed tiles
//!
//! Run with: cargo bench -p park_simulation --bench classifier_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use park_simulation::grid::TileSides;
use park_simulation::tile_generator::{floor_type_for_sides, FloorGroup, FloorType, TileGenerator};

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    group.sample_size(1000);

    group.bench_function("all_256_masks", |b| {
        b.iter(|| {
            for mask in 0..=255u8 {
                black_box(floor_type_for_sides(TileSides::from_bits_truncate(black_box(mask))));
            }
        });
    });

    group.finish();
}

fn bench_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_models");

    group.bench_function("generator_new", |b| {
        b.iter(|| black_box(TileGenerator::new(black_box(200.0))));
    });

    let generator = TileGenerator::new(200.0);
    let floors: Vec<FloorType> = (0..=255u8)
        .map(|m| floor_type_for_sides(TileSides::from_bits_truncate(m)))
        .collect();
    let tiles: Vec<(FloorGroup, FloorType)> = (0..64 * 64)
        .map(|i| {
            if i % 3 == 0 {
                (FloorGroup::BASE, FloorType::FullTile)
            } else {
                (FloorGroup::PATH, floors[i % floors.len()])
            }
        })
        .collect();

    group.bench_function("create_model_64x64", |b| {
        b.iter(|| black_box(generator.create_model(black_box(&tiles), 64, 64)));
    });

    group.finish();
}

criterion_group!(benches, bench_classifier, bench_models);
criterion_main!(benches);
