//! Benchmarks for the core boundary structures.
//!
//! Run with: cargo bench --package voxface_core --bench core_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use voxface_core::{
    collect_vertices, Color, FaceArea, FaceAreaTable, FaceDirection, GridPos, SparseVoxelIndex,
    VertexDeduplicator, Voxel, VoxelVolume,
};

/// Hollow-ish sphere of radius `r` inside a `2r` cube.
fn sphere(r: i32) -> VoxelVolume {
    let mut voxels = Vec::new();
    for z in 0..2 * r {
        for y in 0..2 * r {
            for x in 0..2 * r {
                let (dx, dy, dz) = (x - r, y - r, z - r);
                if dx * dx + dy * dy + dz * dz <= r * r {
                    voxels.push(Voxel::new(GridPos::new(x, y, z), ((x + y + z) % 4) as u32));
                }
            }
        }
    }
    let palette = (0..4).map(|i| Color::rgba(i * 60, 128, 255 - i * 60, 255)).collect();
    VoxelVolume::new(GridPos::splat(2 * r), voxels, palette).expect("valid sphere")
}

fn benchmark_index_build(c: &mut Criterion) {
    let volume = sphere(32);
    let mut group = c.benchmark_group("sparse_index");
    group.throughput(Throughput::Elements(volume.len() as u64));
    group.bench_function("build_sphere_r32", |b| {
        b.iter(|| black_box(SparseVoxelIndex::build(black_box(&volume)).expect("build")));
    });
    let index = SparseVoxelIndex::build(&volume).expect("build");
    group.bench_function("lookup_all_r32", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for voxel in volume.voxels() {
                found += usize::from(index.try_get_index(voxel.pos()).is_some());
            }
            black_box(found)
        });
    });
    group.finish();
}

fn benchmark_vertices(c: &mut Criterion) {
    let volume = sphere(32);
    let mut group = c.benchmark_group("vertex_dedup");
    group.throughput(Throughput::Elements(volume.len() as u64));
    group.bench_function("fresh_sphere_r32", |b| {
        b.iter(|| black_box(collect_vertices(black_box(&volume))));
    });
    let mut dedup = VertexDeduplicator::new();
    group.bench_function("reused_sphere_r32", |b| {
        b.iter(|| black_box(dedup.collect(black_box(&volume))));
    });
    group.finish();
}

fn benchmark_table_merge(c: &mut Criterion) {
    let mut chunk = FaceAreaTable::new();
    for i in 0..1024 {
        for dir in FaceDirection::ALL {
            chunk.push(dir, FaceArea::unit(GridPos::new(i, 0, 0), (i % 16) as u32, 0));
        }
    }
    let remap: Vec<u32> = (0..16).rev().collect();

    c.bench_function("merge_64_chunks", |b| {
        b.iter(|| {
            let mut table = FaceAreaTable::new();
            for _ in 0..64 {
                table.merge(chunk.clone());
            }
            black_box(table)
        });
    });

    c.bench_function("remap_palette_6k_areas", |b| {
        let mut table = chunk.clone();
        b.iter(|| table.remap_palette(black_box(&remap)).expect("remap"));
    });
}

criterion_group!(
    benches,
    benchmark_index_build,
    benchmark_vertices,
    benchmark_table_merge,
);
criterion_main!(benches);
