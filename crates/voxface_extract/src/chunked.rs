//! Chunk-partitioned face collection.
//!
//! Each chunk is collected into its own table with no shared mutable
//! state, then the tables are merged in chunk order. Running on the rayon
//! pool changes only who does the work, never the result.

use rayon::prelude::*;
use tracing::debug;
use voxface_core::{ExtractConfig, FaceAreaTable, SparseVoxelIndex, VoxelVolume};

use crate::collector::FaceCollector;
use crate::region::{chunk_regions, Region};

/// Collects the faces of the whole volume chunk by chunk.
#[must_use]
pub fn collect_faces(
    volume: &VoxelVolume,
    index: &SparseVoxelIndex,
    config: &ExtractConfig,
) -> FaceAreaTable {
    let regions = chunk_regions(volume.voxel_size(), config.chunk_size);
    let merge = config.merge_faces;

    let tables: Vec<FaceAreaTable> = if config.parallel {
        regions
            .par_iter()
            .map_init(
                || FaceCollector::new(merge),
                |collector, region| collector.collect(volume, index, *region),
            )
            .collect()
    } else {
        let mut collector = FaceCollector::new(merge);
        regions
            .iter()
            .map(|region| collector.collect(volume, index, *region))
            .collect()
    };

    let table = merge_in_order(tables);
    debug!(
        chunks = regions.len(),
        parallel = config.parallel,
        areas = table.len(),
        faces = table.face_count(),
        "collected face areas"
    );
    table
}

/// Collects one region with a fresh collector.
#[must_use]
pub fn collect_region(
    volume: &VoxelVolume,
    index: &SparseVoxelIndex,
    region: Region,
    merge: bool,
) -> FaceAreaTable {
    FaceCollector::new(merge).collect(volume, index, region)
}

/// Folds tables into one, first table's entries first.
#[must_use]
pub fn merge_in_order(tables: impl IntoIterator<Item = FaceAreaTable>) -> FaceAreaTable {
    tables
        .into_iter()
        .fold(FaceAreaTable::new(), |mut acc, table| {
            acc.merge(table);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cull_hidden_faces;
    use voxface_core::{Color, FaceDirection, GridPos, Voxel};

    fn checker(n: i32) -> (VoxelVolume, SparseVoxelIndex) {
        let mut voxels = Vec::new();
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    if (x / 2 + y + z) % 3 != 0 {
                        voxels.push(Voxel::new(GridPos::new(x, y, z), ((x + z) % 2) as u32));
                    }
                }
            }
        }
        let palette = vec![Color::rgba(1, 2, 3, 255), Color::rgba(4, 5, 6, 255)];
        let mut volume = VoxelVolume::new(GridPos::splat(n), voxels, palette).unwrap();
        let index = SparseVoxelIndex::build(&volume).unwrap();
        cull_hidden_faces(&mut volume, &index);
        (volume, index)
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (volume, index) = checker(12);
        let config = ExtractConfig {
            chunk_size: 4,
            ..ExtractConfig::default()
        };
        let parallel = collect_faces(&volume, &index, &config);
        let serial = collect_faces(&volume, &index, &ExtractConfig { parallel: false, ..config });
        assert_eq!(parallel, serial);
        assert!(!parallel.is_empty());
    }

    #[test]
    fn test_chunking_preserves_face_count() {
        let (volume, index) = checker(10);
        let whole = collect_region(&volume, &index, Region::whole(volume.voxel_size()), true);
        for chunk_size in [1, 3, 4, 16] {
            let config = ExtractConfig {
                chunk_size,
                parallel: false,
                ..ExtractConfig::default()
            };
            let chunked = collect_faces(&volume, &index, &config);
            for dir in FaceDirection::ALL {
                let a: usize = chunked.areas(dir).iter().map(|f| f.face_count()).sum();
                let b: usize = whole.areas(dir).iter().map(|f| f.face_count()).sum();
                assert_eq!(a, b, "chunk_size {chunk_size} {dir:?}");
            }
        }
    }

    #[test]
    fn test_merge_in_order() {
        let (volume, index) = checker(8);
        let regions = chunk_regions(volume.voxel_size(), 4);
        let tables: Vec<FaceAreaTable> = regions
            .iter()
            .map(|r| collect_region(&volume, &index, *r, true))
            .collect();
        let merged = merge_in_order(tables.clone());

        for dir in FaceDirection::ALL {
            let expected: Vec<_> = tables.iter().flat_map(|t| t.areas(dir).iter().copied()).collect();
            assert_eq!(merged.areas(dir), expected.as_slice());
        }
    }
}
