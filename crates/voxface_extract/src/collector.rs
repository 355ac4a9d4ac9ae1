//! Greedy face collection.
//!
//! Produces a [`FaceAreaTable`] for one region of a volume.
//!
//! ## Algorithm
//!
//! 1. For each of the six face directions:
//! 2. Sweep the slices of the region perpendicular to the face normal
//! 3. Build a 2D mask of visible faces keyed by (palette, material)
//! 4. Greedily grow rectangles of equal keys: width first, then height
//! 5. Emit each rectangle as a `FaceArea` and clear it from the mask

use tracing::trace;
use voxface_core::{FaceArea, FaceAreaTable, FaceDirection, GridPos, SparseVoxelIndex, VoxelVolume};

use crate::region::Region;

/// What two faces must share to be merged.
#[derive(Clone, Copy, PartialEq, Eq)]
struct FaceKey {
    palette: u32,
    material: u32,
}

/// Reusable greedy face collector.
///
/// Keeps its slice mask between calls; one collector per thread.
pub struct FaceCollector {
    /// Row-major `v * width + u` mask of the current slice.
    mask: Vec<Option<FaceKey>>,
    /// Coalesce equal neighbors; when false every face is its own area.
    merge: bool,
}

impl FaceCollector {
    /// Creates a collector. `merge` enables greedy coalescing.
    #[must_use]
    pub fn new(merge: bool) -> Self {
        Self {
            mask: Vec::new(),
            merge,
        }
    }

    /// Collects the visible faces of the voxels inside `region`.
    ///
    /// Visibility comes from each voxel's mask; run
    /// [`crate::cull_hidden_faces`] first to drop faces between neighbors.
    /// Areas never cross the region boundary. Regions and slices without an
    /// allocated index block are skipped.
    pub fn collect(
        &mut self,
        volume: &VoxelVolume,
        index: &SparseVoxelIndex,
        region: Region,
    ) -> FaceAreaTable {
        let mut table = FaceAreaTable::new();
        if region.is_empty() || !index.any_block_in(region.min, region.max) {
            return table;
        }
        for dir in FaceDirection::ALL {
            self.collect_direction(volume, index, region, dir, &mut table);
        }
        trace!(
            min = ?region.min,
            max = ?region.max,
            areas = table.len(),
            "collected region faces"
        );
        table
    }

    fn collect_direction(
        &mut self,
        volume: &VoxelVolume,
        index: &SparseVoxelIndex,
        region: Region,
        dir: FaceDirection,
        table: &mut FaceAreaTable,
    ) {
        let axis = dir.axis();
        let (u_axis, v_axis) = dir.plane_axes();
        let extent = region.extent();
        let width = dim(extent.axis(u_axis));
        let height = dim(extent.axis(v_axis));

        for d in region.min.axis(axis)..region.max.axis(axis) {
            let origin = region.min.with_axis(axis, d);
            if !index.any_block_in(origin, region.max.with_axis(axis, d + 1)) {
                continue;
            }
            self.build_mask(volume, index, dir, origin, (u_axis, v_axis), (width, height));
            self.extract(dir, origin, (u_axis, v_axis), (width, height), table);
        }
    }

    /// Fills the mask for the slice whose lowest in-plane cell is `origin`.
    fn build_mask(
        &mut self,
        volume: &VoxelVolume,
        index: &SparseVoxelIndex,
        dir: FaceDirection,
        origin: GridPos,
        (u_axis, v_axis): (usize, usize),
        (width, height): (usize, usize),
    ) {
        self.mask.clear();
        self.mask.resize(width * height, None);

        for v in 0..height {
            for u in 0..width {
                let pos = at(origin, (u_axis, v_axis), u, v);
                let Some(voxel) = index.try_get_index(pos).and_then(|i| volume.voxel(i)) else {
                    continue;
                };
                if voxel.visible().contains(dir) {
                    self.mask[v * width + u] = Some(FaceKey {
                        palette: voxel.palette(),
                        material: volume.material_at(pos),
                    });
                }
            }
        }
    }

    /// Greedily turns the mask into face areas.
    fn extract(
        &mut self,
        dir: FaceDirection,
        origin: GridPos,
        (u_axis, v_axis): (usize, usize),
        (width, height): (usize, usize),
        table: &mut FaceAreaTable,
    ) {
        for v in 0..height {
            let mut u = 0;
            while u < width {
                let Some(key) = self.mask[v * width + u] else {
                    u += 1;
                    continue;
                };

                let (w, h) = if self.merge {
                    self.grow(key, u, v, width, height)
                } else {
                    (1, 1)
                };

                let min = at(origin, (u_axis, v_axis), u, v);
                let max = at(origin, (u_axis, v_axis), u + w - 1, v + h - 1);
                table.push(dir, FaceArea::new(min, max, key.palette, key.material));

                for dv in 0..h {
                    let row = (v + dv) * width;
                    self.mask[row + u..row + u + w].fill(None);
                }
                u += w;
            }
        }
    }

    /// Largest `(width, height)` rectangle of `key` starting at `(u, v)`.
    fn grow(&self, key: FaceKey, u: usize, v: usize, width: usize, height: usize) -> (usize, usize) {
        let row_matches = |row: usize, w: usize| {
            self.mask[row * width + u..row * width + u + w]
                .iter()
                .all(|cell| *cell == Some(key))
        };

        let mut w = 1;
        while u + w < width && self.mask[v * width + u + w] == Some(key) {
            w += 1;
        }

        let mut h = 1;
        while v + h < height && row_matches(v + h, w) {
            h += 1;
        }
        (w, h)
    }
}

/// Grid position of slice cell `(u, v)`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn at(origin: GridPos, (u_axis, v_axis): (usize, usize), u: usize, v: usize) -> GridPos {
    origin
        .with_axis(u_axis, origin.axis(u_axis) + u as i32)
        .with_axis(v_axis, origin.axis(v_axis) + v as i32)
}

#[inline]
fn dim(v: i32) -> usize {
    usize::try_from(v).unwrap_or(0)
}
