//! Chunk partitioning of the voxel grid.

use voxface_core::GridPos;

/// A half-open box of grid cells: `min <= p < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Inclusive lower corner.
    pub min: GridPos,
    /// Exclusive upper corner.
    pub max: GridPos,
}

impl Region {
    /// Creates a region.
    #[inline]
    #[must_use]
    pub const fn new(min: GridPos, max: GridPos) -> Self {
        Self { min, max }
    }

    /// The whole grid of `size`.
    #[inline]
    #[must_use]
    pub const fn whole(size: GridPos) -> Self {
        Self::new(GridPos::ZERO, size)
    }

    /// Cells per axis.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> GridPos {
        (self.max - self.min).max(GridPos::ZERO)
    }

    /// True if the region holds no cell.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extent().cell_count() == 0
    }

    /// True if `pos` lies inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        (pos - self.min).in_bounds(self.extent())
    }
}

/// Splits a grid of `size` into chunks of `chunk_size` per axis.
///
/// Chunks are listed in Z-Y-X order; edge chunks are clipped to the grid.
/// This order is the merge order of per-chunk results.
#[must_use]
pub fn chunk_regions(size: GridPos, chunk_size: i32) -> Vec<Region> {
    debug_assert!(chunk_size > 0);
    let step = chunk_size.max(1);
    let starts = |len: i32| (0..len.max(0)).step_by(step as usize);

    let mut regions = Vec::new();
    for z in starts(size.z) {
        for y in starts(size.y) {
            for x in starts(size.x) {
                let min = GridPos::new(x, y, z);
                let max = (min + GridPos::splat(step)).min(size);
                regions.push(Region::new(min, max));
            }
        }
    }
    regions
}
