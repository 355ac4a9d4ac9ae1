//! Grid-corner deduplication.
//!
//! Walks the voxel list in storage order and emits each voxel corner the
//! first time it is seen. Corner positions reach `voxel_size` on each axis,
//! so the seen table is one larger than the grid per axis.

use std::collections::HashMap;

use bitvec::prelude::*;
use tracing::{debug, warn};

use crate::face_area::Corner;
use crate::grid::{linear_index, GridPos};
use crate::volume::VoxelVolume;

/// Unique corner positions in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexList {
    positions: Vec<GridPos>,
    lookup: HashMap<GridPos, usize>,
}

impl VertexList {
    /// Positions in first-seen order.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    /// Number of unique vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if no vertex was collected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of `pos` in [`VertexList::positions`].
    #[inline]
    #[must_use]
    pub fn index_of(&self, pos: GridPos) -> Option<usize> {
        self.lookup.get(&pos).copied()
    }

    /// Consumes the list, returning the positions.
    #[must_use]
    pub fn into_positions(self) -> Vec<GridPos> {
        self.positions
    }

    fn push(&mut self, pos: GridPos) {
        self.lookup.insert(pos, self.positions.len());
        self.positions.push(pos);
    }
}

/// Reusable corner deduplicator.
///
/// Keeps its seen table between calls so repeated collection over volumes
/// of similar size does not reallocate.
#[derive(Debug, Default)]
pub struct VertexDeduplicator {
    seen: BitVec,
}

impl VertexDeduplicator {
    /// Creates a deduplicator with an empty seen table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the unique corners of every voxel in `volume`.
    ///
    /// Corners with a negative coordinate, or past `voxel_size`, are skipped.
    /// Neither can occur for a validated volume.
    pub fn collect(&mut self, volume: &VoxelVolume) -> VertexList {
        let dims = volume.voxel_size() + GridPos::splat(1);
        self.seen.clear();
        self.seen.resize(dims.cell_count(), false);

        let mut list = VertexList::default();
        let mut rejected = 0usize;

        for voxel in volume.voxels() {
            for corner in Corner::ALL {
                let pos = voxel.pos() + corner.offset();
                if !pos.in_bounds(dims) {
                    rejected += 1;
                    continue;
                }
                if !self.seen.replace(linear_index(pos, dims), true) {
                    list.push(pos);
                }
            }
        }

        if rejected > 0 {
            warn!(rejected, "skipped corners outside the vertex grid");
        }
        debug!(
            voxels = volume.len(),
            vertices = list.len(),
            "collected unique vertices"
        );
        list
    }
}

/// Collects the unique corners of every voxel in `volume`.
#[must_use]
pub fn collect_vertices(volume: &VoxelVolume) -> VertexList {
    VertexDeduplicator::new().collect(volume)
}
