//! Sparse position -> voxel index lookup.
//!
//! The grid is split into 8x8x8 blocks that are allocated on first write,
//! so a mostly empty model only pays for the blocks it touches.
//! Inside a block entries are stored in Z-Y-X order.

use std::collections::HashMap;

use tracing::debug;

use crate::error::ExtractResult;
use crate::grid::{linear_index, GridPos};
use crate::volume::{check_in_grid, check_size, VoxelVolume};

/// Block edge length in voxels.
pub const BLOCK_SIZE: i32 = 8;

/// Entries per block.
const BLOCK_VOLUME: usize = (BLOCK_SIZE * BLOCK_SIZE * BLOCK_SIZE) as usize;

/// Marks an unoccupied slot.
const EMPTY: usize = usize::MAX;

type Block = Box<[usize; BLOCK_VOLUME]>;

/// Maps grid positions to indices into a volume's voxel list.
///
/// Single owner, single writer. Rebuild it with [`SparseVoxelIndex::build`]
/// whenever the volume is replaced; use [`SparseVoxelIndex::set`] for
/// incremental edits.
#[derive(Debug, Clone, Default)]
pub struct SparseVoxelIndex {
    size: GridPos,
    /// Blocks per axis.
    blocks_per_axis: GridPos,
    blocks: HashMap<usize, Block>,
    len: usize,
}

impl SparseVoxelIndex {
    /// Creates an empty index for a grid of `size`.
    ///
    /// # Errors
    /// [`crate::ExtractError::SizeOutOfRange`] if `size` is negative or too
    /// large to index.
    pub fn new(size: GridPos) -> ExtractResult<Self> {
        check_size(size)?;
        let blocks = |v: i32| (v + BLOCK_SIZE - 1) / BLOCK_SIZE;
        Ok(Self {
            size,
            blocks_per_axis: GridPos::new(blocks(size.x), blocks(size.y), blocks(size.z)),
            blocks: HashMap::new(),
            len: 0,
        })
    }

    /// Builds the index for every voxel of `volume`.
    ///
    /// # Errors
    /// [`crate::ExtractError::CoordinateOutOfRange`] if a voxel lies outside
    /// the volume's grid.
    pub fn build(volume: &VoxelVolume) -> ExtractResult<Self> {
        let mut index = Self::new(volume.voxel_size())?;
        for (i, voxel) in volume.voxels().iter().enumerate() {
            index.set(voxel.pos(), i)?;
        }
        debug!(
            voxels = index.len,
            blocks = index.blocks.len(),
            "built sparse voxel index"
        );
        Ok(index)
    }

    /// Grid dimensions this index covers.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> GridPos {
        self.size
    }

    /// Number of recorded positions.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if nothing is recorded.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated storage blocks.
    #[inline]
    #[must_use]
    pub fn allocated_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// True if a voxel is recorded at `pos`. Positions outside the grid are
    /// never recorded.
    #[inline]
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.try_get_index(pos).is_some()
    }

    /// Voxel list index recorded at `pos`.
    ///
    /// # Panics
    /// Panics if nothing is recorded at `pos`. Check with
    /// [`SparseVoxelIndex::contains`] or use
    /// [`SparseVoxelIndex::try_get_index`].
    #[inline]
    #[must_use]
    pub fn get(&self, pos: GridPos) -> usize {
        match self.try_get_index(pos) {
            Some(index) => index,
            None => panic!("no voxel recorded at {pos:?}"),
        }
    }

    /// Voxel list index recorded at `pos`, or `None` if absent.
    #[inline]
    #[must_use]
    pub fn try_get_index(&self, pos: GridPos) -> Option<usize> {
        let (block, slot) = self.locate(pos)?;
        let value = self.blocks.get(&block)?[slot];
        (value != EMPTY).then_some(value)
    }

    /// True if an allocated block overlaps the half-open box `[min, max)`.
    ///
    /// Blocks are released once empty, so `false` means no voxel is
    /// recorded anywhere in the box.
    #[must_use]
    pub fn any_block_in(&self, min: GridPos, max: GridPos) -> bool {
        let lo = min.max(GridPos::ZERO);
        let hi = max.min(self.size);
        if hi.x <= lo.x || hi.y <= lo.y || hi.z <= lo.z || self.blocks.is_empty() {
            return false;
        }
        let first = block_of(lo);
        let last = block_of(hi - GridPos::splat(1));

        if (last - first + GridPos::splat(1)).cell_count() > self.blocks.len() {
            return self.blocks.keys().any(|&key| {
                let b = self.block_coord(key);
                b.max(first) == b && b.min(last) == b
            });
        }
        for z in first.z..=last.z {
            for y in first.y..=last.y {
                for x in first.x..=last.x {
                    let key = linear_index(GridPos::new(x, y, z), self.blocks_per_axis);
                    if self.blocks.contains_key(&key) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Records `index` at `pos`, returning the index previously recorded there.
    ///
    /// # Errors
    /// [`crate::ExtractError::CoordinateOutOfRange`] if `pos` lies outside
    /// the grid.
    pub fn set(&mut self, pos: GridPos, index: usize) -> ExtractResult<Option<usize>> {
        check_in_grid(pos, self.size)?;
        debug_assert_ne!(index, EMPTY);
        let Some((block, slot)) = self.locate(pos) else {
            return Ok(None);
        };
        let entries = self
            .blocks
            .entry(block)
            .or_insert_with(|| Box::new([EMPTY; BLOCK_VOLUME]));
        let old = std::mem::replace(&mut entries[slot], index);
        if old == EMPTY {
            self.len += 1;
            Ok(None)
        } else {
            Ok(Some(old))
        }
    }

    /// Forgets the entry at `pos`, returning it. Empty blocks are released.
    pub fn remove(&mut self, pos: GridPos) -> Option<usize> {
        let (block, slot) = self.locate(pos)?;
        let entries = self.blocks.get_mut(&block)?;
        let old = std::mem::replace(&mut entries[slot], EMPTY);
        if old == EMPTY {
            return None;
        }
        self.len -= 1;
        if entries.iter().all(|&e| e == EMPTY) {
            self.blocks.remove(&block);
        }
        Some(old)
    }

    /// Block key and slot for an in-grid position.
    #[inline]
    fn locate(&self, pos: GridPos) -> Option<(usize, usize)> {
        if !pos.in_bounds(self.size) {
            return None;
        }
        let l = GridPos::new(pos.x % BLOCK_SIZE, pos.y % BLOCK_SIZE, pos.z % BLOCK_SIZE);
        let block = linear_index(block_of(pos), self.blocks_per_axis);
        let slot = linear_index(l, GridPos::splat(BLOCK_SIZE));
        Some((block, slot))
    }

    /// Inverse of the block key.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn block_coord(&self, key: usize) -> GridPos {
        let bx = self.blocks_per_axis.x as usize;
        let by = self.blocks_per_axis.y as usize;
        GridPos::new((key % bx) as i32, (key / bx % by) as i32, (key / (bx * by)) as i32)
    }
}

/// Block coordinate of a non-negative position.
#[inline]
fn block_of(pos: GridPos) -> GridPos {
    GridPos::new(pos.x / BLOCK_SIZE, pos.y / BLOCK_SIZE, pos.z / BLOCK_SIZE)
}
