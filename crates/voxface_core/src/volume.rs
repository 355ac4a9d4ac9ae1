//! Voxel volume data holder.
//!
//! A volume is handed over by an importer fully populated. Construction
//! validates every coordinate and palette reference so the passes that
//! consume it never index out of bounds.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::error::{ExtractError, ExtractResult};
use crate::grid::{FaceDirection, GridPos, VisibleFaces};

/// Largest grid extent per axis. Leaves room for block rounding in the
/// sparse index and for the `size + 1` vertex grid.
pub const MAX_GRID_AXIS: i32 = i32::MAX - 8;

/// Material assigned to voxels without an explicit entry.
pub const DEFAULT_MATERIAL: u32 = 0;

/// A palette entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255).
    pub a: u8,
}

impl Color {
    /// Creates a color from components.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates from packed little-endian RGBA (`0xAABBGGRR`).
    #[inline]
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
            a: ((packed >> 24) & 0xFF) as u8,
        }
    }
}

/// A single voxel.
///
/// Position is fixed at construction. Only the palette reference (through
/// the owning volume) and the visible mask (only narrowed) change later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voxel {
    pos: GridPos,
    palette: u32,
    visible: VisibleFaces,
}

impl Voxel {
    /// Creates a voxel with all six faces exposed.
    #[inline]
    #[must_use]
    pub const fn new(pos: GridPos, palette: u32) -> Self {
        Self {
            pos,
            palette,
            visible: VisibleFaces::ALL,
        }
    }

    /// Grid position.
    #[inline]
    #[must_use]
    pub const fn pos(&self) -> GridPos {
        self.pos
    }

    /// Palette index.
    #[inline]
    #[must_use]
    pub const fn palette(&self) -> u32 {
        self.palette
    }

    /// Currently exposed faces.
    #[inline]
    #[must_use]
    pub const fn visible(&self) -> VisibleFaces {
        self.visible
    }

    /// Marks one face as occluded.
    #[inline]
    pub fn hide_face(&mut self, dir: FaceDirection) {
        self.visible.hide(dir);
    }
}

/// A voxel model: voxels, palette colors and grid dimensions.
#[derive(Debug, Clone, Default)]
pub struct VoxelVolume {
    voxel_size: GridPos,
    voxels: Vec<Voxel>,
    palette: Vec<Color>,
    /// Sparse per-position material override; absent means [`DEFAULT_MATERIAL`].
    materials: HashMap<GridPos, u32>,
}

impl VoxelVolume {
    /// Creates a volume, validating every voxel against the grid and palette.
    ///
    /// # Errors
    /// [`ExtractError::SizeOutOfRange`] if `voxel_size` is negative or too
    /// large, [`ExtractError::CoordinateOutOfRange`] if a voxel lies outside
    /// `[0, voxel_size)`, [`ExtractError::PaletteOutOfRange`] if a voxel
    /// references a missing color.
    pub fn new(voxel_size: GridPos, voxels: Vec<Voxel>, palette: Vec<Color>) -> ExtractResult<Self> {
        check_size(voxel_size)?;
        for voxel in &voxels {
            check_in_grid(voxel.pos, voxel_size)?;
            check_palette(voxel.palette, palette.len())?;
        }
        Ok(Self {
            voxel_size,
            voxels,
            palette,
            materials: HashMap::new(),
        })
    }

    /// Grid dimensions.
    #[inline]
    #[must_use]
    pub const fn voxel_size(&self) -> GridPos {
        self.voxel_size
    }

    /// Voxels in storage order.
    #[inline]
    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Mutable voxels, for narrowing visibility.
    ///
    /// Positions and palette references cannot be changed through [`Voxel`].
    #[inline]
    pub fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    /// Voxel at list index `index`.
    #[inline]
    #[must_use]
    pub fn voxel(&self, index: usize) -> Option<&Voxel> {
        self.voxels.get(index)
    }

    /// Palette colors.
    #[inline]
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Number of voxels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// True if the volume holds no voxels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Material index at `pos`.
    #[inline]
    #[must_use]
    pub fn material_at(&self, pos: GridPos) -> u32 {
        self.materials.get(&pos).copied().unwrap_or(DEFAULT_MATERIAL)
    }

    /// Assigns a material to a grid position. Assigning
    /// [`DEFAULT_MATERIAL`] clears the override.
    ///
    /// # Errors
    /// [`ExtractError::CoordinateOutOfRange`] if `pos` lies outside the grid.
    pub fn set_material(&mut self, pos: GridPos, material: u32) -> ExtractResult<()> {
        check_in_grid(pos, self.voxel_size)?;
        if material == DEFAULT_MATERIAL {
            self.materials.remove(&pos);
        } else {
            self.materials.insert(pos, material);
        }
        Ok(())
    }

    /// Changes the palette reference of one voxel.
    ///
    /// # Errors
    /// [`ExtractError::VoxelOutOfRange`] if `index` is not a voxel list
    /// index, [`ExtractError::PaletteOutOfRange`] if `palette` is not a valid
    /// color.
    pub fn set_palette_index(&mut self, index: usize, palette: u32) -> ExtractResult<()> {
        check_palette(palette, self.palette.len())?;
        let len = self.voxels.len();
        let voxel = self
            .voxels
            .get_mut(index)
            .ok_or(ExtractError::VoxelOutOfRange { index, len })?;
        voxel.palette = palette;
        Ok(())
    }

    /// Retags every voxel through `table` and installs `palette` as the new
    /// color table. Nothing changes unless every lookup succeeds.
    ///
    /// # Errors
    /// [`ExtractError::RemapOutOfRange`] if a voxel's palette index has no
    /// entry in `table`; [`ExtractError::PaletteOutOfRange`] if a remapped
    /// index is not a color in `palette`.
    pub fn remap_palette(&mut self, table: &[u32], palette: Vec<Color>) -> ExtractResult<()> {
        for voxel in &self.voxels {
            let mapped = lookup_remap(table, voxel.palette)?;
            check_palette(mapped, palette.len())?;
        }
        for voxel in &mut self.voxels {
            voxel.palette = table[voxel.palette as usize];
        }
        self.palette = palette;
        Ok(())
    }
}

/// Fails unless every axis of `size` is in `[0, MAX_GRID_AXIS]` and the
/// `size + 1` vertex grid can be indexed.
pub(crate) fn check_size(size: GridPos) -> ExtractResult<()> {
    let axes_ok = size.is_non_negative()
        && size.x <= MAX_GRID_AXIS
        && size.y <= MAX_GRID_AXIS
        && size.z <= MAX_GRID_AXIS;
    if axes_ok && (size + GridPos::splat(1)).checked_cell_count().is_some() {
        Ok(())
    } else {
        Err(ExtractError::SizeOutOfRange { size })
    }
}

/// Fails unless `pos` lies inside `[0, size)`.
pub(crate) fn check_in_grid(pos: GridPos, size: GridPos) -> ExtractResult<()> {
    if pos.in_bounds(size) {
        Ok(())
    } else {
        Err(ExtractError::CoordinateOutOfRange { pos, size })
    }
}

fn check_palette(index: u32, len: usize) -> ExtractResult<()> {
    if (index as usize) < len {
        Ok(())
    } else {
        Err(ExtractError::PaletteOutOfRange { index, len })
    }
}

/// `table[index]`, or the out-of-range error for remap tables.
pub(crate) fn lookup_remap(table: &[u32], index: u32) -> ExtractResult<u32> {
    table
        .get(index as usize)
        .copied()
        .ok_or(ExtractError::RemapOutOfRange {
            index,
            len: table.len(),
        })
}
