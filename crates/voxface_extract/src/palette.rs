//! Palette compaction.
//!
//! Drops colors no voxel references and folds identical colors into one
//! entry. The resulting remap table can be applied to the volume and to any
//! face table collected from it.

use std::collections::HashMap;

use tracing::debug;
use voxface_core::{Color, ExtractError, ExtractResult, FaceAreaTable, VoxelVolume};

/// Remap value for palette entries that no voxel uses.
pub const UNUSED_PALETTE: u32 = u32::MAX;

/// A compacted palette and the old-to-new index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteCompaction {
    /// `remap[old]` is the new index, or [`UNUSED_PALETTE`].
    pub remap: Vec<u32>,
    /// The compacted colors.
    pub palette: Vec<Color>,
}

impl PaletteCompaction {
    /// True if compaction changes nothing.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.remap.len() == self.palette.len()
            && self
                .remap
                .iter()
                .enumerate()
                .all(|(old, &new)| new as usize == old)
    }

    /// Rewrites the volume's voxels and palette.
    ///
    /// # Errors
    /// Propagates the volume's remap errors; the volume is untouched on error.
    pub fn apply(&self, volume: &mut VoxelVolume) -> ExtractResult<()> {
        volume.remap_palette(&self.remap, self.palette.clone())
    }

    /// Rewrites the palette indices of a face table.
    ///
    /// The table must come from the compacted volume: an area whose color
    /// was dropped has no new index.
    ///
    /// # Errors
    /// [`ExtractError::RemapOutOfRange`] if an area's palette index has no
    /// entry or maps to [`UNUSED_PALETTE`]. The table is untouched on error.
    pub fn apply_to_table(&self, table: &mut FaceAreaTable) -> ExtractResult<()> {
        let dropped = table
            .iter()
            .flat_map(|(_, areas)| areas)
            .find(|area| self.remap.get(area.palette as usize) == Some(&UNUSED_PALETTE));
        if let Some(area) = dropped {
            return Err(ExtractError::RemapOutOfRange {
                index: area.palette,
                len: self.remap.len(),
            });
        }
        table.remap_palette(&self.remap)
    }
}

/// Builds the compaction for the colors `volume` actually uses.
///
/// New indices follow ascending old index order. Palette references past
/// the end of the palette cannot occur in a validated volume.
#[must_use]
pub fn compact_palette(volume: &VoxelVolume) -> PaletteCompaction {
    let old = volume.palette();
    let mut used = vec![false; old.len()];
    for voxel in volume.voxels() {
        if let Some(slot) = used.get_mut(voxel.palette() as usize) {
            *slot = true;
        }
    }

    let mut remap = vec![UNUSED_PALETTE; old.len()];
    let mut palette = Vec::new();
    let mut by_color: HashMap<Color, u32> = HashMap::new();

    for (i, &color) in old.iter().enumerate() {
        if !used[i] {
            continue;
        }
        let next = u32::try_from(palette.len()).unwrap_or(UNUSED_PALETTE);
        let new = *by_color.entry(color).or_insert_with(|| {
            palette.push(color);
            next
        });
        remap[i] = new;
    }

    debug!(before = old.len(), after = palette.len(), "compacted palette");
    PaletteCompaction { remap, palette }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxface_core::{GridPos, Voxel};

    const RED: Color = Color::rgba(255, 0, 0, 255);
    const GREEN: Color = Color::rgba(0, 255, 0, 255);
    const BLUE: Color = Color::rgba(0, 0, 255, 255);

    fn volume(palette: Vec<Color>, refs: &[u32]) -> VoxelVolume {
        let voxels = refs
            .iter()
            .enumerate()
            .map(|(x, &p)| Voxel::new(GridPos::new(x as i32, 0, 0), p))
            .collect();
        VoxelVolume::new(GridPos::new(refs.len() as i32, 1, 1), voxels, palette).unwrap()
    }

    #[test]
    fn test_unused_entries_dropped() {
        let vol = volume(vec![RED, GREEN, BLUE], &[2, 0, 2]);
        let c = compact_palette(&vol);
        assert_eq!(c.palette, vec![RED, BLUE]);
        assert_eq!(c.remap, vec![0, UNUSED_PALETTE, 1]);
        assert!(!c.is_identity());
    }

    #[test]
    fn test_duplicate_colors_folded() {
        let vol = volume(vec![GREEN, RED, GREEN], &[0, 1, 2]);
        let c = compact_palette(&vol);
        assert_eq!(c.palette, vec![GREEN, RED]);
        assert_eq!(c.remap, vec![0, 1, 0]);
    }

    #[test]
    fn test_identity() {
        let vol = volume(vec![RED, GREEN], &[1, 0]);
        assert!(compact_palette(&vol).is_identity());
    }

    #[test]
    fn test_apply_keeps_colors() {
        let mut vol = volume(vec![BLUE, RED, GREEN, RED], &[3, 2, 3]);
        let before: Vec<Color> = vol
            .voxels()
            .iter()
            .map(|v| vol.palette()[v.palette() as usize])
            .collect();

        let c = compact_palette(&vol);
        c.apply(&mut vol).unwrap();

        let after: Vec<Color> = vol
            .voxels()
            .iter()
            .map(|v| vol.palette()[v.palette() as usize])
            .collect();
        assert_eq!(before, after);
        assert_eq!(vol.palette(), &[GREEN, RED]);
    }

    #[test]
    fn test_table_with_dropped_color_rejected() {
        use voxface_core::{FaceArea, FaceDirection};

        let vol = volume(vec![RED, GREEN, BLUE], &[2, 2]);
        let c = compact_palette(&vol);

        let mut table = FaceAreaTable::new();
        table.push(FaceDirection::Up, FaceArea::unit(GridPos::ZERO, 2, 0));
        table.push(FaceDirection::Up, FaceArea::unit(GridPos::new(1, 0, 0), 0, 0));
        let before = table.clone();

        let err = c.apply_to_table(&mut table).unwrap_err();
        assert_eq!(err, ExtractError::RemapOutOfRange { index: 0, len: 3 });
        assert_eq!(table, before);

        let mut table = FaceAreaTable::new();
        table.push(FaceDirection::Up, FaceArea::unit(GridPos::ZERO, 2, 0));
        c.apply_to_table(&mut table).unwrap();
        assert_eq!(table.areas(FaceDirection::Up)[0].palette, 0);
    }

    #[test]
    fn test_empty_volume() {
        let vol = VoxelVolume::new(GridPos::splat(1), Vec::new(), vec![RED]).unwrap();
        let c = compact_palette(&vol);
        assert!(c.palette.is_empty());
        assert_eq!(c.remap, vec![UNUSED_PALETTE]);
    }
}
