//! Per-direction face area sequences.

use crate::error::ExtractResult;
use crate::face_area::FaceArea;
use crate::grid::FaceDirection;
use crate::volume::lookup_remap;

/// Six ordered face area sequences, one per [`FaceDirection`].
///
/// Order inside each sequence is emission order for the triangulator and
/// is preserved by every operation here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceAreaTable {
    areas: [Vec<FaceArea>; FaceDirection::COUNT],
}

impl FaceAreaTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one area to the sequence for `dir`.
    #[inline]
    pub fn push(&mut self, dir: FaceDirection, area: FaceArea) {
        self.areas[dir.index()].push(area);
    }

    /// Areas facing `dir`, in emission order.
    #[inline]
    #[must_use]
    pub fn areas(&self, dir: FaceDirection) -> &[FaceArea] {
        &self.areas[dir.index()]
    }

    /// `(direction, areas)` in direction storage order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceDirection, &[FaceArea])> {
        FaceDirection::ALL
            .into_iter()
            .zip(self.areas.iter().map(Vec::as_slice))
    }

    /// Total number of areas over all directions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.iter().map(Vec::len).sum()
    }

    /// True if no direction holds any area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.iter().all(Vec::is_empty)
    }

    /// Total number of voxel faces covered by all areas.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.areas.iter().flatten().map(FaceArea::face_count).sum()
    }

    /// Appends `other`'s sequences after this table's, direction by direction.
    ///
    /// Pure concatenation: adjacent boxes are not coalesced.
    pub fn merge(&mut self, other: Self) {
        for (mine, theirs) in self.areas.iter_mut().zip(other.areas) {
            mine.extend(theirs);
        }
    }

    /// Replaces every area's palette with `table[palette]`.
    ///
    /// All lookups are checked before anything is written, so a failed call
    /// leaves the table untouched.
    ///
    /// # Errors
    /// [`crate::ExtractError::RemapOutOfRange`] if some palette index has no
    /// entry in `table`.
    pub fn remap_palette(&mut self, table: &[u32]) -> ExtractResult<()> {
        for area in self.areas.iter().flatten() {
            lookup_remap(table, area.palette)?;
        }
        for area in self.areas.iter_mut().flatten() {
            area.palette = table[area.palette as usize];
        }
        Ok(())
    }
}
