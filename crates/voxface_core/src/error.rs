//! # Extraction Error Types
//!
//! All errors that can occur while building or transforming boundary data.

use thiserror::Error;

use crate::GridPos;

/// Errors that can occur in the voxel boundary core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A grid coordinate lies outside `[0, size)` on some axis.
    #[error("coordinate ({}, {}, {}) outside grid of size ({}, {}, {})", pos.x, pos.y, pos.z, size.x, size.y, size.z)]
    CoordinateOutOfRange {
        /// The offending position.
        pos: GridPos,
        /// The grid dimensions it was checked against.
        size: GridPos,
    },

    /// Grid dimensions are negative or too large to index.
    #[error("grid size ({}, {}, {}) out of range", size.x, size.y, size.z)]
    SizeOutOfRange {
        /// The rejected dimensions.
        size: GridPos,
    },

    /// A voxel list index past the end of the list.
    #[error("voxel index {index} out of range for {len} voxels")]
    VoxelOutOfRange {
        /// The offending list index.
        index: usize,
        /// Number of voxels.
        len: usize,
    },

    /// A voxel references a color past the end of the palette.
    #[error("palette index {index} out of range for palette of {len} colors")]
    PaletteOutOfRange {
        /// The offending palette index.
        index: u32,
        /// Number of palette entries.
        len: usize,
    },

    /// A palette index has no entry in a remap table.
    #[error("palette index {index} has no entry in remap table of length {len}")]
    RemapOutOfRange {
        /// The palette index that was looked up.
        index: u32,
        /// Length of the remap table.
        len: usize,
    },

    /// A raw corner value outside the 8 named corners.
    #[error("invalid corner value: {0}")]
    InvalidCorner(u8),

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExtractError {
    /// Returns true for the out-of-range family.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::CoordinateOutOfRange { .. }
                | Self::SizeOutOfRange { .. }
                | Self::VoxelOutOfRange { .. }
                | Self::PaletteOutOfRange { .. }
                | Self::RemapOutOfRange { .. }
        )
    }
}

/// Result type for boundary operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_family() {
        let err = ExtractError::CoordinateOutOfRange {
            pos: GridPos::new(4, 0, 0),
            size: GridPos::new(4, 4, 4),
        };
        assert!(err.is_out_of_range());
        assert!(ExtractError::RemapOutOfRange { index: 3, len: 2 }.is_out_of_range());
        assert!(ExtractError::SizeOutOfRange { size: GridPos::splat(-1) }.is_out_of_range());
        assert!(ExtractError::VoxelOutOfRange { index: 2, len: 2 }.is_out_of_range());
        assert!(!ExtractError::InvalidCorner(9).is_out_of_range());
    }

    #[test]
    fn test_messages() {
        let err = ExtractError::PaletteOutOfRange { index: 7, len: 4 };
        assert_eq!(err.to_string(), "palette index 7 out of range for palette of 4 colors");

        let err = ExtractError::CoordinateOutOfRange {
            pos: GridPos::new(-1, 2, 3),
            size: GridPos::new(8, 8, 8),
        };
        assert_eq!(err.to_string(), "coordinate (-1, 2, 3) outside grid of size (8, 8, 8)");
    }
}
