//! Face areas and box-corner geometry.
//!
//! A [`FaceArea`] is an axis-aligned run of voxel faces sharing palette and
//! material, stored as an inclusive `min..=max` voxel box. The triangulator
//! resolves its corners with [`FaceArea::corner`].

use bytemuck::{Pod, Zeroable};

use crate::error::{ExtractError, ExtractResult};
use crate::grid::{FaceDirection, GridPos};

/// One of the 8 extreme corners of a box.
///
/// Ordinals follow the per-voxel corner order of vertex deduplication:
/// `(x,y,z)`, `(x+1,y,z)`, `(x,y+1,z)`, `(x,y,z+1)`, `(x+1,y+1,z)`,
/// `(x+1,y,z+1)`, `(x,y+1,z+1)`, `(x+1,y+1,z+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Corner {
    /// min-x, min-y, min-z
    MinMinMin = 0,
    /// max-x, min-y, min-z
    MaxMinMin = 1,
    /// min-x, max-y, min-z
    MinMaxMin = 2,
    /// min-x, min-y, max-z
    MinMinMax = 3,
    /// max-x, max-y, min-z
    MaxMaxMin = 4,
    /// max-x, min-y, max-z
    MaxMinMax = 5,
    /// min-x, max-y, max-z
    MinMaxMax = 6,
    /// max-x, max-y, max-z
    MaxMaxMax = 7,
}

/// Per-ordinal `[x, y, z]` "take max" flags.
const CORNER_SELECT: [[bool; 3]; 8] = [
    [false, false, false],
    [true, false, false],
    [false, true, false],
    [false, false, true],
    [true, true, false],
    [true, false, true],
    [false, true, true],
    [true, true, true],
];

impl Corner {
    /// Number of corners.
    pub const COUNT: usize = 8;

    /// All corners in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::MinMinMin,
        Self::MaxMinMin,
        Self::MinMaxMin,
        Self::MinMinMax,
        Self::MaxMaxMin,
        Self::MaxMinMax,
        Self::MinMaxMax,
        Self::MaxMaxMax,
    ];

    /// Ordinal (0..8).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts a raw ordinal.
    ///
    /// # Errors
    /// [`ExtractError::InvalidCorner`] for values `>= 8`.
    pub fn from_index(value: u8) -> ExtractResult<Self> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ExtractError::InvalidCorner(value))
    }

    /// `[x, y, z]` flags, true where this corner takes the max side.
    #[inline]
    #[must_use]
    pub const fn select(self) -> [bool; 3] {
        CORNER_SELECT[self as usize]
    }

    /// Unit offset of this corner from a voxel's origin.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> GridPos {
        let [x, y, z] = self.select();
        GridPos::new(x as i32, y as i32, z as i32)
    }

    /// The four corners on the `dir` side of a box, in ordinal order.
    #[must_use]
    pub fn on_side(dir: FaceDirection) -> [Self; 4] {
        let mut out = [Self::MinMinMin; 4];
        let mut n = 0;
        for corner in Self::ALL {
            if corner.select()[dir.axis()] == dir.is_positive() {
                out[n] = corner;
                n += 1;
            }
        }
        out
    }
}

/// A value per box corner, indexed by [`Corner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Corners<T>([T; Corner::COUNT]);

impl<T> Corners<T> {
    /// Wraps values given in ordinal order.
    #[inline]
    #[must_use]
    pub const fn new(values: [T; Corner::COUNT]) -> Self {
        Self(values)
    }

    /// Builds each value from its corner.
    #[must_use]
    pub fn from_fn(f: impl FnMut(Corner) -> T) -> Self {
        Self(Corner::ALL.map(f))
    }

    /// Value at `corner`.
    #[inline]
    #[must_use]
    pub fn get(&self, corner: Corner) -> &T {
        &self.0[corner.index()]
    }

    /// Replaces the value at `corner`.
    #[inline]
    pub fn set(&mut self, corner: Corner, value: T) {
        self.0[corner.index()] = value;
    }

    /// `(corner, value)` pairs in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (Corner, &T)> {
        Corner::ALL.into_iter().zip(self.0.iter())
    }

    /// Unwraps into the ordinal-ordered array.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> [T; Corner::COUNT] {
        self.0
    }
}

impl<T> std::ops::Index<Corner> for Corners<T> {
    type Output = T;
    fn index(&self, corner: Corner) -> &T {
        &self.0[corner.index()]
    }
}

impl<T> std::ops::IndexMut<Corner> for Corners<T> {
    fn index_mut(&mut self, corner: Corner) -> &mut T {
        &mut self.0[corner.index()]
    }
}

/// A rectangular run of same-palette, same-material voxel faces.
///
/// `min` and `max` are inclusive voxel coordinates; along the face normal
/// they are equal.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash)]
pub struct FaceArea {
    /// Inclusive lower corner.
    pub min: GridPos,
    /// Inclusive upper corner.
    pub max: GridPos,
    /// Palette index shared by every face in the area.
    pub palette: u32,
    /// Material index shared by every face in the area.
    pub material: u32,
}

impl FaceArea {
    /// Creates a face area.
    #[inline]
    #[must_use]
    pub fn new(min: GridPos, max: GridPos, palette: u32, material: u32) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self {
            min,
            max,
            palette,
            material,
        }
    }

    /// A single voxel face.
    #[inline]
    #[must_use]
    pub fn unit(pos: GridPos, palette: u32, material: u32) -> Self {
        Self::new(pos, pos, palette, material)
    }

    /// Extent in voxels per axis (`max - min + 1`).
    #[inline]
    #[must_use]
    pub fn size(&self) -> GridPos {
        self.max - self.min + GridPos::splat(1)
    }

    /// Number of voxel faces this area stands for.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.size().cell_count()
    }

    /// True if `pos` lies inside the inclusive box.
    #[inline]
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.min.x <= pos.x
            && pos.x <= self.max.x
            && self.min.y <= pos.y
            && pos.y <= self.max.y
            && self.min.z <= pos.z
            && pos.z <= self.max.z
    }

    /// The box corner named by `corner`: min or max per axis, never in between.
    #[inline]
    #[must_use]
    pub fn corner(&self, corner: Corner) -> GridPos {
        let [x, y, z] = corner.select();
        GridPos::new(
            if x { self.max.x } else { self.min.x },
            if y { self.max.y } else { self.min.y },
            if z { self.max.z } else { self.min.z },
        )
    }

    /// All eight corners.
    #[must_use]
    pub fn corners(&self) -> Corners<GridPos> {
        Corners::from_fn(|corner| self.corner(corner))
    }

    /// Grid-corner position of `corner` on the outer surface of the voxel
    /// box, i.e. the position a [`crate::VertexList`] stores for it.
    #[inline]
    #[must_use]
    pub fn vertex(&self, corner: Corner) -> GridPos {
        self.corner(corner) + corner.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_box_corners() {
        let area = FaceArea::new(GridPos::ZERO, GridPos::splat(1), 0, 0);
        assert_eq!(area.corner(Corner::MaxMaxMax), GridPos::new(1, 1, 1));
        assert_eq!(area.corner(Corner::MinMinMin), GridPos::new(0, 0, 0));
        assert_eq!(area.corner(Corner::MaxMinMax), GridPos::new(1, 0, 1));
    }

    #[test]
    fn test_corners_are_extremes() {
        let area = FaceArea::new(GridPos::new(2, -3, 5), GridPos::new(7, 4, 5), 1, 2);
        for (corner, pos) in area.corners().iter() {
            for axis in 0..3 {
                let v = pos.axis(axis);
                assert!(v == area.min.axis(axis) || v == area.max.axis(axis));
                let expected = if corner.select()[axis] { area.max } else { area.min };
                assert_eq!(v, expected.axis(axis));
            }
        }
    }

    #[test]
    fn test_corner_order_matches_offsets() {
        let expected = [
            (0, 0, 0),
            (1, 0, 0),
            (0, 1, 0),
            (0, 0, 1),
            (1, 1, 0),
            (1, 0, 1),
            (0, 1, 1),
            (1, 1, 1),
        ];
        for (corner, offset) in Corner::ALL.iter().zip(expected) {
            assert_eq!(corner.offset(), GridPos::from(offset));
        }
    }

    #[test]
    fn test_from_index() {
        for (i, corner) in Corner::ALL.iter().enumerate() {
            assert_eq!(Corner::from_index(i as u8), Ok(*corner));
        }
        assert_eq!(Corner::from_index(8), Err(ExtractError::InvalidCorner(8)));
    }

    #[test]
    fn test_size_and_face_count() {
        let area = FaceArea::new(GridPos::new(1, 2, 0), GridPos::new(3, 2, 4), 0, 0);
        assert_eq!(area.size(), GridPos::new(3, 1, 5));
        assert_eq!(area.face_count(), 15);
        assert!(area.contains(GridPos::new(2, 2, 2)));
        assert!(!area.contains(GridPos::new(2, 3, 2)));
        assert_eq!(FaceArea::unit(GridPos::ZERO, 0, 0).face_count(), 1);
    }

    #[test]
    fn test_on_side() {
        assert_eq!(
            Corner::on_side(FaceDirection::Right),
            [Corner::MaxMinMin, Corner::MaxMaxMin, Corner::MaxMinMax, Corner::MaxMaxMax]
        );
        assert_eq!(
            Corner::on_side(FaceDirection::Down),
            [Corner::MinMinMin, Corner::MaxMinMin, Corner::MinMinMax, Corner::MaxMinMax]
        );
        for dir in FaceDirection::ALL {
            for corner in Corner::on_side(dir) {
                assert_eq!(corner.select()[dir.axis()], dir.is_positive());
            }
        }
    }

    #[test]
    fn test_vertex_spans_outer_box() {
        let area = FaceArea::new(GridPos::new(1, 1, 1), GridPos::new(2, 1, 3), 0, 0);
        assert_eq!(area.vertex(Corner::MinMinMin), GridPos::new(1, 1, 1));
        assert_eq!(area.vertex(Corner::MaxMaxMax), GridPos::new(3, 2, 4));
        assert_eq!(area.vertex(Corner::MaxMinMin), GridPos::new(3, 1, 1));
    }

    #[test]
    fn test_corners_index() {
        let mut corners = Corners::new([0u8; 8]);
        corners[Corner::MinMaxMax] = 6;
        corners.set(Corner::MaxMinMin, 1);
        assert_eq!(*corners.get(Corner::MinMaxMax), 6);
        assert_eq!(corners.into_inner(), [0, 1, 0, 0, 0, 0, 6, 0]);
    }
}
