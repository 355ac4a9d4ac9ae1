//! Grid coordinates and the six cardinal face directions.

use bytemuck::{Pod, Zeroable};

/// Integer grid coordinate.
///
/// Used both for voxel positions (`[0, size)`) and for corner positions
/// (`[0, size]`), and for grid dimensions themselves.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash)]
pub struct GridPos {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl GridPos {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a new grid position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    #[inline]
    #[must_use]
    pub const fn splat(v: i32) -> Self {
        Self::new(v, v, v)
    }

    /// Converts to array.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array.
    #[inline]
    #[must_use]
    pub const fn from_array(arr: [i32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Component along `axis` (0 = X, 1 = Y, 2 = Z).
    ///
    /// # Panics
    /// Panics if `axis > 2`.
    #[inline]
    #[must_use]
    pub const fn axis(self, axis: usize) -> i32 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis out of range"),
        }
    }

    /// Returns a copy with the component along `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with_axis(self, axis: usize, value: i32) -> Self {
        let mut arr = self.to_array();
        arr[axis] = value;
        Self::from_array(arr)
    }

    /// True if `0 <= self < size` on every axis.
    #[inline]
    #[must_use]
    pub const fn in_bounds(self, size: Self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.z >= 0
            && self.x < size.x
            && self.y < size.y
            && self.z < size.z
    }

    /// True if every component is non-negative.
    #[inline]
    #[must_use]
    pub const fn is_non_negative(self) -> bool {
        self.x >= 0 && self.y >= 0 && self.z >= 0
    }

    /// Componentwise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Componentwise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Number of cells in a box of this size. Negative extents count as zero.
    #[inline]
    #[must_use]
    pub fn cell_count(self) -> usize {
        let clamp = |v: i32| usize::try_from(v).unwrap_or(0);
        clamp(self.x) * clamp(self.y) * clamp(self.z)
    }

    /// Like [`GridPos::cell_count`], but `None` on a negative extent or if
    /// the product overflows `usize`.
    #[must_use]
    pub fn checked_cell_count(self) -> Option<usize> {
        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        let z = usize::try_from(self.z).ok()?;
        x.checked_mul(y)?.checked_mul(z)
    }

    /// Neighbor one step in `dir`.
    #[inline]
    #[must_use]
    pub fn step(self, dir: FaceDirection) -> Self {
        self + dir.normal()
    }
}

impl std::ops::Add for GridPos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for GridPos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[i32; 3]> for GridPos {
    fn from(arr: [i32; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<(i32, i32, i32)> for GridPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Z-Y-X linearisation of a non-negative position inside `dims`.
#[inline]
#[allow(clippy::cast_sign_loss)]
pub(crate) fn linear_index(p: GridPos, dims: GridPos) -> usize {
    debug_assert!(p.is_non_negative());
    (p.z as usize * dims.y as usize + p.y as usize) * dims.x as usize + p.x as usize
}

/// One of the six cardinal directions a voxel face can point.
///
/// Declaration order is the storage order used by every per-direction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FaceDirection {
    /// +Z
    Forward = 0,
    /// +Y
    Up = 1,
    /// +X
    Right = 2,
    /// -X
    Left = 3,
    /// -Y
    Down = 4,
    /// -Z
    Back = 5,
}

impl FaceDirection {
    /// Number of face directions.
    pub const COUNT: usize = 6;

    /// All directions in storage order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Forward,
        Self::Up,
        Self::Right,
        Self::Left,
        Self::Down,
        Self::Back,
    ];

    /// Storage index (0..6).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis the face normal lies on (0 = X, 1 = Y, 2 = Z).
    #[inline]
    #[must_use]
    pub const fn axis(self) -> usize {
        match self {
            Self::Right | Self::Left => 0,
            Self::Up | Self::Down => 1,
            Self::Forward | Self::Back => 2,
        }
    }

    /// True if the normal points along the positive axis.
    #[inline]
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Forward | Self::Up | Self::Right)
    }

    /// Unit normal.
    #[inline]
    #[must_use]
    pub const fn normal(self) -> GridPos {
        match self {
            Self::Forward => GridPos::new(0, 0, 1),
            Self::Up => GridPos::new(0, 1, 0),
            Self::Right => GridPos::new(1, 0, 0),
            Self::Left => GridPos::new(-1, 0, 0),
            Self::Down => GridPos::new(0, -1, 0),
            Self::Back => GridPos::new(0, 0, -1),
        }
    }

    /// The direction facing the other way.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Back,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Back => Self::Forward,
        }
    }

    /// The two in-plane axes `(u, v)` for faces pointing this way.
    #[inline]
    #[must_use]
    pub const fn plane_axes(self) -> (usize, usize) {
        match self.axis() {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }
}

/// Per-voxel mask of exposed faces, one bit per [`FaceDirection`].
///
/// Starts as [`VisibleFaces::ALL`]; occlusion analysis only ever clears bits.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleFaces(u8);

impl VisibleFaces {
    /// All six faces exposed.
    pub const ALL: Self = Self(0b11_1111);

    /// No face exposed.
    pub const NONE: Self = Self(0);

    /// True if the face in `dir` is exposed.
    #[inline]
    #[must_use]
    pub const fn contains(self, dir: FaceDirection) -> bool {
        self.0 & (1 << dir as u8) != 0
    }

    /// Marks the face in `dir` as hidden.
    #[inline]
    pub fn hide(&mut self, dir: FaceDirection) {
        self.0 &= !(1 << dir as u8);
    }

    /// Number of exposed faces.
    #[inline]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// True if no face is exposed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits (bit `i` = `FaceDirection::ALL[i]`).
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for VisibleFaces {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_table() {
        for (i, dir) in FaceDirection::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(dir.opposite().opposite(), *dir);
            assert_eq!(dir.normal() + dir.opposite().normal(), GridPos::ZERO);
            assert_eq!(dir.normal().axis(dir.axis()).abs(), 1);
            let (u, v) = dir.plane_axes();
            assert_ne!(u, dir.axis());
            assert_ne!(v, dir.axis());
        }
    }

    #[test]
    fn test_visible_only_narrows() {
        let mut visible = VisibleFaces::default();
        assert_eq!(visible, VisibleFaces::ALL);
        assert_eq!(visible.count(), 6);

        visible.hide(FaceDirection::Up);
        visible.hide(FaceDirection::Up);
        assert!(!visible.contains(FaceDirection::Up));
        assert!(visible.contains(FaceDirection::Down));
        assert_eq!(visible.count(), 5);

        for dir in FaceDirection::ALL {
            visible.hide(dir);
        }
        assert!(visible.is_empty());
    }

    #[test]
    fn test_bounds() {
        let size = GridPos::new(2, 1, 1);
        assert!(GridPos::new(1, 0, 0).in_bounds(size));
        assert!(!GridPos::new(2, 0, 0).in_bounds(size));
        assert!(!GridPos::new(-1, 0, 0).in_bounds(size));
        assert_eq!(size.cell_count(), 2);
        assert_eq!(GridPos::new(-3, 4, 4).cell_count(), 0);
    }

    #[test]
    fn test_checked_cell_count() {
        assert_eq!(GridPos::new(2, 3, 4).checked_cell_count(), Some(24));
        assert_eq!(GridPos::new(-1, 3, 4).checked_cell_count(), None);
        assert_eq!(GridPos::splat(i32::MAX).checked_cell_count(), None);
    }
}
