//! # VOXFACE Core
//!
//! Turns a voxel volume into the boundary data a mesher needs:
//! - a deduplicated list of grid-corner vertices
//! - six per-direction sequences of rectangular face areas
//!
//! ## Pipeline
//!
//! ```text
//! VoxelVolume ──► SparseVoxelIndex ──► (face collection) ──► FaceAreaTable
//!      │                                                        │
//!      └────────► VertexDeduplicator ──► VertexList     merge / remap_palette
//! ```
//!
//! ## Rules
//!
//! 1. **No global state** - every structure is owned by its caller
//! 2. **Fail fast** - out-of-range data is an error, never clamped
//! 3. **Stable order** - vertex and face-area order is deterministic
//!
//! ## Example
//!
//! ```rust
//! use voxface_core::{collect_vertices, Color, GridPos, SparseVoxelIndex, Voxel, VoxelVolume};
//!
//! let volume = VoxelVolume::new(
//!     GridPos::new(2, 1, 1),
//!     vec![Voxel::new(GridPos::new(0, 0, 0), 0), Voxel::new(GridPos::new(1, 0, 0), 0)],
//!     vec![Color::rgba(255, 0, 0, 255)],
//! )?;
//! let index = SparseVoxelIndex::build(&volume)?;
//! assert!(!index.contains(GridPos::new(2, 0, 0)));
//! assert_eq!(collect_vertices(&volume).len(), 12);
//! # Ok::<(), voxface_core::ExtractError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod face_area;
pub mod grid;
pub mod index;
pub mod table;
pub mod vertices;
pub mod volume;

pub use config::ExtractConfig;
pub use error::{ExtractError, ExtractResult};
pub use face_area::{Corner, Corners, FaceArea};
pub use grid::{FaceDirection, GridPos, VisibleFaces};
pub use index::SparseVoxelIndex;
pub use table::FaceAreaTable;
pub use vertices::{collect_vertices, VertexDeduplicator, VertexList};
pub use volume::{Color, Voxel, VoxelVolume, DEFAULT_MATERIAL, MAX_GRID_AXIS};
