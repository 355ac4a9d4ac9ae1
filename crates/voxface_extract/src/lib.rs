//! # VOXFACE Extract
//!
//! Runs the full voxel-to-boundary pipeline on top of `voxface_core`:
//!
//! 1. Build the [`SparseVoxelIndex`]
//! 2. Hide faces shared by neighboring voxels ([`cull_hidden_faces`])
//! 3. Deduplicate grid-corner vertices
//! 4. Collect face areas chunk by chunk ([`collect_faces`])
//!
//! ## Example
//!
//! ```rust
//! use voxface_core::{Color, ExtractConfig, FaceDirection, GridPos, Voxel, VoxelVolume};
//!
//! let mut volume = VoxelVolume::new(
//!     GridPos::new(2, 1, 1),
//!     vec![Voxel::new(GridPos::new(0, 0, 0), 0), Voxel::new(GridPos::new(1, 0, 0), 0)],
//!     vec![Color::rgba(255, 0, 0, 255)],
//! )?;
//! let boundary = voxface_extract::extract(&mut volume, &ExtractConfig::default())?;
//! assert_eq!(boundary.vertices.len(), 12);
//! assert_eq!(boundary.faces.areas(FaceDirection::Up).len(), 1);
//! # Ok::<(), voxface_core::ExtractError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunked;
pub mod collector;
pub mod palette;
pub mod region;
pub mod visibility;

pub use chunked::{collect_faces, collect_region, merge_in_order};
pub use collector::FaceCollector;
pub use palette::{compact_palette, PaletteCompaction, UNUSED_PALETTE};
pub use region::{chunk_regions, Region};
pub use visibility::cull_hidden_faces;

use tracing::{info, info_span};
use voxface_core::{
    collect_vertices, Corner, ExtractConfig, ExtractResult, FaceArea, FaceAreaTable,
    FaceDirection, SparseVoxelIndex, VertexList, VoxelVolume,
};

/// Vertices and face areas of one volume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundary {
    /// Deduplicated grid-corner positions.
    pub vertices: VertexList,
    /// Face areas per direction.
    pub faces: FaceAreaTable,
}

impl Boundary {
    /// Vertex-list indices of the four corners of `area` on its `dir` side,
    /// in corner ordinal order.
    ///
    /// `None` if a corner is not in the vertex list, which cannot happen for
    /// areas extracted together with it.
    #[must_use]
    pub fn quad_vertex_indices(&self, dir: FaceDirection, area: &FaceArea) -> Option<[usize; 4]> {
        let [a, b, c, d] = Corner::on_side(dir);
        Some([
            self.vertices.index_of(area.vertex(a))?,
            self.vertices.index_of(area.vertex(b))?,
            self.vertices.index_of(area.vertex(c))?,
            self.vertices.index_of(area.vertex(d))?,
        ])
    }
}

/// Extracts the boundary of `volume`.
///
/// With `cull_hidden_faces` set the voxels' visible masks are narrowed in
/// place, so a second call sees the already culled volume.
///
/// # Errors
/// Fails on an invalid `config`.
pub fn extract(volume: &mut VoxelVolume, config: &ExtractConfig) -> ExtractResult<Boundary> {
    let _span = info_span!("extract", voxels = volume.len()).entered();
    config.validate()?;

    let index = SparseVoxelIndex::build(volume)?;
    if config.cull_hidden_faces {
        cull_hidden_faces(volume, &index);
    }

    let vertices = collect_vertices(volume);
    let faces = collect_faces(volume, &index, config);
    info!(
        vertices = vertices.len(),
        areas = faces.len(),
        faces = faces.face_count(),
        "extracted boundary"
    );
    Ok(Boundary { vertices, faces })
}
