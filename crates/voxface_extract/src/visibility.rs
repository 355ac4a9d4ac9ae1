//! Occlusion narrowing of per-voxel visible masks.

use tracing::debug;
use voxface_core::{FaceDirection, SparseVoxelIndex, VoxelVolume};

/// Hides every face that touches another voxel of the volume.
///
/// Masks are only narrowed, so running this twice is a no-op. Returns the
/// number of faces hidden by this call.
pub fn cull_hidden_faces(volume: &mut VoxelVolume, index: &SparseVoxelIndex) -> usize {
    let mut hidden = 0usize;
    for voxel in volume.voxels_mut() {
        for dir in FaceDirection::ALL {
            if voxel.visible().contains(dir) && index.contains(voxel.pos().step(dir)) {
                voxel.hide_face(dir);
                hidden += 1;
            }
        }
    }
    debug!(hidden, "culled faces between neighboring voxels");
    hidden
}
