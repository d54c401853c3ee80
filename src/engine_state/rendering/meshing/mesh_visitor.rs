use cgmath::Point3;

use super::Mesh;
use crate::engine_state::camera_state::CameraPosition;
use crate::engine_state::visibility::CellVisitor;
use crate::engine_state::voxels::block::block_side::FaceMask;
use crate::engine_state::voxels::block::{BlockCatalog, CellValue};
use crate::engine_state::voxels::volume::VoxelVolume;
use crate::error::Result;

/// Builds a [`Mesh`] from the cells a walk reports.
///
/// Every reported cell must have a catalog entry; an unknown cell value
/// aborts the walk with `UnknownBlock`.
#[derive(Debug)]
pub struct MeshVisitor<'a> {
    catalog: &'a BlockCatalog,
    mesh: Mesh,
}

impl<'a> MeshVisitor<'a> {
    /// Creates a visitor that appends to `mesh`.
    pub fn new(catalog: &'a BlockCatalog, mesh: Mesh) -> Self {
        MeshVisitor { catalog, mesh }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Consumes the visitor and returns the finished mesh.
    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }
}

impl CellVisitor for MeshVisitor<'_> {
    fn new_direction(&mut self, _camera: &CameraPosition) -> Result<()> {
        Ok(())
    }

    fn visit(
        &mut self,
        volume: &VoxelVolume,
        camera: &CameraPosition,
        position: Point3<i32>,
        cell: CellValue,
        faces: FaceMask,
    ) -> Result<()> {
        self.catalog
            .require(cell)?
            .create_faces(volume, camera, position, faces, &mut self.mesh)
    }
}
