//! Consumers of the cells a walk reports.
//!
//! The walker only knows the [`CellVisitor`] trait. Geometry output lives in
//! `rendering::meshing::MeshVisitor`; the two visitors here serve logging and
//! inspection.

use cgmath::Point3;

use crate::engine_state::camera_state::CameraPosition;
use crate::engine_state::voxels::block::block_side::FaceMask;
use crate::engine_state::voxels::block::CellValue;
use crate::engine_state::voxels::direction::Dir;
use crate::engine_state::voxels::volume::VoxelVolume;
use crate::error::Result;

/// Receives every visible occupied cell found by a walk.
pub trait CellVisitor {
    /// Called before each directional pass with the camera turned to face
    /// the pass direction.
    fn new_direction(&mut self, camera: &CameraPosition) -> Result<()>;

    /// Called once per reported cell with a non-empty set of visible faces.
    ///
    /// Returning an error aborts the walk.
    fn visit(
        &mut self,
        volume: &VoxelVolume,
        camera: &CameraPosition,
        position: Point3<i32>,
        cell: CellValue,
        faces: FaceMask,
    ) -> Result<()>;
}

/// Logs each reported cell at trace level and counts faces.
#[derive(Debug, Default)]
pub struct LoggingVisitor {
    pub passes: usize,
    pub cells: usize,
    pub faces: usize,
}

impl CellVisitor for LoggingVisitor {
    fn new_direction(&mut self, camera: &CameraPosition) -> Result<()> {
        self.passes += 1;
        log::trace!("pass {} from {:?}", self.passes, camera.pos);
        Ok(())
    }

    fn visit(
        &mut self,
        _volume: &VoxelVolume,
        _camera: &CameraPosition,
        position: Point3<i32>,
        cell: CellValue,
        faces: FaceMask,
    ) -> Result<()> {
        self.cells += 1;
        self.faces += faces.len();
        log::trace!(
            "cell {} at ({}, {}, {}) faces {:06b}",
            cell,
            position.x,
            position.y,
            position.z,
            faces.bits()
        );
        Ok(())
    }
}

/// One recorded [`CellVisitor::visit`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Visit {
    pub position: Point3<i32>,
    pub cell: CellValue,
    pub faces: FaceMask,
    /// Index of the pass the visit happened in, counting from zero
    pub pass: usize,
}

/// Records every call it receives, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct ProbeVisitor {
    /// Pass direction at each `new_direction` call
    pub directions: Vec<Dir>,
    pub visits: Vec<Visit>,
    /// When set, `visit` fails once this many visits have been recorded
    pub fail_after: Option<usize>,
}

impl ProbeVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit for the cell at `position`, if there was one.
    pub fn visit_at(&self, position: Point3<i32>) -> Option<&Visit> {
        self.visits.iter().find(|v| v.position == position)
    }
}

impl CellVisitor for ProbeVisitor {
    fn new_direction(&mut self, camera: &CameraPosition) -> Result<()> {
        self.directions.push(camera.direction.dir);
        Ok(())
    }

    fn visit(
        &mut self,
        _volume: &VoxelVolume,
        _camera: &CameraPosition,
        position: Point3<i32>,
        cell: CellValue,
        faces: FaceMask,
    ) -> Result<()> {
        if let Some(limit) = self.fail_after {
            if self.visits.len() >= limit {
                return Err(crate::error::VoxelError::CapacityExceeded {
                    requested: self.visits.len() + 1,
                    limit,
                });
            }
        }
        self.visits.push(Visit {
            position,
            cell,
            faces,
            pass: self.directions.len().saturating_sub(1),
        });
        Ok(())
    }
}
