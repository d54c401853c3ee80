//! # Visibility Walker
//!
//! Finds the occupied cells a viewer can see by flooding outward from the
//! camera through empty space, one primary direction at a time.
//!
//! ## Pass structure
//!
//! Each pass seeds a [`DirectionFrontier`] at the camera cell and advances
//! it shell by shell. Every shell is built in two steps:
//!
//! 1. **Forward**: each empty cell of the previous shell adds the cell ahead
//!    of it and the eight cells ahead and one step sideways
//! 2. **Spread**: each cell added by step 1 that is empty adds its eight
//!    sideways neighbours to the same shell
//!
//! Cells added by spreading never spread again, which keeps each shell
//! bounded. Occupied cells end their branch.
//!
//! ## Visited state
//!
//! Two bitsets live next to the volume instead of inside it:
//! - `reported`: cells already handed to the visitor, shared by all passes
//! - `enqueued`: cells already queued in the current pass, reset per pass
//!
//! The volume is only read, so repeated walks over the same volume are
//! independent.

use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;
use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::frontier::DirectionFrontier;
use super::visitors::CellVisitor;
use crate::engine_state::camera_state::CameraPosition;
use crate::engine_state::voxels::block::block_side::{BlockSide, FaceMask};
use crate::engine_state::voxels::block::EMPTY_CELL;
use crate::engine_state::voxels::direction::Dir;
use crate::engine_state::voxels::volume::{CellIndex, VoxelVolume};
use crate::error::Result;

/// Which primary directions a walk floods along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// All six directions
    #[default]
    AllDirections,
    /// Every direction except the one behind the camera
    CameraFacing,
    /// Only the direction the camera faces
    ForwardOnly,
}

impl TraversalMode {
    /// Pass directions for a camera facing `facing`, in pass order.
    pub fn directions(self, facing: Dir) -> Vec<Dir> {
        match self {
            TraversalMode::AllDirections => Dir::all().to_vec(),
            TraversalMode::CameraFacing => Dir::all()
                .into_iter()
                .filter(|dir| *dir != facing.opposite())
                .collect(),
            TraversalMode::ForwardOnly => vec![facing],
        }
    }
}

/// Counters collected over one walk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    pub passes: usize,
    /// Shells processed over all passes, origin shells included
    pub shells: usize,
    /// Cells pushed onto a frontier, origins excluded
    pub cells_enqueued: usize,
    /// Cells handed to the visitor
    pub cells_reported: usize,
    pub faces_reported: usize,
}

/// Directional flood fill over a [`VoxelVolume`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibilityWalker {
    view_distance: u32,
    mode: TraversalMode,
}

impl VisibilityWalker {
    /// # Arguments
    /// * `view_distance` - Maximum number of shells per pass; no cell further
    ///   than this from the camera along any axis is examined
    /// * `mode` - Which directions to flood along
    pub fn new(view_distance: u32, mode: TraversalMode) -> Self {
        VisibilityWalker {
            view_distance,
            mode,
        }
    }

    pub fn view_distance(&self) -> u32 {
        self.view_distance
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Runs every pass of the walk and reports visible cells to `visitor`.
    ///
    /// Each occupied cell is reported at most once per walk, and only if at
    /// least one of its faces is visible.
    ///
    /// # Errors
    /// `OutOfRangeCoordinate` if the camera is outside the volume. Any error
    /// returned by the visitor stops the walk and is returned unchanged.
    pub fn walk<V: CellVisitor + ?Sized>(
        &self,
        volume: &VoxelVolume,
        camera: &CameraPosition,
        visitor: &mut V,
    ) -> Result<TraversalStats> {
        let origin = volume.index_of_point(camera.pos)?;
        let mut stats = TraversalStats::default();
        let mut reported: BitVec = BitVec::repeat(false, volume.len());
        let mut enqueued: BitVec = BitVec::repeat(false, volume.len());
        let mut frontier = DirectionFrontier::new();

        for dir in self.mode.directions(camera.direction.dir) {
            let pass_camera = CameraPosition::new(camera.pos, dir);
            visitor.new_direction(&pass_camera)?;
            enqueued.fill(false);
            enqueued.set(origin.as_usize(), true);
            frontier.start(origin, dir);

            let before = stats;
            self.walk_direction(
                volume,
                &pass_camera,
                visitor,
                &mut frontier,
                &mut reported,
                &mut enqueued,
                &mut stats,
            )?;
            stats.passes += 1;
            log::debug!(
                "{:?} pass: {} shells, {} cells enqueued, {} cells reported",
                dir,
                stats.shells - before.shells,
                stats.cells_enqueued - before.cells_enqueued,
                stats.cells_reported - before.cells_reported
            );
        }
        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_direction<V: CellVisitor + ?Sized>(
        &self,
        volume: &VoxelVolume,
        camera: &CameraPosition,
        visitor: &mut V,
        frontier: &mut DirectionFrontier,
        reported: &mut BitSlice,
        enqueued: &mut BitSlice,
        stats: &mut TraversalStats,
    ) -> Result<()> {
        let dir = frontier.dir();
        loop {
            stats.shells += 1;
            for &index in frontier.open() {
                let cell = volume.get_cell_by_index(index);
                if cell == EMPTY_CELL || reported[index.as_usize()] {
                    continue;
                }
                reported.set(index.as_usize(), true);
                let position = volume.point_of(index);
                let faces = visible_faces(volume, camera.pos, index, position);
                if faces.is_empty() {
                    continue;
                }
                visitor.visit(volume, camera, position, cell, faces)?;
                stats.cells_reported += 1;
                stats.faces_reported += faces.len();
            }

            if frontier.distance() >= self.view_distance {
                break;
            }
            frontier.next_distance();

            for i in 0..frontier.closed().len() {
                let index = frontier.closed()[i];
                if volume.get_cell_by_index(index) != EMPTY_CELL {
                    continue;
                }
                let near_cells = volume.get_near_cells_for_direction(index, dir);
                for near in near_cells.into_iter().flatten() {
                    if self.try_enqueue(volume, camera.pos, enqueued, near.index) {
                        frontier.push_forward(near.index);
                        stats.cells_enqueued += 1;
                    }
                }
            }

            frontier.prepare_spreading();
            for i in 0..frontier.forward_cell_count() {
                let index = frontier.open()[i];
                if volume.get_cell_by_index(index) != EMPTY_CELL {
                    continue;
                }
                let ring = volume.get_near_cells_for_direction_no_forward(index, dir);
                // Slot 0 is the cell itself.
                for (slot, near) in ring.iter().enumerate().skip(1) {
                    let Some(near) = near else { continue };
                    if self.try_enqueue(volume, camera.pos, enqueued, near.index) {
                        frontier.push_spread(slot - 1, near.index);
                        stats.cells_enqueued += 1;
                    }
                }
            }
            frontier.merge_spreading();

            if frontier.open().is_empty() {
                break;
            }
        }
        Ok(())
    }

    /// Marks `index` as queued for this pass if it is new and within reach.
    fn try_enqueue(
        &self,
        volume: &VoxelVolume,
        viewpoint: Point3<i32>,
        enqueued: &mut BitSlice,
        index: CellIndex,
    ) -> bool {
        if enqueued[index.as_usize()] {
            return false;
        }
        let offset = volume.point_of(index) - viewpoint;
        let reach = offset
            .x
            .unsigned_abs()
            .max(offset.y.unsigned_abs())
            .max(offset.z.unsigned_abs());
        if reach > self.view_distance {
            return false;
        }
        enqueued.set(index.as_usize(), true);
        true
    }
}

/// Faces of the cell at `position` that point towards `viewpoint` and are not
/// covered by an occupied neighbour. Faces on the volume boundary count as
/// uncovered.
pub fn visible_faces(
    volume: &VoxelVolume,
    viewpoint: Point3<i32>,
    index: CellIndex,
    position: Point3<i32>,
) -> FaceMask {
    let mut faces = BlockSide::facing_sides(viewpoint, position);
    for side in faces.iter() {
        let covered = volume
            .neighbor(index, side.dir().to_ex())
            .map(|near| volume.get_cell_by_index(near) != EMPTY_CELL)
            .unwrap_or(false);
        if covered {
            faces.remove(side);
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::visibility::visitors::ProbeVisitor;
    use crate::error::VoxelError;

    fn camera_at(x: i32, y: i32, z: i32, dir: Dir) -> CameraPosition {
        CameraPosition::new(Point3::new(x, y, z), dir)
    }

    #[test]
    fn modes_select_directions() {
        assert_eq!(TraversalMode::AllDirections.directions(Dir::EAST).len(), 6);
        let facing = TraversalMode::CameraFacing.directions(Dir::EAST);
        assert_eq!(facing.len(), 5);
        assert!(!facing.contains(&Dir::WEST));
        assert_eq!(TraversalMode::ForwardOnly.directions(Dir::UP), vec![Dir::UP]);
    }

    #[test]
    fn forward_pass_covers_the_pyramid_exactly_once() {
        let volume = VoxelVolume::new(3).unwrap();
        let walker = VisibilityWalker::new(3, TraversalMode::ForwardOnly);
        let mut probe = ProbeVisitor::new();
        let stats = walker
            .walk(&volume, &camera_at(0, 0, 0, Dir::NORTH), &mut probe)
            .unwrap();
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.shells, 4);
        // 5x5 at z=-1, then 7x7 at z=-2 and z=-3
        assert_eq!(stats.cells_enqueued, 25 + 49 + 49);
        assert!(probe.visits.is_empty());
        assert_eq!(probe.directions, vec![Dir::NORTH]);
    }

    #[test]
    fn single_block_shows_only_the_facing_side() {
        let mut volume = VoxelVolume::new(3).unwrap();
        volume.set_cell(0, 0, -4, 7).unwrap();
        let walker = VisibilityWalker::new(6, TraversalMode::AllDirections);
        let mut probe = ProbeVisitor::new();
        let stats = walker
            .walk(&volume, &camera_at(0, 0, 0, Dir::NORTH), &mut probe)
            .unwrap();
        assert_eq!(probe.visits.len(), 1);
        let visit = probe.visits[0];
        assert_eq!(visit.position, Point3::new(0, 0, -4));
        assert_eq!(visit.cell, 7);
        assert_eq!(visit.faces, [BlockSide::SOUTH].into_iter().collect());
        assert_eq!(stats.faces_reported, 1);
        assert_eq!(stats.passes, 6);
    }

    #[test]
    fn covered_faces_are_dropped() {
        let mut volume = VoxelVolume::new(3).unwrap();
        volume.set_cell(2, 1, -3, 1).unwrap();
        volume.set_cell(2, 1, -2, 1).unwrap();
        let a = volume.index_of(2, 1, -3).unwrap();
        let faces = visible_faces(&volume, Point3::new(0, 0, 0), a, Point3::new(2, 1, -3));
        assert_eq!(faces, [BlockSide::WEST, BlockSide::DOWN].into_iter().collect());
    }

    #[test]
    fn cell_out_of_reach_is_not_reported() {
        let mut volume = VoxelVolume::new(3).unwrap();
        volume.set_cell(0, 0, -5, 1).unwrap();
        let walker = VisibilityWalker::new(4, TraversalMode::AllDirections);
        let mut probe = ProbeVisitor::new();
        walker
            .walk(&volume, &camera_at(0, 0, 0, Dir::NORTH), &mut probe)
            .unwrap();
        assert!(probe.visits.is_empty());
    }

    #[test]
    fn visitor_error_stops_the_walk() {
        let mut volume = VoxelVolume::new(3).unwrap();
        volume.set_cell(0, 0, -2, 1).unwrap();
        volume.set_cell(0, 0, 2, 1).unwrap();
        let walker = VisibilityWalker::new(4, TraversalMode::AllDirections);
        let mut probe = ProbeVisitor {
            fail_after: Some(0),
            ..ProbeVisitor::default()
        };
        let err = walker
            .walk(&volume, &camera_at(0, 0, 0, Dir::NORTH), &mut probe)
            .unwrap_err();
        assert!(matches!(err, VoxelError::CapacityExceeded { .. }));
        assert_eq!(probe.directions, vec![Dir::NORTH]);
    }

    #[test]
    fn no_cell_is_queued_twice_in_a_pass() {
        let mut rng = fastrand::Rng::with_seed(31);
        let mut volume = VoxelVolume::new(3).unwrap();
        for y in -8..8 {
            for z in -8..8 {
                for x in -8..8 {
                    if (x, y, z) != (0, 0, 0) && rng.f64() < 0.2 {
                        volume.set_cell(x, y, z, 1).unwrap();
                    }
                }
            }
        }
        let walker = VisibilityWalker::new(7, TraversalMode::AllDirections);
        let origin = volume.index_of(0, 0, 0).unwrap();
        let mut reported: BitVec = BitVec::repeat(false, volume.len());
        let mut enqueued: BitVec = BitVec::repeat(false, volume.len());
        let mut frontier = DirectionFrontier::new();

        for dir in Dir::all() {
            let camera = camera_at(0, 0, 0, dir);
            let mut stats = TraversalStats::default();
            enqueued.fill(false);
            enqueued.set(origin.as_usize(), true);
            frontier.start(origin, dir);
            walker
                .walk_direction(
                    &volume,
                    &camera,
                    &mut ProbeVisitor::new(),
                    &mut frontier,
                    &mut reported,
                    &mut enqueued,
                    &mut stats,
                )
                .unwrap();

            // Every push claimed a fresh bit, so pushes and distinct cells agree.
            assert!(stats.cells_enqueued > 0, "{:?}", dir);
            assert_eq!(stats.cells_enqueued, enqueued.count_ones() - 1, "{:?}", dir);

            let mut last_shells: Vec<CellIndex> = frontier.closed().to_vec();
            last_shells.extend_from_slice(frontier.open());
            let total = last_shells.len();
            last_shells.sort();
            last_shells.dedup();
            assert_eq!(last_shells.len(), total, "{:?}", dir);
        }
    }

    #[test]
    fn stats_serialize_with_field_names() {
        let stats = TraversalStats {
            passes: 6,
            cells_reported: 2,
            ..TraversalStats::default()
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["passes"], 6);
        assert_eq!(json["cells_reported"], 2);
        assert_eq!(json["faces_reported"], 0);
    }

    #[test]
    fn camera_outside_volume_is_rejected() {
        let volume = VoxelVolume::new(3).unwrap();
        let walker = VisibilityWalker::new(4, TraversalMode::AllDirections);
        let err = walker
            .walk(&volume, &camera_at(0, 9, 0, Dir::NORTH), &mut ProbeVisitor::new())
            .unwrap_err();
        assert!(matches!(err, VoxelError::OutOfRangeCoordinate { .. }));
    }
}
