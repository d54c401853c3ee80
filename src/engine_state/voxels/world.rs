//! # World Module
//!
//! This module provides the `World` struct which pairs the dense
//! [`VoxelVolume`] with the viewer standing in it.
//!
//! ## Responsibilities
//!
//! - Cell access in world coordinates, delegated to the volume
//! - Passability queries for the viewer's bounding box
//! - Ground following for a non-flying viewer
//! - Building the fixed demonstration scene used by the binary
//!
//! The world is written to only between traversals; the visibility walker
//! borrows the volume immutably for the duration of a walk.

use cgmath::{Point3, Vector3};

use crate::engine_state::camera_state::CameraPosition;
use crate::engine_state::voxels::block::{CellValue, EMPTY_CELL};
use crate::engine_state::voxels::direction::Dir;
use crate::engine_state::voxels::volume::VoxelVolume;
use crate::error::Result;

/// Offset from the camera cell to the low corner of its body box.
const BODY_OFFSET: Vector3<i32> = Vector3::new(-2, -3, -2);
/// Size of the box the camera occupies.
const BODY_SIZE: Vector3<i32> = Vector3::new(5, 4, 5);

/// A voxel volume plus the camera looking into it.
#[derive(Debug)]
pub struct World {
    /// Cell storage
    pub volume: VoxelVolume,
    /// Current viewpoint
    pub camera: CameraPosition,
    /// When false, [`World::settle_camera`] keeps the camera on the ground
    pub fly: bool,
}

impl World {
    /// Creates an empty world with a cube of `2^(max_distance_bits + 1)` cells
    /// per side and the camera at the origin facing NORTH.
    pub fn new(max_distance_bits: u32) -> Result<Self> {
        Ok(World {
            volume: VoxelVolume::new(max_distance_bits)?,
            camera: CameraPosition::default(),
            fly: false,
        })
    }

    pub fn get_cell(&self, p: Point3<i32>) -> Result<CellValue> {
        self.volume.get_cell(p.x, p.y, p.z)
    }

    pub fn set_cell(&mut self, p: Point3<i32>, value: CellValue) -> Result<()> {
        self.volume.set_cell(p.x, p.y, p.z, value)
    }

    /// Returns true if every cell of the box at `origin` with extent `size` is
    /// empty. Cells outside the volume count as blocking.
    pub fn can_pass(&self, origin: Point3<i32>, size: Vector3<i32>) -> bool {
        for y in origin.y..origin.y + size.y {
            for z in origin.z..origin.z + size.z {
                for x in origin.x..origin.x + size.x {
                    match self.volume.get_cell(x, y, z) {
                        Ok(EMPTY_CELL) => {}
                        _ => return false,
                    }
                }
            }
        }
        true
    }

    /// Moves a walking camera onto the ground below it, or up out of any
    /// blocks it is stuck in. Flying cameras are left where they are.
    ///
    /// If no height inside the volume frees the body, the camera stays where
    /// it started.
    pub fn settle_camera(&mut self) {
        if self.fly {
            return;
        }
        let start = self.camera.pos;
        let below = BODY_OFFSET - Vector3::new(0, 1, 0);
        while self.can_pass(self.camera.pos + below, BODY_SIZE) {
            self.camera.pos.y -= 1;
        }
        let top = self.volume.max_distance() - 1;
        while !self.can_pass(self.camera.pos + BODY_OFFSET, BODY_SIZE)
            && self.camera.pos.y < top
        {
            self.camera.pos.y += 1;
        }
        if !self.can_pass(self.camera.pos + BODY_OFFSET, BODY_SIZE) {
            log::debug!("No free height above {:?}, camera not moved", start);
            self.camera.pos = start;
            return;
        }
        log::debug!("Camera settled at {:?}", self.camera.pos);
    }

    /// Writes `value` into the rectangle `x0..=x1`, `z0..=z1` at height `y`,
    /// clipped to the volume.
    fn fill_rect(
        &mut self,
        y: i32,
        x0: i32,
        x1: i32,
        z0: i32,
        z1: i32,
        value: CellValue,
    ) -> Result<()> {
        let limit = self.volume.max_distance();
        let (x0, x1) = (x0.max(-limit), x1.min(limit - 1));
        let (z0, z1) = (z0.max(-limit), z1.min(limit - 1));
        if x0 > x1 || z0 > z1 || !self.volume.contains(x0, y, z0) {
            return Ok(());
        }
        let width = (x1 - x0 + 1) as usize;
        let depth = (z1 - z0 + 1) as usize;
        let slab = vec![value; width * depth];
        self.volume
            .put_layer(Point3::new(x0, y, z0), &slab, width, depth, width)
    }

    /// Sets one cell if it lies inside the volume.
    fn place(&mut self, x: i32, y: i32, z: i32, value: CellValue) -> Result<()> {
        if self.volume.contains(x, y, z) {
            self.volume.set_cell(x, y, z, value)?;
        }
        Ok(())
    }

    /// Builds the fixed demonstration scene and places the camera in it.
    ///
    /// The scene is a floor with a walled room, a roof ring, a staircase,
    /// pillars, holes in the floor and a few scattered blocks. Parts that
    /// fall outside a small volume are clipped.
    pub fn build_demo_scene(&mut self) -> Result<()> {
        self.volume.clear();

        // floor
        self.fill_rect(0, -100, 100, -100, 100, 3)?;

        // roof ring with an opening above the centre
        for x in -10i32..=10 {
            for z in -10i32..=10 {
                if x.abs() > 2 || z.abs() > 2 {
                    self.place(x, 8, z, 1)?;
                }
            }
        }

        // walls
        for y in 1..3 {
            for x in -10..=10 {
                self.place(x, y, -10, 2)?;
                self.place(x, y, 10, 2)?;
            }
        }
        for y in 1..4 {
            for z in -10..=10 {
                self.place(-11, y, z, 2)?;
                self.place(11, y, z, 2)?;
            }
        }

        // stairs
        for i in 0..10 {
            for x in 4..6 {
                self.place(x, 1 + i, 5 + i, 3)?;
                self.place(x, 1 + i, 6 + i, 3)?;
            }
        }

        // pillars
        for i in 0..5 {
            for y in [1, 2, 7] {
                self.place(-6, y, -6 + 2 * i, 50)?;
            }
            for y in [1, 7] {
                self.place(-6 + 2 * i, y, -6, 50)?;
            }
        }

        // holes in the floor
        for x in [3, 4] {
            for z in [-6, -7] {
                self.place(x, 0, z, EMPTY_CELL)?;
            }
        }

        self.place(2, 2, 0, 8)?;
        self.place(-5, 3, 5, 1)?;
        for y in 1..=3 {
            self.place(-2, y, -7, 8)?;
        }
        self.place(-20, 7, 4, 8)?;
        self.place(20, 6, 9, 8)?;
        self.place(5, 7, 15, 8)?;
        self.place(5, 7, -15, 8)?;

        self.camera = CameraPosition::new(Point3::new(0, 3, 0), Dir::NORTH);
        self.settle_camera();
        log::info!("Demo scene built, camera at {:?}", self.camera.pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_pass_treats_outside_as_blocked() {
        let world = World::new(3).unwrap();
        assert!(world.can_pass(Point3::new(-2, -2, -2), Vector3::new(4, 4, 4)));
        assert!(!world.can_pass(Point3::new(6, 0, 0), Vector3::new(4, 1, 1)));
    }

    #[test]
    fn walking_camera_lands_on_the_floor() {
        let mut world = World::new(4).unwrap();
        world.fill_rect(0, -16, 15, -16, 15, 3).unwrap();
        world.camera.pos = Point3::new(0, 10, 0);
        world.settle_camera();
        assert_eq!(world.camera.pos.y, 4);

        world.set_cell(Point3::new(1, 3, 1), 5).unwrap();
        world.settle_camera();
        assert_eq!(world.camera.pos.y, 7);
    }

    #[test]
    fn walking_camera_near_an_edge_stays_inside() {
        let mut world = World::new(3).unwrap();
        world.volume.fill_layer(-8, 3).unwrap();
        world.camera.pos = Point3::new(6, 0, 0);
        world.settle_camera();
        let p = world.camera.pos;
        assert!(world.volume.contains(p.x, p.y, p.z));
        assert_eq!(p, Point3::new(6, 0, 0));

        // Stuck inside a full column with no free height above.
        world.camera.pos = Point3::new(0, 5, 0);
        for y in -8..8 {
            world.volume.fill_layer(y, 1).unwrap();
        }
        world.settle_camera();
        assert_eq!(world.camera.pos, Point3::new(0, 5, 0));
    }

    #[test]
    fn flying_camera_stays_put() {
        let mut world = World::new(3).unwrap();
        world.fly = true;
        world.camera.pos = Point3::new(0, 5, 0);
        world.settle_camera();
        assert_eq!(world.camera.pos, Point3::new(0, 5, 0));
    }

    #[test]
    fn demo_scene_has_expected_landmarks() {
        let mut world = World::new(7).unwrap();
        world.build_demo_scene().unwrap();
        assert_eq!(world.get_cell(Point3::new(100, 0, -100)).unwrap(), 3);
        assert_eq!(world.get_cell(Point3::new(101, 0, 0)).unwrap(), EMPTY_CELL);
        assert_eq!(world.get_cell(Point3::new(3, 0, -6)).unwrap(), EMPTY_CELL);
        assert_eq!(world.get_cell(Point3::new(0, 8, 0)).unwrap(), EMPTY_CELL);
        assert_eq!(world.get_cell(Point3::new(3, 8, 0)).unwrap(), 1);
        assert_eq!(world.get_cell(Point3::new(-6, 7, 2)).unwrap(), 50);
        assert_eq!(world.get_cell(Point3::new(4, 10, 14)).unwrap(), 3);
        assert_eq!(world.camera.direction.dir, Dir::NORTH);
        assert!(world.can_pass(world.camera.pos + BODY_OFFSET, BODY_SIZE));
    }

    #[test]
    fn demo_scene_clips_to_small_volumes() {
        let mut world = World::new(3).unwrap();
        world.build_demo_scene().unwrap();
        assert_eq!(world.get_cell(Point3::new(-8, 0, 7)).unwrap(), 3);
        assert_eq!(world.get_cell(Point3::new(-6, 7, -6)).unwrap(), 50);
        assert!(world.get_cell(Point3::new(7, 8, 7)).is_err());
    }
}
