//! # Camera State Management
//!
//! The viewpoint the visibility walker floods from: a cell position plus one
//! of the primary facings.
//!
//! ## Core Components
//! - `Direction`: a facing with its forward/left/right/up/down unit steps
//! - `CameraPosition`: position and direction, plus one-cell movement helpers

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::direction::Dir;

/// A facing together with the unit steps relative to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Direction {
    /// The primary direction being faced
    pub dir: Dir,
    /// Step straight ahead
    pub forward: Vector3<i32>,
    /// Step to the left of `forward`
    pub left: Vector3<i32>,
    /// Step to the right of `forward`
    pub right: Vector3<i32>,
    /// Step towards the top of the view
    pub up: Vector3<i32>,
    /// Step towards the bottom of the view
    pub down: Vector3<i32>,
}

impl Direction {
    pub fn new(dir: Dir) -> Self {
        let mut direction = Direction {
            dir,
            forward: Vector3::new(0, 0, 0),
            left: Vector3::new(0, 0, 0),
            right: Vector3::new(0, 0, 0),
            up: Vector3::new(0, 0, 0),
            down: Vector3::new(0, 0, 0),
        };
        direction.set(dir);
        direction
    }

    /// Re-derives every step for a new facing.
    pub fn set(&mut self, dir: Dir) {
        self.dir = dir;
        self.forward = dir.vector();
        // Looking straight up or down keeps NORTH as the top of the view.
        let (left, up) = match dir {
            Dir::NORTH => (Dir::WEST, Dir::UP),
            Dir::SOUTH => (Dir::EAST, Dir::UP),
            Dir::WEST => (Dir::SOUTH, Dir::UP),
            Dir::EAST => (Dir::NORTH, Dir::UP),
            Dir::UP => (Dir::WEST, Dir::SOUTH),
            Dir::DOWN => (Dir::WEST, Dir::NORTH),
        };
        self.left = left.vector();
        self.right = left.opposite().vector();
        self.up = up.vector();
        self.down = up.opposite().vector();
    }

    /// Rotates a quarter turn counter-clockwise seen from above.
    ///
    /// Vertical facings are left unchanged.
    pub fn turn_left(&mut self) {
        let next = match self.dir {
            Dir::NORTH => Dir::WEST,
            Dir::WEST => Dir::SOUTH,
            Dir::SOUTH => Dir::EAST,
            Dir::EAST => Dir::NORTH,
            other => other,
        };
        self.set(next);
    }

    /// Rotates a quarter turn clockwise seen from above.
    pub fn turn_right(&mut self) {
        let next = match self.dir {
            Dir::NORTH => Dir::EAST,
            Dir::EAST => Dir::SOUTH,
            Dir::SOUTH => Dir::WEST,
            Dir::WEST => Dir::NORTH,
            other => other,
        };
        self.set(next);
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::new(Dir::NORTH)
    }
}

/// Where the viewer stands and which way it faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CameraPosition {
    /// Cell containing the viewpoint
    pub pos: Point3<i32>,
    /// Current facing
    pub direction: Direction,
}

impl CameraPosition {
    pub fn new(pos: Point3<i32>, dir: Dir) -> Self {
        CameraPosition {
            pos,
            direction: Direction::new(dir),
        }
    }

    pub fn move_forward(&mut self) {
        self.pos += self.direction.forward;
    }

    pub fn move_backward(&mut self) {
        self.pos -= self.direction.forward;
    }

    pub fn move_left(&mut self) {
        self.pos += self.direction.left;
    }

    pub fn move_right(&mut self) {
        self.pos += self.direction.right;
    }

    pub fn move_up(&mut self) {
        self.pos += self.direction.up;
    }

    pub fn move_down(&mut self) {
        self.pos += self.direction.down;
    }
}

impl Default for CameraPosition {
    fn default() -> Self {
        CameraPosition::new(Point3::new(0, 0, 0), Dir::NORTH)
    }
}
