//! # Block Side Module
//!
//! The six faces of a cell and the [`FaceMask`] bitset the walker hands to
//! visitors. Faces are ordered like the primary directions, so the face
//! pointing NORTH is bit 0 and so on.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::direction::Dir;

/// One face of a cell, named after the direction its outward normal points.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face at the cell's low Z plane
    NORTH = 0,

    /// The face at the cell's high Z plane
    SOUTH = 1,

    /// The face at the cell's low X plane
    WEST = 2,

    /// The face at the cell's high X plane
    EAST = 3,

    /// The face at the cell's high Y plane
    UP = 4,

    /// The face at the cell's low Y plane
    DOWN = 5,
}

impl BlockSide {
    /// All six faces in bit order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::NORTH,
            BlockSide::SOUTH,
            BlockSide::WEST,
            BlockSide::EAST,
            BlockSide::UP,
            BlockSide::DOWN,
        ]
    }

    pub fn from_dir(dir: Dir) -> Self {
        BlockSide::all()[dir.index()]
    }

    pub fn dir(self) -> Dir {
        Dir::all()[self as usize]
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vector3<i32> {
        self.dir().vector()
    }

    /// Faces of the cell at `cell` whose outer side contains `viewpoint`.
    ///
    /// A face is camera-facing when the viewpoint lies strictly beyond the
    /// face's plane, so a viewpoint level with the cell on some axis sees
    /// neither face on that axis.
    pub fn facing_sides(viewpoint: Point3<i32>, cell: Point3<i32>) -> FaceMask {
        let mut mask = FaceMask::NONE;
        if viewpoint.z < cell.z {
            mask.insert(BlockSide::NORTH);
        }
        if viewpoint.z > cell.z {
            mask.insert(BlockSide::SOUTH);
        }
        if viewpoint.x < cell.x {
            mask.insert(BlockSide::WEST);
        }
        if viewpoint.x > cell.x {
            mask.insert(BlockSide::EAST);
        }
        if viewpoint.y > cell.y {
            mask.insert(BlockSide::UP);
        }
        if viewpoint.y < cell.y {
            mask.insert(BlockSide::DOWN);
        }
        mask
    }
}

/// Bitset over the six faces of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceMask(u8);

impl FaceMask {
    pub const NONE: FaceMask = FaceMask(0);
    pub const ALL: FaceMask = FaceMask(0b11_1111);

    /// Builds a mask from raw bits; `None` if bits above the sixth are set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(FaceMask(bits))
        } else {
            None
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, side: BlockSide) -> bool {
        self.0 & (1 << side as u8) != 0
    }

    pub fn insert(&mut self, side: BlockSide) {
        self.0 |= 1 << side as u8;
    }

    pub fn remove(&mut self, side: BlockSide) {
        self.0 &= !(1 << side as u8);
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of faces in the mask.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The faces in the mask, in bit order.
    pub fn iter(self) -> impl Iterator<Item = BlockSide> {
        BlockSide::all()
            .into_iter()
            .filter(move |side| self.contains(*side))
    }
}

impl FromIterator<BlockSide> for FaceMask {
    fn from_iter<I: IntoIterator<Item = BlockSide>>(iter: I) -> Self {
        let mut mask = FaceMask::NONE;
        for side in iter {
            mask.insert(side);
        }
        mask
    }
}
