//! # Direction Module
//!
//! Direction vocabulary shared by the volume and the visibility walker.
//!
//! * [`Dir`] - the six primary (axis-aligned) directions
//! * [`DirMask`] - a 6-bit flag set, one bit per primary direction
//! * [`DirEx`] - the 26 meaningful flag combinations (6 axis, 12 edge, 8 corner)
//!
//! World axes: NORTH is -Z, SOUTH is +Z, WEST is -X, EAST is +X, UP is +Y
//! and DOWN is -Y.

use cgmath::Vector3;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxelError};

/// A set of primary direction flags.
pub type DirMask = u8;

pub const MASK_NORTH: DirMask = 1 << Dir::NORTH as u8;
pub const MASK_SOUTH: DirMask = 1 << Dir::SOUTH as u8;
pub const MASK_WEST: DirMask = 1 << Dir::WEST as u8;
pub const MASK_EAST: DirMask = 1 << Dir::EAST as u8;
pub const MASK_UP: DirMask = 1 << Dir::UP as u8;
pub const MASK_DOWN: DirMask = 1 << Dir::DOWN as u8;

/// Number of distinct flag combinations, including contradictory ones.
pub const DIR_MASK_COUNT: usize = 64;

/// One of the six axis-aligned directions.
///
/// The discriminants double as bit positions in a [`DirMask`] and as indices
/// into the per-direction delta tables of the volume.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Towards -Z
    #[default]
    NORTH = 0,
    /// Towards +Z
    SOUTH = 1,
    /// Towards -X
    WEST = 2,
    /// Towards +X
    EAST = 3,
    /// Towards +Y
    UP = 4,
    /// Towards -Y
    DOWN = 5,
}

impl Dir {
    /// All primary directions in index order.
    pub fn all() -> [Dir; 6] {
        [
            Dir::NORTH,
            Dir::SOUTH,
            Dir::WEST,
            Dir::EAST,
            Dir::UP,
            Dir::DOWN,
        ]
    }

    /// Converts a raw direction value, rejecting anything outside `0..6`.
    pub fn from_u8(value: u8) -> Result<Self> {
        <Dir as FromPrimitive>::from_u8(value).ok_or(VoxelError::InvalidDirection(value))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn mask(self) -> DirMask {
        1 << self as u8
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::NORTH => Dir::SOUTH,
            Dir::SOUTH => Dir::NORTH,
            Dir::WEST => Dir::EAST,
            Dir::EAST => Dir::WEST,
            Dir::UP => Dir::DOWN,
            Dir::DOWN => Dir::UP,
        }
    }

    /// Unit step along this direction.
    pub fn vector(self) -> Vector3<i32> {
        mask_vector(self.mask())
    }

    /// The same direction in the extended enumeration.
    pub fn to_ex(self) -> DirEx {
        DirEx::ALL[self.index()]
    }

    /// The eight ring directions used to widen a shell travelling along `self`.
    pub fn near_directions(self) -> &'static [DirEx; 8] {
        &NEAR_DIRECTIONS_FOR[self.index()]
    }
}

/// One of the 26 non-contradictory direction combinations.
///
/// The first six variants coincide with [`Dir`].
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum DirEx {
    NORTH = 0,
    SOUTH,
    WEST,
    EAST,
    UP,
    DOWN,
    WEST_UP,
    EAST_UP,
    WEST_DOWN,
    EAST_DOWN,
    NORTH_WEST,
    NORTH_EAST,
    NORTH_UP,
    NORTH_DOWN,
    NORTH_WEST_UP,
    NORTH_EAST_UP,
    NORTH_WEST_DOWN,
    NORTH_EAST_DOWN,
    SOUTH_WEST,
    SOUTH_EAST,
    SOUTH_UP,
    SOUTH_DOWN,
    SOUTH_WEST_UP,
    SOUTH_EAST_UP,
    SOUTH_WEST_DOWN,
    SOUTH_EAST_DOWN,
}

/// Number of [`DirEx`] variants.
pub const DIR_EX_COUNT: usize = 26;

/// Flag set for each [`DirEx`], indexed by discriminant.
const DIR_EX_TO_MASK: [DirMask; DIR_EX_COUNT] = [
    MASK_NORTH,
    MASK_SOUTH,
    MASK_WEST,
    MASK_EAST,
    MASK_UP,
    MASK_DOWN,
    MASK_WEST | MASK_UP,
    MASK_EAST | MASK_UP,
    MASK_WEST | MASK_DOWN,
    MASK_EAST | MASK_DOWN,
    MASK_NORTH | MASK_WEST,
    MASK_NORTH | MASK_EAST,
    MASK_NORTH | MASK_UP,
    MASK_NORTH | MASK_DOWN,
    MASK_NORTH | MASK_WEST | MASK_UP,
    MASK_NORTH | MASK_EAST | MASK_UP,
    MASK_NORTH | MASK_WEST | MASK_DOWN,
    MASK_NORTH | MASK_EAST | MASK_DOWN,
    MASK_SOUTH | MASK_WEST,
    MASK_SOUTH | MASK_EAST,
    MASK_SOUTH | MASK_UP,
    MASK_SOUTH | MASK_DOWN,
    MASK_SOUTH | MASK_WEST | MASK_UP,
    MASK_SOUTH | MASK_EAST | MASK_UP,
    MASK_SOUTH | MASK_WEST | MASK_DOWN,
    MASK_SOUTH | MASK_EAST | MASK_DOWN,
];

impl DirEx {
    /// Every variant in discriminant order.
    pub const ALL: [DirEx; DIR_EX_COUNT] = [
        DirEx::NORTH,
        DirEx::SOUTH,
        DirEx::WEST,
        DirEx::EAST,
        DirEx::UP,
        DirEx::DOWN,
        DirEx::WEST_UP,
        DirEx::EAST_UP,
        DirEx::WEST_DOWN,
        DirEx::EAST_DOWN,
        DirEx::NORTH_WEST,
        DirEx::NORTH_EAST,
        DirEx::NORTH_UP,
        DirEx::NORTH_DOWN,
        DirEx::NORTH_WEST_UP,
        DirEx::NORTH_EAST_UP,
        DirEx::NORTH_WEST_DOWN,
        DirEx::NORTH_EAST_DOWN,
        DirEx::SOUTH_WEST,
        DirEx::SOUTH_EAST,
        DirEx::SOUTH_UP,
        DirEx::SOUTH_DOWN,
        DirEx::SOUTH_WEST_UP,
        DirEx::SOUTH_EAST_UP,
        DirEx::SOUTH_WEST_DOWN,
        DirEx::SOUTH_EAST_DOWN,
    ];

    /// Converts a raw value, rejecting anything outside the 26 variants.
    pub fn from_u8(value: u8) -> Result<Self> {
        <DirEx as FromPrimitive>::from_u8(value).ok_or(VoxelError::InvalidDirection(value))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn mask(self) -> DirMask {
        DIR_EX_TO_MASK[self.index()]
    }

    /// Offset to the neighbouring cell in this direction.
    pub fn vector(self) -> Vector3<i32> {
        mask_vector(self.mask())
    }

    /// The primary direction, if this is one of the six axis directions.
    pub fn primary(self) -> Option<Dir> {
        <Dir as FromPrimitive>::from_u8(self as u8)
    }
}

/// Ring directions per primary direction, indexed by [`Dir`].
///
/// Horizontal primaries turn towards the other horizontal axis and the
/// vertical; vertical primaries turn towards both horizontal axes.
static NEAR_DIRECTIONS_FOR: [[DirEx; 8]; 6] = [
    // NORTH
    [
        DirEx::EAST,
        DirEx::UP,
        DirEx::WEST,
        DirEx::DOWN,
        DirEx::EAST_UP,
        DirEx::WEST_UP,
        DirEx::WEST_DOWN,
        DirEx::EAST_DOWN,
    ],
    // SOUTH
    [
        DirEx::EAST,
        DirEx::UP,
        DirEx::WEST,
        DirEx::DOWN,
        DirEx::EAST_UP,
        DirEx::WEST_UP,
        DirEx::WEST_DOWN,
        DirEx::EAST_DOWN,
    ],
    // WEST
    [
        DirEx::SOUTH,
        DirEx::UP,
        DirEx::NORTH,
        DirEx::DOWN,
        DirEx::SOUTH_UP,
        DirEx::NORTH_UP,
        DirEx::NORTH_DOWN,
        DirEx::SOUTH_DOWN,
    ],
    // EAST
    [
        DirEx::SOUTH,
        DirEx::UP,
        DirEx::NORTH,
        DirEx::DOWN,
        DirEx::SOUTH_UP,
        DirEx::NORTH_UP,
        DirEx::NORTH_DOWN,
        DirEx::SOUTH_DOWN,
    ],
    // UP
    [
        DirEx::EAST,
        DirEx::NORTH,
        DirEx::WEST,
        DirEx::SOUTH,
        DirEx::NORTH_EAST,
        DirEx::NORTH_WEST,
        DirEx::SOUTH_WEST,
        DirEx::SOUTH_EAST,
    ],
    // DOWN
    [
        DirEx::EAST,
        DirEx::NORTH,
        DirEx::WEST,
        DirEx::SOUTH,
        DirEx::NORTH_EAST,
        DirEx::NORTH_WEST,
        DirEx::SOUTH_WEST,
        DirEx::SOUTH_EAST,
    ],
];

/// True if the flags name a real direction: non-empty and no opposing pair.
pub fn mask_is_consistent(mask: DirMask) -> bool {
    (mask as usize) < DIR_MASK_COUNT
        && mask != 0
        && (mask & (MASK_NORTH | MASK_SOUTH)) != (MASK_NORTH | MASK_SOUTH)
        && (mask & (MASK_WEST | MASK_EAST)) != (MASK_WEST | MASK_EAST)
        && (mask & (MASK_UP | MASK_DOWN)) != (MASK_UP | MASK_DOWN)
}

/// Sum of the unit steps of every flag in `mask`.
pub fn mask_vector(mask: DirMask) -> Vector3<i32> {
    let mut v = Vector3::new(0, 0, 0);
    if mask & MASK_WEST != 0 {
        v.x -= 1;
    }
    if mask & MASK_EAST != 0 {
        v.x += 1;
    }
    if mask & MASK_NORTH != 0 {
        v.z -= 1;
    }
    if mask & MASK_SOUTH != 0 {
        v.z += 1;
    }
    if mask & MASK_UP != 0 {
        v.y += 1;
    }
    if mask & MASK_DOWN != 0 {
        v.y -= 1;
    }
    v
}
