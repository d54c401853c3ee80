use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Side length of the block texture atlas in pixels.
pub const BLOCK_TEXTURE_DX: usize = 1024;
/// Height of the block texture atlas in pixels.
pub const BLOCK_TEXTURE_DY: usize = 1024;
/// Size of one sprite in pixels.
pub const BLOCK_SPRITE_SIZE: usize = 16;
/// Distance between the starts of neighbouring sprites.
pub const BLOCK_SPRITE_STEP: usize = 20;
/// Position of the first sprite.
pub const BLOCK_SPRITE_OFFSET: usize = 21;
/// Sprites per atlas row.
pub const BLOCK_TEXTURE_SPRITES_PER_LINE: usize = 50;

/// Represents a single quad face of a cell.
///
/// A face is defined by four corner points (lower-left, lower-right,
/// upper-right, upper-left) as seen from outside the cell, plus the atlas
/// sprite it is textured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-right corner in world coordinates
    pub lr: Point3<i32>,
    /// Lower-left corner in world coordinates
    pub ll: Point3<i32>,
    /// Upper-right corner in world coordinates
    pub ur: Point3<i32>,
    /// Upper-left corner in world coordinates
    pub ul: Point3<i32>,
    /// Atlas sprite index
    pub tx_index: usize,
    /// Which side of the cell this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the cell whose low corner is `p`.
    pub fn new(p: Point3<i32>, block_side: BlockSide, tx_index: usize) -> Self {
        let (i, j, k) = (p.x, p.y, p.z);
        let (ll, lr, ul, ur) = match block_side {
            BlockSide::WEST => (
                Point3::new(i, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
            ),
            BlockSide::EAST => (
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
            ),
            BlockSide::DOWN => (
                Point3::new(i, j, k + 1),
                Point3::new(i, j, k),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
            ),
            BlockSide::UP => (
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i + 1, j + 1, k + 1),
            ),
            BlockSide::NORTH => (
                Point3::new(i + 1, j, k),
                Point3::new(i, j, k),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i, j + 1, k),
            ),
            BlockSide::SOUTH => (
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
            ),
        };
        Face {
            ll,
            lr,
            ul,
            ur,
            tx_index,
            block_side,
        }
    }

    /// Normalised atlas rectangle `(u0, v0, u1, v1)` of this face's sprite.
    pub fn atlas_rect(&self) -> [f32; 4] {
        let column = self.tx_index % BLOCK_TEXTURE_SPRITES_PER_LINE;
        let row = self.tx_index / BLOCK_TEXTURE_SPRITES_PER_LINE;
        let x0 = BLOCK_SPRITE_OFFSET + column * BLOCK_SPRITE_STEP;
        let y0 = BLOCK_SPRITE_OFFSET + row * BLOCK_SPRITE_STEP;
        [
            x0 as f32 / BLOCK_TEXTURE_DX as f32,
            y0 as f32 / BLOCK_TEXTURE_DY as f32,
            (x0 + BLOCK_SPRITE_SIZE) as f32 / BLOCK_TEXTURE_DX as f32,
            (y0 + BLOCK_SPRITE_SIZE) as f32 / BLOCK_TEXTURE_DY as f32,
        ]
    }

    /// Shading colour for the face, brightest on top.
    pub fn shade(&self) -> [f32; 3] {
        let light = match self.block_side {
            BlockSide::UP => 1.0,
            BlockSide::NORTH | BlockSide::SOUTH => 0.8,
            BlockSide::WEST | BlockSide::EAST => 0.7,
            BlockSide::DOWN => 0.55,
        };
        [light; 3]
    }
}
