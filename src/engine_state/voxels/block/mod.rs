//! # Block Module
//!
//! Cell values, block definitions and the catalog that maps one to the other.
//!
//! A cell stores a single byte. Zero is empty space; any other value is an
//! occupied cell whose appearance is looked up in a [`BlockCatalog`].

use std::borrow::Cow;

use block_side::{BlockSide, FaceMask};
use block_type::BlockType;
use cgmath::Point3;
use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::engine_state::camera_state::CameraPosition;
use crate::engine_state::rendering::meshing::{Face, Mesh};
use crate::engine_state::voxels::volume::VoxelVolume;
use crate::error::{Result, VoxelError};

pub mod block_side;
pub mod block_type;

/// The integer type stored per cell.
pub type CellValue = u8;

/// Value of an empty (air) cell.
pub const EMPTY_CELL: CellValue = 0;

/// Static description of one kind of block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDef {
    /// Cell value this definition is stored under; never zero.
    pub id: CellValue,
    /// Human-readable name, used in logs
    pub name: Cow<'static, str>,
    /// How the block is meshed
    pub block_type: BlockType,
    /// First atlas sprite used by this block
    pub tx_index: usize,
}

impl BlockDef {
    /// Atlas sprite for one face.
    pub fn texture_for(&self, side: BlockSide) -> usize {
        match self.block_type {
            BlockType::OpaqueSeparateTx => self.tx_index + side as usize,
            _ => self.tx_index,
        }
    }

    /// Appends one quad per face in `faces` for the cell at `position`.
    ///
    /// The volume and viewpoint are passed through for definitions that shade
    /// by neighbourhood; the built-in block types do not need them.
    ///
    /// # Errors
    /// `CapacityExceeded` if the mesh cannot take the new geometry. The mesh
    /// is left unchanged in that case.
    pub fn create_faces(
        &self,
        _volume: &VoxelVolume,
        _camera: &CameraPosition,
        position: Point3<i32>,
        faces: FaceMask,
        mesh: &mut Mesh,
    ) -> Result<()> {
        if !self.block_type.is_visible() || faces.is_empty() {
            return Ok(());
        }
        mesh.reserve_faces(faces.len())?;
        for side in faces.iter() {
            mesh.add_face(&Face::new(position, side, self.texture_for(side)))?;
        }
        Ok(())
    }
}

const fn builtin(
    id: CellValue,
    name: &'static str,
    block_type: BlockType,
    tx_index: usize,
) -> BlockDef {
    BlockDef {
        id,
        name: Cow::Borrowed(name),
        block_type,
        tx_index,
    }
}

/// Definitions available without any configuration, keyed by cell value.
pub static BUILTIN_BLOCKS: phf::Map<u8, BlockDef> = phf_map! {
    1u8 => builtin(1, "gray_brick", BlockType::Opaque, 0),
    2u8 => builtin(2, "brick", BlockType::Opaque, 1),
    3u8 => builtin(3, "bedrock", BlockType::Opaque, 2),
    4u8 => builtin(4, "clay", BlockType::Opaque, 3),
    5u8 => builtin(5, "cobblestone", BlockType::Opaque, 4),
    6u8 => builtin(6, "gravel", BlockType::Opaque, 5),
    7u8 => builtin(7, "red_sand", BlockType::Opaque, 6),
    8u8 => builtin(8, "sand", BlockType::Opaque, 7),
    9u8 => builtin(9, "grass", BlockType::OpaqueSeparateTx, 8),
    10u8 => builtin(10, "barrier", BlockType::Invisible, 0),
    50u8 => builtin(50, "crate", BlockType::OpaqueSeparateTx, 50),
};

/// Lookup table from cell value to [`BlockDef`].
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    defs: Vec<Option<BlockDef>>,
}

impl BlockCatalog {
    /// A catalog holding every entry of [`BUILTIN_BLOCKS`].
    pub fn builtin() -> Self {
        let mut defs = vec![None; CellValue::MAX as usize + 1];
        for (id, def) in BUILTIN_BLOCKS.entries() {
            defs[*id as usize] = Some(def.clone());
        }
        BlockCatalog { defs }
    }

    /// Builds a catalog from explicit definitions.
    ///
    /// # Errors
    /// `Configuration` if an id is zero or appears twice.
    pub fn from_defs(block_defs: impl IntoIterator<Item = BlockDef>) -> Result<Self> {
        let mut defs = vec![None; CellValue::MAX as usize + 1];
        for def in block_defs {
            if def.id == EMPTY_CELL {
                return Err(VoxelError::Configuration(format!(
                    "block '{}' uses the reserved empty id 0",
                    def.name
                )));
            }
            let slot = &mut defs[def.id as usize];
            if slot.is_some() {
                return Err(VoxelError::Configuration(format!(
                    "block id {} is defined twice",
                    def.id
                )));
            }
            *slot = Some(def);
        }
        Ok(BlockCatalog { defs })
    }

    pub fn get(&self, cell: CellValue) -> Option<&BlockDef> {
        self.defs[cell as usize].as_ref()
    }

    /// Like [`Self::get`] but reports a missing definition as an error.
    pub fn require(&self, cell: CellValue) -> Result<&BlockDef> {
        self.get(cell).ok_or(VoxelError::UnknownBlock(cell))
    }

    /// Number of defined blocks.
    pub fn len(&self) -> usize {
        self.defs.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Defined blocks in id order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDef> {
        self.defs.iter().flatten()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_keyed_by_id() {
        let catalog = BlockCatalog::builtin();
        assert_eq!(catalog.len(), BUILTIN_BLOCKS.len());
        for def in catalog.iter() {
            assert_ne!(def.id, EMPTY_CELL);
            assert_eq!(catalog.get(def.id), Some(def));
        }
        assert!(catalog.get(EMPTY_CELL).is_none());
        assert!(matches!(
            catalog.require(200),
            Err(VoxelError::UnknownBlock(200))
        ));
    }

    #[test]
    fn separate_texture_blocks_offset_by_side() {
        let grass = BlockCatalog::builtin().require(9).unwrap().clone();
        assert_eq!(grass.texture_for(BlockSide::NORTH), 8);
        assert_eq!(grass.texture_for(BlockSide::DOWN), 13);

        let brick = BlockCatalog::builtin().require(2).unwrap().clone();
        assert_eq!(brick.texture_for(BlockSide::DOWN), brick.tx_index);
    }

    #[test]
    fn from_defs_rejects_duplicates_and_zero() {
        let a = builtin(4, "a", BlockType::Opaque, 0);
        let b = builtin(4, "b", BlockType::Opaque, 1);
        assert!(BlockCatalog::from_defs(vec![a.clone(), b]).is_err());
        assert!(BlockCatalog::from_defs(vec![builtin(0, "air", BlockType::Opaque, 0)]).is_err());
        assert_eq!(BlockCatalog::from_defs(vec![a]).unwrap().len(), 1);
    }

    #[test]
    fn defs_deserialize_from_json() {
        let json = r#"{"id": 12, "name": "marble", "block_type": "opaque", "tx_index": 30}"#;
        let def: BlockDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, 12);
        assert_eq!(def.name, "marble");
        assert_eq!(def.block_type, BlockType::Opaque);
    }
}
