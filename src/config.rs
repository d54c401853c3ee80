//! Configuration for the voxel walker.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Files are JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine_state::rendering::meshing::DEFAULT_MAX_VERTICES;
use crate::engine_state::visibility::TraversalMode;
use crate::engine_state::voxels::block::{BlockCatalog, BlockDef};
use crate::engine_state::voxels::direction::Dir;
use crate::engine_state::voxels::volume::MAX_DISTANCE_BITS_LIMIT;
use crate::error::{Result, VoxelError};

/// Environment variable naming the config file read by [`crate::run`].
pub const CONFIG_PATH_VAR: &str = "VOXEL_WALKER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub volume: VolumeConfig,
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Replaces the built-in block catalog when present
    #[serde(default)]
    pub blocks: Option<Vec<BlockDef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeConfig {
    #[serde(default = "default_max_distance_bits")]
    pub max_distance_bits: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalConfig {
    #[serde(default = "default_view_distance")]
    pub view_distance: u32,
    #[serde(default)]
    pub mode: TraversalMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Start position; `None` uses the demo scene's own placement
    #[serde(default)]
    pub position: Option<[i32; 3]>,
    #[serde(default)]
    pub facing: Dir,
    #[serde(default)]
    pub fly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,
}

fn default_max_distance_bits() -> u32 {
    7
}

fn default_view_distance() -> u32 {
    64
}

fn default_max_vertices() -> usize {
    DEFAULT_MAX_VERTICES
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            max_distance_bits: default_max_distance_bits(),
        }
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            view_distance: default_view_distance(),
            mode: TraversalMode::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: None,
            facing: Dir::NORTH,
            fly: false,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            max_vertices: default_max_vertices(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Checks values that would make the volume or the walk meaningless.
    pub fn validate(&self) -> Result<()> {
        let bits = self.volume.max_distance_bits;
        if bits > MAX_DISTANCE_BITS_LIMIT {
            return Err(VoxelError::Configuration(format!(
                "max_distance_bits {} exceeds the limit of {}",
                bits, MAX_DISTANCE_BITS_LIMIT
            )));
        }
        let view_distance = self.traversal.view_distance;
        if view_distance == 0 {
            return Err(VoxelError::Configuration(
                "view_distance must be at least 1".to_string(),
            ));
        }
        if u64::from(view_distance) >= 1u64 << bits {
            return Err(VoxelError::Configuration(format!(
                "view_distance {} does not fit in a volume of {} cells per side",
                view_distance,
                1u64 << (bits + 1)
            )));
        }
        if self.mesh.max_vertices == 0 {
            return Err(VoxelError::Configuration(
                "mesh.max_vertices must be positive".to_string(),
            ));
        }
        if let Some([x, y, z]) = self.camera.position {
            let half = 1i64 << bits;
            if [x, y, z].iter().any(|c| i64::from(*c) < -half || i64::from(*c) >= half) {
                return Err(VoxelError::OutOfRangeCoordinate { x, y, z });
            }
        }
        self.catalog().map(|_| ())
    }

    /// The block catalog this configuration selects.
    pub fn catalog(&self) -> Result<BlockCatalog> {
        match &self.blocks {
            Some(defs) => BlockCatalog::from_defs(defs.iter().cloned()),
            None => Ok(BlockCatalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.volume.max_distance_bits, 7);
        assert_eq!(cfg.traversal.view_distance, 64);
        assert_eq!(cfg.traversal.mode, TraversalMode::AllDirections);
        assert_eq!(cfg.mesh.max_vertices, 4 * 1024 * 1024);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = EngineConfig::from_json(
            r#"{"traversal": {"view_distance": 20, "mode": "camera_facing"}, "camera": {"facing": "east", "fly": true}}"#,
        )
        .unwrap();
        assert_eq!(cfg.traversal.view_distance, 20);
        assert_eq!(cfg.traversal.mode, TraversalMode::CameraFacing);
        assert_eq!(cfg.camera.facing, Dir::EAST);
        assert!(cfg.camera.fly);
        assert_eq!(cfg.volume.max_distance_bits, 7);
    }

    #[test]
    fn view_distance_must_fit_the_volume() {
        let mut cfg = EngineConfig::default();
        cfg.volume.max_distance_bits = 4;
        cfg.traversal.view_distance = 16;
        assert!(matches!(cfg.validate(), Err(VoxelError::Configuration(_))));
        cfg.traversal.view_distance = 15;
        cfg.validate().unwrap();
        cfg.traversal.view_distance = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_json("{\"volume\": 3}"),
            Err(VoxelError::ConfigParse(_))
        ));
    }
}
