//! # Error Module
//!
//! A single error type shared by the volume, the visibility walker, the
//! meshing visitors and the configuration loader. Any of these errors aborts
//! the pass that produced it; callers never receive a partial visible set.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VoxelError>;

/// Everything that can go wrong while building or walking a voxel volume.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// A size or distance parameter cannot be represented.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A world coordinate lies outside the cube covered by the volume.
    #[error("coordinate ({x}, {y}, {z}) is outside the volume")]
    OutOfRangeCoordinate {
        /// X coordinate that was rejected
        x: i32,
        /// Y coordinate that was rejected
        y: i32,
        /// Z coordinate that was rejected
        z: i32,
    },

    /// A direction value does not name one of the enumerated directions.
    #[error("invalid direction value {0}")]
    InvalidDirection(u8),

    /// An output buffer would grow past its limit or could not be allocated.
    #[error("capacity exceeded: requested {requested}, limit {limit}")]
    CapacityExceeded {
        /// Number of elements the operation needed
        requested: usize,
        /// Number of elements allowed
        limit: usize,
    },

    /// The source slice handed to `put_layer` cannot hold the requested rectangle.
    #[error("layer source too short: need {needed} cells, got {actual}")]
    LayerSourceTooShort {
        /// Cells the rectangle requires
        needed: usize,
        /// Cells actually supplied
        actual: usize,
    },

    /// A cell value has no definition in the block catalog.
    #[error("no block definition for cell value {0}")]
    UnknownBlock(u8),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file is not valid JSON for `EngineConfig`.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
