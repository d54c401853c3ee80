#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Walker
//!
//! Visible-surface extraction for dense block worlds.
//!
//! The crate stores a cubic region of block cells in one flat buffer, floods
//! the empty space around a viewpoint shell by shell along the six primary
//! directions, and reports every occupied cell that can be seen together with
//! the faces that point at the viewer. Reports go to a `CellVisitor`; the
//! bundled mesh visitor turns them into vertex and index buffers.
//!
//! ## Key Modules
//!
//! * `config` - JSON configuration with defaults for every field
//! * `engine_state` - volume, directions, blocks, camera, walker and meshing
//! * `error` - the crate-wide error type
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(e) = voxel_walker::run() {
//!         eprintln!("{}", e);
//!     }
//! }
//! ```

use cgmath::Point3;
use config::{EngineConfig, CONFIG_PATH_VAR};
use engine_state::visibility::LoggingVisitor;
use engine_state::EngineState;
use log::info;

pub mod config;
pub mod engine_state;
pub mod error;

pub use error::{Result, VoxelError};

/// Builds the demo scene, walks it once from the camera and logs the result.
///
/// The configuration is read from the file named by `VOXEL_WALKER_CONFIG`,
/// or the defaults are used when it is unset.
pub fn run() -> Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::var_os(CONFIG_PATH_VAR) {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    let mut engine = EngineState::new(&config)?;
    engine.world.build_demo_scene()?;
    engine.world.fly = config.camera.fly;
    engine.world.camera.direction.set(config.camera.facing);
    if let Some([x, y, z]) = config.camera.position {
        engine.world.camera.pos = Point3::new(x, y, z);
        engine.world.settle_camera();
    }

    let stats = engine.rebuild_visible_mesh()?;
    info!("Traversal stats: {:?}", stats);

    if log::log_enabled!(log::Level::Trace) {
        let mut visitor = LoggingVisitor::default();
        engine
            .walker
            .walk(&engine.world.volume, &engine.world.camera, &mut visitor)?;
        log::trace!(
            "Logged {} cells with {} faces over {} passes",
            visitor.cells,
            visitor.faces,
            visitor.passes
        );
    }
    Ok(())
}
