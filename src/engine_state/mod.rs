//! # Engine State Module
//!
//! The central state container: the world, the block catalog, the walker and
//! the most recent visible-face mesh.
//!
//! ## Key Components
//!
//! * `EngineState` - owns every subsystem and drives mesh rebuilds
//! * `camera_state` - viewpoint position and facing
//! * `visibility` - the directional flood fill and its visitors
//! * `rendering` - vertex format and mesh building
//! * `voxels` - directions, the dense volume, blocks and the world
//!
//! ## Frame Flow
//!
//! 1. Input is translated into a [`PlayerAction`]
//! 2. [`EngineState::apply_actions`] moves or turns the camera
//! 3. [`EngineState::rebuild_visible_mesh`] walks the volume from the new
//!    viewpoint and swaps in the new mesh if the walk succeeded

use crate::config::EngineConfig;
use crate::error::Result;

use cgmath::Point3;
use rendering::meshing::{Mesh, MeshVisitor};
use visibility::{TraversalStats, VisibilityWalker};
use voxels::block::BlockCatalog;
use voxels::world::World;

pub mod camera_state;
pub mod rendering;
pub mod visibility;
pub mod voxels;

/// The main state container for the visibility engine
pub struct EngineState {
    /// The volume and the camera in it
    pub world: World,
    /// Cell value to block definition mapping used for meshing
    pub catalog: BlockCatalog,
    /// Walker configured from the traversal settings
    pub walker: VisibilityWalker,
    /// Current player actions
    pub player_actions: PlayerAction,
    /// Mesh from the last successful rebuild
    mesh: Option<Mesh>,
    max_vertices: usize,
}

impl EngineState {
    /// Creates an engine state with an empty world.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated engine configuration
    ///
    /// # Returns
    ///
    /// An `EngineState` whose camera is placed as the config asks, or at the
    /// origin if it gives no position
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut world = World::new(config.volume.max_distance_bits)?;
        world.fly = config.camera.fly;
        world.camera.direction.set(config.camera.facing);
        if let Some([x, y, z]) = config.camera.position {
            world.camera.pos = Point3::new(x, y, z);
        }

        Ok(Self {
            world,
            catalog: config.catalog()?,
            walker: VisibilityWalker::new(
                config.traversal.view_distance,
                config.traversal.mode,
            ),
            player_actions: PlayerAction::default(),
            mesh: None,
            max_vertices: config.mesh.max_vertices,
        })
    }

    /// The mesh built by the last successful [`Self::rebuild_visible_mesh`].
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Moves and turns the camera according to the current actions.
    ///
    /// A step that would leave the volume is ignored. A walking camera is
    /// settled onto the ground afterwards.
    pub fn apply_actions(&mut self) {
        let actions = self.player_actions;
        let camera = &mut self.world.camera;
        let before = camera.pos;

        if actions.turn_left {
            camera.direction.turn_left();
        }
        if actions.turn_right {
            camera.direction.turn_right();
        }
        if actions.move_forward {
            camera.move_forward();
        }
        if actions.move_backward {
            camera.move_backward();
        }
        if actions.move_left {
            camera.move_left();
        }
        if actions.move_right {
            camera.move_right();
        }
        if actions.move_up {
            camera.move_up();
        }
        if actions.move_down {
            camera.move_down();
        }

        let p = camera.pos;
        if !self.world.volume.contains(p.x, p.y, p.z) {
            log::debug!("Ignoring move to {:?}, outside the volume", p);
            self.world.camera.pos = before;
        }
        self.world.settle_camera();

        let p = self.world.camera.pos;
        if !self.world.volume.contains(p.x, p.y, p.z) {
            log::debug!("Settled outside the volume at {:?}, reverting", p);
            self.world.camera.pos = before;
        }
    }

    /// Walks the volume from the camera and rebuilds the visible mesh.
    ///
    /// The previous mesh is kept if the walk fails.
    pub fn rebuild_visible_mesh(&mut self) -> Result<TraversalStats> {
        let start = web_time::Instant::now();
        let mut visitor = MeshVisitor::new(&self.catalog, Mesh::with_limit(self.max_vertices));
        let stats = self
            .walker
            .walk(&self.world.volume, &self.world.camera, &mut visitor)?;
        let mesh = visitor.into_mesh();

        log::info!(
            "Visible mesh rebuilt: {} cells, {} faces, {} vertices in {:?}",
            stats.cells_reported,
            mesh.face_count(),
            mesh.vertices.len(),
            start.elapsed()
        );
        self.mesh = Some(mesh);
        Ok(stats)
    }
}

/// Represents player actions derived from input
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,

    /// Quarter turns about the vertical axis
    pub turn_left: bool,
    pub turn_right: bool,
}
