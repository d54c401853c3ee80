/// Integration tests for meshing the visible set
/// These tests validate that walking a scene with the mesh visitor produces
/// one well-formed quad per reported face
use cgmath::{Point3, Vector3};
use voxel_walker::engine_state::rendering::meshing::{Mesh, MeshVisitor};
use voxel_walker::engine_state::visibility::{TraversalMode, VisibilityWalker};
use voxel_walker::engine_state::voxels::block::BlockCatalog;
use voxel_walker::engine_state::voxels::world::World;
use voxel_walker::VoxelError;

fn demo_world() -> World {
    let mut world = World::new(5).unwrap();
    world.build_demo_scene().unwrap();
    world
}

#[test]
fn demo_scene_mesh_has_a_quad_per_face() {
    let world = demo_world();
    let catalog = BlockCatalog::builtin();
    let walker = VisibilityWalker::new(30, TraversalMode::AllDirections);
    let mut visitor = MeshVisitor::new(&catalog, Mesh::new());
    let stats = walker.walk(&world.volume, &world.camera, &mut visitor).unwrap();
    let mesh = visitor.into_mesh();

    assert!(stats.cells_reported > 0);
    assert_eq!(mesh.face_count(), stats.faces_reported);
    assert_eq!(mesh.indices.len(), stats.faces_reported * 6);
    assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertices.len()));
}

#[test]
fn quads_face_the_camera() {
    let world = demo_world();
    let catalog = BlockCatalog::builtin();
    let walker = VisibilityWalker::new(30, TraversalMode::AllDirections);
    let mut visitor = MeshVisitor::new(&catalog, Mesh::new());
    walker.walk(&world.volume, &world.camera, &mut visitor).unwrap();
    let mesh = visitor.into_mesh();

    let eye = world.camera.pos;
    let eye = Vector3::new(eye.x as f32 + 0.5, eye.y as f32 + 0.5, eye.z as f32 + 0.5);
    for quad in mesh.vertices.chunks(4) {
        let corner = Vector3::from(quad[0].position);
        let normal = Vector3::from(quad[0].normal);
        let to_eye = eye - corner;
        let facing = to_eye.x * normal.x + to_eye.y * normal.y + to_eye.z * normal.z;
        assert!(facing > 0.0, "quad at {:?} faces away", quad[0].position);
    }
}

#[test]
fn floor_under_the_camera_is_meshed() {
    let mut world = World::new(4).unwrap();
    world.volume.fill_layer(-1, 3).unwrap();
    world.fly = true;
    let catalog = BlockCatalog::builtin();
    let walker = VisibilityWalker::new(4, TraversalMode::AllDirections);
    let mut visitor = MeshVisitor::new(&catalog, Mesh::new());
    let stats = walker.walk(&world.volume, &world.camera, &mut visitor).unwrap();

    // Only the UP faces of the 9x9 patch within reach are visible.
    assert_eq!(stats.cells_reported, 81);
    assert_eq!(stats.faces_reported, 81);
    let mesh = visitor.into_mesh();
    assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
}

#[test]
fn full_mesh_aborts_the_walk() {
    let mut world = World::new(4).unwrap();
    world.set_cell(Point3::new(0, 0, -2), 1).unwrap();
    world.set_cell(Point3::new(0, 0, 2), 1).unwrap();
    let catalog = BlockCatalog::builtin();
    let walker = VisibilityWalker::new(4, TraversalMode::AllDirections);
    let mut visitor = MeshVisitor::new(&catalog, Mesh::with_limit(4));
    let err = walker
        .walk(&world.volume, &world.camera, &mut visitor)
        .unwrap_err();
    assert!(matches!(err, VoxelError::CapacityExceeded { requested: 8, limit: 4 }));
}
