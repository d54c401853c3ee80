/// Integration tests for the dense volume
/// These tests validate addressing, layer writes and the neighbour tables
use cgmath::Point3;
use voxel_walker::engine_state::voxels::direction::{Dir, DirEx};
use voxel_walker::engine_state::voxels::volume::VoxelVolume;
use voxel_walker::VoxelError;

const BITS: u32 = 3;

fn random_volume(seed: u64) -> VoxelVolume {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut volume = VoxelVolume::new(BITS).unwrap();
    let m = volume.max_distance();
    for y in -m..m {
        for z in -m..m {
            for x in -m..m {
                if rng.f64() < 0.3 {
                    volume.set_cell(x, y, z, rng.u8(1..=60)).unwrap();
                }
            }
        }
    }
    volume
}

#[test]
fn forward_near_cell_matches_direct_read_everywhere() {
    let volume = random_volume(11);
    let m = volume.max_distance();
    for y in -m..m {
        for z in -m..m {
            for x in -m..m {
                let o = Point3::new(x, y, z);
                let index = volume.index_of_point(o).unwrap();
                for dir in Dir::all() {
                    let target = o + dir.vector();
                    let near = volume.get_near_cells_for_direction(index, dir)[0];
                    if volume.contains(target.x, target.y, target.z) {
                        let near = near.unwrap();
                        let direct = volume.get_cell(target.x, target.y, target.z).unwrap();
                        assert_eq!(near.cell, direct);
                        assert_eq!(volume.point_of(near.index), target);
                        assert_eq!(near.dir, dir);
                    } else {
                        assert!(near.is_none(), "{:?} from {:?} left the cube", dir, o);
                    }
                }
            }
        }
    }
}

#[test]
fn ring_cells_match_coordinate_offsets() {
    let volume = random_volume(12);
    let mut rng = fastrand::Rng::with_seed(5);
    let m = volume.max_distance();
    for _ in 0..500 {
        let o = Point3::new(rng.i32(-m..m), rng.i32(-m..m), rng.i32(-m..m));
        let index = volume.index_of_point(o).unwrap();
        for dir in Dir::all() {
            let forward = volume.get_near_cells_for_direction(index, dir);
            let lateral = volume.get_near_cells_for_direction_no_forward(index, dir);
            assert_eq!(lateral[0].map(|n| n.index), Some(index));
            for (i, ring) in dir.near_directions().iter().enumerate() {
                let side = o + ring.vector();
                let ahead = side + dir.vector();
                assert_eq!(
                    lateral[i + 1].map(|n| volume.point_of(n.index)),
                    volume.contains(side.x, side.y, side.z).then_some(side)
                );
                assert_eq!(
                    forward[i + 1].map(|n| volume.point_of(n.index)),
                    volume.contains(ahead.x, ahead.y, ahead.z).then_some(ahead)
                );
            }
        }
    }
}

#[test]
fn interior_neighbors_follow_extended_deltas() {
    let volume = VoxelVolume::new(BITS).unwrap();
    let o = Point3::new(1, -2, 3);
    let index = volume.index_of_point(o).unwrap();
    for ex in DirEx::ALL {
        let expected = volume.index_of_point(o + ex.vector()).unwrap();
        assert_eq!(volume.neighbor(index, ex), Some(expected));
        assert_eq!(
            expected.as_usize() as isize - index.as_usize() as isize,
            volume.direction_ex_delta(ex)
        );
        assert_eq!(volume.direction_delta(ex.mask()), Some(volume.direction_ex_delta(ex)));
    }
}

#[test]
fn put_layer_round_trips_and_leaves_the_rest_alone() {
    let mut volume = random_volume(13);
    let before: Vec<u8> = (-8..8)
        .flat_map(|z| (-8..8).map(move |x| (x, z)))
        .map(|(x, z)| volume.get_cell(x, 2, z).unwrap())
        .collect();

    let (width, depth, stride) = (5usize, 3usize, 7usize);
    let source: Vec<u8> = (0..(depth * stride) as u8).map(|v| v + 100).collect();
    volume
        .put_layer(Point3::new(-2, 2, 4), &source, width, depth, stride)
        .unwrap();

    for z in -8..8 {
        for x in -8..8 {
            let value = volume.get_cell(x, 2, z).unwrap();
            let (dx, dz) = (x + 2, z - 4);
            if (0..width as i32).contains(&dx) && (0..depth as i32).contains(&dz) {
                assert_eq!(value, source[dz as usize * stride + dx as usize]);
            } else {
                let flat = ((z + 8) * 16 + (x + 8)) as usize;
                assert_eq!(value, before[flat], "({}, {}) changed", x, z);
            }
        }
    }
}

#[test]
fn put_layer_rejects_bad_sources_and_rectangles() {
    let mut volume = VoxelVolume::new(BITS).unwrap();
    let source = [1u8; 12];
    assert!(matches!(
        volume.put_layer(Point3::new(0, 0, 0), &source, 4, 4, 4),
        Err(VoxelError::LayerSourceTooShort { needed: 16, actual: 12 })
    ));
    assert!(matches!(
        volume.put_layer(Point3::new(0, 0, 0), &source, 4, 2, 3),
        Err(VoxelError::LayerSourceTooShort { .. })
    ));
    assert!(matches!(
        volume.put_layer(Point3::new(6, 0, 0), &source, 4, 3, 4),
        Err(VoxelError::OutOfRangeCoordinate { .. })
    ));
    assert!(volume.put_layer(Point3::new(4, 0, 5), &source, 4, 3, 4).is_ok());
}

#[test]
fn fill_layer_touches_one_plane() {
    let mut volume = VoxelVolume::new(BITS).unwrap();
    volume.fill_layer(-3, 9).unwrap();
    for z in -8..8 {
        for x in -8..8 {
            assert_eq!(volume.get_cell(x, -3, z).unwrap(), 9);
            assert_eq!(volume.get_cell(x, -2, z).unwrap(), 0);
            assert_eq!(volume.get_cell(x, -4, z).unwrap(), 0);
        }
    }
    assert!(volume.fill_layer(8, 1).is_err());
}

#[test]
fn coordinates_outside_the_cube_are_rejected() {
    let mut volume = VoxelVolume::new(BITS).unwrap();
    assert!(matches!(
        volume.get_cell(8, 0, 0),
        Err(VoxelError::OutOfRangeCoordinate { x: 8, y: 0, z: 0 })
    ));
    assert!(volume.set_cell(0, -9, 0, 1).is_err());
    assert!(volume.set_cell(-8, -8, -8, 1).is_ok());
    assert!(volume.set_cell(7, 7, 7, 1).is_ok());
    assert!(matches!(
        VoxelVolume::new(40),
        Err(VoxelError::Configuration(_))
    ));
}
