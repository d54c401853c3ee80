//! # Volume Module
//!
//! [`VoxelVolume`] is a dense cube of cells centred on the world origin.
//!
//! ## Addressing
//!
//! With `B = max_distance_bits` and `R = B + 1`, the cube is `2^R` cells on a
//! side and every axis accepts world coordinates in `[-2^B, 2^B)`. A coordinate
//! is shifted by `2^B` into `[0, 2^R)` and the three axes are packed into one
//! linear index:
//!
//! ```text
//! index = (y << 2R) | (z << R) | x
//! ```
//!
//! Stepping to a neighbour is then a single addition of a precomputed delta.
//! All of that arithmetic stays inside this module: the rest of the crate only
//! sees opaque [`CellIndex`] values produced by a volume, and coordinates are
//! validated instead of being allowed to alias other cells.
//!
//! ## Delta tables
//!
//! Built once by [`VoxelVolume::new`] and never mutated:
//! * a delta for each of the 64 [`DirMask`] flag combinations
//! * a delta for each of the 26 [`DirEx`] directions
//! * per primary direction, the forward step followed by forward+ring steps
//! * per primary direction, zero followed by the bare ring steps

use cgmath::{Point3, Vector3};

use super::block::{CellValue, EMPTY_CELL};
use super::direction::{
    mask_is_consistent, mask_vector, Dir, DirEx, DirMask, DIR_EX_COUNT, DIR_MASK_COUNT,
};
use crate::error::{Result, VoxelError};

/// Largest `max_distance_bits` accepted by [`VoxelVolume::new`].
///
/// Beyond this the packed index no longer fits in a `usize` on 64-bit targets
/// or the axis range no longer fits in an `i32`.
pub const MAX_DISTANCE_BITS_LIMIT: u32 = 20;

/// Address of one cell inside a specific [`VoxelVolume`].
///
/// Only the volume can create these, so an index is always in bounds for the
/// volume that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(usize);

impl CellIndex {
    /// The raw linear address, e.g. for use as a bitset position.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// A neighbouring cell read through one of the per-direction delta tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NearCell {
    /// Address of the neighbour
    pub index: CellIndex,
    /// Its value at the time of the read
    pub cell: CellValue,
    /// The primary direction whose table produced this neighbour
    pub dir: Dir,
}

/// Nine neighbours per lookup; `None` where the neighbour would leave the cube.
pub type NearCells = [Option<NearCell>; 9];

/// Dense cube of cell values with O(1) neighbour addressing.
pub struct VoxelVolume {
    max_distance_bits: u32,
    row_bits: u32,
    row_size: usize,
    row_mask: usize,
    max_dist: i32,
    data: Vec<CellValue>,
    direction_delta: [isize; DIR_MASK_COUNT],
    direction_ex_delta: [isize; DIR_EX_COUNT],
    main_direction_deltas: [[isize; 9]; 6],
    main_direction_deltas_no_forward: [[isize; 9]; 6],
    // Same offsets as coordinate steps, for cells on the cube boundary.
    main_direction_steps: [[Vector3<i32>; 9]; 6],
    main_direction_steps_no_forward: [[Vector3<i32>; 9]; 6],
}

impl std::fmt::Debug for VoxelVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelVolume")
            .field("max_distance_bits", &self.max_distance_bits)
            .field("row_size", &self.row_size)
            .field("cells", &self.data.len())
            .finish()
    }
}

impl VoxelVolume {
    /// Allocates a zeroed cube of side `2^(max_distance_bits + 1)` and derives
    /// every delta table for that size.
    ///
    /// # Errors
    /// * `Configuration` if the size cannot be addressed
    /// * `CapacityExceeded` if the backing store cannot be allocated
    pub fn new(max_distance_bits: u32) -> Result<Self> {
        if max_distance_bits > MAX_DISTANCE_BITS_LIMIT {
            return Err(VoxelError::Configuration(format!(
                "max_distance_bits {} exceeds the addressable limit {}",
                max_distance_bits, MAX_DISTANCE_BITS_LIMIT
            )));
        }
        let row_bits = max_distance_bits + 1;
        let row_size = 1usize
            .checked_shl(row_bits)
            .filter(|_| row_bits * 3 < usize::BITS)
            .ok_or_else(|| {
                VoxelError::Configuration(format!(
                    "a row of 2^{} cells cannot be addressed on this target",
                    row_bits
                ))
            })?;
        let data_size = row_size * row_size * row_size;

        let mut data = Vec::new();
        data.try_reserve_exact(data_size)
            .map_err(|_| VoxelError::CapacityExceeded {
                requested: data_size,
                limit: isize::MAX as usize,
            })?;
        data.resize(data_size, EMPTY_CELL);

        let row = row_size as isize;
        let mut direction_delta = [0isize; DIR_MASK_COUNT];
        for (mask, delta) in direction_delta.iter_mut().enumerate() {
            let v = mask_vector(mask as DirMask);
            *delta = v.x as isize + v.z as isize * row + v.y as isize * row * row;
        }

        let mut direction_ex_delta = [0isize; DIR_EX_COUNT];
        for d in DirEx::ALL {
            direction_ex_delta[d.index()] = direction_delta[d.mask() as usize];
        }

        let zero = Vector3::new(0, 0, 0);
        let mut main_direction_deltas = [[0isize; 9]; 6];
        let mut main_direction_deltas_no_forward = [[0isize; 9]; 6];
        let mut main_direction_steps = [[zero; 9]; 6];
        let mut main_direction_steps_no_forward = [[zero; 9]; 6];
        for dir in Dir::all() {
            let d = dir.index();
            let forward = dir.to_ex();
            main_direction_deltas[d][0] = direction_ex_delta[forward.index()];
            main_direction_steps[d][0] = forward.vector();
            for (i, near) in dir.near_directions().iter().enumerate() {
                main_direction_deltas[d][1 + i] =
                    main_direction_deltas[d][0] + direction_ex_delta[near.index()];
                main_direction_deltas_no_forward[d][1 + i] = direction_ex_delta[near.index()];
                main_direction_steps[d][1 + i] = forward.vector() + near.vector();
                main_direction_steps_no_forward[d][1 + i] = near.vector();
            }
        }

        log::info!(
            "Allocated voxel volume: {}^3 cells, coordinates in [{}, {})",
            row_size,
            -(1i64 << max_distance_bits),
            1i64 << max_distance_bits
        );

        Ok(VoxelVolume {
            max_distance_bits,
            row_bits,
            row_size,
            row_mask: row_size - 1,
            max_dist: 1 << max_distance_bits,
            data,
            direction_delta,
            direction_ex_delta,
            main_direction_deltas,
            main_direction_deltas_no_forward,
            main_direction_steps,
            main_direction_steps_no_forward,
        })
    }

    pub fn max_distance_bits(&self) -> u32 {
        self.max_distance_bits
    }

    /// Cells along one edge of the cube.
    pub fn row_size(&self) -> usize {
        self.row_size
    }

    /// Half the edge length; valid coordinates are `-max_distance()..max_distance()`.
    pub fn max_distance(&self) -> i32 {
        self.max_dist
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if `(x, y, z)` lies inside the cube.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        let range = -self.max_dist..self.max_dist;
        range.contains(&x) && range.contains(&y) && range.contains(&z)
    }

    /// Packs a world coordinate into a cell address.
    pub fn index_of(&self, x: i32, y: i32, z: i32) -> Result<CellIndex> {
        if !self.contains(x, y, z) {
            return Err(VoxelError::OutOfRangeCoordinate { x, y, z });
        }
        let ux = (x + self.max_dist) as usize;
        let uy = (y + self.max_dist) as usize;
        let uz = (z + self.max_dist) as usize;
        Ok(CellIndex(
            (uy << (self.row_bits * 2)) | (uz << self.row_bits) | ux,
        ))
    }

    /// Same as [`Self::index_of`] for a point.
    pub fn index_of_point(&self, p: Point3<i32>) -> Result<CellIndex> {
        self.index_of(p.x, p.y, p.z)
    }

    /// Unpacks a cell address into its world coordinate.
    pub fn point_of(&self, index: CellIndex) -> Point3<i32> {
        let i = index.0;
        let x = (i & self.row_mask) as i32 - self.max_dist;
        let z = ((i >> self.row_bits) & self.row_mask) as i32 - self.max_dist;
        let y = (i >> (self.row_bits * 2)) as i32 - self.max_dist;
        Point3::new(x, y, z)
    }

    pub fn get_cell(&self, x: i32, y: i32, z: i32) -> Result<CellValue> {
        let index = self.index_of(x, y, z)?;
        Ok(self.data[index.0])
    }

    /// Reads a cell by address.
    ///
    /// # Panics
    /// Panics if `index` was produced by a larger volume.
    pub fn get_cell_by_index(&self, index: CellIndex) -> CellValue {
        self.data[index.0]
    }

    pub fn set_cell(&mut self, x: i32, y: i32, z: i32, value: CellValue) -> Result<()> {
        let index = self.index_of(x, y, z)?;
        self.data[index.0] = value;
        Ok(())
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.data.fill(EMPTY_CELL);
    }

    /// Sets the whole horizontal plane at height `y` to `value`.
    pub fn fill_layer(&mut self, y: i32, value: CellValue) -> Result<()> {
        let start = self.index_of(-self.max_dist, y, -self.max_dist)?.0;
        let plane = self.row_size * self.row_size;
        self.data[start..start + plane].fill(value);
        Ok(())
    }

    /// Copies a `width x depth` rectangle from `layer` into the plane at
    /// `origin.y`, starting at `(origin.x, origin.z)`.
    ///
    /// Row `k` of the rectangle (along +X) is read from
    /// `layer[k * stride..k * stride + width]` and lands at `z = origin.z + k`.
    /// Cells outside the rectangle are left untouched.
    pub fn put_layer(
        &mut self,
        origin: Point3<i32>,
        layer: &[CellValue],
        width: usize,
        depth: usize,
        stride: usize,
    ) -> Result<()> {
        if width == 0 || depth == 0 {
            return Ok(());
        }
        if stride < width {
            return Err(VoxelError::LayerSourceTooShort {
                needed: width,
                actual: stride,
            });
        }
        let needed = (depth - 1)
            .checked_mul(stride)
            .and_then(|rows| rows.checked_add(width))
            .ok_or(VoxelError::LayerSourceTooShort {
                needed: usize::MAX,
                actual: layer.len(),
            })?;
        if layer.len() < needed {
            return Err(VoxelError::LayerSourceTooShort {
                needed,
                actual: layer.len(),
            });
        }

        // Both corners in range means every row is in range.
        let far_x = origin.x as i64 + width as i64 - 1;
        let far_z = origin.z as i64 + depth as i64 - 1;
        let far = self.max_dist as i64;
        if far_x >= far || far_z >= far {
            return Err(VoxelError::OutOfRangeCoordinate {
                x: far_x.min(i32::MAX as i64) as i32,
                y: origin.y,
                z: far_z.min(i32::MAX as i64) as i32,
            });
        }
        let mut dst = self.index_of_point(origin)?.0;

        for row in layer.chunks(stride).take(depth) {
            self.data[dst..dst + width].copy_from_slice(&row[..width]);
            dst += self.row_size;
        }
        Ok(())
    }

    /// Delta for an arbitrary flag combination; `None` for contradictory flags.
    pub fn direction_delta(&self, mask: DirMask) -> Option<isize> {
        if mask_is_consistent(mask) {
            Some(self.direction_delta[mask as usize])
        } else {
            None
        }
    }

    pub fn direction_ex_delta(&self, dir: DirEx) -> isize {
        self.direction_ex_delta[dir.index()]
    }

    /// Forward step, then forward step plus each ring offset.
    pub fn main_direction_deltas(&self, dir: Dir) -> &[isize; 9] {
        &self.main_direction_deltas[dir.index()]
    }

    /// Zero, then each bare ring offset.
    pub fn main_direction_deltas_no_forward(&self, dir: Dir) -> &[isize; 9] {
        &self.main_direction_deltas_no_forward[dir.index()]
    }

    /// The neighbour of `index` in direction `dir`, if it is inside the cube.
    pub fn neighbor(&self, index: CellIndex, dir: DirEx) -> Option<CellIndex> {
        self.offset(index, self.direction_ex_delta[dir.index()], dir.vector())
    }

    /// Reads the nine cells reachable from `index` by stepping along `dir` and
    /// optionally turning onto one of its ring directions.
    pub fn get_near_cells_for_direction(&self, index: CellIndex, dir: Dir) -> NearCells {
        self.read_near(
            index,
            dir,
            &self.main_direction_deltas[dir.index()],
            &self.main_direction_steps[dir.index()],
        )
    }

    /// Reads `index` itself followed by its eight ring neighbours for `dir`.
    pub fn get_near_cells_for_direction_no_forward(
        &self,
        index: CellIndex,
        dir: Dir,
    ) -> NearCells {
        self.read_near(
            index,
            dir,
            &self.main_direction_deltas_no_forward[dir.index()],
            &self.main_direction_steps_no_forward[dir.index()],
        )
    }

    fn read_near(
        &self,
        index: CellIndex,
        dir: Dir,
        deltas: &[isize; 9],
        steps: &[Vector3<i32>; 9],
    ) -> NearCells {
        let mut cells = [None; 9];
        for (slot, (delta, step)) in cells.iter_mut().zip(deltas.iter().zip(steps.iter())) {
            *slot = self.offset(index, *delta, *step).map(|near| NearCell {
                index: near,
                cell: self.data[near.0],
                dir,
            });
        }
        cells
    }

    /// Applies a delta, falling back to checked coordinates on the boundary
    /// where the raw delta would wrap into another row or plane.
    fn offset(&self, index: CellIndex, delta: isize, step: Vector3<i32>) -> Option<CellIndex> {
        if self.is_interior(index.0) {
            Some(CellIndex((index.0 as isize + delta) as usize))
        } else {
            self.index_of_point(self.point_of(index) + step).ok()
        }
    }

    // Every table offset moves at most one cell per axis.
    fn is_interior(&self, i: usize) -> bool {
        let hi = self.row_size - 1;
        let x = i & self.row_mask;
        let z = (i >> self.row_bits) & self.row_mask;
        let y = i >> (self.row_bits * 2);
        (1..hi).contains(&x) && (1..hi).contains(&z) && (1..hi).contains(&y)
    }
}
