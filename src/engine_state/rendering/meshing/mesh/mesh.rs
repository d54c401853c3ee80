//! Mesh data structures for visible-face geometry.
//!
//! A [`Mesh`] is a flat vertex and index buffer that visible faces are
//! appended to, four vertices and six indices per face. The buffer carries a
//! vertex budget so a runaway traversal fails with an error instead of
//! allocating without bound.

use crate::engine_state::rendering::Vertex;
use crate::error::{Result, VoxelError};

use super::face::Face;

/// Vertices emitted per face.
pub const VERTICES_PER_FACE: usize = 4;
/// Indices emitted per face.
pub const INDICES_PER_FACE: usize = 6;

/// Default vertex budget for a single mesh.
pub const DEFAULT_MAX_VERTICES: usize = 4 * 1024 * 1024;

/// Vertex and index buffers for the faces collected in one traversal.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// The vertex data, four entries per face
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
    max_vertices: usize,
}

impl Mesh {
    /// Creates an empty mesh with the default vertex budget.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_VERTICES)
    }

    /// Creates an empty mesh that holds at most `max_vertices` vertices.
    ///
    /// The budget is clamped so every vertex stays addressable by a `u32`
    /// index.
    pub fn with_limit(max_vertices: usize) -> Self {
        Mesh {
            vertices: Vec::new(),
            indices: Vec::new(),
            max_vertices: max_vertices.min(u32::MAX as usize),
        }
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Number of faces added so far.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Checks that `faces` more faces fit and reserves room for them.
    ///
    /// # Errors
    /// `CapacityExceeded` if the vertex budget would be exceeded or the
    /// allocation fails.
    pub fn reserve_faces(&mut self, faces: usize) -> Result<()> {
        let requested = faces
            .checked_mul(VERTICES_PER_FACE)
            .and_then(|v| v.checked_add(self.vertices.len()))
            .ok_or(VoxelError::CapacityExceeded {
                requested: usize::MAX,
                limit: self.max_vertices,
            })?;
        if requested > self.max_vertices {
            return Err(VoxelError::CapacityExceeded {
                requested,
                limit: self.max_vertices,
            });
        }
        let limit = self.max_vertices;
        let capacity_error = |_| VoxelError::CapacityExceeded { requested, limit };
        self.vertices
            .try_reserve(faces * VERTICES_PER_FACE)
            .map_err(capacity_error)?;
        self.indices
            .try_reserve(faces * INDICES_PER_FACE)
            .map_err(capacity_error)?;
        Ok(())
    }

    /// Appends one face.
    ///
    /// # Errors
    /// `CapacityExceeded` if the face does not fit in the vertex budget.
    pub fn add_face(&mut self, face: &Face) -> Result<()> {
        self.reserve_faces(1)?;
        let base = self.face_count() as u32;
        self.vertices.extend(Self::generate_face_vertices(face));
        self.indices.extend(Self::generate_face_indices(base));
        Ok(())
    }

    /// Generates vertex data for a single face.
    ///
    /// # Returns
    /// The four corners in ll, lr, ul, ur order, which together with
    /// [`Self::generate_face_indices`] forms two counter-clockwise triangles
    /// seen from outside the cell.
    pub fn generate_face_vertices(face: &Face) -> [Vertex; VERTICES_PER_FACE] {
        let normal = face.block_side.normal();
        let normal = [normal.x as f32, normal.y as f32, normal.z as f32];
        let color = face.shade();
        let [u0, v0, u1, v1] = face.atlas_rect();
        let corner = |p: cgmath::Point3<i32>| [p.x as f32, p.y as f32, p.z as f32];

        [
            Vertex::new(corner(face.ll), normal, color, [u0, v1]),
            Vertex::new(corner(face.lr), normal, color, [u1, v1]),
            Vertex::new(corner(face.ul), normal, color, [u0, v0]),
            Vertex::new(corner(face.ur), normal, color, [u1, v0]),
        ]
    }

    /// Generates index data for a face, adjusted by the number of previously generated faces.
    ///
    /// # Arguments
    /// * `num_faces_generated` - The number of faces that have been generated so far
    pub fn generate_face_indices(num_faces_generated: u32) -> [u32; INDICES_PER_FACE] {
        let base = num_faces_generated * 4;
        [base, base + 1, base + 3, base, base + 3, base + 2]
    }

    /// Drops all geometry but keeps the allocation and the budget.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
