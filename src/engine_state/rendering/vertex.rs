//! Vertex data structures for visible-face geometry.
//!
//! This module defines the vertex format produced by the meshing visitor. The
//! layout is plain `f32` data so the buffers can be handed to any GPU backend
//! with `bytemuck::cast_slice`.

/// Number of `f32` components in one [`Vertex`].
pub const VERTEX_COMPONENTS: usize = 11;

/// A vertex of a visible cell face.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Colour: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 44 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Corner position in world space
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Per-face shading colour
    pub color: [f32; 3],
    /// Atlas texture coordinates (normalised 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - Corner position in world space
    /// * `normal` - Outward normal of the face this corner belongs to
    /// * `color` - Shading colour
    /// * `tex_coords` - Normalised atlas coordinates
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        color: [f32; 3],
        tex_coords: [f32; 2],
    ) -> Self {
        Vertex {
            position,
            normal,
            color,
            tex_coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_component_count() {
        assert_eq!(
            std::mem::size_of::<Vertex>(),
            VERTEX_COMPONENTS * std::mem::size_of::<f32>()
        );
        let v = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [1.0; 3], [0.5, 0.25]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats.len(), VERTEX_COMPONENTS);
        assert_eq!(floats[9], 0.5);
    }
}
