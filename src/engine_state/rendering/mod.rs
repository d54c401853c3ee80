//! Geometry output for the visible set.
//!
//! This module turns the cells reported by a visibility walk into vertex and
//! index buffers. It stops at CPU-side buffers; uploading them is left to the
//! embedding renderer.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::{Vertex, VERTEX_COMPONENTS};
