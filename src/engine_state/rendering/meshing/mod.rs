//! Mesh generation for the visible set.
//!
//! # Architecture
//! - `mesh/`: the [`Mesh`] buffers and the [`Face`] quad
//! - [`MeshVisitor`]: a `CellVisitor` that asks the block catalog to emit the
//!   faces of every reported cell

mod mesh;
mod mesh_visitor;

// Re-export the mesh module's public interface for external use
pub use mesh::*;
pub use mesh_visitor::MeshVisitor;
