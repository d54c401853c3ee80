//! Mesh generation for visible cell faces.
//!
//! # Architecture
//! - [`Mesh`]: vertex and index buffers with a vertex budget
//! - [`Face`]: one quad of a cell with its corners and atlas sprite

mod face;
#[allow(clippy::module_inception)]
mod mesh;

pub use face::*;
pub use mesh::*;
