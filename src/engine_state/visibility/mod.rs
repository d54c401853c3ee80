//! # Visibility
//!
//! Determines which occupied cells, and which of their faces, can be seen
//! from the camera.
//!
//! ## Key Components
//!
//! * `DirectionFrontier` - open/closed shell bookkeeping for one pass
//! * `VisibilityWalker` - the directional flood fill
//! * `CellVisitor` - the capability the walker reports cells to, with
//!   logging and recording implementations
//!
//! ## Data Flow
//!
//! 1. The world is fully written before a walk starts
//! 2. The walker floods empty space from the camera, pass by pass
//! 3. Each visible occupied cell goes to the visitor once, with its face mask
//! 4. The visitor turns the reports into output (geometry, logs, test records)

pub mod frontier;
pub mod visitors;
pub mod walker;

pub use frontier::DirectionFrontier;
pub use visitors::{CellVisitor, LoggingVisitor, ProbeVisitor, Visit};
pub use walker::{visible_faces, TraversalMode, TraversalStats, VisibilityWalker};
