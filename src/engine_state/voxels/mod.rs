//! # Voxel Storage
//!
//! The cell data the visibility walker floods through.
//!
//! ## Architecture
//!
//! * **Direction**: the 6 primary and 26 extended neighbour directions, their
//!   bitmask encoding and the ring of directions around each primary one
//! * **Volume**: a dense cube of cell values with flat addressing and
//!   precomputed neighbour deltas
//! * **Block**: cell values, block classification, faces and the block catalog
//! * **World**: the volume plus the camera, passability and the demo scene

pub mod block;
pub mod direction;
pub mod volume;
pub mod world;
