//! Shell bookkeeping for one directional flood pass.

use crate::engine_state::voxels::direction::Dir;
use crate::engine_state::voxels::volume::CellIndex;

/// Number of lateral spreading buffers, one per ring direction.
pub const SPREAD_BUFFERS: usize = 8;

/// Tracks the current (open) and previous (closed) shell of a flood pass
/// along one primary direction.
///
/// The frontier never checks for duplicates. The walker decides what is
/// pushed; this type only keeps the shells apart and remembers how much of
/// the open shell was reached by forward steps.
#[derive(Debug, Default)]
pub struct DirectionFrontier {
    dir: Dir,
    distance: u32,
    open: Vec<CellIndex>,
    closed: Vec<CellIndex>,
    spread: [Vec<CellIndex>; SPREAD_BUFFERS],
    forward_count: usize,
}

impl DirectionFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to distance zero with `origin` as the only open cell.
    ///
    /// Buffers are cleared rather than dropped so one frontier can be reused
    /// for every pass of a walk.
    pub fn start(&mut self, origin: CellIndex, dir: Dir) {
        self.dir = dir;
        self.distance = 0;
        self.open.clear();
        self.closed.clear();
        for buffer in &mut self.spread {
            buffer.clear();
        }
        self.open.push(origin);
        self.forward_count = 1;
    }

    /// Moves the open shell into the closed slot and starts an empty open shell
    /// one step further out.
    pub fn next_distance(&mut self) {
        std::mem::swap(&mut self.open, &mut self.closed);
        self.open.clear();
        for buffer in &mut self.spread {
            buffer.clear();
        }
        self.forward_count = 0;
        self.distance += 1;
    }

    /// Records how many open cells were reached by forward steps. Only those
    /// cells may seed lateral spreading in this shell.
    pub fn prepare_spreading(&mut self) {
        self.forward_count = self.open.len();
    }

    pub fn push_forward(&mut self, index: CellIndex) {
        self.open.push(index);
    }

    /// Queues a laterally reached cell under ring direction `ring`.
    pub fn push_spread(&mut self, ring: usize, index: CellIndex) {
        self.spread[ring].push(index);
    }

    /// Appends the spreading buffers to the open shell in ring order.
    pub fn merge_spreading(&mut self) {
        for buffer in &mut self.spread {
            self.open.append(buffer);
        }
    }

    pub fn open(&self) -> &[CellIndex] {
        &self.open
    }

    pub fn closed(&self) -> &[CellIndex] {
        &self.closed
    }

    pub fn forward_cell_count(&self) -> usize {
        self.forward_count
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    /// Number of shells advanced since [`Self::start`].
    pub fn distance(&self) -> u32 {
        self.distance
    }
}
