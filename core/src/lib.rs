//! Rules engine for a single-player grid-clearing puzzle game.
//!
//! Presentation and persistence live outside this crate: callers drive a
//! [`Game`] through reveal/flag calls and read cell state back through
//! [`CellView`]s, and save/load goes through the versioned [`Snapshot`].

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use rng::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod rng;
mod snapshot;
mod types;

/// Validated board parameters: a square `size` x `size` grid with `mines`
/// hidden mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord,
    mines: CellCount,
}

impl GameConfig {
    /// Placement must always be possible, so `mines` has to leave at least
    /// one cell free.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 || mines >= total_cells(size) {
            return Err(GameError::InvalidConfig { size, mines });
        }
        Ok(Self { size, mines })
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        total_cells(self.size)
    }
}
