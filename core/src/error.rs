use crate::{CellCount, Coord};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the board")]
    OutOfBounds,
    #[error("invalid board configuration: size {size}, mines {mines}")]
    InvalidConfig { size: Coord, mines: CellCount },
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
