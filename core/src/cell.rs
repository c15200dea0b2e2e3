use serde::{Deserialize, Serialize};

/// Immutable content of a cell, fixed once mine placement has happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Adjacent(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Adjacent(0))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Adjacent(0)
    }
}

/// Read-only per-cell view handed out to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub value: CellValue,
    pub revealed: bool,
    pub flagged: bool,
}
