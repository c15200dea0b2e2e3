use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Format version for persisted sessions.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Complete restorable capture of a session: board, game status, and the
/// generator state that still governs future mine placement.
///
/// Fields are tagged and versioned so a malformed or missing field is a
/// structural decode error for the persistence layer, never a silent default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u16,
    pub size: Coord,
    pub mines: CellCount,
    pub values: Array2<CellValue>,
    pub revealed: Array2<bool>,
    pub flagged: Array2<bool>,
    pub mine_positions: Vec<Coord2>,
    pub generated: bool,
    pub status: GameStatus,
    pub rng: RngState,
}

impl Snapshot {
    pub(crate) fn capture(game: &Game) -> Self {
        let board = game.board();
        Self {
            version: SNAPSHOT_VERSION,
            size: board.size(),
            mines: board.mine_count(),
            values: board.values().clone(),
            revealed: board.revealed_grid().clone(),
            flagged: board.flagged_grid().clone(),
            mine_positions: board.mine_positions().to_vec(),
            generated: board.is_generated(),
            status: game.status(),
            rng: game.rng().capture_state(),
        }
    }

    pub(crate) fn to_game(&self) -> Result<Game> {
        let config = self.validate()?;
        let rng = SessionRng::from_state(&self.rng)?;

        let board = Board::from_parts(
            config,
            self.values.clone(),
            self.revealed.clone(),
            self.flagged.clone(),
            self.mine_positions.clone(),
            self.generated,
        );
        Ok(Game::from_parts(board, self.status, rng))
    }

    fn validate(&self) -> Result<GameConfig> {
        let corrupt = |reason: &str| GameError::CorruptSnapshot(reason.into());

        if self.version != SNAPSHOT_VERSION {
            return Err(GameError::CorruptSnapshot(format!(
                "unsupported version {}",
                self.version
            )));
        }

        let config = GameConfig::new(self.size, self.mines)
            .map_err(|_| corrupt("invalid board configuration"))?;

        let dim = (usize::from(self.size), usize::from(self.size));
        if self.values.dim() != dim || self.revealed.dim() != dim || self.flagged.dim() != dim {
            return Err(corrupt("grid dimensions disagree with declared size"));
        }

        if self.generated {
            if self.mine_positions.len() != usize::from(self.mines) {
                return Err(corrupt("mine list does not match mine count"));
            }
            for &(row, col) in &self.mine_positions {
                if row >= self.size || col >= self.size {
                    return Err(corrupt("mine position outside the board"));
                }
                if !self.values[[usize::from(row), usize::from(col)]].is_mine() {
                    return Err(corrupt("mine list disagrees with value grid"));
                }
            }
        } else if !self.mine_positions.is_empty() {
            return Err(corrupt("mine list present before generation"));
        }

        Ok(config)
    }
}
