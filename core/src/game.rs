use serde::{Deserialize, Serialize};

use crate::*;

/// Game-level outcome. `Lost` and `Won` are terminal; `Game` is the only
/// mutator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Lost,
    Won,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

/// What a single reveal call changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    /// Newly revealed coordinates in discovery order.
    pub revealed: Vec<Coord2>,
    pub hit_mine: bool,
    pub won: bool,
    pub status: GameStatus,
}

impl RevealReport {
    fn unchanged(status: GameStatus) -> Self {
        Self {
            revealed: Vec::new(),
            hit_mine: false,
            won: false,
            status,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagReport {
    pub flagged: bool,
    pub remaining_flags: CellCount,
}

/// One playable session: a board, the status machine around it, and the
/// random source whose state governs any not-yet-happened mine placement.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    status: GameStatus,
    rng: SessionRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, SessionRng::from_entropy())
    }

    /// Reproducible session for seeded practice play.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, SessionRng::seeded(seed))
    }

    fn with_rng(config: GameConfig, rng: SessionRng) -> Self {
        Self {
            board: Board::new(config),
            status: GameStatus::default(),
            rng,
        }
    }

    pub(crate) fn from_parts(board: Board, status: GameStatus, rng: SessionRng) -> Self {
        Self { board, status, rng }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub(crate) fn rng(&self) -> &SessionRng {
        &self.rng
    }

    /// Reveal a cell and resolve the game-level outcome.
    ///
    /// Terminal status and flagged targets are defined no-ops (the board is
    /// not even generated for them). The mine check runs before the win
    /// check; a flood fill that clears the last safe cells wins in the same
    /// call that triggered it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let cell = self.board.cell_at(coords)?;
        if self.status.is_terminal() || cell.flagged {
            return Ok(RevealReport::unchanged(self.status));
        }

        let revealed = self.board.reveal(coords, &mut self.rng)?;
        let mut report = RevealReport {
            revealed,
            hit_mine: false,
            won: false,
            status: self.status,
        };

        if self.board.is_mine(coords) {
            self.board.reveal_all_mines();
            self.status = GameStatus::Lost;
            report.hit_mine = true;
            log::debug!("mine hit at {coords:?}, game lost");
        } else if self.board.all_safe_revealed() {
            self.status = GameStatus::Won;
            report.won = true;
            log::debug!("all safe cells revealed, game won");
        }
        report.status = self.status;
        Ok(report)
    }

    /// Toggle a flag; a no-op once the game has ended.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        let cell = self.board.cell_at(coords)?;
        if self.status.is_terminal() {
            return Ok(FlagReport {
                flagged: cell.flagged,
                remaining_flags: self.board.remaining_flags(),
            });
        }

        let flagged = self.board.toggle_flag(coords)?;
        Ok(FlagReport {
            flagged,
            remaining_flags: self.board.remaining_flags(),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Build a fresh session from a snapshot. Validation runs before any
    /// state is constructed, so a failed restore leaves the caller's live
    /// session untouched.
    pub fn restore(snapshot: &Snapshot) -> Result<Self> {
        snapshot.to_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).unwrap()
    }

    /// 2x2 board with one mine, generated by the first reveal at (0, 0).
    fn tiny_started_game() -> (Game, Coord2) {
        let mut game = Game::seeded(config(2, 1), 5);
        game.reveal((0, 0)).unwrap();
        let mine = game.board().mine_positions()[0];
        (game, mine)
    }

    #[test]
    fn revealing_a_mine_loses_and_surfaces_the_layout() {
        let (mut game, mine) = tiny_started_game();

        let report = game.reveal(mine).unwrap();

        assert!(report.hit_mine);
        assert!(!report.won);
        assert_eq!(report.status, GameStatus::Lost);
        assert_eq!(game.status(), GameStatus::Lost);
        for &pos in game.board().mine_positions() {
            assert!(game.board().cell_at(pos).unwrap().revealed);
        }
    }

    #[test]
    fn revealing_the_last_safe_cell_wins_in_the_same_call() {
        let (mut game, mine) = tiny_started_game();

        let mut last = None;
        for pos in all_coords(2).filter(|&pos| pos != mine) {
            last = Some(game.reveal(pos).unwrap());
        }

        let report = last.unwrap();
        assert!(report.won);
        assert!(!report.hit_mine);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn terminal_game_ignores_reveals_and_flags() {
        let (mut game, mine) = tiny_started_game();
        game.reveal(mine).unwrap();

        let report = game.reveal((1, 1)).unwrap();
        assert!(report.revealed.is_empty());
        assert_eq!(report.status, GameStatus::Lost);

        let flag = game.toggle_flag((1, 1)).unwrap();
        assert!(!flag.flagged);
        assert!(!game.board().cell_at((1, 1)).unwrap().flagged);
    }

    #[test]
    fn revealing_a_flagged_cell_does_not_even_generate_the_board() {
        let mut game = Game::seeded(config(9, 10), 11);
        game.toggle_flag((4, 4)).unwrap();

        let report = game.reveal((4, 4)).unwrap();

        assert!(report.revealed.is_empty());
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(!game.board().is_generated());

        game.toggle_flag((4, 4)).unwrap();
        assert!(!game.reveal((4, 4)).unwrap().revealed.is_empty());
        assert!(game.board().is_generated());
    }

    #[test]
    fn flag_report_carries_the_clamped_remaining_count() {
        let mut game = Game::seeded(config(3, 2), 2);

        let report = game.toggle_flag((0, 0)).unwrap();
        assert!(report.flagged);
        assert_eq!(report.remaining_flags, 1);

        game.toggle_flag((1, 1)).unwrap();
        let report = game.toggle_flag((2, 2)).unwrap();
        assert_eq!(report.remaining_flags, 0);
    }

    #[test]
    fn same_seed_and_first_click_reproduce_layout_and_reveal_set() {
        let mut first = Game::seeded(config(9, 10), 42);
        let mut second = Game::seeded(config(9, 10), 42);

        let a = first.reveal((4, 4)).unwrap();
        let b = second.reveal((4, 4)).unwrap();

        assert_eq!(first.board().mine_positions(), second.board().mine_positions());
        assert_eq!(a, b);
        assert!(!a.revealed.is_empty());
    }

    #[test]
    fn out_of_bounds_is_an_error_not_a_noop() {
        let mut game = Game::seeded(config(3, 2), 1);

        assert_eq!(game.reveal((9, 9)).unwrap_err(), GameError::OutOfBounds);
        assert_eq!(game.toggle_flag((0, 9)).unwrap_err(), GameError::OutOfBounds);
        assert!(!game.board().is_generated());
    }
}
