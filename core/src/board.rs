use ndarray::Array2;

use crate::*;

/// Authoritative grid state: cell values, per-cell visibility, and the two
/// core algorithms (lazy mine placement and flood-fill reveal).
///
/// A board starts ungenerated; the first `reveal` call fixes the mine layout
/// for the rest of its life. Game-level outcome never lives here.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    values: Array2<CellValue>,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    mine_positions: Vec<Coord2>,
    generated: bool,
}

fn in_safe_zone(start: Coord2, cell: Coord2) -> bool {
    start.0.abs_diff(cell.0) <= 1 && start.1.abs_diff(cell.1) <= 1
}

impl Board {
    pub fn new(config: GameConfig) -> Self {
        let dim = [usize::from(config.size()); 2];
        Self {
            config,
            values: Array2::default(dim),
            revealed: Array2::default(dim),
            flagged: Array2::default(dim),
            mine_positions: Vec::new(),
            generated: false,
        }
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        values: Array2<CellValue>,
        revealed: Array2<bool>,
        flagged: Array2<bool>,
        mine_positions: Vec<Coord2>,
        generated: bool,
    ) -> Self {
        Self {
            config,
            values,
            revealed,
            flagged,
            mine_positions,
            generated,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Mine coordinates in placement order; empty until generated.
    pub fn mine_positions(&self) -> &[Coord2] {
        &self.mine_positions
    }

    pub(crate) fn values(&self) -> &Array2<CellValue> {
        &self.values
    }

    pub(crate) fn revealed_grid(&self) -> &Array2<bool> {
        &self.revealed
    }

    pub(crate) fn flagged_grid(&self) -> &Array2<bool> {
        &self.flagged
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(CellView {
            value: self.values[coords.to_nd_index()],
            revealed: self.revealed[coords.to_nd_index()],
            flagged: self.flagged[coords.to_nd_index()],
        })
    }

    /// Whether the fixed cell value is a mine. False out of bounds or before
    /// generation.
    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.validate_coords(coords)
            .map(|coords| self.values[coords.to_nd_index()].is_mine())
            .unwrap_or(false)
    }

    /// Place mines, keeping the clicked cell and its neighbors clear when the
    /// board is sparse enough.
    ///
    /// Dense boards fall back to excluding only the clicked cell, which keeps
    /// placement possible for any valid config but may leave a mine adjacent
    /// to the first click.
    fn generate(&mut self, start: Coord2, rng: &mut dyn MineSampler) {
        let size = self.size();
        let mines = usize::from(self.config.mines());

        let mut candidates: Vec<Coord2> = all_coords(size)
            .filter(|&cell| !in_safe_zone(start, cell))
            .collect();
        if mines > candidates.len() {
            log::debug!("safe zone too large for {mines} mines, excluding only the start cell");
            candidates = all_coords(size).filter(|&cell| cell != start).collect();
        }

        // Single sampler call, so one captured rng state maps to one layout.
        self.mine_positions = rng.sample_coords(&candidates, mines);
        for &pos in &self.mine_positions {
            self.values[pos.to_nd_index()] = CellValue::Mine;
        }
        for cell in all_coords(size) {
            if !self.values[cell.to_nd_index()].is_mine() {
                let count = self.adjacent_mine_count(cell);
                self.values[cell.to_nd_index()] = CellValue::Adjacent(count);
            }
        }
        self.generated = true;
        log::debug!(
            "placed {} mines around first click at {:?}",
            self.mine_positions.len(),
            start
        );
    }

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self.values[pos.to_nd_index()].is_mine())
            .count()
            .try_into()
            .unwrap()
    }

    /// Reveal a cell, generating the board first if this is the first click.
    ///
    /// Flagged or already-revealed targets change nothing and return an empty
    /// list. Zero-valued cells cascade through their neighborhood with an
    /// explicit LIFO work list, so the discovery order is deterministic and
    /// the stack cannot overflow on large boards.
    pub fn reveal(&mut self, coords: Coord2, rng: &mut dyn MineSampler) -> Result<Vec<Coord2>> {
        let coords = self.validate_coords(coords)?;

        if !self.generated {
            self.generate(coords, rng);
        }

        if self.flagged[coords.to_nd_index()] || self.revealed[coords.to_nd_index()] {
            return Ok(Vec::new());
        }

        let mut newly_revealed = Vec::new();
        let mut stack = vec![coords];
        while let Some(cell) = stack.pop() {
            if self.revealed[cell.to_nd_index()] || self.flagged[cell.to_nd_index()] {
                continue;
            }

            self.revealed[cell.to_nd_index()] = true;
            newly_revealed.push(cell);
            log::trace!("revealed {:?} as {:?}", cell, self.values[cell.to_nd_index()]);

            if self.values[cell.to_nd_index()].is_zero() {
                stack.extend(neighbors(cell, self.size()).filter(|&pos| {
                    !self.revealed[pos.to_nd_index()] && !self.flagged[pos.to_nd_index()]
                }));
            }
        }
        Ok(newly_revealed)
    }

    /// Flip the flag on an unrevealed cell; revealed cells are left alone.
    /// Returns the resulting flag state.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let idx = coords.to_nd_index();
        if !self.revealed[idx] {
            self.flagged[idx] = !self.flagged[idx];
        }
        Ok(self.flagged[idx])
    }

    /// Win predicate: every non-mine cell is revealed.
    pub fn all_safe_revealed(&self) -> bool {
        self.values
            .iter()
            .zip(self.revealed.iter())
            .all(|(value, &revealed)| value.is_mine() || revealed)
    }

    /// Surface the full mine layout on loss. Already-revealed mines are
    /// skipped, so the returned list holds only the transitions.
    pub fn reveal_all_mines(&mut self) -> Vec<Coord2> {
        let mut newly_revealed = Vec::new();
        for &pos in &self.mine_positions {
            let idx = pos.to_nd_index();
            if !self.revealed[idx] {
                self.revealed[idx] = true;
                newly_revealed.push(pos);
            }
        }
        newly_revealed
    }

    /// Mines minus placed flags, clamped at zero. Over-flagging is permitted
    /// and simply reports zero remaining.
    pub fn remaining_flags(&self) -> CellCount {
        let placed = self.flagged.iter().filter(|&&flag| flag).count() as CellCount;
        self.config.mines().saturating_sub(placed)
    }
}
