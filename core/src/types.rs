/// Single coordinate axis used for board size and positions.
pub type Coord = u8;

/// Count type used for mine totals and whole-board cell counts.
pub type CellCount = u16;

/// Grid coordinates as `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn total_cells(size: Coord) -> CellCount {
    let size = size as CellCount;
    size * size
}

/// Iterate every coordinate of a `size` x `size` board in row-major order.
pub fn all_coords(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), size: Coord) -> Option<Coord2> {
    let (row, col) = coords;
    let (drow, dcol) = delta;

    let next_row = row.checked_add_signed(drow.try_into().ok()?)?;
    if next_row >= size {
        return None;
    }

    let next_col = col.checked_add_signed(dcol.try_into().ok()?)?;
    if next_col >= size {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterator over the in-bounds Moore neighborhood of a cell.
pub fn neighbors(center: Coord2, size: Coord) -> NeighborIter {
    NeighborIter {
        center,
        size,
        index: 0,
    }
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_of_center_cell_cover_full_neighborhood() {
        let found: Vec<Coord2> = neighbors((1, 1), 3).collect();

        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn neighbors_clip_to_board_edges() {
        let corner: Vec<Coord2> = neighbors((0, 0), 3).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);

        let edge: Vec<Coord2> = neighbors((2, 1), 3).collect();
        assert_eq!(edge.len(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), 1).count(), 0);
    }

    #[test]
    fn all_coords_is_row_major_and_complete() {
        let coords: Vec<Coord2> = all_coords(2).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(all_coords(9).count(), usize::from(total_cells(9)));
    }
}
