//! Grid module - the cube of cells
//!
//! The grid is a `size × size × size` array where each cell is empty or holds
//! one tile. Storage is a flat vector ordered x-outer, y-middle, z-inner, so
//! walking the vector front to back is the canonical grid order.
//!
//! Invariant: a stored tile's `position` always equals the cell it sits in.

use std::ops::Index;

use rand::Rng;

use crate::error::GridError;
use crate::tile::Tile;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty grid with edge length `size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size³`).
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    fn flat_index(&self, pos: Position) -> Option<usize> {
        if !self.within_bounds(pos) {
            return None;
        }
        let s = self.size;
        Some((pos.x as usize) * s * s + (pos.y as usize) * s + (pos.z as usize))
    }

    #[inline]
    fn position_of(&self, idx: usize) -> Position {
        let s = self.size;
        Position::new((idx / (s * s)) as i32, ((idx / s) % s) as i32, (idx % s) as i32)
    }

    pub fn within_bounds(&self, pos: Position) -> bool {
        let s = self.size as i32;
        (0..s).contains(&pos.x) && (0..s).contains(&pos.y) && (0..s).contains(&pos.z)
    }

    /// Tile at `pos`; `None` when the cell is empty or outside the grid.
    pub fn cell_content(&self, pos: Position) -> Option<&Tile> {
        self.flat_index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Like [`Grid::cell_content`] but reports out-of-bounds access.
    pub fn checked_cell_content(&self, pos: Position) -> Result<Option<&Tile>, GridError> {
        self.flat_index(pos)
            .map(|idx| self.cells[idx].as_ref())
            .ok_or(GridError::OutOfBounds {
                pos,
                size: self.size,
            })
    }

    /// In bounds and empty.
    pub fn cell_available(&self, pos: Position) -> bool {
        matches!(self.flat_index(pos), Some(idx) if self.cells[idx].is_none())
    }

    pub fn cell_occupied(&self, pos: Position) -> bool {
        self.cell_content(pos).is_some()
    }

    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// All empty positions in grid order.
    pub fn available_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| self.position_of(idx))
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.capacity() - self.available_count()
    }

    /// Pick an empty position uniformly at random.
    pub fn random_available_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Position, GridError> {
        let free = self.available_cells();
        if free.is_empty() {
            return Err(GridError::NoAvailableCell);
        }
        Ok(free[rng.gen_range(0..free.len())])
    }

    /// Place `tile` at its recorded position, replacing any occupant.
    pub fn insert_tile(&mut self, tile: Tile) -> Result<(), GridError> {
        let pos = tile.position;
        let idx = self.flat_index(pos).ok_or(GridError::OutOfBounds {
            pos,
            size: self.size,
        })?;
        self.cells[idx] = Some(tile);
        Ok(())
    }

    /// Clear the cell at `pos`, returning whatever was there.
    pub fn remove_tile(&mut self, pos: Position) -> Option<Tile> {
        let idx = self.flat_index(pos)?;
        self.cells[idx].take()
    }

    /// Visit every cell (empty ones included) in grid order.
    pub fn each_cell<F>(&self, mut visitor: F)
    where
        F: FnMut(Position, Option<&Tile>),
    {
        for (idx, cell) in self.cells.iter().enumerate() {
            visitor(self.position_of(idx), cell.as_ref());
        }
    }

    /// Mutable access to every occupied cell in grid order.
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Occupied cells in grid order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Keep only the tiles for which `keep` returns true; returns how many were dropped.
    pub fn retain_tiles<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Tile) -> bool,
    {
        let mut removed = 0;
        for cell in &mut self.cells {
            if matches!(cell, Some(tile) if !keep(tile)) {
                *cell = None;
                removed += 1;
            }
        }
        removed
    }

    /// Raw cells in grid order.
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Index<Position> for Grid {
    type Output = Option<Tile>;

    /// Panics if `pos` is outside the grid.
    fn index(&self, pos: Position) -> &Self::Output {
        match self.flat_index(pos) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "grid index ({}, {}, {}) out of bounds for size {}",
                pos.x, pos.y, pos.z, self.size
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(3);
        assert_eq!(grid.flat_index(Position::new(0, 0, 0)), Some(0));
        assert_eq!(grid.flat_index(Position::new(0, 0, 2)), Some(2));
        assert_eq!(grid.flat_index(Position::new(0, 1, 0)), Some(3));
        assert_eq!(grid.flat_index(Position::new(1, 0, 0)), Some(9));
        assert_eq!(grid.flat_index(Position::new(2, 2, 2)), Some(26));
        assert_eq!(grid.flat_index(Position::new(-1, 0, 0)), None);
        assert_eq!(grid.flat_index(Position::new(0, 3, 0)), None);
    }

    #[test]
    fn test_position_of_inverts_index() {
        let grid = Grid::new(4);
        for idx in 0..grid.capacity() {
            let pos = grid.position_of(idx);
            assert_eq!(grid.flat_index(pos), Some(idx));
        }
    }

    #[test]
    fn test_each_cell_order_is_x_outer_z_inner() {
        let grid = Grid::new(2);
        let mut seen = Vec::new();
        grid.each_cell(|pos, tile| {
            assert!(tile.is_none());
            seen.push((pos.x, pos.y, pos.z));
        });
        assert_eq!(
            seen,
            vec![
                (0, 0, 0),
                (0, 0, 1),
                (0, 1, 0),
                (0, 1, 1),
                (1, 0, 0),
                (1, 0, 1),
                (1, 1, 0),
                (1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_random_available_cell_with_zero_rng_picks_first_free() {
        let mut grid = Grid::new(3);
        grid.insert_tile(Tile::new(Position::new(0, 0, 0), 2)).unwrap();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            grid.random_available_cell(&mut rng),
            Ok(Position::new(0, 0, 1))
        );
    }

    #[test]
    fn test_retain_tiles_removes_matching() {
        let mut grid = Grid::new(3);
        grid.insert_tile(Tile::new(Position::new(0, 0, 0), 2)).unwrap();
        grid.insert_tile(Tile::bonus(Position::new(1, 0, 0), 4)).unwrap();
        assert_eq!(grid.retain_tiles(|t| t.value != 4), 1);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_checked_access_reports_out_of_bounds() {
        let grid = Grid::new(2);
        assert_eq!(grid.checked_cell_content(Position::new(1, 1, 1)), Ok(None));
        assert_eq!(
            grid.checked_cell_content(Position::new(2, 0, 0)),
            Err(GridError::OutOfBounds {
                pos: Position::new(2, 0, 0),
                size: 2
            })
        );
        assert!(grid
            .clone()
            .insert_tile(Tile::new(Position::new(0, -1, 0), 2))
            .is_err());
    }

    #[test]
    fn test_full_grid_has_no_random_cell() {
        let mut grid = Grid::new(2);
        for pos in grid.available_cells() {
            grid.insert_tile(Tile::new(pos, 2)).unwrap();
        }
        assert!(!grid.cells_available());
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            grid.random_available_cell(&mut rng),
            Err(GridError::NoAvailableCell)
        );

        grid.clear();
        assert_eq!(grid.available_count(), 8);
    }

    #[test]
    fn test_index_by_position() {
        let mut grid = Grid::new(3);
        grid.insert_tile(Tile::new(Position::new(2, 1, 0), 8)).unwrap();
        assert_eq!(grid[Position::new(2, 1, 0)].as_ref().map(|t| t.value), Some(8));
        assert!(grid[Position::new(0, 0, 0)].is_none());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_outside_grid() {
        let grid = Grid::new(3);
        let _ = &grid[Position::new(3, 0, 0)];
    }
}
