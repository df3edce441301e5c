//! Player tile moves between the pool and the grid
//!
//! A failed move changes nothing.

use thiserror::Error;

use super::state::{Cell, Puzzle};

/// A tile move that is not allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("({row}, {col}) does not take a number")]
    NotANumberCell { row: usize, col: usize },
    #[error("({row}, {col}) is a fixed hint")]
    FixedCell { row: usize, col: usize },
    #[error("no {value} tile in the pool")]
    NotInPool { value: u32 },
    #[error("({row}, {col}) is already empty")]
    AlreadyEmpty { row: usize, col: usize },
}

impl Puzzle {
    /// Move a tile from the pool onto an editable number cell.
    ///
    /// A tile already in the cell goes back to the pool and is returned.
    pub fn place_tile(&mut self, value: u32, row: usize, col: usize) -> Result<Option<u32>, MoveError> {
        self.editable_cell(row, col)?;
        if !self.pool.take(value) {
            return Err(MoveError::NotInPool { value });
        }

        let previous = match self.grid.get_mut(row, col) {
            Some(Cell::Number { value: slot, .. }) => slot.replace(value),
            _ => None,
        };
        if let Some(previous) = previous {
            self.pool.give(previous);
        }
        Ok(previous)
    }

    /// Move the tile in an editable number cell back to the pool and return its value
    pub fn clear_tile(&mut self, row: usize, col: usize) -> Result<u32, MoveError> {
        self.editable_cell(row, col)?;

        let taken = match self.grid.get_mut(row, col) {
            Some(Cell::Number { value: slot, .. }) => slot.take(),
            _ => None,
        };
        let value = taken.ok_or(MoveError::AlreadyEmpty { row, col })?;
        self.pool.give(value);
        Ok(value)
    }

    fn editable_cell(&self, row: usize, col: usize) -> Result<(), MoveError> {
        match self.grid.get(row, col) {
            None => Err(MoveError::OutOfBounds { row, col }),
            Some(Cell::Number { fixed: true, .. }) => Err(MoveError::FixedCell { row, col }),
            Some(Cell::Number { .. }) => Ok(()),
            Some(_) => Err(MoveError::NotANumberCell { row, col }),
        }
    }

    /// Tiles in the pool plus tiles on the grid account for every editable cell
    pub fn is_consistent(&self) -> bool {
        self.pool.len() + self.filled_cells() == self.editable_cells()
    }

    /// The pool and the placed tiles hold exactly the solution values of the editable cells
    pub fn tiles_match_solution(&self) -> bool {
        let mut expected = Vec::new();
        let mut tiles: Vec<u32> = self.pool.as_slice().to_vec();
        for (_, _, cell) in self.grid.iter() {
            if let Cell::Number {
                correct,
                value,
                fixed: false,
            } = cell
            {
                expected.push(*correct);
                tiles.extend(*value);
            }
        }
        expected.sort_unstable();
        tiles.sort_unstable();
        expected == tiles
    }
}
