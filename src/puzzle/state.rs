//! Grid model and puzzle state
//!
//! All state that must be persisted to resume a puzzle lives here.

use serde::{Deserialize, Serialize};

use super::arith::Symbol;
use crate::tuning::Difficulty;

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    /// An operand the player has to fill (unless it is a fixed hint)
    Number {
        correct: u32,
        value: Option<u32>,
        fixed: bool,
    },
    Operator {
        symbol: Symbol,
    },
    /// Right-hand side of an equation, always visible
    Result {
        value: u32,
    },
}

impl Cell {
    /// A number cell waiting for a tile
    pub fn number(correct: u32) -> Self {
        Cell::Number {
            correct,
            value: None,
            fixed: false,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Number or Result: a cell that holds an operand or a result
    #[inline]
    pub fn is_value_cell(&self) -> bool {
        matches!(self, Cell::Number { .. } | Cell::Result { .. })
    }

    /// A number cell the player may write to
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self, Cell::Number { fixed: false, .. })
    }

    /// What the cell currently shows
    pub fn current_value(&self) -> Option<u32> {
        match self {
            Cell::Number { value, .. } => *value,
            Cell::Result { value } => Some(*value),
            Cell::Empty | Cell::Operator { .. } => None,
        }
    }

    /// What the cell holds in the intended solution
    pub fn solution_value(&self) -> Option<u32> {
        match self {
            Cell::Number { correct, .. } => Some(*correct),
            Cell::Result { value } => Some(*value),
            Cell::Empty | Cell::Operator { .. } => None,
        }
    }
}

/// Direction an equation reads in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// (row, col) step along the axis
    #[inline]
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
        }
    }

    #[inline]
    pub fn perpendicular(&self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Position `i` steps from (row, col) along the axis, possibly off-grid
    #[inline]
    pub fn step(&self, row: isize, col: isize, i: isize) -> (isize, isize) {
        let (dr, dc) = self.delta();
        (row + dr * i, col + dc * i)
    }
}

/// Square matrix of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            rows: vec![vec![Cell::Empty; size]; size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Cell at a signed position; `None` off-grid
    pub fn at(&self, (row, col): (isize, isize)) -> Option<&Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    #[inline]
    pub fn in_bounds(&self, (row, col): (isize, isize)) -> bool {
        self.at((row, col)).is_some()
    }

    /// Empty or off-grid
    #[inline]
    pub fn is_vacant(&self, pos: (isize, isize)) -> bool {
        self.at(pos).is_none_or(Cell::is_empty)
    }

    /// Write a cell; off-grid writes are ignored
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(slot) = self.get_mut(row, col) {
            *slot = cell;
        }
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }

    pub fn count(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.iter().filter(|(_, _, cell)| pred(cell)).count()
    }
}

/// A placed value cell that a new perpendicular equation may branch from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedNode {
    pub row: usize,
    pub col: usize,
    pub value: u32,
    /// Axis of the equation that placed it
    pub axis: Axis,
}

/// Tiles not yet placed on the grid, in display order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pool(Vec<u32>);

impl Pool {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_vec(tiles: Vec<u32>) -> Self {
        Self(tiles)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.0.contains(&value)
    }

    /// Remove one tile with this value; false if there is none
    pub fn take(&mut self, value: u32) -> bool {
        match self.0.iter().position(|v| *v == value) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }

    /// Return a tile to the end of the pool
    pub fn give(&mut self, value: u32) {
        self.0.push(value);
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &u32> {
        self.0.iter()
    }
}

/// Visible part of the grid: placed content plus one cell of padding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindow {
    pub start_row: usize,
    pub start_col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl DisplayWindow {
    /// The whole grid
    pub fn full(size: usize) -> Self {
        Self {
            start_row: 0,
            start_col: 0,
            rows: size,
            cols: size,
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row
            && row < self.start_row + self.rows
            && col >= self.start_col
            && col < self.start_col + self.cols
    }
}

/// Where one equation sits on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equation {
    pub row: usize,
    pub col: usize,
    pub axis: Axis,
    /// 5 or 7 cells
    pub len: usize,
}

impl Equation {
    /// Cell positions from origin to result
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.axis.delta();
        (0..self.len).map(move |i| {
            (
                (self.row as isize + dr * i as isize) as usize,
                (self.col as isize + dc * i as isize) as usize,
            )
        })
    }

    /// Number of operands (2 or 3)
    pub fn operand_count(&self) -> usize {
        (self.len - 1) / 2
    }

    /// Position of the result cell
    pub fn result_cell(&self) -> (usize, usize) {
        let (dr, dc) = self.axis.delta();
        let last = (self.len - 1) as isize;
        (
            (self.row as isize + dr * last) as usize,
            (self.col as isize + dc * last) as usize,
        )
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|(r, c)| r == row && c == col)
    }
}

/// A generated puzzle and the player's progress on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub level: u32,
    pub difficulty: Difficulty,
    /// Seed the puzzle was generated from
    pub seed: u64,
    pub grid: Grid,
    pub pool: Pool,
    pub window: DisplayWindow,
    /// Placed equations in placement order
    #[serde(default)]
    pub equations: Vec<Equation>,
}

impl Puzzle {
    /// All number cells, fixed or not
    pub fn number_cells(&self) -> usize {
        self.grid.count(|c| matches!(c, Cell::Number { .. }))
    }

    pub fn editable_cells(&self) -> usize {
        self.grid.count(Cell::is_editable)
    }

    /// Editable cells that currently hold a tile
    pub fn filled_cells(&self) -> usize {
        self.grid
            .count(|c| matches!(c, Cell::Number { fixed: false, value: Some(_), .. }))
    }

    pub fn hint_cells(&self) -> usize {
        self.grid.count(|c| matches!(c, Cell::Number { fixed: true, .. }))
    }

    /// Every editable cell holds a tile and the pool is empty
    pub fn is_filled(&self) -> bool {
        self.pool.is_empty() && self.filled_cells() == self.editable_cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::arith::Operator;

    #[test]
    fn test_cell_json_shape() {
        let cell = Cell::Number {
            correct: 7,
            value: None,
            fixed: false,
        };
        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "number", "correct": 7, "value": null, "fixed": false})
        );

        let op: Cell = serde_json::from_str(r#"{"type":"operator","symbol":"-"}"#).unwrap();
        assert_eq!(
            op,
            Cell::Operator {
                symbol: Symbol::Op(Operator::Sub)
            }
        );

        let empty: Cell = serde_json::from_str(r#"{"type":"empty"}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_cell_values() {
        let hint = Cell::Number {
            correct: 4,
            value: Some(4),
            fixed: true,
        };
        assert!(!hint.is_editable());
        assert_eq!(hint.current_value(), Some(4));

        let blank = Cell::number(9);
        assert!(blank.is_editable());
        assert_eq!(blank.current_value(), None);
        assert_eq!(blank.solution_value(), Some(9));

        let result = Cell::Result { value: 12 };
        assert!(result.is_value_cell());
        assert_eq!(result.current_value(), Some(12));
        assert!(!Cell::Empty.is_value_cell());
    }

    #[test]
    fn test_grid_bounds() {
        let mut grid = Grid::new(5);
        grid.set(4, 4, Cell::Result { value: 1 });
        grid.set(5, 0, Cell::Result { value: 1 });

        assert_eq!(grid.size(), 5);
        assert!(grid.in_bounds((0, 0)));
        assert!(!grid.in_bounds((-1, 0)));
        assert!(!grid.in_bounds((0, 5)));
        assert!(grid.is_vacant((-1, 2)));
        assert!(grid.is_vacant((0, 0)));
        assert!(!grid.is_vacant((4, 4)));
        assert_eq!(grid.count(|c| !c.is_empty()), 1);
    }

    #[test]
    fn test_axis_step() {
        assert_eq!(Axis::Horizontal.step(3, 3, 2), (3, 5));
        assert_eq!(Axis::Vertical.step(3, 3, -2), (1, 3));
        assert_eq!(Axis::Horizontal.perpendicular(), Axis::Vertical);
    }

    #[test]
    fn test_pool_take_give() {
        let mut pool = Pool::from_vec(vec![7, 3, 7]);
        assert!(pool.take(7));
        assert_eq!(pool.as_slice(), &[3, 7]);
        assert!(!pool.take(9));
        pool.give(9);
        assert_eq!(pool.as_slice(), &[3, 7, 9]);
        assert_eq!(serde_json::to_string(&pool).unwrap(), "[3,7,9]");
    }

    #[test]
    fn test_equation_cells() {
        let eq = Equation {
            row: 2,
            col: 1,
            axis: Axis::Vertical,
            len: 7,
        };
        let cells: Vec<_> = eq.cells().collect();
        assert_eq!(cells.first(), Some(&(2, 1)));
        assert_eq!(cells.last(), Some(&(8, 1)));
        assert_eq!(eq.result_cell(), (8, 1));
        assert_eq!(eq.operand_count(), 3);
        assert!(eq.contains(5, 1));
        assert!(!eq.contains(5, 2));
    }
}
