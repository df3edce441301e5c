//! Solution check
//!
//! Scans the grid for equations along both axes and evaluates the values the player
//! entered. A window is an equation when it reads value, op, value, (op, value,) `=`, value
//! and the cell just before it is free, so the tail of a longer equation is not counted
//! on its own.

use super::arith::{Operator, Symbol, evaluate_chain};
use super::state::{Axis, Cell, Equation, Grid};

/// Why a grid is not solved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    /// Some number cell has no tile
    Incomplete,
    /// No equation found on the grid
    NoEquations,
    /// This many equations do not hold
    Wrong { count: usize },
}

/// Outcome of a solution check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Solved,
    NotSolved(Shortfall),
}

impl Verdict {
    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self, Verdict::Solved)
    }
}

/// Equation lengths recognized by the scan, longest first
const EQUATION_LENGTHS: [usize; 2] = [7, 5];

/// Every equation on the grid, horizontal ones first, each in row-major order of its origin
pub fn find_equations(grid: &Grid) -> Vec<Equation> {
    let size = grid.size();
    let mut equations = Vec::new();

    for axis in [Axis::Horizontal, Axis::Vertical] {
        for row in 0..size {
            for col in 0..size {
                if let Some(len) = EQUATION_LENGTHS
                    .into_iter()
                    .find(|len| matches_pattern(grid, row, col, axis, *len))
                {
                    equations.push(Equation {
                        row,
                        col,
                        axis,
                        len,
                    });
                }
            }
        }
    }
    equations
}

fn matches_pattern(grid: &Grid, row: usize, col: usize, axis: Axis, len: usize) -> bool {
    let (row, col) = (row as isize, col as isize);
    if !grid.is_vacant(axis.step(row, col, -1)) {
        return false;
    }

    (0..len).all(|i| {
        let Some(cell) = grid.at(axis.step(row, col, i as isize)) else {
            return false;
        };
        match cell {
            Cell::Number { .. } | Cell::Result { .. } => i % 2 == 0,
            Cell::Operator {
                symbol: Symbol::Equals,
            } => i == len - 2,
            Cell::Operator {
                symbol: Symbol::Op(_),
            } => i % 2 == 1 && i != len - 2,
            Cell::Empty => false,
        }
    })
}

/// Whether the values currently on the grid satisfy the equation.
/// A missing value never satisfies it.
pub fn equation_holds(grid: &Grid, equation: &Equation) -> bool {
    let mut operands: Vec<i64> = Vec::with_capacity(equation.operand_count());
    let mut operators: Vec<Operator> = Vec::with_capacity(equation.operand_count());
    let mut result = None;

    for (i, (r, c)) in equation.cells().enumerate() {
        let Some(cell) = grid.get(r, c) else {
            return false;
        };
        if i == equation.len - 1 {
            result = cell.current_value();
        } else if i % 2 == 0 {
            match cell.current_value() {
                Some(v) => operands.push(v as i64),
                None => return false,
            }
        } else if let Cell::Operator {
            symbol: Symbol::Op(op),
        } = cell
        {
            operators.push(*op);
        }
    }

    match (result, evaluate_chain(&operands, &operators)) {
        (Some(expected), Some(value)) => value == expected as f64,
        _ => false,
    }
}

/// Recognized equations that do not hold with the current values
pub fn wrong_equations(grid: &Grid) -> Vec<Equation> {
    find_equations(grid)
        .into_iter()
        .filter(|eq| !equation_holds(grid, eq))
        .collect()
}

/// Solved iff every number cell holds a value, at least one equation exists, and all hold
pub fn check_solution(grid: &Grid) -> Verdict {
    let incomplete = grid
        .iter()
        .any(|(_, _, cell)| matches!(cell, Cell::Number { value: None, .. }));
    if incomplete {
        return Verdict::NotSolved(Shortfall::Incomplete);
    }

    let equations = find_equations(grid);
    if equations.is_empty() {
        return Verdict::NotSolved(Shortfall::NoEquations);
    }

    let wrong = equations
        .iter()
        .filter(|eq| !equation_holds(grid, eq))
        .count();
    if wrong > 0 {
        Verdict::NotSolved(Shortfall::Wrong { count: wrong })
    } else {
        Verdict::Solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: u32) -> Cell {
        Cell::Number {
            correct: value,
            value: Some(value),
            fixed: false,
        }
    }

    fn op(op: Operator) -> Cell {
        Cell::Operator {
            symbol: Symbol::Op(op),
        }
    }

    const EQ: Cell = Cell::Operator {
        symbol: Symbol::Equals,
    };

    /// Write cells along an axis starting at (row, col)
    fn write(grid: &mut Grid, row: usize, col: usize, axis: Axis, cells: &[Cell]) {
        for (i, cell) in cells.iter().enumerate() {
            let (r, c) = axis.step(row as isize, col as isize, i as isize);
            grid.set(r as usize, c as usize, *cell);
        }
    }

    #[test]
    fn test_single_equation() {
        let mut grid = Grid::new(9);
        write(
            &mut grid,
            2,
            1,
            Axis::Horizontal,
            &[num(3), op(Operator::Mul), num(4), EQ, Cell::Result { value: 12 }],
        );
        assert_eq!(
            find_equations(&grid),
            vec![Equation {
                row: 2,
                col: 1,
                axis: Axis::Horizontal,
                len: 5
            }]
        );
        assert_eq!(check_solution(&grid), Verdict::Solved);

        grid.set(2, 3, num(5));
        assert_eq!(
            check_solution(&grid),
            Verdict::NotSolved(Shortfall::Wrong { count: 1 })
        );
        assert_eq!(wrong_equations(&grid).len(), 1);
    }

    #[test]
    fn test_incomplete_and_empty() {
        let empty = Grid::new(9);
        assert_eq!(
            check_solution(&empty),
            Verdict::NotSolved(Shortfall::NoEquations)
        );

        let mut grid = Grid::new(9);
        write(
            &mut grid,
            0,
            0,
            Axis::Vertical,
            &[num(3), op(Operator::Add), Cell::number(4), EQ, Cell::Result { value: 7 }],
        );
        assert_eq!(
            check_solution(&grid),
            Verdict::NotSolved(Shortfall::Incomplete)
        );
        assert!(!equation_holds(&grid, &find_equations(&grid)[0]));
    }

    #[test]
    fn test_three_operand_equation() {
        let mut grid = Grid::new(9);
        // 2 + 3 * 4 = 14
        write(
            &mut grid,
            1,
            0,
            Axis::Horizontal,
            &[
                num(2),
                op(Operator::Add),
                num(3),
                op(Operator::Mul),
                num(4),
                EQ,
                Cell::Result { value: 14 },
            ],
        );

        // The trailing "3 * 4 = 14" window is not an equation of its own
        let found = find_equations(&grid);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len, 7);
        assert_eq!(check_solution(&grid), Verdict::Solved);

        grid.set(1, 6, Cell::Result { value: 20 });
        assert!(!check_solution(&grid).is_solved());
    }

    #[test]
    fn test_crossing_equations() {
        let mut grid = Grid::new(9);
        // 6 - 2 = 4 across, and 4 * 2 = 8 down from the shared result
        write(
            &mut grid,
            0,
            0,
            Axis::Horizontal,
            &[num(6), op(Operator::Sub), num(2), EQ, Cell::Result { value: 4 }],
        );
        write(
            &mut grid,
            1,
            4,
            Axis::Vertical,
            &[op(Operator::Mul), num(2), EQ, Cell::Result { value: 8 }],
        );

        let found = find_equations(&grid);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].axis, Axis::Vertical);
        assert_eq!((found[1].row, found[1].col), (0, 4));
        assert_eq!(check_solution(&grid), Verdict::Solved);

        // Shared cell as a number the player fills
        grid.set(0, 4, num(4));
        assert_eq!(check_solution(&grid), Verdict::Solved);
    }

    #[test]
    fn test_broken_patterns_ignored() {
        let mut grid = Grid::new(9);
        // Missing '=' and a dangling operator
        write(
            &mut grid,
            0,
            0,
            Axis::Horizontal,
            &[num(1), op(Operator::Add), num(1), op(Operator::Add), Cell::Result { value: 2 }],
        );
        write(&mut grid, 3, 0, Axis::Horizontal, &[num(1), op(Operator::Add), num(1), EQ]);
        assert!(find_equations(&grid).is_empty());
    }

    #[test]
    fn test_division_must_be_exact() {
        let mut grid = Grid::new(9);
        write(
            &mut grid,
            0,
            0,
            Axis::Horizontal,
            &[num(7), op(Operator::Div), num(2), EQ, Cell::Result { value: 3 }],
        );
        assert!(!check_solution(&grid).is_solved());
    }
}
