//! Placement of a single equation
//!
//! An equation is `len` cells along one axis: value, operator, value, ..., `=`, result.
//! Placement either commits every cell or leaves the grid untouched.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::arith::{Operator, Symbol, as_positive_integer, evaluate_chain};
use super::state::{Axis, Cell, Equation, Grid, SeedNode};
use crate::consts::MAX_SYNTHESIS_ATTEMPTS;
use crate::tuning::Tuning;

/// Why a placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Span leaves the grid
    OutOfBounds,
    /// Seed is not inside the span
    SeedOutsideSpan,
    /// Seed would sit on an operator position
    SeedOnOperator,
    /// A non-seed cell of the span is taken
    Collision,
    /// A non-seed cell touches another equation, or an end of the span is not free
    Crowded,
    /// No value assignment found within the attempt budget
    NoValues,
}

/// A committed equation and the value cells it offers for branching
#[derive(Debug, Clone)]
pub struct Placement {
    pub equation: Equation,
    pub seeds: Vec<SeedNode>,
}

/// Try to place one equation of `tuning.equation_len` cells starting at (row, col).
///
/// With a seed, the seed cell must fall on a value position of the new equation; it keeps
/// its current cell and constrains the operand or result there to the seed's value.
pub fn try_place_equation<R: Rng + ?Sized>(
    grid: &mut Grid,
    row: isize,
    col: isize,
    axis: Axis,
    seed: Option<&SeedNode>,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<Placement, Rejection> {
    let len = tuning.equation_len;
    let last = len as isize - 1;

    if !grid.in_bounds((row, col)) || !grid.in_bounds(axis.step(row, col, last)) {
        return Err(Rejection::OutOfBounds);
    }

    let seed_index = check_span(grid, row, col, axis, len, seed)?;
    check_isolation(grid, row, col, axis, len, seed_index)?;

    let seed_value = seed.map(|s| s.value);
    let (operands, operators, result) =
        synthesize(len, seed_index, seed_value, tuning, rng).ok_or(Rejection::NoValues)?;

    // Commit
    let mut seeds = Vec::with_capacity(operands.len() + 1);
    for i in 0..len {
        let (r, c) = axis.step(row, col, i as isize);
        let (r, c) = (r as usize, c as usize);

        let value = if i == len - 1 {
            Some(result)
        } else if i % 2 == 0 {
            Some(operands[i / 2])
        } else {
            None
        };

        if let Some(value) = value {
            seeds.push(SeedNode {
                row: r,
                col: c,
                value,
                axis,
            });
        }

        // A shared operand keeps its cell; a shared answer becomes a visible result
        if seed_index == Some(i) && i != len - 1 {
            continue;
        }

        let cell = match value {
            Some(v) if i == len - 1 => Cell::Result { value: v },
            Some(v) => Cell::number(v),
            None if i == len - 2 => Cell::Operator {
                symbol: Symbol::Equals,
            },
            None => Cell::Operator {
                symbol: Symbol::Op(operators[i / 2]),
            },
        };
        grid.set(r, c, cell);
    }

    log::trace!(
        "Placed {:?} equation at ({}, {}): {:?} {:?} = {}",
        axis,
        row,
        col,
        operands,
        operators,
        result
    );

    Ok(Placement {
        equation: Equation {
            row: row as usize,
            col: col as usize,
            axis,
            len,
        },
        seeds,
    })
}

/// Every span cell must be empty except the seed, which must sit on a value position.
/// Returns the seed's index in the span.
fn check_span(
    grid: &Grid,
    row: isize,
    col: isize,
    axis: Axis,
    len: usize,
    seed: Option<&SeedNode>,
) -> Result<Option<usize>, Rejection> {
    let mut seed_index = None;
    for i in 0..len {
        let pos = axis.step(row, col, i as isize);
        if seed.is_some_and(|s| pos == (s.row as isize, s.col as isize)) {
            if i % 2 != 0 {
                return Err(Rejection::SeedOnOperator);
            }
            seed_index = Some(i);
            continue;
        }
        if !grid.is_vacant(pos) {
            return Err(Rejection::Collision);
        }
    }

    if seed.is_some() && seed_index.is_none() {
        return Err(Rejection::SeedOutsideSpan);
    }
    Ok(seed_index)
}

/// Non-seed cells need free perpendicular neighbors, and both ends of the span need a free
/// cell beyond them, so no two equations touch except through a shared seed.
fn check_isolation(
    grid: &Grid,
    row: isize,
    col: isize,
    axis: Axis,
    len: usize,
    seed_index: Option<usize>,
) -> Result<(), Rejection> {
    let side = axis.perpendicular();
    for i in (0..len).filter(|i| Some(*i) != seed_index) {
        let (r, c) = axis.step(row, col, i as isize);
        if !grid.is_vacant(side.step(r, c, 1)) || !grid.is_vacant(side.step(r, c, -1)) {
            return Err(Rejection::Crowded);
        }
    }

    if !grid.is_vacant(axis.step(row, col, -1)) || !grid.is_vacant(axis.step(row, col, len as isize))
    {
        return Err(Rejection::Crowded);
    }
    Ok(())
}

/// Draw operands and operators until the chain evaluates to an acceptable result.
///
/// Span position `2k` is operand `k`; the last position is the result.
fn synthesize<R: Rng + ?Sized>(
    len: usize,
    seed_index: Option<usize>,
    seed_value: Option<u32>,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<(Vec<u32>, Vec<Operator>, u32)> {
    let operand_count = (len - 1) / 2;
    let result_index = len - 1;
    let fixed_result = match seed_index {
        Some(i) if i == result_index => seed_value,
        _ => None,
    };

    for _ in 0..MAX_SYNTHESIS_ATTEMPTS {
        let mut operands = Vec::with_capacity(operand_count);
        for k in 0..operand_count {
            let value = match (seed_index, seed_value) {
                (Some(i), Some(v)) if i == 2 * k => v,
                _ => rng.random_range(1..=tuning.max_number),
            };
            operands.push(value);
        }

        let mut operators = Vec::with_capacity(operand_count - 1);
        for _ in 1..operand_count {
            operators.push(*tuning.operators.choose(rng)?);
        }

        let values: Vec<i64> = operands.iter().map(|v| *v as i64).collect();
        let Some(result) = evaluate_chain(&values, &operators)
            .and_then(|value| as_positive_integer(value, tuning.result_cap))
        else {
            continue;
        };

        match fixed_result {
            Some(expected) if expected != result => continue,
            _ => return Some((operands, operators, result)),
        }
    }
    None
}
