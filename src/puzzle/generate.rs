//! Puzzle generation
//!
//! Grows a tree of chained equations from the first one: each new equation crosses an
//! existing operand or result at a right angle. Then splits the numbers into fixed hints
//! and a shuffled pool.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use super::placer::try_place_equation;
use super::state::{Axis, Cell, DisplayWindow, Equation, Grid, Pool, Puzzle, SeedNode};
use crate::consts::*;
use crate::tuning::{Difficulty, Tuning};

/// Generation failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no puzzle could be generated after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Generate a puzzle; the same seed always yields the same puzzle
pub fn generate_puzzle(
    level: u32,
    difficulty: Difficulty,
    seed: u64,
) -> Result<Puzzle, GenerationError> {
    let mut rng = Pcg32::seed_from_u64(seed);
    generate_with_rng(level, difficulty, seed, &mut rng)
}

/// Generate a puzzle from an explicit random source. `seed` is only recorded.
pub fn generate_with_rng<R: Rng + ?Sized>(
    level: u32,
    difficulty: Difficulty,
    seed: u64,
    rng: &mut R,
) -> Result<Puzzle, GenerationError> {
    let tuning = Tuning::new(level, difficulty);

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let Some((mut grid, equations)) = build_grid(&tuning, rng) else {
            log::debug!("Generation attempt {attempt} placed no equations, retrying");
            continue;
        };

        let window = compute_window(&grid);
        let pool = assign_hints(&mut grid, tuning.hint_percent, rng);

        log::info!(
            "Level {} ({}): {}/{} equations, {} tiles in pool, window {}x{}",
            level,
            difficulty,
            equations.len(),
            tuning.target_equations,
            pool.len(),
            window.rows,
            window.cols
        );

        return Ok(Puzzle {
            level,
            difficulty,
            seed,
            grid,
            pool,
            window,
            equations,
        });
    }

    log::warn!("Giving up on level {level} ({difficulty}) after {MAX_GENERATION_ATTEMPTS} attempts");
    Err(GenerationError::Exhausted {
        attempts: MAX_GENERATION_ATTEMPTS,
    })
}

/// One generation pass. `None` when not even the first equation could be placed.
fn build_grid<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Option<(Grid, Vec<Equation>)> {
    let mut grid = Grid::new(GRID_SIZE);
    let mut seeds: Vec<SeedNode> = Vec::new();
    let mut equations: Vec<Equation> = Vec::new();

    let axis = if rng.random_bool(0.5) {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    match try_place_equation(
        &mut grid,
        FIRST_ROW as isize,
        FIRST_COL as isize,
        axis,
        None,
        tuning,
        rng,
    ) {
        Ok(placement) => {
            seeds.extend(placement.seeds);
            equations.push(placement.equation);
        }
        Err(rejection) => log::trace!("First equation rejected: {rejection:?}"),
    }

    let mut attempts = 0;
    while (equations.len() as u32) < tuning.target_equations && attempts < MAX_PLACEMENT_ATTEMPTS
    {
        attempts += 1;

        let Some(seed) = seeds.choose(rng).copied() else {
            log::debug!("Seed pool exhausted after {attempts} attempts");
            break;
        };
        let Some(&offset) = tuning.seed_offsets().choose(rng) else {
            break;
        };

        let axis = seed.axis.perpendicular();
        let (row, col) = axis.step(seed.row as isize, seed.col as isize, offset);

        match try_place_equation(&mut grid, row, col, axis, Some(&seed), tuning, rng) {
            Ok(placement) => {
                seeds.extend(placement.seeds);
                equations.push(placement.equation);
            }
            Err(rejection) => log::trace!(
                "Branch from ({}, {}) at offset {offset} rejected: {rejection:?}",
                seed.row,
                seed.col
            ),
        }
    }

    log::debug!(
        "Placed {} of {} equations in {} branch attempts",
        equations.len(),
        tuning.target_equations,
        attempts
    );

    if equations.is_empty() {
        None
    } else {
        Some((grid, equations))
    }
}

/// Bounding box of all non-empty cells plus one cell of padding, clamped to the grid
pub fn compute_window(grid: &Grid) -> DisplayWindow {
    let size = grid.size();
    let mut bounds: Option<(usize, usize, usize, usize)> = None;

    for (r, c, cell) in grid.iter() {
        if cell.is_empty() {
            continue;
        }
        bounds = Some(match bounds {
            None => (r, r, c, c),
            Some((min_r, max_r, min_c, max_c)) => {
                (min_r.min(r), max_r.max(r), min_c.min(c), max_c.max(c))
            }
        });
    }

    let Some((min_r, max_r, min_c, max_c)) = bounds else {
        return DisplayWindow::full(size);
    };

    let start_row = min_r.saturating_sub(1);
    let start_col = min_c.saturating_sub(1);
    DisplayWindow {
        start_row,
        start_col,
        rows: (size - start_row).min(max_r - start_row + 2),
        cols: (size - start_col).min(max_c - start_col + 2),
    }
}

/// Turn `hint_percent` of the number cells into fixed hints and return the rest as the pool
pub fn assign_hints<R: Rng + ?Sized>(grid: &mut Grid, hint_percent: u32, rng: &mut R) -> Pool {
    let mut numbers: Vec<(usize, usize)> = grid
        .iter()
        .filter(|(_, _, cell)| matches!(cell, Cell::Number { .. }))
        .map(|(r, c, _)| (r, c))
        .collect();
    numbers.shuffle(rng);

    let hint_count = numbers.len() * hint_percent.min(100) as usize / 100;
    let mut tiles = Vec::with_capacity(numbers.len() - hint_count);

    for (i, (r, c)) in numbers.into_iter().enumerate() {
        if let Some(Cell::Number {
            correct,
            value,
            fixed,
        }) = grid.get_mut(r, c)
        {
            if i < hint_count {
                *fixed = true;
                *value = Some(*correct);
            } else {
                *fixed = false;
                *value = None;
                tiles.push(*correct);
            }
        }
    }

    tiles.shuffle(rng);
    Pool::from_vec(tiles)
}
