//! Property tests over generated puzzles.
//!
//! 1. Filling the intended values always solves the puzzle
//! 2. Tiles are conserved between the pool and the grid under any move sequence
//! 3. Equations only share value cells
//! 4. Cells owned by a single equation have free perpendicular neighbors
//! 5. Generation is deterministic per seed
//! 6. Every equation ends in a visible result, never a pool tile

use std::collections::HashMap;

use math_crossword::consts::{FIRST_COL, FIRST_ROW};
use math_crossword::puzzle::{
    Cell, Equation, Puzzle, Verdict, check_solution, find_equations, generate_puzzle,
};
use math_crossword::tuning::{Difficulty, target_equations};
use proptest::prelude::*;

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

#[derive(Debug, Clone)]
enum Move {
    /// Pool index, editable cell index
    Place(usize, usize),
    /// Editable cell index
    Clear(usize),
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop_oneof![
        (0usize..64, 0usize..64).prop_map(|(t, c)| Move::Place(t, c)),
        (0usize..64).prop_map(Move::Clear),
    ]
}

fn editable_positions(puzzle: &Puzzle) -> Vec<(usize, usize)> {
    puzzle
        .grid
        .iter()
        .filter(|(_, _, cell)| cell.is_editable())
        .map(|(r, c, _)| (r, c))
        .collect()
}

/// Value of every tile on the grid or in the pool, counted
fn tile_counts(puzzle: &Puzzle) -> HashMap<u32, usize> {
    let mut counts = HashMap::new();
    let on_grid = puzzle.grid.iter().filter_map(|(_, _, cell)| match cell {
        Cell::Number {
            value: Some(v),
            fixed: false,
            ..
        } => Some(*v),
        _ => None,
    });
    for v in on_grid.chain(puzzle.pool.iter().copied()) {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Which equations cover each cell
fn owners(equations: &[Equation]) -> HashMap<(usize, usize), Vec<(usize, usize)>> {
    let mut owners: HashMap<(usize, usize), Vec<(usize, usize)>> = HashMap::new();
    for (e, eq) in equations.iter().enumerate() {
        for (i, pos) in eq.cells().enumerate() {
            owners.entry(pos).or_default().push((e, i));
        }
    }
    owners
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn filling_correct_values_solves(
        seed in any::<u64>(),
        level in 0u32..16,
        difficulty in difficulty_strategy(),
    ) {
        let Ok(mut puzzle) = generate_puzzle(level, difficulty, seed) else {
            return Ok(());
        };
        let cells: Vec<(usize, usize, u32)> = puzzle
            .grid
            .iter()
            .filter_map(|(r, c, cell)| match cell {
                Cell::Number { correct, fixed: false, .. } => Some((r, c, *correct)),
                _ => None,
            })
            .collect();
        for (r, c, v) in cells {
            prop_assert!(puzzle.place_tile(v, r, c).is_ok());
        }
        prop_assert!(puzzle.pool.is_empty());
        prop_assert_eq!(check_solution(&puzzle.grid), Verdict::Solved);
        prop_assert_eq!(find_equations(&puzzle.grid).len(), puzzle.equations.len());
    }

    #[test]
    fn tiles_are_conserved(
        seed in any::<u64>(),
        difficulty in difficulty_strategy(),
        moves in prop::collection::vec(move_strategy(), 0..40),
    ) {
        let Ok(mut puzzle) = generate_puzzle(2, difficulty, seed) else {
            return Ok(());
        };
        let editable = editable_positions(&puzzle);
        let initial = tile_counts(&puzzle);
        prop_assert!(puzzle.is_consistent());

        for m in moves {
            if editable.is_empty() {
                break;
            }
            match m {
                Move::Place(t, c) => {
                    if puzzle.pool.is_empty() {
                        continue;
                    }
                    let value = puzzle.pool.as_slice()[t % puzzle.pool.len()];
                    let (r, c) = editable[c % editable.len()];
                    prop_assert!(puzzle.place_tile(value, r, c).is_ok());
                }
                Move::Clear(c) => {
                    let (r, c) = editable[c % editable.len()];
                    let before = puzzle.clone();
                    if puzzle.clear_tile(r, c).is_err() {
                        prop_assert_eq!(&puzzle, &before);
                    }
                }
            }
            prop_assert!(puzzle.is_consistent());
            prop_assert_eq!(tile_counts(&puzzle), initial.clone());
        }
    }

    #[test]
    fn equations_share_only_value_cells(
        seed in any::<u64>(),
        level in 0u32..16,
        difficulty in difficulty_strategy(),
    ) {
        let Ok(puzzle) = generate_puzzle(level, difficulty, seed) else {
            return Ok(());
        };
        for (pos, owned) in owners(&puzzle.equations) {
            if owned.len() < 2 {
                continue;
            }
            for (_, index) in &owned {
                prop_assert_eq!(index % 2, 0, "shared cell {:?} on an operator position", pos);
            }
            let cell = puzzle.grid.get(pos.0, pos.1);
            prop_assert!(cell.is_some_and(|c| c.is_value_cell()));
        }
    }

    #[test]
    fn single_owner_cells_are_isolated(
        seed in any::<u64>(),
        level in 0u32..16,
        difficulty in difficulty_strategy(),
    ) {
        let Ok(puzzle) = generate_puzzle(level, difficulty, seed) else {
            return Ok(());
        };
        let owners = owners(&puzzle.equations);
        for eq in &puzzle.equations {
            let side = eq.axis.perpendicular();
            for (r, c) in eq.cells() {
                if owners[&(r, c)].len() > 1 {
                    continue;
                }
                for d in [-1, 1] {
                    let neighbor = side.step(r as isize, c as isize, d);
                    prop_assert!(
                        puzzle.grid.is_vacant(neighbor),
                        "cell ({}, {}) touches {:?}", r, c, neighbor
                    );
                }
            }
        }
    }

    #[test]
    fn answers_are_visible_results(
        seed in any::<u64>(),
        level in 0u32..16,
        difficulty in difficulty_strategy(),
    ) {
        let Ok(puzzle) = generate_puzzle(level, difficulty, seed) else {
            return Ok(());
        };
        for eq in &puzzle.equations {
            let (r, c) = eq.result_cell();
            prop_assert!(
                matches!(puzzle.grid.get(r, c), Some(Cell::Result { .. })),
                "answer of {:?} at ({}, {}) is {:?}", eq, r, c, puzzle.grid.get(r, c)
            );
        }
        let answers: Vec<(usize, usize)> =
            puzzle.equations.iter().map(Equation::result_cell).collect();
        let hidden = puzzle
            .grid
            .iter()
            .filter(|(r, c, cell)| cell.is_editable() && answers.contains(&(*r, *c)))
            .count();
        prop_assert_eq!(hidden, 0);
    }

    #[test]
    fn generation_is_deterministic(
        seed in any::<u64>(),
        level in 0u32..16,
        difficulty in difficulty_strategy(),
    ) {
        prop_assert_eq!(
            generate_puzzle(level, difficulty, seed),
            generate_puzzle(level, difficulty, seed)
        );
    }

    #[test]
    fn generated_puzzles_fit_their_tuning(
        seed in any::<u64>(),
        level in 0u32..16,
        difficulty in difficulty_strategy(),
    ) {
        let Ok(puzzle) = generate_puzzle(level, difficulty, seed) else {
            return Ok(());
        };
        prop_assert!(!puzzle.equations.is_empty());
        prop_assert!(puzzle.equations.len() <= target_equations(level) as usize);
        prop_assert_eq!(puzzle.pool.len(), puzzle.editable_cells());
        prop_assert_eq!(
            puzzle.hint_cells(),
            puzzle.number_cells() * difficulty.hint_percent() as usize / 100
        );
        for eq in &puzzle.equations {
            prop_assert_eq!(eq.len, difficulty.equation_len());
            for (r, c) in eq.cells() {
                prop_assert!(puzzle.window.contains(r, c));
            }
        }
        let first = puzzle.equations[0];
        prop_assert_eq!((first.row, first.col), (FIRST_ROW, FIRST_COL));
    }
}

#[test]
fn level_one_easy_scenario() {
    assert_eq!(target_equations(1), 3);
    for seed in 0..20 {
        match generate_puzzle(1, Difficulty::Easy, seed) {
            Ok(puzzle) => {
                assert!(!puzzle.equations.is_empty());
                assert_eq!(puzzle.pool.len(), puzzle.editable_cells());
            }
            Err(e) => assert!(e.to_string().contains("5 attempts")),
        }
    }
}
