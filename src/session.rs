//! One game session
//!
//! Holds the level, difficulty and current puzzle, and applies the player's events to them.
//! Front ends own a `Session` and persist it after every change.

use serde::{Deserialize, Serialize};

use crate::puzzle::{
    GenerationError, MoveError, Puzzle, Verdict, check_solution, generate_puzzle,
};
use crate::tuning::Difficulty;

/// Current game: which level, which difficulty, which puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Run seed; every puzzle seed is derived from it
    pub seed: u64,
    /// Puzzles generated in this run
    games: u64,
    pub level: u32,
    pub difficulty: Difficulty,
    pub puzzle: Puzzle,
    /// Outcome of the last check, reset by any move
    #[serde(default)]
    solved: bool,
}

impl Session {
    /// Start a run with its first puzzle
    pub fn new(level: u32, difficulty: Difficulty, seed: u64) -> Result<Self, GenerationError> {
        let puzzle = generate_puzzle(level, difficulty, puzzle_seed(seed, 0))?;
        Ok(Self {
            seed,
            games: 1,
            level,
            difficulty,
            puzzle,
            solved: false,
        })
    }

    /// Whether the last check found the puzzle solved
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Fresh puzzle, same level and difficulty
    pub fn new_game(&mut self) -> Result<(), GenerationError> {
        self.regenerate(self.level, self.difficulty)
    }

    pub fn next_level(&mut self) -> Result<(), GenerationError> {
        self.regenerate(self.level.saturating_add(1), self.difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GenerationError> {
        self.regenerate(self.level, difficulty)
    }

    /// Replace the puzzle; on failure the current one stays
    fn regenerate(&mut self, level: u32, difficulty: Difficulty) -> Result<(), GenerationError> {
        let seed = puzzle_seed(self.seed, self.games);
        self.games += 1;

        let puzzle = generate_puzzle(level, difficulty, seed)?;
        self.level = level;
        self.difficulty = difficulty;
        self.puzzle = puzzle;
        self.solved = false;
        Ok(())
    }

    pub fn place_tile(&mut self, value: u32, row: usize, col: usize) -> Result<Option<u32>, MoveError> {
        let previous = self.puzzle.place_tile(value, row, col)?;
        self.solved = false;
        Ok(previous)
    }

    pub fn clear_tile(&mut self, row: usize, col: usize) -> Result<u32, MoveError> {
        let value = self.puzzle.clear_tile(row, col)?;
        self.solved = false;
        Ok(value)
    }

    pub fn check(&mut self) -> Verdict {
        let verdict = check_solution(&self.puzzle.grid);
        self.solved = verdict.is_solved();
        log::info!("Check on level {}: {:?}", self.level, verdict);
        verdict
    }
}

/// Seed of the `game`-th puzzle of a run
fn puzzle_seed(run_seed: u64, game: u64) -> u64 {
    game.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(run_seed)
}
