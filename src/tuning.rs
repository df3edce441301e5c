//! Data-driven puzzle balance
//!
//! Everything the generator varies by level or difficulty lives here.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{BASE_EQUATIONS, MAX_EQUATIONS};
use crate::puzzle::Operator;

/// Difficulty levels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "med" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Largest freshly drawn operand
    pub fn max_number(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 50,
        }
    }

    /// Operators the generator may draw
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            Difficulty::Easy => &[Operator::Add, Operator::Sub],
            Difficulty::Medium => &[Operator::Add, Operator::Sub, Operator::Mul],
            Difficulty::Hard => &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div],
        }
    }

    /// Percentage of number cells handed out as fixed hints
    pub fn hint_percent(&self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 20,
            Difficulty::Hard => 0,
        }
    }

    /// Cells per equation: 7 (three operands) on hard, 5 otherwise
    pub fn equation_len(&self) -> usize {
        match self {
            Difficulty::Hard => 7,
            _ => 5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation parameters for one puzzle
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub target_equations: u32,
    pub max_number: u32,
    /// Results above this are rejected during value synthesis
    pub result_cap: u32,
    pub operators: &'static [Operator],
    pub hint_percent: u32,
    pub equation_len: usize,
}

impl Tuning {
    pub fn new(level: u32, difficulty: Difficulty) -> Self {
        let max_number = difficulty.max_number();
        Self {
            target_equations: target_equations(level),
            max_number,
            result_cap: max_number * max_number * 2,
            operators: difficulty.operators(),
            hint_percent: difficulty.hint_percent(),
            equation_len: difficulty.equation_len(),
        }
    }

    /// Offsets of the seed cell relative to the new equation's origin
    pub fn seed_offsets(&self) -> &'static [isize] {
        if self.equation_len == 7 {
            &[0, -2, -4, -6]
        } else {
            &[0, -2, -4]
        }
    }
}

/// Equations to place for a level
pub fn target_equations(level: u32) -> u32 {
    (BASE_EQUATIONS + level / 2).min(MAX_EQUATIONS)
}
