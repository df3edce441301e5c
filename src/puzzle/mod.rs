//! Deterministic puzzle module
//!
//! All puzzle logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in by the caller
//! - Stable scan order (row-major, horizontal before vertical)
//! - No rendering, storage or platform dependencies

pub mod arith;
pub mod generate;
pub mod moves;
pub mod placer;
pub mod state;
pub mod validate;

pub use arith::{Operator, Symbol, evaluate2, evaluate3};
pub use generate::{GenerationError, generate_puzzle, generate_with_rng};
pub use moves::MoveError;
pub use placer::{Rejection, try_place_equation};
pub use state::{Axis, Cell, DisplayWindow, Equation, Grid, Pool, Puzzle, SeedNode};
pub use validate::{Shortfall, Verdict, check_solution, find_equations, wrong_equations};
