//! Math Crossword - interlocking arithmetic equations on a grid
//!
//! Core modules:
//! - `puzzle`: Deterministic generator, grid model, tile moves and solution check
//! - `tuning`: Difficulty and per-level generation parameters
//! - `session`: One game session (level, difficulty, current puzzle)
//! - `persistence`: Save/load with a versioned JSON envelope
//! - `platform`: Native/browser storage abstraction
//! - `render`: Plain-text rendering of the grid and pool

pub mod persistence;
pub mod platform;
pub mod puzzle;
pub mod render;
pub mod session;
pub mod settings;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use session::Session;
pub use settings::Settings;
pub use tuning::{Difficulty, Tuning};

/// Game configuration constants
pub mod consts {
    /// Side of the square generation workspace
    pub const GRID_SIZE: usize = 13;

    /// Full regenerations before giving up
    pub const MAX_GENERATION_ATTEMPTS: u32 = 5;
    /// Branch placement attempts per generation
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 400;
    /// Value assignments tried per placement
    pub const MAX_SYNTHESIS_ATTEMPTS: u32 = 20;

    /// Origin of the first equation (near the center, room for 7 cells either way)
    pub const FIRST_ROW: usize = GRID_SIZE / 2;
    pub const FIRST_COL: usize = GRID_SIZE / 2 - 2;

    /// Equations per puzzle: 3 at level 0-1, one more every two levels
    pub const BASE_EQUATIONS: u32 = 3;
    /// Upper bound so the puzzle still fits a phone screen
    pub const MAX_EQUATIONS: u32 = 7;
}
