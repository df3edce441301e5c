//! Plain-text rendering
//!
//! Draws the display window of a puzzle with absolute grid coordinates, so the numbers in
//! the headers are the ones `place` and `clear` take. Empty number cells show `_`, fixed
//! hints are bracketed.

use std::fmt::Write;

use crate::puzzle::{Cell, Pool, Puzzle, Shortfall, Verdict};
use crate::session::Session;

/// Width of one rendered cell
const CELL_WIDTH: usize = 5;

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number {
            value: Some(v),
            fixed: true,
            ..
        } => format!("[{v}]"),
        Cell::Number { value: Some(v), .. } => v.to_string(),
        Cell::Number { value: None, .. } => "_".to_string(),
        Cell::Operator { symbol } => symbol.to_string(),
        Cell::Result { value } => value.to_string(),
    }
}

pub fn render_grid(puzzle: &Puzzle) -> String {
    let w = puzzle.window;
    let mut out = String::new();

    let _ = write!(out, "{:>3}", "");
    for col in w.start_col..w.start_col + w.cols {
        let _ = write!(out, "{col:>CELL_WIDTH$}");
    }
    out.push('\n');

    for row in w.start_row..w.start_row + w.rows {
        let _ = write!(out, "{row:>3}");
        for col in w.start_col..w.start_col + w.cols {
            let text = puzzle.grid.get(row, col).map(cell_text).unwrap_or_default();
            let _ = write!(out, "{text:>CELL_WIDTH$}");
        }
        // keep lines free of trailing blanks
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

pub fn render_pool(pool: &Pool) -> String {
    if pool.is_empty() {
        return "Pool: (empty)".to_string();
    }
    let tiles: Vec<String> = pool.iter().map(u32::to_string).collect();
    format!("Pool: {}", tiles.join(" "))
}

pub fn render_verdict(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Solved => "Solved!".to_string(),
        Verdict::NotSolved(Shortfall::Incomplete) => "Not solved: fill every empty cell first".to_string(),
        Verdict::NotSolved(Shortfall::NoEquations) => "Not solved: no equations on the grid".to_string(),
        Verdict::NotSolved(Shortfall::Wrong { count: 1 }) => "Not solved: 1 equation is wrong".to_string(),
        Verdict::NotSolved(Shortfall::Wrong { count }) => format!("Not solved: {count} equations are wrong"),
    }
}

/// One-line summary: level, difficulty, tiles left
pub fn render_status(session: &Session) -> String {
    format!(
        "Level {} | {} | {} tiles left",
        session.level,
        session.difficulty,
        session.puzzle.pool.len()
    )
}
