//! Browser bindings
//!
//! `WebGame` wraps a session persisted in LocalStorage. Every method returns the full view
//! as JSON so the page can redraw from a single value.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::persistence::{autosave, clear_session, load_session};
use crate::platform::LocalStorage;
use crate::puzzle::{Equation, GenerationError, Puzzle, wrong_equations};
use crate::render::render_verdict;
use crate::{Difficulty, Session, Settings};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Math Crossword starting...");
}

/// What the page needs to draw
#[derive(Serialize)]
struct View<'a> {
    level: u32,
    difficulty: Difficulty,
    solved: bool,
    puzzle: &'a Puzzle,
    /// Equations that do not hold, once the grid is full
    wrong: Vec<Equation>,
    message: Option<String>,
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    settings: Settings,
    storage: LocalStorage,
}

fn random_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    now.rotate_left(32) ^ noise
}

impl WebGame {
    fn view(&self, message: Option<String>) -> Result<String, JsError> {
        let grid = &self.session.puzzle.grid;
        let wrong = if self.session.puzzle.is_filled() {
            wrong_equations(grid)
        } else {
            Vec::new()
        };
        let view = View {
            level: self.session.level,
            difficulty: self.session.difficulty,
            solved: self.session.is_solved(),
            puzzle: &self.session.puzzle,
            wrong,
            message,
        };
        Ok(serde_json::to_string(&view)?)
    }

    fn after_regenerate(&mut self, result: Result<(), GenerationError>) -> Result<String, JsError> {
        let message = result.err().map(|e| format!("{e}; keeping the current puzzle"));
        autosave(&self.storage, &self.session);
        self.view(message)
    }
}

#[wasm_bindgen]
impl WebGame {
    /// Restore the saved session, or start one with the saved difficulty
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsError> {
        let storage = LocalStorage;
        let settings = Settings::load(&storage);

        let restored = load_session(&storage).unwrap_or_else(|e| {
            log::warn!("Discarding saved session: {e}");
            None
        });
        let session = match restored {
            Some(session) => session,
            None => Session::new(0, settings.difficulty, random_seed())?,
        };
        autosave(&storage, &session);

        Ok(WebGame {
            session,
            settings,
            storage,
        })
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        self.view(None)
    }

    pub fn place_tile(&mut self, value: u32, row: usize, col: usize) -> Result<String, JsError> {
        self.session.place_tile(value, row, col)?;
        autosave(&self.storage, &self.session);
        self.view(None)
    }

    pub fn clear_tile(&mut self, row: usize, col: usize) -> Result<String, JsError> {
        self.session.clear_tile(row, col)?;
        autosave(&self.storage, &self.session);
        self.view(None)
    }

    pub fn check(&mut self) -> Result<String, JsError> {
        let verdict = self.session.check();
        autosave(&self.storage, &self.session);
        self.view(Some(render_verdict(&verdict)))
    }

    pub fn new_game(&mut self) -> Result<String, JsError> {
        if let Err(e) = clear_session(&self.storage) {
            log::warn!("Could not discard the saved puzzle: {e}");
        }
        let result = self.session.new_game();
        self.after_regenerate(result)
    }

    /// Only after a solved check
    pub fn next_level(&mut self) -> Result<String, JsError> {
        if !self.session.is_solved() {
            return Err(JsError::new("the puzzle is not solved yet"));
        }
        let result = self.session.next_level();
        self.after_regenerate(result)
    }

    /// `easy`, `medium` or `hard`; also saved as the preference
    pub fn set_difficulty(&mut self, name: &str) -> Result<String, JsError> {
        let difficulty = Difficulty::from_str(name)
            .ok_or_else(|| JsError::new(&format!("unknown difficulty `{name}`")))?;
        self.settings.difficulty = difficulty;
        self.settings.save(&self.storage);
        let result = self.session.set_difficulty(difficulty);
        self.after_regenerate(result)
    }
}
