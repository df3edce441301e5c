//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Any `Storage` backend (files, LocalStorage, memory)
//! - Corruption detection: a restored puzzle must hold exactly its own tiles

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GRID_SIZE;
use crate::platform::{Storage, StorageError};
use crate::session::Session;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Storage key of the in-progress session
pub const SESSION_KEY: &str = "math_crossword_session";
/// Storage key of the player's settings
pub const SETTINGS_KEY: &str = "math_crossword_settings";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid save JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {found} (expected {SAVE_VERSION})")]
    UnsupportedVersion { found: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("corrupt save: {0}")]
    Corrupt(String),
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Wrap `data` in a versioned envelope
pub fn encode<T: Serialize>(data: &T) -> Result<String, PersistError> {
    let envelope = Envelope {
        version: SAVE_VERSION,
        data,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Unwrap a versioned envelope, rejecting other versions
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, PersistError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(json)?;
    if envelope.version != SAVE_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: envelope.version,
        });
    }
    Ok(serde_json::from_value(envelope.data)?)
}

pub fn save_session(storage: &dyn Storage, session: &Session) -> Result<(), PersistError> {
    let json = encode(session)?;
    storage.write(SESSION_KEY, &json)?;
    log::debug!("Session saved ({} bytes)", json.len());
    Ok(())
}

/// `Ok(None)` when there is no saved session
pub fn load_session(storage: &dyn Storage) -> Result<Option<Session>, PersistError> {
    let Some(json) = storage.read(SESSION_KEY)? else {
        return Ok(None);
    };
    let session: Session = decode(&json)?;

    let puzzle = &session.puzzle;
    if puzzle.grid.size() != GRID_SIZE || puzzle.grid.iter().count() != GRID_SIZE * GRID_SIZE {
        return Err(PersistError::Corrupt(format!(
            "grid is not {GRID_SIZE}x{GRID_SIZE}"
        )));
    }
    if !puzzle.is_consistent() {
        return Err(PersistError::Corrupt(
            "pool does not match the empty cells".to_string(),
        ));
    }
    if !puzzle.tiles_match_solution() {
        return Err(PersistError::Corrupt(
            "tiles do not match the puzzle's numbers".to_string(),
        ));
    }

    log::info!(
        "Restored level {} ({}) with {} tiles in the pool",
        session.level,
        session.difficulty,
        puzzle.pool.len()
    );
    Ok(Some(session))
}

pub fn clear_session(storage: &dyn Storage) -> Result<(), PersistError> {
    storage.remove(SESSION_KEY)?;
    Ok(())
}

/// Save and log any failure; the game carries on either way
pub fn autosave(storage: &dyn Storage, session: &Session) {
    if let Err(e) = save_session(storage, session) {
        log::warn!("Autosave failed: {e}");
    }
}
