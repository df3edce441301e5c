//! Player settings and preferences
//!
//! Persisted separately from the session so a "new game" keeps them.

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistError, SETTINGS_KEY, decode, encode};
use crate::platform::Storage;
use crate::tuning::Difficulty;

/// Player settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Difficulty used for new sessions
    pub difficulty: Difficulty,
}

impl Settings {
    /// Load settings, falling back to defaults on any failure
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.read(SETTINGS_KEY) {
            Ok(Some(json)) => match decode(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring saved settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &dyn Storage) {
        let result = encode(self)
            .and_then(|json| storage.write(SETTINGS_KEY, &json).map_err(PersistError::from));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_defaults_when_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());
        assert_eq!(Settings::default().difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let settings = Settings {
            difficulty: Difficulty::Hard,
        };
        settings.save(&storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_defaults_when_corrupt() {
        let storage = MemoryStorage::new();
        storage.write(SETTINGS_KEY, "{\"version\":1,\"data\":{\"difficulty\":\"extreme\"}}").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
