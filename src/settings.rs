//! User preferences and the stores that persist them
//!
//! The generator never reads preferences from global state. Callers inject a
//! [`PreferencesStore`] and pass the loaded [`Preferences`] into
//! [`StyleConfiguration::new`](crate::style::StyleConfiguration::new).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving preferences
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access preferences file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse preferences TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Raw style toggles chosen by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub is_bold: bool,
    pub is_vivid: bool,
    pub is_italic: bool,
}

pub type PreferencesListener = Box<dyn Fn(&Preferences)>;

/// Get/set capability over persisted preferences
pub trait PreferencesStore {
    fn load_preferences(&self) -> Result<Preferences, SettingsError>;

    /// Persist `preferences`, notifying listeners only if the stored value changed
    fn save_preferences(&mut self, preferences: Preferences) -> Result<(), SettingsError>;

    fn on_preferences_changed(&mut self, listener: PreferencesListener);
}

/// Listener registry shared by the store implementations
#[derive(Default)]
struct Listeners(Vec<PreferencesListener>);

impl Listeners {
    fn notify(&self, preferences: &Preferences) {
        for listener in &self.0 {
            listener(preferences);
        }
    }
}

/// Store that keeps preferences in memory only
#[derive(Default)]
pub struct MemoryStore {
    current: Preferences,
    listeners: Listeners,
}

impl MemoryStore {
    pub fn new(initial: Preferences) -> Self {
        Self {
            current: initial,
            listeners: Listeners::default(),
        }
    }
}

impl PreferencesStore for MemoryStore {
    fn load_preferences(&self) -> Result<Preferences, SettingsError> {
        Ok(self.current)
    }

    fn save_preferences(&mut self, preferences: Preferences) -> Result<(), SettingsError> {
        if self.current != preferences {
            self.current = preferences;
            self.listeners.notify(&self.current);
        }
        Ok(())
    }

    fn on_preferences_changed(&mut self, listener: PreferencesListener) {
        self.listeners.0.push(listener);
    }
}

/// Store backed by a TOML file; a missing file reads as the defaults
pub struct FileStore {
    path: PathBuf,
    listeners: Listeners,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listeners: Listeners::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesStore for FileStore {
    fn load_preferences(&self) -> Result<Preferences, SettingsError> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn save_preferences(&mut self, preferences: Preferences) -> Result<(), SettingsError> {
        if self.load_preferences()? == preferences {
            return Ok(());
        }
        let content = toml::to_string(&preferences)?;
        std::fs::write(&self.path, content).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.listeners.notify(&preferences);
        Ok(())
    }

    fn on_preferences_changed(&mut self, listener: PreferencesListener) {
        self.listeners.0.push(listener);
    }
}
