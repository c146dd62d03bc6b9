//! Persisted user preferences
//!
//! Preferences live as one JSON blob under a well-known key in an on-disk
//! fjall keyspace. [`PreferencesContext`] owns the loaded value: it is loaded
//! once at startup, handed to whatever needs it, and written back on every
//! change.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use fjall::Keyspace;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task;
use tracing::{debug, info, warn};

use crate::error::PeakcisionError;
use crate::finder::ANY;

/// Key the preferences blob is stored under
pub const SETTINGS_KEY: &str = "peakcision:settings";

const KEYSPACE: &str = "preferences";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

impl FromStr for Theme {
    type Err = PeakcisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PeakcisionError::validation(format!(
                "unknown theme '{other}', expected light or dark"
            ))),
        }
    }
}

impl FromStr for Density {
    type Err = PeakcisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comfortable" => Ok(Density::Comfortable),
            "compact" => Ok(Density::Compact),
            other => Err(PeakcisionError::validation(format!(
                "unknown density '{other}', expected comfortable or compact"
            ))),
        }
    }
}

/// UI preferences. Missing fields fall back to their defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub density: Density,
    pub reduce_motion: bool,
    pub default_region: String,
    pub default_pass: String,
    pub initials: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            density: Density::Comfortable,
            reduce_motion: false,
            default_region: ANY.to_string(),
            default_pass: ANY.to_string(),
            initials: "AL".to_string(),
        }
    }
}

impl UserPreferences {
    /// Parses a stored blob, falling back to defaults when it is malformed
    #[must_use]
    pub fn from_stored(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Stored preferences are malformed, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Overlays the fields present in a JSON object onto a copy of `self`
    pub fn merged(&self, patch: &serde_json::Value) -> Result<Self, PeakcisionError> {
        let serde_json::Value::Object(fields) = patch else {
            return Err(PeakcisionError::validation("preferences must be a JSON object"));
        };
        let mut current = serde_json::to_value(self)
            .map_err(|e| PeakcisionError::preferences(e.to_string()))?;
        if let serde_json::Value::Object(target) = &mut current {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(current)
            .map_err(|e| PeakcisionError::validation(format!("invalid preferences: {e}")))
    }

    pub fn apply(&mut self, update: PreferenceUpdate) {
        match update {
            PreferenceUpdate::Theme(theme) => self.theme = theme,
            PreferenceUpdate::Density(density) => self.density = density,
            PreferenceUpdate::ReduceMotion(reduce) => self.reduce_motion = reduce,
            PreferenceUpdate::DefaultRegion(region) => self.default_region = region,
            PreferenceUpdate::DefaultPass(pass) => self.default_pass = pass,
            PreferenceUpdate::Initials(initials) => self.initials = initials,
        }
    }
}

/// A change to a single preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceUpdate {
    Theme(Theme),
    Density(Density),
    ReduceMotion(bool),
    DefaultRegion(String),
    DefaultPass(String),
    Initials(String),
}

impl PreferenceUpdate {
    pub const KEYS: [&'static str; 6] = [
        "theme",
        "density",
        "reduceMotion",
        "defaultRegion",
        "defaultPass",
        "initials",
    ];

    /// Parses `key=value` input. Keys may be given in camelCase, snake_case
    /// or kebab-case.
    pub fn parse(key: &str, value: &str) -> Result<Self, PeakcisionError> {
        let normalized: String = key
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let value = value.trim();

        match normalized.as_str() {
            "theme" => Ok(Self::Theme(value.parse()?)),
            "density" => Ok(Self::Density(value.parse()?)),
            "reducemotion" => value.parse::<bool>().map(Self::ReduceMotion).map_err(|_| {
                PeakcisionError::validation(format!(
                    "reduceMotion must be true or false, got '{value}'"
                ))
            }),
            "defaultregion" => Ok(Self::DefaultRegion(non_empty_or_any(value))),
            "defaultpass" => Ok(Self::DefaultPass(non_empty_or_any(value))),
            "initials" => {
                if value.is_empty() {
                    Err(PeakcisionError::validation("initials cannot be empty"))
                } else {
                    Ok(Self::Initials(value.to_string()))
                }
            }
            _ => Err(PeakcisionError::validation(format!(
                "unknown preference '{key}', expected one of: {}",
                Self::KEYS.join(", ")
            ))),
        }
    }
}

fn non_empty_or_any(value: &str) -> String {
    if value.is_empty() {
        ANY.to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for UserPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let theme = match self.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        let density = match self.density {
            Density::Comfortable => "comfortable",
            Density::Compact => "compact",
        };
        writeln!(f, "theme          {theme}")?;
        writeln!(f, "density        {density}")?;
        writeln!(f, "reduceMotion   {}", self.reduce_motion)?;
        writeln!(f, "defaultRegion  {}", self.default_region)?;
        writeln!(f, "defaultPass    {}", self.default_pass)?;
        write!(f, "initials       {}", self.initials)
    }
}

/// On-disk key-value store holding the preferences blob
#[derive(Clone)]
pub struct PreferencesStore {
    store: Keyspace,
}

fn settings_key() -> Vec<u8> {
    SETTINGS_KEY.as_bytes().to_vec()
}

fn read_blob(store: Keyspace) -> Result<Option<Vec<u8>>> {
    Ok(store.get(settings_key())?.map(|v| v.to_vec()))
}

impl PreferencesStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = fjall::Database::builder(path)
            .open()
            .with_context(|| format!("Failed to open preferences store at {}", path.display()))?;
        let store = db.keyspace(KEYSPACE, fjall::KeyspaceCreateOptions::default)?;
        Ok(Self { store })
    }

    #[tracing::instrument(name = "read_preferences", level = "debug", skip(self))]
    pub async fn read(&self) -> Result<Option<Vec<u8>>> {
        let store = self.store.clone();
        task::spawn_blocking(move || read_blob(store)).await?
    }

    #[tracing::instrument(name = "write_preferences", level = "debug", skip(self, prefs))]
    pub async fn write(&self, prefs: &UserPreferences) -> Result<()> {
        let bytes = serde_json::to_vec(prefs)?;
        let store = self.store.clone();
        task::spawn_blocking(move || store.insert(settings_key(), bytes)).await??;
        Ok(())
    }

    /// Writes raw bytes under the settings key
    pub async fn write_raw(&self, bytes: Vec<u8>) -> Result<()> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.insert(settings_key(), bytes)).await??;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(settings_key())).await??;
        Ok(())
    }
}

/// Loaded preferences plus the store they are saved to
#[derive(Clone)]
pub struct PreferencesContext {
    store: Option<PreferencesStore>,
    current: Arc<RwLock<UserPreferences>>,
}

impl PreferencesContext {
    /// Loads preferences from `store`. Absent, unreadable or malformed data
    /// yields the defaults.
    pub async fn load(store: PreferencesStore) -> Self {
        let prefs = match store.read().await {
            Ok(Some(bytes)) => UserPreferences::from_stored(&bytes),
            Ok(None) => {
                debug!("No stored preferences, using defaults");
                UserPreferences::default()
            }
            Err(e) => {
                warn!("Failed to read stored preferences, using defaults: {}", e);
                UserPreferences::default()
            }
        };
        Self {
            store: Some(store),
            current: Arc::new(RwLock::new(prefs)),
        }
    }

    /// A context that never persists
    #[must_use]
    pub fn in_memory(prefs: UserPreferences) -> Self {
        Self {
            store: None,
            current: Arc::new(RwLock::new(prefs)),
        }
    }

    pub async fn get(&self) -> UserPreferences {
        self.current.read().await.clone()
    }

    /// Applies one change and saves. A failed save is logged and the
    /// in-memory value is kept.
    pub async fn set(&self, update: PreferenceUpdate) -> UserPreferences {
        let mut current = self.current.write().await;
        debug!(?update, "Updating preference");
        current.apply(update);
        self.save(&current).await;
        current.clone()
    }

    /// Overlays a JSON object on the current record and saves. Holds the
    /// write lock from read through save.
    pub async fn merge(&self, patch: &serde_json::Value) -> Result<UserPreferences, PeakcisionError> {
        let mut current = self.current.write().await;
        let merged = current.merged(patch)?;
        *current = merged;
        self.save(&current).await;
        Ok(current.clone())
    }

    /// Replaces the whole record and saves
    pub async fn replace(&self, prefs: UserPreferences) -> UserPreferences {
        let mut current = self.current.write().await;
        *current = prefs;
        self.save(&current).await;
        current.clone()
    }

    /// Restores the defaults and saves
    pub async fn reset(&self) -> UserPreferences {
        info!("Resetting preferences to defaults");
        self.replace(UserPreferences::default()).await
    }

    async fn save(&self, prefs: &UserPreferences) {
        if let Some(store) = &self.store
            && let Err(e) = store.write(prefs).await
        {
            warn!("Failed to save preferences: {}", e);
        }
    }
}
