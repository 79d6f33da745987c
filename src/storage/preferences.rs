//! Lightweight string preferences kept outside the record store.
//!
//! Holds the session marker (email of the signed-in user) and the theme.
//! Values are written through to a small JSON file on every change; without
//! a path they only live in memory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use log::warn;

use crate::constants::{SESSION_EMAIL_KEY, THEME_KEY};
use crate::models::Theme;

pub struct Preferences {
    path: Option<PathBuf>,
    values: Mutex<BTreeMap<String, String>>,
}

impl Preferences {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Mutex::new(BTreeMap::new()),
        }
    }

    /// Load preferences from `path`. A missing file starts out empty.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse preferences file: {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|values| values.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("preferences lock poisoned"))?;
        if values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("preferences lock poisoned"))?;
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create preferences directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(values).context("Failed to serialize preferences")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write preferences file: {}", path.display()))
    }

    /// Email of the user to restore on startup
    pub fn session_email(&self) -> Option<String> {
        self.get(SESSION_EMAIL_KEY).filter(|email| !email.is_empty())
    }

    pub fn set_session_email(&self, email: &str) -> Result<()> {
        self.set(SESSION_EMAIL_KEY, email)
    }

    pub fn clear_session(&self) -> Result<()> {
        self.remove(SESSION_EMAIL_KEY)
    }

    /// Stored theme. Unknown values are ignored.
    pub fn theme(&self) -> Option<Theme> {
        let raw = self.get(THEME_KEY)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!("Ignoring stored theme: {e}");
                None
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.set(THEME_KEY, theme.as_str())
    }
}
