//! Persisted launch settings.
//!
//! Holds the single "has completed onboarding" flag in `settings.json` under
//! the config directory. Read once at launch, written once when the unlock
//! gesture completes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub has_completed_onboarding: bool,
}

#[derive(Debug)]
pub struct OnboardingStore {
    path: PathBuf,
    settings: Settings,
}

impl OnboardingStore {
    /// Read the settings file in `config_dir`.
    ///
    /// A missing file means onboarding has not been completed. An unreadable
    /// or corrupt file is logged and treated the same way.
    pub fn open(config_dir: &Path) -> Self {
        let path = config_dir.join(SETTINGS_FILE);
        let settings = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed settings at {}: {}", path.display(), e);
                Settings::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                tracing::warn!("Failed to read settings at {}: {}", path.display(), e);
                Settings::default()
            }
        };

        Self { path, settings }
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.settings.has_completed_onboarding
    }

    /// Record that onboarding finished. Writes only on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be written.
    pub fn mark_completed(&mut self) -> Result<(), SettingsError> {
        if self.settings.has_completed_onboarding {
            return Ok(());
        }

        let updated = Settings {
            has_completed_onboarding: true,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&updated)?)?;
        self.settings = updated;

        tracing::info!("Onboarding completed; saved to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_not_completed() {
        let dir = tempfile::tempdir().unwrap();
        let store = OnboardingStore::open(dir.path());
        assert!(!store.has_completed_onboarding());
        assert!(!store.path().exists());
    }

    #[test]
    fn mark_completed_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nimbus");

        let mut store = OnboardingStore::open(&nested);
        store.mark_completed().unwrap();
        assert!(store.has_completed_onboarding());

        let reopened = OnboardingStore::open(&nested);
        assert!(reopened.has_completed_onboarding());
    }

    #[test]
    fn corrupt_file_is_treated_as_not_completed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        let store = OnboardingStore::open(dir.path());
        assert!(!store.has_completed_onboarding());
    }

    #[test]
    fn second_mark_does_not_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = OnboardingStore::open(dir.path());
        store.mark_completed().unwrap();

        std::fs::remove_file(store.path()).unwrap();
        store.mark_completed().unwrap();
        assert!(!store.path().exists());
    }
}
