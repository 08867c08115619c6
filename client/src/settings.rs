//! Preferenza "emotion detection enabled"
//!
//! Salvata come JSON `{ "emotion_detection_enabled": bool }`. Se il file non
//! esiste ancora la preferenza vale `true`; un `false` salvato resta `false`
//! ai successivi avvii. Il toggle filtra solo la visualizzazione: il server
//! calcola e salva l'emozione in ogni caso.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt settings file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
struct StoredSettings {
    emotion_detection_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct EmotionSettings {
    path: PathBuf,
    enabled: bool,
}

impl EmotionSettings {
    /// Legge la preferenza; primo avvio (file assente) -> abilitata
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let enabled = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<StoredSettings>(&raw)?.emotion_detection_enabled,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using default", path.display());
                true
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, enabled })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Imposta e salva subito
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SettingsError> {
        let stored = StoredSettings {
            emotion_detection_enabled: enabled,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&stored)?)?;
        self.enabled = enabled;
        info!(enabled, "Emotion detection preference saved");
        Ok(())
    }

    /// Inverte la preferenza, la salva e ritorna il nuovo valore
    pub fn toggle(&mut self) -> Result<bool, SettingsError> {
        let next = !self.enabled;
        self.set_enabled(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_defaults_to_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let settings = EmotionSettings::load(dir.path().join("settings.json")).unwrap();
        assert!(settings.is_enabled());
        // niente viene scritto finché l'utente non cambia la preferenza
        assert!(!settings.path().exists());
    }

    #[test]
    fn disabled_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = EmotionSettings::load(&path).unwrap();
        assert!(!settings.toggle().unwrap());

        let reloaded = EmotionSettings::load(&path).unwrap();
        assert!(!reloaded.is_enabled());
    }

    #[test]
    fn toggle_twice_restores_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = EmotionSettings::load(&path).unwrap();
        settings.toggle().unwrap();
        assert!(settings.toggle().unwrap());
        assert!(EmotionSettings::load(&path).unwrap().is_enabled());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "enabled=yes").unwrap();

        assert!(matches!(
            EmotionSettings::load(&path),
            Err(SettingsError::Corrupt(_))
        ));
    }
}
