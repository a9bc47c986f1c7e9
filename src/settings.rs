//! TOML settings for the `blockfit` binary.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::RulesConfig;

/// Turn cap used when neither the file nor the command line sets one
pub const DEFAULT_MAX_TURNS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed; `None` derives one from the clock.
    pub seed: Option<u32>,
    pub max_turns: u32,
    pub rules: RulesConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
            rules: RulesConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings i/o error: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings file: {e}"),
            SettingsError::Serialize(e) => write!(f, "could not serialize settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(err: toml::de::Error) -> Self {
        SettingsError::Parse(err)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(err: toml::ser::Error) -> Self {
        SettingsError::Serialize(err)
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load settings from `path`; no path means defaults
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_path_means_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.rules.unique_solution_bonus, 100);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml_str(
            "seed = 7\n\n[rules]\nfull_clear_bonus = 500\n\n[rules.generator]\ncandidate_count = 5\n",
        )
        .unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(settings.rules.full_clear_bonus, 500);
        assert_eq!(settings.rules.combo_warmup_rounds, 2);
        assert_eq!(settings.rules.generator.candidate_count, 5);
        assert_eq!(settings.rules.generator.min_total_placements, 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("blockfit.toml");

        let mut settings = Settings::default();
        settings.seed = Some(42);
        settings.rules.combo_warmup_rounds = 0;
        settings.save(&path).unwrap();

        let loaded = Settings::load(Some(&path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_file_is_a_parse_error() {
        let err = Settings::from_toml_str("max_turns = \"many\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));

        let dir = tempdir().expect("temp dir");
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
