//! Configuration file
//!
//! Read from `<config dir>/nihon/config.toml` unless a path is given. Every
//! key is optional:
//!
//! ```toml
//! data_dir = "/home/me/.local/share/nihon"
//! catalog_path = "/home/me/levels.json"
//! dictionary_files = ["/home/me/dict/jmdict_1.db", "/home/me/dict/jmdict_2.db"]
//! new_item_probability = 0.75
//! xp_per_correct = 10
//! mastery_threshold = 5
//! feedback_delay_ms = 1200
//! seed = 42
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, CharacterLevels};
use crate::quiz::{SessionSettings, MASTERY_THRESHOLD, XP_PER_CORRECT};
use crate::selection::{RandomSource, RngSource, NEW_ITEM_PROBABILITY};
use crate::storage::{self, FileStore};

const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NihonConfig {
    pub data_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub dictionary_files: Vec<PathBuf>,
    pub new_item_probability: f64,
    pub xp_per_correct: u32,
    pub mastery_threshold: u32,
    pub feedback_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for NihonConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            catalog_path: None,
            dictionary_files: Vec::new(),
            new_item_probability: NEW_ITEM_PROBABILITY,
            xp_per_correct: XP_PER_CORRECT,
            mastery_threshold: MASTERY_THRESHOLD,
            feedback_delay_ms: 1200,
            seed: None,
        }
    }
}

impl NihonConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nihon").join(CONFIG_FILE))
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: NihonConfig = toml::from_str(&content)?;
        Ok(config.validated())
    }

    /// Load from the default location
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Clamp out-of-range values
    pub fn validated(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.new_item_probability) || self.new_item_probability.is_nan() {
            let clamped = if self.new_item_probability.is_nan() {
                NEW_ITEM_PROBABILITY
            } else {
                self.new_item_probability.clamp(0.0, 1.0)
            };
            log::warn!(
                "new_item_probability {} out of range, using {}",
                self.new_item_probability,
                clamped
            );
            self.new_item_probability = clamped;
        }

        if self.mastery_threshold == 0 {
            log::warn!("mastery_threshold must be at least 1, using 1");
            self.mastery_threshold = 1;
        }

        if self.xp_per_correct == 0 {
            log::warn!("xp_per_correct must be at least 1, using 1");
            self.xp_per_correct = 1;
        }

        self
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            xp_per_correct: self.xp_per_correct,
            mastery_threshold: self.mastery_threshold,
            new_item_probability: self.new_item_probability,
        }
    }

    /// Directory holding persisted records
    pub fn resolve_data_dir(&self) -> storage::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStore::default_data_dir(),
        }
    }

    /// The configured catalog file, or the built-in catalog
    pub fn load_catalog(&self) -> catalog::Result<CharacterLevels> {
        match &self.catalog_path {
            Some(path) => {
                log::info!("Loading catalog from {}", path.display());
                CharacterLevels::load(path)
            }
            None => CharacterLevels::builtin(),
        }
    }

    /// Seeded generator when `seed` is set, entropy-seeded otherwise
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = NihonConfig::load(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, NihonConfig::default());
        assert_eq!(config.session_settings(), SessionSettings::default());
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "mastery_threshold = 3\nseed = 9\ndictionary_files = [\"a.db\", \"b.db\"]\n",
        )
        .unwrap();

        let config = NihonConfig::load(&path).unwrap();
        assert_eq!(config.mastery_threshold, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.dictionary_files, vec![PathBuf::from("a.db"), PathBuf::from("b.db")]);
        assert_eq!(config.xp_per_correct, 10);
        assert_eq!(config.feedback_delay_ms, 1200);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "mastery_threshold = \"many\"").unwrap();

        assert!(matches!(NihonConfig::load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let config = NihonConfig {
            new_item_probability: 1.5,
            mastery_threshold: 0,
            xp_per_correct: 0,
            ..Default::default()
        }
        .validated();

        assert_eq!(config.new_item_probability, 1.0);
        assert_eq!(config.mastery_threshold, 1);
        assert_eq!(config.xp_per_correct, 1);

        let config = NihonConfig {
            new_item_probability: -0.2,
            ..Default::default()
        }
        .validated();
        assert_eq!(config.new_item_probability, 0.0);
    }

    #[test]
    fn test_explicit_data_dir() {
        let config = NihonConfig {
            data_dir: Some(PathBuf::from("/tmp/nihon-test")),
            ..Default::default()
        };
        assert_eq!(config.resolve_data_dir().unwrap(), PathBuf::from("/tmp/nihon-test"));
    }

    #[test]
    fn test_seeded_random_source() {
        let config = NihonConfig {
            seed: Some(5),
            ..Default::default()
        };
        let mut a = config.random_source();
        let mut b = config.random_source();
        for _ in 0..8 {
            assert_eq!(a.next_index(1000), b.next_index(1000));
        }
    }

    #[test]
    fn test_catalog_defaults_to_builtin() {
        let catalog = NihonConfig::default().load_catalog().unwrap();
        assert_eq!(catalog, CharacterLevels::builtin().unwrap());
    }
}
