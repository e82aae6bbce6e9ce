use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use nihon_lib::catalog::{Category, CharacterLevels};
use nihon_lib::config::NihonConfig;
use nihon_lib::dictionary::Dictionary;
use nihon_lib::quiz::Session;
use nihon_lib::storage::{FileStore, KeyValueStore};

/// Shared application state for CLI commands
pub struct App {
    pub config: NihonConfig,
    pub data_dir: PathBuf,
    pub catalog: CharacterLevels,
    backend: Arc<dyn KeyValueStore>,
}

impl App {
    /// Initialize from a config file, or the default one
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => NihonConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => NihonConfig::load_default().context("Failed to load config")?,
        };

        let data_dir = config
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        let store = FileStore::new(data_dir.clone())
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

        let catalog = config.load_catalog().context("Failed to load catalog")?;

        Ok(Self {
            config,
            data_dir,
            catalog,
            backend: Arc::new(store),
        })
    }

    /// A session over the persisted records
    pub fn session(&self) -> Result<Session> {
        let session = Session::new(
            self.catalog.clone(),
            self.backend.clone(),
            self.config.session_settings(),
        )
        .context("Failed to load player state")?
        .with_random(self.config.random_source());
        Ok(session)
    }

    /// Start merging the configured dictionary files in the background.
    ///
    /// Returns `None` when no dictionary is configured.
    pub fn spawn_dictionary(&self) -> Option<Dictionary> {
        if self.config.dictionary_files.is_empty() {
            return None;
        }

        let dictionary = Dictionary::new();
        match dictionary.spawn_load(self.config.dictionary_files.clone()) {
            Ok(_) => Some(dictionary),
            Err(e) => {
                log::warn!("Could not start dictionary loader: {}", e);
                None
            }
        }
    }

    /// Load the configured dictionary on this thread
    pub fn load_dictionary(&self) -> Result<Dictionary> {
        if self.config.dictionary_files.is_empty() {
            bail!("No dictionary configured. Add dictionary_files to the config file.");
        }

        let dictionary = Dictionary::new();
        dictionary
            .load_blocking(&self.config.dictionary_files)
            .context("Failed to load dictionary")?;
        Ok(dictionary)
    }

    /// Parse a category name, listing the valid ones on failure
    pub fn parse_category(&self, name: &str) -> Result<Category> {
        match name.parse::<Category>() {
            Ok(category) => Ok(category),
            Err(_) => bail!(
                "Unknown category '{}'. Available categories:\n{}",
                name,
                Category::ALL
                    .iter()
                    .map(|c| format!("  - {}", c))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}
