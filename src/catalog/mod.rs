//! Character catalog for Nihon
//!
//! This module provides:
//! - The built-in catalog of categories and tiers
//! - Loading of an external catalog file
//! - Resolution of the active pool for a category and tier

pub mod models;
pub mod resolver;

use std::fs;
use std::path::Path;

use thiserror::Error;

pub use models::*;
pub use resolver::{characters_in_tiers, resolve_active_pool, resolve_by_name};

const BUILTIN_LEVELS: &str = include_str!("levels.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CharacterLevels {
    /// The catalog shipped with the application
    pub fn builtin() -> Result<Self> {
        Ok(serde_json::from_str(BUILTIN_LEVELS)?)
    }

    /// Load a catalog from a JSON file of the same shape as the built-in one
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog: CharacterLevels = serde_json::from_str(&content)?;
        Ok(catalog)
    }
}
