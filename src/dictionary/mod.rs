//! Dictionary lookups for Nihon
//!
//! Dictionary files are SQLite databases with an
//! `entries(ent_seq, kanji, reading, gloss)` table. They are merged into one
//! in-memory database on a background thread; the quiz asks it for example
//! words only once it is ready and never waits on it.

pub mod index;
pub mod models;

use thiserror::Error;

pub use index::{Dictionary, SEARCH_LIMIT};
pub use models::*;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Dictionary not loaded")]
    NotReady,
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

/// Optional example-word enrichment used while presenting characters
pub trait ExampleLookup: Send + Sync {
    /// An example word for `character`, or `None` when unavailable
    fn example_for(&self, character: &str) -> Option<ExampleWord>;

    fn is_ready(&self) -> bool;
}
