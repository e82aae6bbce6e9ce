//! Nihon: a spaced-repetition trainer for Japanese characters and vocabulary.
//!
//! The library holds the whole learning engine; `nihon-cli` is a terminal
//! front end over [`quiz::Session`].

pub mod catalog;
pub mod clock;
pub mod config;
pub mod dictionary;
pub mod events;
pub mod player;
pub mod progress;
pub mod quiz;
pub mod selection;
pub mod storage;

pub use catalog::{ActiveCharset, Answer, Category, CharacterLevels};
pub use config::NihonConfig;
pub use quiz::{Session, SessionSettings};
pub use selection::Selection;
