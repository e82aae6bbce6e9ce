//! Quiz flow for Nihon
//!
//! This module provides:
//! - Answer grading
//! - True/false flashcards
//! - The session object tying the catalog, stores and selection together

pub mod evaluator;
pub mod flashcard;
pub mod session;

use thiserror::Error;

use crate::storage::StorageError;

pub use evaluator::{grade, Evaluation};
pub use flashcard::Flashcard;
pub use session::{Presentation, Session, SessionSettings, MASTERY_THRESHOLD, XP_PER_CORRECT};

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No active pool; start a category first")]
    NoActivePool,

    #[error("Character not in the active pool: {0}")]
    UnknownCharacter(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
