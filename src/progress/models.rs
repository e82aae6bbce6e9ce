//! Data models for per-character progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

impl AnswerOutcome {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

/// Mastery record for one learnable character, keyed by its text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    /// Consecutive correct answers, reset on an incorrect one
    #[serde(default)]
    pub streak: u32,
    /// Earliest time the character is due again (epoch milliseconds on disk)
    #[serde(default, with = "chrono::serde::ts_milliseconds")]
    pub next_review: DateTime<Utc>,
    #[serde(default)]
    pub seen: bool,
    #[serde(default)]
    pub last_answer: Option<AnswerOutcome>,
}

impl CharacterRecord {
    /// A never-presented record, due immediately
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    pub fn is_mastered(&self, threshold: u32) -> bool {
        self.correct >= threshold
    }

    pub fn attempts(&self) -> u32 {
        self.correct + self.incorrect
    }
}
