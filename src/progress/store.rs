//! Progress store
//!
//! Holds one [`CharacterRecord`] per character and writes the whole map back
//! to the `nihon-progress` record after every change.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::models::{AnswerOutcome, CharacterRecord};
use super::schedule::next_review_at;
use crate::catalog::ActiveCharset;
use crate::storage::{self, KeyValueStore, Result, PROGRESS_KEY};

pub type ProgressMap = BTreeMap<String, CharacterRecord>;

pub struct ProgressStore {
    records: ProgressMap,
    backend: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    /// Load persisted progress, or start empty if it is missing or corrupt
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let records: ProgressMap = storage::load_or_default(backend.as_ref(), PROGRESS_KEY);
        log::debug!("Loaded progress for {} characters", records.len());
        Self { records, backend }
    }

    pub fn get(&self, character: &str) -> Option<&CharacterRecord> {
        self.records.get(character)
    }

    pub fn records(&self) -> &ProgressMap {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create default records for every pool character that has none.
    ///
    /// Returns the number of records added; persists only when it is non-zero.
    pub fn ensure_initialized(&mut self, pool: &ActiveCharset) -> Result<usize> {
        let mut added = 0;
        for character in pool.characters() {
            if !self.records.contains_key(character) {
                self.records.insert(character.to_string(), CharacterRecord::new());
                added += 1;
            }
        }

        if added > 0 {
            self.persist()?;
        }
        Ok(added)
    }

    /// Mark a character as presented.
    ///
    /// Returns whether anything changed; persists only in that case.
    pub fn mark_seen(&mut self, character: &str) -> Result<bool> {
        let record = self.records.entry(character.to_string()).or_default();
        if record.seen {
            return Ok(false);
        }

        record.seen = true;
        self.persist()?;
        Ok(true)
    }

    /// Apply the outcome of an answer and reschedule the character
    pub fn record_outcome(
        &mut self,
        character: &str,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<CharacterRecord> {
        let outcome = AnswerOutcome::from_correct(is_correct);
        let record = self.records.entry(character.to_string()).or_default();

        match outcome {
            AnswerOutcome::Correct => {
                record.correct += 1;
                record.streak += 1;
            }
            AnswerOutcome::Incorrect => {
                record.incorrect += 1;
                record.streak = 0;
            }
        }
        record.last_answer = Some(outcome);
        record.next_review = next_review_at(outcome, record.streak, now);

        let updated = record.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Drop every record and delete the persisted copy
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.backend.remove(PROGRESS_KEY)
    }

    fn persist(&self) -> Result<()> {
        storage::save(self.backend.as_ref(), PROGRESS_KEY, &self.records)
    }
}
