//! Next-character selection
//!
//! 1. While unseen characters remain, draw one of them uniformly with
//!    probability `new_item_probability` (0.75 by default).
//! 2. Otherwise draw from the characters that are due, each weighted by
//!    `floor(max(1, 1 + incorrect*5 - correct*0.5 + streak*2))`.
//! 3. If nothing is due, return the character with the earliest due time
//!    (first in pool order on ties).
//! 4. An empty pool yields [`Selection::Exhausted`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::random::RandomSource;
use crate::catalog::ActiveCharset;
use crate::progress::{CharacterRecord, ProgressMap};

/// Default chance of introducing an unseen character
pub const NEW_ITEM_PROBABILITY: f64 = 0.75;

/// Result of asking for the next character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selection {
    Next { character: String },
    /// No characters are left to present
    Exhausted,
}

impl Selection {
    pub fn next(character: impl Into<String>) -> Self {
        Self::Next {
            character: character.into(),
        }
    }

    pub fn character(&self) -> Option<&str> {
        match self {
            Selection::Next { character } => Some(character),
            Selection::Exhausted => None,
        }
    }
}

/// Review weight of a due character; always at least 1
pub fn review_weight(record: &CharacterRecord) -> f64 {
    let weight = 1.0 + record.incorrect as f64 * 5.0 - record.correct as f64 * 0.5
        + record.streak as f64 * 2.0;
    weight.max(1.0)
}

#[derive(Debug, Clone, Copy)]
pub struct SelectionEngine {
    new_item_probability: f64,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(NEW_ITEM_PROBABILITY)
    }
}

impl SelectionEngine {
    pub fn new(new_item_probability: f64) -> Self {
        Self {
            new_item_probability: new_item_probability.clamp(0.0, 1.0),
        }
    }

    pub fn new_item_probability(&self) -> f64 {
        self.new_item_probability
    }

    /// Pick the next character of `pool` to present
    pub fn select_next(
        &self,
        pool: &ActiveCharset,
        records: &ProgressMap,
        now: DateTime<Utc>,
        random: &mut dyn RandomSource,
    ) -> Selection {
        if pool.is_empty() {
            return Selection::Exhausted;
        }

        let unseen: Vec<&str> = pool
            .characters()
            .filter(|c| records.get(*c).map_or(true, |r| !r.seen))
            .collect();

        if !unseen.is_empty() && random.next_unit() < self.new_item_probability {
            let character = unseen[random.next_index(unseen.len())];
            log::debug!("Introducing unseen character {}", character);
            return Selection::next(character);
        }

        // (character, cumulative copies) for every due character
        let mut weighted: Vec<(&str, usize)> = Vec::new();
        let mut total = 0usize;
        let mut fallback: Option<(&str, DateTime<Utc>)> = None;

        for character in pool.characters() {
            let Some(record) = records.get(character) else {
                continue;
            };

            if record.is_due(now) {
                total += review_weight(record).floor() as usize;
                weighted.push((character, total));
            }

            if fallback.map_or(true, |(_, earliest)| record.next_review < earliest) {
                fallback = Some((character, record.next_review));
            }
        }

        if total > 0 {
            let draw = random.next_index(total);
            let position = weighted.partition_point(|(_, cumulative)| *cumulative <= draw);
            let character = weighted[position].0;
            log::debug!("Reviewing due character {}", character);
            return Selection::next(character);
        }

        if let Some((character, _)) = fallback {
            log::debug!("Nothing due, falling back to earliest {}", character);
            return Selection::next(character);
        }

        // Pool characters without records; callers normally initialize first
        let characters: Vec<&str> = pool.characters().collect();
        Selection::next(characters[random.next_index(characters.len())])
    }
}
