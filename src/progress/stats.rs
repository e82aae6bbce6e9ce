//! Progress statistics

use serde::{Deserialize, Serialize};

use super::models::CharacterRecord;
use super::store::ProgressMap;
use crate::catalog::ActiveCharset;

/// A character with the count it is ranked by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCount {
    pub character: String,
    pub count: u32,
}

/// Aggregate statistics over tracked characters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub tracked: usize,
    pub seen: usize,
    pub mastered: usize,
    pub total_correct: u32,
    pub total_incorrect: u32,
    pub most_incorrect: Vec<CharacterCount>,
    pub most_correct: Vec<CharacterCount>,
}

impl ProgressStats {
    /// Compute statistics, optionally restricted to the characters of `pool`.
    ///
    /// Ranked lists hold at most `limit` entries and skip zero counts.
    pub fn compute(
        records: &ProgressMap,
        pool: Option<&ActiveCharset>,
        mastery_threshold: u32,
        limit: usize,
    ) -> Self {
        let selected: Vec<(&String, &CharacterRecord)> = records
            .iter()
            .filter(|(character, _)| pool.map_or(true, |p| p.contains(character)))
            .collect();

        let mut stats = ProgressStats {
            tracked: selected.len(),
            ..Default::default()
        };

        for (_, record) in &selected {
            if record.seen {
                stats.seen += 1;
            }
            if record.is_mastered(mastery_threshold) {
                stats.mastered += 1;
            }
            stats.total_correct += record.correct;
            stats.total_incorrect += record.incorrect;
        }

        stats.most_incorrect = ranked(&selected, limit, |r| r.incorrect);
        stats.most_correct = ranked(&selected, limit, |r| r.correct);
        stats
    }

    /// Share of correct answers, `None` before any answer
    pub fn accuracy(&self) -> Option<f64> {
        let attempts = self.total_correct + self.total_incorrect;
        if attempts == 0 {
            None
        } else {
            Some(self.total_correct as f64 / attempts as f64)
        }
    }
}

fn ranked<F>(selected: &[(&String, &CharacterRecord)], limit: usize, key: F) -> Vec<CharacterCount>
where
    F: Fn(&CharacterRecord) -> u32,
{
    let mut counts: Vec<CharacterCount> = selected
        .iter()
        .map(|(character, record)| CharacterCount {
            character: character.to_string(),
            count: key(record),
        })
        .filter(|c| c.count > 0)
        .collect();

    // Highest count first; ties keep character order
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.character.cmp(&b.character)));
    counts.truncate(limit);
    counts
}
