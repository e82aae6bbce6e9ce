//! Achievement catalog and unlock rules
//!
//! A scoped achievement unlocks once every character in its tier range has
//! been answered correctly `mastery_threshold` times and all of its
//! prerequisites are unlocked. Unscoped achievements only depend on their
//! prerequisites.

use std::collections::BTreeSet;

use serde::Serialize;

use super::models::PlayerState;
use crate::catalog::{characters_in_tiers, Category, CharacterLevels};
use crate::progress::ProgressMap;

/// Tier range `start..end` of a category; `end = None` runs to the last tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementScope {
    pub category: Category,
    pub start: usize,
    pub end: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requires: &'static [&'static str],
    pub scope: Option<AchievementScope>,
}

const fn scope(category: Category, start: usize, end: Option<usize>) -> Option<AchievementScope> {
    Some(AchievementScope { category, start, end })
}

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "hiragana_apprentice",
        name: "Hiragana Apprentice",
        description: "Answer all Hiragana vowels correctly 5 times.",
        requires: &[],
        scope: scope(Category::Hiragana, 0, Some(1)),
    },
    Achievement {
        id: "hiragana_experienced",
        name: "Hiragana Experienced",
        description: "Answer all basic Hiragana syllables correctly 5 times.",
        requires: &["hiragana_apprentice"],
        scope: scope(Category::Hiragana, 0, Some(10)),
    },
    Achievement {
        id: "hiragana_master",
        name: "Hiragana Master",
        description: "Answer all Hiragana characters correctly 5 times.",
        requires: &["hiragana_experienced"],
        scope: scope(Category::Hiragana, 0, None),
    },
    Achievement {
        id: "katakana_apprentice",
        name: "Katakana Apprentice",
        description: "Answer all Katakana vowels correctly 5 times.",
        requires: &[],
        scope: scope(Category::Katakana, 0, Some(1)),
    },
    Achievement {
        id: "katakana_experienced",
        name: "Katakana Experienced",
        description: "Answer all basic Katakana syllables correctly 5 times.",
        requires: &["katakana_apprentice"],
        scope: scope(Category::Katakana, 0, Some(10)),
    },
    Achievement {
        id: "katakana_master",
        name: "Katakana Master",
        description: "Answer all Katakana characters correctly 5 times.",
        requires: &["katakana_experienced"],
        scope: scope(Category::Katakana, 0, None),
    },
    Achievement {
        id: "kanji_initiate_1",
        name: "Kanji Initiate (Grade 1)",
        description: "Answer all Grade 1 Kanji correctly 5 times.",
        requires: &[],
        scope: scope(Category::Kanji, 0, Some(4)),
    },
    Achievement {
        id: "kanji_initiate_2",
        name: "Kanji Initiate (Grade 2)",
        description: "Answer all Grade 2 Kanji correctly 5 times.",
        requires: &["kanji_initiate_1"],
        scope: scope(Category::Kanji, 4, None),
    },
    Achievement {
        id: "kanji_master",
        name: "Kanji Master",
        description: "Answer all Kanji correctly 5 times.",
        requires: &["kanji_initiate_2"],
        scope: scope(Category::Kanji, 0, None),
    },
    Achievement {
        id: "accountant",
        name: "Accountant",
        description: "Answer numbers 1-50 correctly 5 times.",
        requires: &[],
        scope: scope(Category::Numbers, 0, Some(5)),
    },
    Achievement {
        id: "comptroller",
        name: "Comptroller",
        description: "Answer numbers 1-100 correctly 5 times.",
        requires: &["accountant"],
        scope: scope(Category::Numbers, 0, None),
    },
    Achievement {
        id: "nihon_pro",
        name: "Nihon Pro",
        description: "Achieve Master level in all categories.",
        requires: &["hiragana_master", "katakana_master", "kanji_master", "comptroller"],
        scope: None,
    },
    Achievement {
        id: "listening_apprentice",
        name: "Listening Apprentice",
        description: "Master the first 3 listening levels.",
        requires: &[],
        scope: scope(Category::Listening, 0, Some(3)),
    },
    Achievement {
        id: "sharp_ears",
        name: "Sharp Ears",
        description: "Master all single-character listening levels.",
        requires: &["listening_apprentice"],
        scope: scope(Category::Listening, 0, Some(4)),
    },
    Achievement {
        id: "fluent_speaker",
        name: "Fluent Speaker",
        description: "Master all listening levels.",
        requires: &["sharp_ears"],
        scope: scope(Category::Listening, 0, None),
    },
    Achievement {
        id: "word_smith",
        name: "Word Smith",
        description: "Master all word-based listening levels.",
        requires: &["sharp_ears"],
        scope: scope(Category::Listening, 4, Some(8)),
    },
    Achievement {
        id: "sentence_scholar",
        name: "Sentence Scholar",
        description: "Master all sentence-based listening levels.",
        requires: &["word_smith"],
        scope: scope(Category::Listening, 8, None),
    },
    Achievement {
        id: "word_novice",
        name: "Word Novice",
        description: "Master the first two levels of words.",
        requires: &[],
        scope: scope(Category::Words, 0, Some(2)),
    },
    Achievement {
        id: "word_scholar",
        name: "Word Scholar",
        description: "Master all word levels.",
        requires: &["word_novice"],
        scope: scope(Category::Words, 0, None),
    },
    Achievement {
        id: "sentence_starter",
        name: "Sentence Starter",
        description: "Master the first two levels of sentences.",
        requires: &[],
        scope: scope(Category::Sentences, 0, Some(2)),
    },
    Achievement {
        id: "sentence_virtuoso",
        name: "Sentence Virtuoso",
        description: "Master all sentence levels.",
        requires: &["sentence_starter"],
        scope: scope(Category::Sentences, 0, None),
    },
    Achievement {
        id: "polyglot",
        name: "Polyglot",
        description: "Achieve master level in both words and sentences.",
        requires: &["word_scholar", "sentence_virtuoso"],
        scope: None,
    },
];

/// Look up an achievement by id
pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Achievements that the current progress unlocks, in catalog order.
///
/// Chains resolve in one call: an achievement unlocked here counts as a
/// prerequisite for the ones after it.
pub fn newly_unlocked(
    player: &PlayerState,
    records: &ProgressMap,
    catalog: &CharacterLevels,
    mastery_threshold: u32,
) -> Vec<&'static Achievement> {
    let mut unlocked: BTreeSet<&str> = player.unlocked_achievements.iter().map(|s| s.as_str()).collect();
    let mut found = Vec::new();

    loop {
        let mut changed = false;
        for achievement in ACHIEVEMENTS {
            if unlocked.contains(achievement.id) {
                continue;
            }
            if !achievement.requires.iter().all(|r| unlocked.contains(r)) {
                continue;
            }
            let scope_met = match achievement.scope {
                Some(scope) => scope_mastered(scope, records, catalog, mastery_threshold),
                None => true,
            };
            if scope_met {
                unlocked.insert(achievement.id);
                found.push(achievement);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    found
}

fn scope_mastered(
    scope: AchievementScope,
    records: &ProgressMap,
    catalog: &CharacterLevels,
    mastery_threshold: u32,
) -> bool {
    let characters = characters_in_tiers(catalog, scope.category, scope.start, scope.end);
    !characters.is_empty()
        && characters.iter().all(|c| {
            records
                .get(c)
                .map_or(false, |record| record.is_mastered(mastery_threshold))
        })
}
