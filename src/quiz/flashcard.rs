//! True/false flashcards
//!
//! A card shows a character with either its own reading or a reading taken
//! from another character of the pool; the learner says which it is.

use indexmap::IndexSet;
use serde::Serialize;

use crate::catalog::ActiveCharset;
use crate::selection::RandomSource;

/// Chance that a dealt card shows the true reading
pub const TRUE_READING_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub character: String,
    pub shown_reading: String,
    /// Latin numeral shown alongside a true numbers reading
    pub shown_meaning: Option<String>,
    pub shows_true_reading: bool,
}

/// Deal a card for `character`, or `None` if it is not in `pool`
pub fn deal(character: &str, pool: &ActiveCharset, random: &mut dyn RandomSource) -> Option<Flashcard> {
    let answer = pool.get(character)?;
    let true_reading = answer.expected();

    let true_card = || Flashcard {
        character: character.to_string(),
        shown_reading: true_reading.to_string(),
        shown_meaning: answer.gloss().map(|g| g.to_string()),
        shows_true_reading: true,
    };

    if random.next_unit() < TRUE_READING_PROBABILITY {
        return Some(true_card());
    }

    let distractors: IndexSet<&str> = pool
        .iter()
        .map(|(_, other)| other.expected())
        .filter(|reading| *reading != true_reading)
        .collect();

    if distractors.is_empty() {
        return Some(true_card());
    }

    let index = random.next_index(distractors.len());
    let reading = distractors.get_index(index).copied().unwrap_or(true_reading);
    Some(Flashcard {
        character: character.to_string(),
        shown_reading: reading.to_string(),
        shown_meaning: None,
        shows_true_reading: false,
    })
}

/// Whether the learner judged the card correctly
pub fn judge(card: &Flashcard, user_says_true: bool) -> bool {
    user_says_true == card.shows_true_reading
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Answer;
    use crate::selection::ScriptedRandom;
    use indexmap::IndexMap;

    fn pool(entries: &[(&str, Answer)]) -> ActiveCharset {
        let entries: IndexMap<String, Answer> =
            entries.iter().map(|(c, a)| (c.to_string(), a.clone())).collect();
        ActiveCharset::new(None, 0, entries)
    }

    #[test]
    fn test_true_card() {
        let pool = pool(&[("か", Answer::simple("ka")), ("き", Answer::simple("ki"))]);
        let mut random = ScriptedRandom::new(vec![0.2]);

        let card = deal("か", &pool, &mut random).unwrap();
        assert!(card.shows_true_reading);
        assert_eq!(card.shown_reading, "ka");
        assert_eq!(card.shown_meaning, None);
        assert!(judge(&card, true));
        assert!(!judge(&card, false));
    }

    #[test]
    fn test_number_true_card_shows_numeral() {
        let pool = pool(&[("二", Answer::number("ni", "2")), ("三", Answer::number("san", "3"))]);
        let mut random = ScriptedRandom::new(vec![0.0]);

        let card = deal("二", &pool, &mut random).unwrap();
        assert_eq!(card.shown_reading, "ni");
        assert_eq!(card.shown_meaning.as_deref(), Some("2"));
    }

    #[test]
    fn test_distractor_card() {
        let pool = pool(&[
            ("か", Answer::simple("ka")),
            ("き", Answer::simple("ki")),
            ("く", Answer::simple("ku")),
        ]);
        // 0.5 goes to the distractor path, 0.9 picks the last distinct reading
        let mut random = ScriptedRandom::new(vec![0.5, 0.9]);

        let card = deal("か", &pool, &mut random).unwrap();
        assert!(!card.shows_true_reading);
        assert_eq!(card.shown_reading, "ku");
        assert!(judge(&card, false));
        assert!(!judge(&card, true));
    }

    #[test]
    fn test_distractor_skips_duplicate_readings() {
        let pool = pool(&[
            ("ず", Answer::simple("zu")),
            ("づ", Answer::simple("zu")),
            ("ぢ", Answer::simple("ji")),
        ]);
        let mut random = ScriptedRandom::new(vec![0.99, 0.0]);

        let card = deal("ず", &pool, &mut random).unwrap();
        assert_eq!(card.shown_reading, "ji");
        assert!(!card.shows_true_reading);
    }

    #[test]
    fn test_no_distractor_shows_true_reading() {
        let pool = pool(&[("あ", Answer::simple("a"))]);
        let mut random = ScriptedRandom::new(vec![0.9]);

        let card = deal("あ", &pool, &mut random).unwrap();
        assert!(card.shows_true_reading);
        assert_eq!(card.shown_reading, "a");
    }

    #[test]
    fn test_unknown_character() {
        let pool = pool(&[("あ", Answer::simple("a"))]);
        let mut random = ScriptedRandom::new(vec![0.0]);
        assert!(deal("ん", &pool, &mut random).is_none());
    }
}
