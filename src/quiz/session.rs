//! Quiz session
//!
//! A [`Session`] owns the catalog, both persisted stores and the selection
//! engine for one learner. The caller drives it in a loop:
//!
//! 1. `start(category)` resolves the active pool and initializes its records
//! 2. `select_next()` picks a character
//! 3. `present(character)` marks it seen and returns hint and example data
//! 4. `submit(character, answer)` grades it and applies every side effect
//!
//! Every mutation is written through to the storage backend before the call
//! returns.

use std::sync::Arc;

use serde::Serialize;

use super::evaluator::{grade, Evaluation};
use super::flashcard::{self, Flashcard};
use super::{QuizError, Result};
use crate::catalog::{resolve_active_pool, ActiveCharset, Answer, Category, CharacterLevels};
use crate::clock::{Clock, SystemClock};
use crate::dictionary::{ExampleLookup, ExampleWord};
use crate::events::{EventSink, LogSink, SessionEvent};
use crate::player::{newly_unlocked, PlayerState, PlayerStore};
use crate::progress::{AnswerOutcome, ProgressMap, ProgressStats, ProgressStore};
use crate::selection::{RandomSource, RngSource, Selection, SelectionEngine, NEW_ITEM_PROBABILITY};
use crate::storage::KeyValueStore;

/// XP awarded for each correct answer
pub const XP_PER_CORRECT: u32 = 10;

/// Correct answers after which a character counts as mastered
pub const MASTERY_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub xp_per_correct: u32,
    pub mastery_threshold: u32,
    pub new_item_probability: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            xp_per_correct: XP_PER_CORRECT,
            mastery_threshold: MASTERY_THRESHOLD,
            new_item_probability: NEW_ITEM_PROBABILITY,
        }
    }
}

/// What the caller needs to show a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub character: String,
    /// Text a correct answer must match
    pub answer: String,
    /// Latin numeral for numbers
    pub gloss: Option<String>,
    /// Set when the character is new or was last answered incorrectly
    pub show_hint: bool,
    pub example: Option<ExampleWord>,
}

pub struct Session {
    catalog: CharacterLevels,
    progress: ProgressStore,
    player: PlayerStore,
    engine: SelectionEngine,
    settings: SessionSettings,
    random: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    dictionary: Option<Arc<dyn ExampleLookup>>,
    sinks: Vec<Box<dyn EventSink>>,
    active: Option<ActiveCharset>,
}

impl Session {
    /// Load progress and player state from `backend`
    pub fn new(
        catalog: CharacterLevels,
        backend: Arc<dyn KeyValueStore>,
        settings: SessionSettings,
    ) -> Result<Self> {
        let progress = ProgressStore::load(backend.clone());
        let player = PlayerStore::load(backend)?;

        Ok(Self {
            catalog,
            progress,
            player,
            engine: SelectionEngine::new(settings.new_item_probability),
            settings,
            random: Box::new(RngSource::from_entropy()),
            clock: Box::new(SystemClock),
            dictionary: None,
            sinks: vec![Box::new(LogSink)],
            active: None,
        })
    }

    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_dictionary(mut self, dictionary: Arc<dyn ExampleLookup>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn catalog(&self) -> &CharacterLevels {
        &self.catalog
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn player(&self) -> &PlayerState {
        self.player.state()
    }

    pub fn progress(&self) -> &ProgressMap {
        self.progress.records()
    }

    pub fn active_pool(&self) -> Option<&ActiveCharset> {
        self.active.as_ref()
    }

    /// Resolve the pool of `category` at the player's tier and initialize it
    pub fn start(&mut self, category: Category) -> Result<&ActiveCharset> {
        let tier = self.player.state().tier(category);
        let pool = resolve_active_pool(&self.catalog, category, tier);

        let added = self.progress.ensure_initialized(&pool)?;
        log::debug!(
            "Started {} at tier {} with {} characters ({} new records)",
            category,
            tier,
            pool.len(),
            added
        );

        Ok(self.active.insert(pool))
    }

    /// Next character to present, or `Exhausted` when there is no pool
    pub fn select_next(&mut self) -> Selection {
        let Some(pool) = self.active.as_ref() else {
            return Selection::Exhausted;
        };
        let now = self.clock.now();
        self.engine
            .select_next(pool, self.progress.records(), now, &mut *self.random)
    }

    /// Prepare `character` for display and mark it seen
    pub fn present(&mut self, character: &str) -> Result<Presentation> {
        let answer = self.answer_for(character)?;
        let show_hint = self.progress.get(character).map_or(true, |record| {
            !record.seen || record.last_answer == Some(AnswerOutcome::Incorrect)
        });

        self.progress.mark_seen(character)?;

        let example = self
            .dictionary
            .as_ref()
            .filter(|dictionary| dictionary.is_ready())
            .and_then(|dictionary| dictionary.example_for(character));

        Ok(Presentation {
            character: character.to_string(),
            answer: answer.expected().to_string(),
            gloss: answer.gloss().map(|g| g.to_string()),
            show_hint,
            example,
        })
    }

    /// Grade `user_answer` against `correct_answer` and apply the outcome
    pub fn evaluate(
        &mut self,
        character: &str,
        user_answer: &str,
        correct_answer: &Answer,
    ) -> Result<Evaluation> {
        let is_correct = grade(correct_answer, user_answer);
        self.apply_outcome(character, is_correct, correct_answer.expected().to_string())
    }

    /// Grade an answer for a character of the active pool
    pub fn submit(&mut self, character: &str, user_answer: &str) -> Result<Evaluation> {
        let answer = self.answer_for(character)?;
        self.evaluate(character, user_answer, &answer)
    }

    /// Deal a true/false card for `character` and mark it seen
    pub fn deal_flashcard(&mut self, character: &str) -> Result<Flashcard> {
        let pool = self.active.as_ref().ok_or(QuizError::NoActivePool)?;
        let card = flashcard::deal(character, pool, &mut *self.random)
            .ok_or_else(|| QuizError::UnknownCharacter(character.to_string()))?;

        self.progress.mark_seen(character)?;
        Ok(card)
    }

    /// Grade the learner's verdict on a card
    pub fn judge_flashcard(&mut self, card: &Flashcard, user_says_true: bool) -> Result<Evaluation> {
        let answer = self.answer_for(&card.character)?;
        let is_correct = flashcard::judge(card, user_says_true);
        self.apply_outcome(&card.character, is_correct, answer.expected().to_string())
    }

    /// Forget all progress and restore the initial player
    pub fn reset(&mut self) -> Result<()> {
        self.progress.clear()?;
        self.player.reset()?;
        log::info!("Progress and player state reset");

        if let Some(category) = self.active.as_ref().and_then(|pool| pool.category()) {
            self.start(category)?;
        }
        Ok(())
    }

    /// Statistics over all records, or over one category's unlocked pool
    pub fn stats(&self, category: Option<Category>, limit: usize) -> ProgressStats {
        let pool = category
            .map(|c| resolve_active_pool(&self.catalog, c, self.player.state().tier(c)));
        ProgressStats::compute(
            self.progress.records(),
            pool.as_ref(),
            self.settings.mastery_threshold,
            limit,
        )
    }

    fn answer_for(&self, character: &str) -> Result<Answer> {
        let pool = self.active.as_ref().ok_or(QuizError::NoActivePool)?;
        pool.get(character)
            .cloned()
            .ok_or_else(|| QuizError::UnknownCharacter(character.to_string()))
    }

    fn apply_outcome(&mut self, character: &str, is_correct: bool, expected: String) -> Result<Evaluation> {
        let now = self.clock.now();
        let record = self.progress.record_outcome(character, is_correct, now)?;

        let mut events = vec![SessionEvent::AnswerGraded {
            character: character.to_string(),
            correct: is_correct,
        }];

        if is_correct {
            let level_ups = self.player.gain_xp(self.settings.xp_per_correct)?;
            events.extend(level_ups.into_iter().map(|level_up| SessionEvent::LevelUp {
                level: level_up.level,
                xp_to_next_level: level_up.xp_to_next_level,
            }));

            if let Some(event) = self.unlock_next_tier()? {
                events.push(event);
            }

            let achievements = newly_unlocked(
                self.player.state(),
                self.progress.records(),
                &self.catalog,
                self.settings.mastery_threshold,
            );
            self.player.unlock_achievements(&achievements)?;
            events.extend(achievements.iter().map(|a| SessionEvent::AchievementUnlocked {
                id: a.id.to_string(),
                name: a.name.to_string(),
            }));
        }

        for event in &events {
            for sink in self.sinks.iter_mut() {
                sink.emit(event);
            }
        }

        Ok(Evaluation {
            character: character.to_string(),
            is_correct,
            expected,
            record,
            events,
        })
    }

    /// Advance the active category once its whole pool is mastered
    fn unlock_next_tier(&mut self) -> Result<Option<SessionEvent>> {
        let Some(pool) = self.active.as_ref() else {
            return Ok(None);
        };
        let Some(category) = pool.category() else {
            return Ok(None);
        };

        let threshold = self.settings.mastery_threshold;
        let mastered = !pool.is_empty()
            && pool.characters().all(|c| {
                self.progress
                    .get(c)
                    .map_or(false, |record| record.is_mastered(threshold))
            });
        if !mastered {
            return Ok(None);
        }

        let tier_count = self.catalog.tier_count(category);
        let Some(tier) = self.player.advance_tier(category, tier_count)? else {
            return Ok(None);
        };

        self.start(category)?;
        Ok(Some(SessionEvent::TierUnlocked { category, tier }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogAnswer, Tier};
    use crate::clock::FixedClock;
    use crate::events::EventLog;
    use crate::progress::schedule::review_interval;
    use crate::selection::ScriptedRandom;
    use crate::storage::{FileStore, MemoryStore, PLAYER_STATE_KEY};
    use chrono::{DateTime, TimeZone, Utc};
    use indexmap::IndexMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 9, 30, 0).unwrap()
    }

    fn tier(name: &str, entries: &[(&str, &str)]) -> Tier {
        Tier {
            name: name.to_string(),
            set: entries
                .iter()
                .map(|(c, r)| (c.to_string(), CatalogAnswer::Text(r.to_string())))
                .collect(),
        }
    }

    fn small_catalog() -> CharacterLevels {
        let mut categories = IndexMap::new();
        categories.insert(
            Category::Hiragana,
            vec![tier("Vowels", &[("あ", "a"), ("い", "i")]), tier("K-row", &[("か", "ka")])],
        );
        CharacterLevels::new(categories)
    }

    fn session_with(backend: Arc<dyn KeyValueStore>, settings: SessionSettings) -> Session {
        Session::new(small_catalog(), backend, settings)
            .unwrap()
            .with_clock(Box::new(FixedClock(now())))
            .with_random(Box::new(RngSource::seeded(3)))
    }

    fn threshold_two() -> SessionSettings {
        SessionSettings {
            mastery_threshold: 2,
            ..Default::default()
        }
    }

    struct StubLookup {
        ready: bool,
    }

    impl ExampleLookup for StubLookup {
        fn example_for(&self, character: &str) -> Option<ExampleWord> {
            Some(ExampleWord {
                word: format!("{}る", character),
                reading: "ある".to_string(),
                meaning: "to be".to_string(),
            })
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_start_initializes_once() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend.clone(), SessionSettings::default());

        assert_eq!(session.start(Category::Hiragana).unwrap().len(), 2);
        assert_eq!(session.progress().len(), 2);
        let writes = backend.writes();

        session.start(Category::Hiragana).unwrap();
        assert_eq!(backend.writes(), writes);
        assert_eq!(session.progress().len(), 2);
    }

    #[test]
    fn test_no_pool() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());

        assert_eq!(session.select_next(), Selection::Exhausted);
        assert!(matches!(session.submit("あ", "a"), Err(QuizError::NoActivePool)));
    }

    #[test]
    fn test_empty_category_is_exhausted() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());

        assert!(session.start(Category::Katakana).unwrap().is_empty());
        assert_eq!(session.select_next(), Selection::Exhausted);
    }

    #[test]
    fn test_unknown_character() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());
        session.start(Category::Hiragana).unwrap();

        assert!(matches!(
            session.submit("か", "ka"),
            Err(QuizError::UnknownCharacter(c)) if c == "か"
        ));
    }

    #[test]
    fn test_select_from_pool() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());
        session.start(Category::Hiragana).unwrap();

        for _ in 0..20 {
            let selection = session.select_next();
            let character = selection.character().unwrap();
            assert!(character == "あ" || character == "い");
        }
    }

    #[test]
    fn test_numbers_graded_on_romaji() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = Session::new(CharacterLevels::builtin().unwrap(), backend, SessionSettings::default())
            .unwrap()
            .with_clock(Box::new(FixedClock(now())));
        session.start(Category::Numbers).unwrap();

        let evaluation = session.submit("一", "ichi").unwrap();
        assert!(evaluation.is_correct);

        let evaluation = session.submit("一", "1").unwrap();
        assert!(!evaluation.is_correct);
        assert_eq!(evaluation.expected, "ichi");
    }

    #[test]
    fn test_correct_and_incorrect_side_effects() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());
        session.start(Category::Hiragana).unwrap();

        let evaluation = session.submit("あ", "a").unwrap();
        assert!(evaluation.is_correct);
        assert_eq!(
            evaluation.events,
            vec![SessionEvent::AnswerGraded {
                character: "あ".to_string(),
                correct: true
            }]
        );
        assert_eq!(evaluation.record.correct, 1);
        assert_eq!(evaluation.record.streak, 1);
        assert_eq!(evaluation.record.last_answer, Some(AnswerOutcome::Correct));
        assert_eq!(evaluation.record.next_review, now() + review_interval(1));
        assert_eq!(session.player().xp, 10);

        let evaluation = session.submit("あ", "o").unwrap();
        assert!(!evaluation.is_correct);
        assert_eq!(evaluation.expected, "a");
        assert_eq!(evaluation.record.incorrect, 1);
        assert_eq!(evaluation.record.streak, 0);
        assert_eq!(evaluation.record.next_review, now());
        assert_eq!(session.player().xp, 10);
    }

    #[test]
    fn test_level_up_event() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());
        session.start(Category::Hiragana).unwrap();

        for _ in 0..9 {
            assert!(!session.submit("あ", "a").unwrap().leveled_up());
        }
        let evaluation = session.submit("あ", "a").unwrap();
        assert!(evaluation.events.contains(&SessionEvent::LevelUp {
            level: 2,
            xp_to_next_level: 120
        }));
        assert_eq!(session.player().level, 2);
        assert_eq!(session.player().xp, 0);
    }

    #[test]
    fn test_tier_unlock_and_achievements() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, threshold_two());
        session.start(Category::Hiragana).unwrap();

        session.submit("あ", "a").unwrap();
        session.submit("あ", "a").unwrap();
        let evaluation = session.submit("い", "i").unwrap();
        assert_eq!(evaluation.events.len(), 1);

        let evaluation = session.submit("い", "i").unwrap();
        assert!(evaluation.events.contains(&SessionEvent::TierUnlocked {
            category: Category::Hiragana,
            tier: 1
        }));
        assert!(evaluation.events.contains(&SessionEvent::AchievementUnlocked {
            id: "hiragana_apprentice".to_string(),
            name: "Hiragana Apprentice".to_string()
        }));
        assert_eq!(session.player().tier(Category::Hiragana), 1);
        assert!(session.active_pool().unwrap().contains("か"));
        assert!(session.progress().contains_key("か"));

        // Last tier: mastering it unlocks the rest of the chain but no tier
        session.submit("か", "ka").unwrap();
        let evaluation = session.submit("か", "ka").unwrap();
        let ids: Vec<&str> = evaluation
            .events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::AchievementUnlocked { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["hiragana_experienced", "hiragana_master"]);
        assert!(!evaluation
            .events
            .iter()
            .any(|e| matches!(e, SessionEvent::TierUnlocked { .. })));
        assert_eq!(session.player().tier(Category::Hiragana), 1);
    }

    #[test]
    fn test_present_hints() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());
        session.start(Category::Hiragana).unwrap();

        let presentation = session.present("あ").unwrap();
        assert!(presentation.show_hint);
        assert_eq!(presentation.answer, "a");
        assert!(session.progress()["あ"].seen);

        assert!(!session.present("あ").unwrap().show_hint);

        session.submit("あ", "e").unwrap();
        assert!(session.present("あ").unwrap().show_hint);

        session.submit("あ", "a").unwrap();
        assert!(!session.present("あ").unwrap().show_hint);
    }

    #[test]
    fn test_present_example_only_when_ready() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend.clone(), SessionSettings::default())
            .with_dictionary(Arc::new(StubLookup { ready: true }));
        session.start(Category::Hiragana).unwrap();
        let example = session.present("あ").unwrap().example.unwrap();
        assert_eq!(example.word, "ある");

        let mut session = session_with(backend, SessionSettings::default())
            .with_dictionary(Arc::new(StubLookup { ready: false }));
        session.start(Category::Hiragana).unwrap();
        assert!(session.present("あ").unwrap().example.is_none());
    }

    #[test]
    fn test_flashcards() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default())
            .with_random(Box::new(ScriptedRandom::new(vec![0.1])));
        session.start(Category::Hiragana).unwrap();

        let card = session.deal_flashcard("あ").unwrap();
        assert!(card.shows_true_reading);
        assert!(session.progress()["あ"].seen);

        let evaluation = session.judge_flashcard(&card, true).unwrap();
        assert!(evaluation.is_correct);
        assert_eq!(evaluation.record.streak, 1);
        assert_eq!(session.player().xp, 10);

        let mut session = session.with_random(Box::new(ScriptedRandom::new(vec![0.6, 0.0])));
        let card = session.deal_flashcard("あ").unwrap();
        assert!(!card.shows_true_reading);
        assert_eq!(card.shown_reading, "i");

        let evaluation = session.judge_flashcard(&card, true).unwrap();
        assert!(!evaluation.is_correct);
        assert_eq!(evaluation.record.last_answer, Some(AnswerOutcome::Incorrect));
    }

    #[test]
    fn test_events_reach_sinks() {
        let backend = Arc::new(MemoryStore::new());
        let log = Arc::new(Mutex::new(EventLog::new()));
        let mut session = session_with(backend, SessionSettings::default()).with_sink(Box::new(log.clone()));
        session.start(Category::Hiragana).unwrap();

        session.submit("い", "i").unwrap();
        session.submit("い", "u").unwrap();

        let events = log.lock().unwrap().drain();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            SessionEvent::AnswerGraded {
                character: "い".to_string(),
                correct: false
            }
        );
    }

    #[test]
    fn test_reset() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend.clone(), threshold_two());
        session.start(Category::Hiragana).unwrap();
        for character in ["あ", "あ", "い", "い"] {
            let answer = session.present(character).unwrap().answer;
            session.submit(character, &answer).unwrap();
        }
        assert_eq!(session.player().tier(Category::Hiragana), 1);

        session.reset().unwrap();
        assert_eq!(session.player(), &PlayerState::default());
        assert_eq!(session.active_pool().unwrap().len(), 2);
        assert_eq!(session.progress().len(), 2);
        assert!(session.progress().values().all(|r| r.attempts() == 0 && !r.seen));
        assert!(backend.get(PLAYER_STATE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_stats_by_category() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = session_with(backend, SessionSettings::default());
        session.start(Category::Hiragana).unwrap();
        session.submit("あ", "a").unwrap();
        session.submit("い", "x").unwrap();

        let stats = session.stats(Some(Category::Hiragana), 10);
        assert_eq!(stats.tracked, 2);
        assert_eq!(stats.total_correct, 1);
        assert_eq!(stats.total_incorrect, 1);
        assert_eq!(stats.most_incorrect[0].character, "い");

        assert_eq!(session.stats(Some(Category::Kanji), 10).tracked, 0);
    }

    #[test]
    fn test_full_loop_round_trips_through_files() {
        let temp_dir = TempDir::new().unwrap();
        let backend: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(temp_dir.path().to_path_buf()).unwrap());
        let mut session = session_with(backend.clone(), threshold_two());
        session.start(Category::Hiragana).unwrap();

        for round in 0..30 {
            let selection = session.select_next();
            let character = selection.character().unwrap().to_string();
            let presentation = session.present(&character).unwrap();
            let answer = if round % 4 == 0 { "wrong" } else { presentation.answer.as_str() };
            session.submit(&character, answer).unwrap();
        }

        let reloaded = session_with(backend, threshold_two());
        assert_eq!(reloaded.progress(), session.progress());
        assert_eq!(reloaded.player(), session.player());
    }
}
