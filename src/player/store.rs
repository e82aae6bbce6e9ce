//! Player state store
//!
//! Owns the singleton [`PlayerState`] for a session and writes it back to the
//! `nihon-player-state` record after every change.

use std::sync::Arc;

use super::achievements::Achievement;
use super::leveling::LevelUp;
use super::models::PlayerState;
use crate::catalog::Category;
use crate::storage::{self, KeyValueStore, Result, PLAYER_STATE_KEY};

pub struct PlayerStore {
    state: PlayerState,
    backend: Arc<dyn KeyValueStore>,
}

impl PlayerStore {
    /// Load the persisted player, defaulting when missing or corrupt.
    ///
    /// Records written before a category existed are patched and saved.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut state: PlayerState = storage::load_or_default(backend.as_ref(), PLAYER_STATE_KEY);
        let patched = state.patch_missing_categories();

        let store = Self { state, backend };
        if patched {
            log::debug!("Patched missing categories in player state");
            store.persist()?;
        }
        Ok(store)
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Add XP, persist, and report each level reached
    pub fn gain_xp(&mut self, amount: u32) -> Result<Vec<LevelUp>> {
        let level_ups = self.state.gain_xp(amount);
        for level_up in &level_ups {
            log::info!("Player reached level {}", level_up.level);
        }
        self.persist()?;
        Ok(level_ups)
    }

    /// Move a category to its next tier if the catalog has one.
    ///
    /// Returns the new tier index.
    pub fn advance_tier(&mut self, category: Category, tier_count: usize) -> Result<Option<usize>> {
        let current = self.state.tier(category);
        if current + 1 >= tier_count {
            return Ok(None);
        }

        let next = current + 1;
        self.state.levels.insert(category, next);
        log::info!("Unlocked {} tier {}", category, next);
        self.persist()?;
        Ok(Some(next))
    }

    /// Record achievements as unlocked; persists once if any were new
    pub fn unlock_achievements(&mut self, achievements: &[&Achievement]) -> Result<()> {
        let mut changed = false;
        for achievement in achievements {
            if self.state.unlocked_achievements.insert(achievement.id.to_string()) {
                log::info!("Achievement unlocked: {}", achievement.name);
                changed = true;
            }
        }

        if changed {
            self.persist()?;
        }
        Ok(())
    }

    /// Restore the initial player and delete the persisted copy
    pub fn reset(&mut self) -> Result<()> {
        self.state = PlayerState::default();
        self.backend.remove(PLAYER_STATE_KEY)
    }

    fn persist(&self) -> Result<()> {
        storage::save(self.backend.as_ref(), PLAYER_STATE_KEY, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::achievements::find_achievement;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_defaults_without_writing() {
        let backend = Arc::new(MemoryStore::new());
        let store = PlayerStore::load(backend.clone()).unwrap();

        assert_eq!(store.state(), &PlayerState::default());
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_load_patches_old_record() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .set(
                PLAYER_STATE_KEY,
                r#"{"level":2,"xp":3,"xpToNextLevel":120,"levels":{"hiragana":1},"unlockedAchievements":[]}"#,
            )
            .unwrap();
        let writes_before = backend.writes();

        let store = PlayerStore::load(backend.clone()).unwrap();
        assert_eq!(store.state().level, 2);
        assert_eq!(store.state().tier(Category::Hiragana), 1);
        assert_eq!(store.state().levels.len(), 7);
        assert_eq!(backend.writes(), writes_before + 1);
    }

    #[test]
    fn test_corrupt_record_defaults() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(PLAYER_STATE_KEY, "level: nine").unwrap();

        let store = PlayerStore::load(backend).unwrap();
        assert_eq!(store.state(), &PlayerState::default());
    }

    #[test]
    fn test_gain_xp_persists() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = PlayerStore::load(backend.clone()).unwrap();

        let level_ups = store.gain_xp(250).unwrap();
        assert_eq!(level_ups.len(), 2);

        let reloaded = PlayerStore::load(backend).unwrap();
        assert_eq!(reloaded.state(), store.state());
    }

    #[test]
    fn test_advance_tier_stops_at_last() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = PlayerStore::load(backend).unwrap();

        assert_eq!(store.advance_tier(Category::Numbers, 3).unwrap(), Some(1));
        assert_eq!(store.advance_tier(Category::Numbers, 3).unwrap(), Some(2));
        assert_eq!(store.advance_tier(Category::Numbers, 3).unwrap(), None);
        assert_eq!(store.state().tier(Category::Numbers), 2);
    }

    #[test]
    fn test_unlock_achievements_once() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = PlayerStore::load(backend.clone()).unwrap();
        let apprentice = find_achievement("hiragana_apprentice").unwrap();

        store.unlock_achievements(&[apprentice]).unwrap();
        store.unlock_achievements(&[apprentice]).unwrap();

        assert!(store.state().has_achievement("hiragana_apprentice"));
        assert_eq!(backend.writes(), 1);
    }

    #[test]
    fn test_round_trip_through_files() {
        let temp_dir = TempDir::new().unwrap();
        let backend: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(temp_dir.path().to_path_buf()).unwrap());

        let mut store = PlayerStore::load(backend.clone()).unwrap();
        store.gain_xp(130).unwrap();
        store.advance_tier(Category::Kanji, 21).unwrap();
        store
            .unlock_achievements(&[find_achievement("word_novice").unwrap()])
            .unwrap();

        let reloaded = PlayerStore::load(backend).unwrap();
        assert_eq!(reloaded.state(), store.state());
    }

    #[test]
    fn test_reset() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = PlayerStore::load(backend.clone()).unwrap();
        store.gain_xp(500).unwrap();

        store.reset().unwrap();
        assert_eq!(store.state(), &PlayerState::default());
        assert!(backend.get(PLAYER_STATE_KEY).unwrap().is_none());
    }
}
