//! Data models for the player record

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::leveling::xp_for_level;
use crate::catalog::Category;

/// Level, experience and unlocked content of the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_xp_to_next_level")]
    pub xp_to_next_level: u32,
    /// Unlocked tier index per category
    #[serde(default)]
    pub levels: BTreeMap<Category, usize>,
    #[serde(default)]
    pub unlocked_achievements: BTreeSet<String>,
}

fn default_level() -> u32 {
    1
}

fn default_xp_to_next_level() -> u32 {
    xp_for_level(1)
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            level: default_level(),
            xp: 0,
            xp_to_next_level: default_xp_to_next_level(),
            levels: Category::ALL.iter().map(|c| (*c, 0)).collect(),
            unlocked_achievements: BTreeSet::new(),
        }
    }
}

impl PlayerState {
    /// Unlocked tier of a category
    pub fn tier(&self, category: Category) -> usize {
        self.levels.get(&category).copied().unwrap_or(0)
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.unlocked_achievements.contains(id)
    }

    /// Fill in categories missing from older records.
    ///
    /// Returns whether anything was added.
    pub fn patch_missing_categories(&mut self) -> bool {
        let mut patched = false;
        for category in Category::ALL {
            if !self.levels.contains_key(&category) {
                self.levels.insert(category, 0);
                patched = true;
            }
        }
        patched
    }
}
