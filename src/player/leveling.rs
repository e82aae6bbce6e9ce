//! Experience and level progression
//!
//! The XP needed to leave level `n` is `floor(100 * 1.2^(n-1))`. Overflowing
//! XP rolls into further levels, so one large gain can level up repeatedly.

use serde::{Deserialize, Serialize};

use super::models::PlayerState;

const BASE_XP: f64 = 100.0;
const XP_GROWTH: f64 = 1.2;

/// XP required to advance past `level`
pub fn xp_for_level(level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as f64;
    (BASE_XP * XP_GROWTH.powf(exponent)).floor() as u32
}

/// A single level reached while gaining XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub level: u32,
    pub xp_to_next_level: u32,
}

impl PlayerState {
    /// Add XP and resolve every level-up it causes, in ascending order
    pub fn gain_xp(&mut self, amount: u32) -> Vec<LevelUp> {
        self.xp = self.xp.saturating_add(amount);

        let mut level_ups = Vec::new();
        while self.xp >= self.xp_to_next_level {
            self.level += 1;
            self.xp -= self.xp_to_next_level;
            self.xp_to_next_level = xp_for_level(self.level).max(1);
            level_ups.push(LevelUp {
                level: self.level,
                xp_to_next_level: self.xp_to_next_level,
            });
        }
        level_ups
    }
}
