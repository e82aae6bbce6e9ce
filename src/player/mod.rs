//! Player progression for Nihon
//!
//! This module provides:
//! - The persisted player record (level, XP, unlocked tiers, achievements)
//! - The level-up algorithm
//! - The achievement catalog and unlock rules

pub mod achievements;
pub mod leveling;
pub mod models;
pub mod store;

pub use achievements::{find_achievement, newly_unlocked, Achievement, AchievementScope, ACHIEVEMENTS};
pub use leveling::{xp_for_level, LevelUp};
pub use models::*;
pub use store::PlayerStore;
