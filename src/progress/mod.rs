//! Per-character progress tracking for Nihon
//!
//! This module provides:
//! - Mastery records (counts, streak, due time, seen flag)
//! - The review interval policy
//! - The write-through progress store
//! - Progress statistics

pub mod models;
pub mod schedule;
pub mod stats;
pub mod store;

pub use models::*;
pub use stats::{CharacterCount, ProgressStats};
pub use store::{ProgressMap, ProgressStore};
