//! Review interval policy
//!
//! A correct answer pushes the next review out by an interval that doubles
//! with every consecutive correct answer:
//!
//! | streak | interval |
//! |--------|----------|
//! | 1      | 30s      |
//! | 2      | 1m       |
//! | 3      | 2m       |
//! | n      | 30s * 2^(n-1), capped at 7 days |
//!
//! An incorrect answer makes the character due immediately.

use chrono::{DateTime, Duration, Utc};

use super::models::AnswerOutcome;

/// Interval after the first correct answer in a streak
pub const BASE_INTERVAL_SECS: i64 = 30;

/// Longest interval ever scheduled
pub const MAX_INTERVAL_SECS: i64 = 7 * 24 * 60 * 60;

/// Interval granted for a streak of `streak` consecutive correct answers
pub fn review_interval(streak: u32) -> Duration {
    if streak == 0 {
        return Duration::zero();
    }

    // 2^15 * 30s already exceeds the cap
    let doublings = (streak - 1).min(15);
    let secs = BASE_INTERVAL_SECS.saturating_mul(1i64 << doublings);
    Duration::seconds(secs.min(MAX_INTERVAL_SECS))
}

/// When a character becomes due after an answer.
///
/// `streak` is the streak after the answer was applied.
pub fn next_review_at(outcome: AnswerOutcome, streak: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    match outcome {
        AnswerOutcome::Correct => now + review_interval(streak),
        AnswerOutcome::Incorrect => now,
    }
}

/// Format an interval to a short human-readable string
pub fn format_interval(interval: Duration) -> String {
    let secs = interval.num_seconds();
    if secs <= 0 {
        "now".to_string()
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 60 * 60 {
        format!("{}m", secs / 60)
    } else if secs < 24 * 60 * 60 {
        format!("{}h", secs / (60 * 60))
    } else {
        format!("{}d", secs / (24 * 60 * 60))
    }
}
