//! Session events
//!
//! Grading, level-ups and unlocks are reported as discrete events so a
//! notification layer can render them without the core knowing how.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::catalog::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    #[serde(rename_all = "camelCase")]
    AnswerGraded { character: String, correct: bool },

    #[serde(rename_all = "camelCase")]
    LevelUp { level: u32, xp_to_next_level: u32 },

    #[serde(rename_all = "camelCase")]
    TierUnlocked { category: Category, tier: usize },

    #[serde(rename_all = "camelCase")]
    AchievementUnlocked { id: String, name: String },
}

/// Receiver of session events
pub trait EventSink: Send {
    fn emit(&mut self, event: &SessionEvent);
}

/// Writes every event to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::AnswerGraded { character, correct } => {
                log::debug!("Graded {}: {}", character, if *correct { "correct" } else { "incorrect" });
            }
            SessionEvent::LevelUp { level, .. } => log::info!("Level up! Now level {}", level),
            SessionEvent::TierUnlocked { category, tier } => {
                log::info!("New {} tier unlocked: {}", category, tier)
            }
            SessionEvent::AchievementUnlocked { name, .. } => log::info!("Achievement unlocked: {}", name),
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

/// Shared sink, so a caller can keep a handle to what the session emits
impl<S: EventSink> EventSink for Arc<Mutex<S>> {
    fn emit(&mut self, event: &SessionEvent) {
        if let Ok(mut sink) = self.lock() {
            sink.emit(event);
        }
    }
}
