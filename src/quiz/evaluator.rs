//! Answer grading

use serde::Serialize;

use crate::catalog::Answer;
use crate::events::SessionEvent;
use crate::progress::CharacterRecord;

/// Exact, case-sensitive comparison against the graded field of `answer`
pub fn grade(answer: &Answer, submitted: &str) -> bool {
    submitted == answer.expected()
}

/// Outcome of one graded answer and everything it triggered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub character: String,
    pub is_correct: bool,
    /// The answer that would have been graded correct
    pub expected: String,
    pub record: CharacterRecord,
    pub events: Vec<SessionEvent>,
}

impl Evaluation {
    pub fn leveled_up(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SessionEvent::LevelUp { .. }))
    }
}
