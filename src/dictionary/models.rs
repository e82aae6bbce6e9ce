use serde::{Deserialize, Serialize};

/// One row of a dictionary file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub ent_seq: String,
    pub kanji: String,
    pub reading: String,
    /// Glosses separated by `|`
    pub gloss: String,
}

impl DictionaryEntry {
    pub fn first_gloss(&self) -> &str {
        self.gloss.split('|').next().unwrap_or("").trim()
    }
}

/// Example word shown under a quiz character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleWord {
    pub word: String,
    pub reading: String,
    pub meaning: String,
}

impl From<&DictionaryEntry> for ExampleWord {
    fn from(entry: &DictionaryEntry) -> Self {
        Self {
            word: if entry.kanji.is_empty() {
                entry.reading.clone()
            } else {
                entry.kanji.clone()
            },
            reading: entry.reading.clone(),
            meaning: entry.first_gloss().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DictionaryStatus {
    NotLoaded,
    Loading { processed: usize, total: usize },
    Ready { entries: usize },
    Failed { message: String },
}

impl DictionaryStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DictionaryStatus::Ready { .. })
    }

    /// Human readable progress line
    pub fn message(&self) -> String {
        match self {
            DictionaryStatus::NotLoaded => "Dictionary not loaded".to_string(),
            DictionaryStatus::Loading { processed, total } => {
                format!("Processing dictionary {} of {}", processed + 1, total)
            }
            DictionaryStatus::Ready { entries } => format!("Dictionary ready ({} entries)", entries),
            DictionaryStatus::Failed { message } => format!("Dictionary failed to load: {}", message),
        }
    }
}
