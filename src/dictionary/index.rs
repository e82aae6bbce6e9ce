//! In-memory dictionary index built from one or more SQLite files.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rusqlite::{params, Connection, OpenFlags};

use super::models::{DictionaryEntry, DictionaryStatus, ExampleWord};
use super::{DictionaryError, ExampleLookup, Result};

/// Maximum rows returned by a search
pub const SEARCH_LIMIT: usize = 100;

const EXAMPLE_CANDIDATES: usize = 20;

const SCHEMA: &str = r#"
    CREATE TABLE entries (
        ent_seq TEXT NOT NULL,
        kanji TEXT NOT NULL,
        reading TEXT NOT NULL,
        gloss TEXT NOT NULL
    );
    CREATE INDEX idx_entries_kanji ON entries(kanji);
"#;

// Exact kanji first, then reading prefix, then any other match
const SEARCH_SQL: &str = r#"
    SELECT ent_seq, kanji, reading, gloss FROM entries
    WHERE kanji LIKE ?1 OR reading LIKE ?1 OR gloss LIKE ?1
    ORDER BY
        CASE WHEN kanji = ?2 THEN 1
             WHEN reading LIKE ?3 THEN 2
             ELSE 3
        END,
        kanji
    LIMIT ?4
"#;

struct DictionaryState {
    status: DictionaryStatus,
    conn: Option<Connection>,
}

/// Shared handle to the dictionary; clones refer to the same index
#[derive(Clone)]
pub struct Dictionary {
    inner: Arc<Mutex<DictionaryState>>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DictionaryState {
                status: DictionaryStatus::NotLoaded,
                conn: None,
            })),
        }
    }

    pub fn status(&self) -> DictionaryStatus {
        match self.inner.lock() {
            Ok(state) => state.status.clone(),
            Err(_) => DictionaryStatus::Failed {
                message: "dictionary lock poisoned".to_string(),
            },
        }
    }

    fn set_status(&self, status: DictionaryStatus) {
        if let Ok(mut state) = self.inner.lock() {
            state.status = status;
        }
    }

    /// Merge `files` on a background thread
    pub fn spawn_load(&self, files: Vec<PathBuf>) -> std::io::Result<JoinHandle<()>> {
        self.set_status(DictionaryStatus::Loading {
            processed: 0,
            total: files.len(),
        });

        let dictionary = self.clone();
        std::thread::Builder::new()
            .name("nihon-dictionary".into())
            .spawn(move || {
                if let Err(e) = dictionary.load_blocking(&files) {
                    log::warn!("Dictionary load failed: {}", e);
                }
            })
    }

    /// Merge `files` on the calling thread and return the entry count
    pub fn load_blocking(&self, files: &[PathBuf]) -> Result<usize> {
        let merged = merge_files(files, |processed, total| {
            self.set_status(DictionaryStatus::Loading { processed, total });
        });

        match merged {
            Ok((conn, entries)) => {
                if let Ok(mut state) = self.inner.lock() {
                    state.conn = Some(conn);
                    state.status = DictionaryStatus::Ready { entries };
                }
                log::info!("Dictionary ready with {} entries from {} files", entries, files.len());
                Ok(entries)
            }
            Err(e) => {
                self.set_status(DictionaryStatus::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Block until loading finishes or `timeout` elapses
    pub fn wait_ready(&self, timeout: Duration) -> DictionaryStatus {
        let start = Instant::now();
        loop {
            let status = self.status();
            match status {
                DictionaryStatus::Loading { .. } if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(25));
                }
                _ => return status,
            }
        }
    }

    /// Search kanji, readings and glosses
    pub fn search(&self, word: &str, limit: usize) -> Result<Vec<DictionaryEntry>> {
        let state = self.inner.lock().map_err(|_| DictionaryError::NotReady)?;
        let conn = state.conn.as_ref().ok_or(DictionaryError::NotReady)?;
        Ok(run_search(conn, word, limit)?)
    }
}

impl ExampleLookup for Dictionary {
    fn example_for(&self, character: &str) -> Option<ExampleWord> {
        // Never wait on a load in progress
        let state = self.inner.try_lock().ok()?;
        let conn = state.conn.as_ref()?;

        let entries = match run_search(conn, character, EXAMPLE_CANDIDATES) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Example lookup for {} failed: {}", character, e);
                return None;
            }
        };

        entries
            .iter()
            .find(|entry| entry.kanji.contains(character) || entry.reading.contains(character))
            .map(ExampleWord::from)
    }

    fn is_ready(&self) -> bool {
        self.status().is_ready()
    }
}

fn run_search(conn: &Connection, word: &str, limit: usize) -> rusqlite::Result<Vec<DictionaryEntry>> {
    let contains = format!("%{}%", word.to_lowercase());
    let prefix = format!("{}%", word);

    let mut stmt = conn.prepare(SEARCH_SQL)?;
    let entries = stmt
        .query_map(params![contains, word, prefix, limit as i64], |row| {
            Ok(DictionaryEntry {
                ent_seq: row.get(0)?,
                kanji: row.get(1)?,
                reading: row.get(2)?,
                gloss: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(entries)
}

fn merge_files(
    files: &[PathBuf],
    mut progress: impl FnMut(usize, usize),
) -> Result<(Connection, usize)> {
    let mut conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;

    let mut count = 0;
    for (i, path) in files.iter().enumerate() {
        progress(i, files.len());
        log::debug!("Merging dictionary file {}", path.display());

        let source = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt = source.prepare(
            "SELECT COALESCE(CAST(ent_seq AS TEXT), ''), COALESCE(kanji, ''), \
             COALESCE(reading, ''), COALESCE(gloss, '') FROM entries",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DictionaryEntry {
                    ent_seq: row.get(0)?,
                    kanji: row.get(1)?,
                    reading: row.get(2)?,
                    gloss: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let tx = conn.transaction()?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO entries (ent_seq, kanji, reading, gloss) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for entry in &rows {
                insert.execute(params![entry.ent_seq, entry.kanji, entry.reading, entry.gloss])?;
            }
        }
        tx.commit()?;
        count += rows.len();
    }

    Ok((conn, count))
}
