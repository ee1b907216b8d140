//! SQLite lookup store.
//!
//! Layout consumed by the input-method lookup engine:
//!
//! - `words(id INTEGER PRIMARY KEY, reading, value, probability)`
//! - `qstring_word_mappings(qstring, word_id)`, written in qstring order
//! - `cooked_information(key, value)` with build timestamps
//!
//! A store is always written whole: into `<output>.tmp` inside a single
//! transaction, then renamed over the output path.

mod cooked;

pub use cooked::CookedInfo;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, debug_span};

use crate::build::{QStringMapping, WordEntry};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

const SCHEMA: &str = "
    CREATE TABLE words (id INTEGER PRIMARY KEY, reading, value, probability);
    CREATE TABLE qstring_word_mappings (qstring, word_id);
    CREATE TABLE cooked_information (key, value);
    CREATE INDEX words_index_key ON words (reading);
    CREATE INDEX qstring_word_mappings_index_qstring ON qstring_word_mappings (qstring);
";

/// Scratch file a store is written to before the rename: `path` + `.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write a complete store to `path`, replacing any existing file.
///
/// `mappings` are inserted in the order given; callers pass them sorted.
pub fn save(
    path: &Path,
    words: &[WordEntry],
    mappings: &[QStringMapping],
    cooked: &CookedInfo,
) -> Result<(), StoreError> {
    let _span = debug_span!("store_save", path = %path.display()).entered();

    let tmp = temp_path(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::remove_file(&tmp) {
        Ok(()) => debug!(tmp = %tmp.display(), "removed stale temporary store"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Err(e) = write_store(&tmp, words, mappings, cooked) {
        fs::remove_file(&tmp).ok();
        return Err(e);
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn write_store(
    path: &Path,
    words: &[WordEntry],
    mappings: &[QStringMapping],
    cooked: &CookedInfo,
) -> Result<(), StoreError> {
    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA)?;
    {
        let mut stmt = tx.prepare("INSERT INTO cooked_information VALUES (?1, ?2)")?;
        for (key, value) in cooked.rows() {
            stmt.execute(params![key, value])?;
        }

        let mut stmt = tx.prepare("INSERT INTO words VALUES (?1, ?2, ?3, ?4)")?;
        for w in words {
            stmt.execute(params![w.id, w.reading, w.value, w.probability])?;
        }

        let mut stmt = tx.prepare("INSERT INTO qstring_word_mappings VALUES (?1, ?2)")?;
        for m in mappings {
            stmt.execute(params![m.qstring, m.word_id])?;
        }
    }
    tx.commit()?;
    debug!(
        words = words.len(),
        mappings = mappings.len(),
        "committed store"
    );
    conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub words: u64,
    pub mappings: u64,
    pub distinct_qstrings: u64,
}

/// Read-only view of a built store.
pub struct WordStore {
    conn: Connection,
}

impl WordStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let count = |sql: &str| -> Result<u64, StoreError> {
            let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n as u64)
        };
        Ok(StoreStats {
            words: count("SELECT COUNT(*) FROM words")?,
            mappings: count("SELECT COUNT(*) FROM qstring_word_mappings")?,
            distinct_qstrings: count("SELECT COUNT(DISTINCT qstring) FROM qstring_word_mappings")?,
        })
    }

    /// `(key, value)` rows of `cooked_information`, in insertion order.
    pub fn cooked_information(&self) -> Result<Vec<(String, String)>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM cooked_information ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Word entries mapped from exactly `qstring`.
    pub fn lookup(&self, qstring: &str) -> Result<Vec<WordEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.reading, w.value, w.probability
             FROM qstring_word_mappings m JOIN words w ON w.id = m.word_id
             WHERE m.qstring = ?1
             ORDER BY m.rowid",
        )?;
        let rows = stmt
            .query_map([qstring], word_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Word entries for every qstring starting with `prefix`, as
    /// `(qstring, entry)` pairs in qstring order.
    ///
    /// Uses a range scan on the qstring index.
    pub fn predict(
        &self,
        prefix: &str,
        max_results: usize,
    ) -> Result<Vec<(String, WordEntry)>, StoreError> {
        let upper = format!("{prefix}\u{10FFFF}");
        let mut stmt = self.conn.prepare(
            "SELECT m.qstring, w.id, w.reading, w.value, w.probability
             FROM qstring_word_mappings m JOIN words w ON w.id = m.word_id
             WHERE m.qstring >= ?1 AND m.qstring < ?2
             ORDER BY m.qstring, m.rowid
             LIMIT ?3",
        )?;
        let limit = i64::try_from(max_results).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![prefix, upper, limit], |row| {
                Ok((
                    row.get(0)?,
                    WordEntry {
                        id: row.get(1)?,
                        reading: row.get(2)?,
                        value: row.get(3)?,
                        probability: row.get(4)?,
                    },
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn word_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WordEntry> {
    Ok(WordEntry {
        id: row.get(0)?,
        reading: row.get(1)?,
        value: row.get(2)?,
        probability: row.get(3)?,
    })
}
