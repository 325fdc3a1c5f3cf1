//! SQLite-backed record store.
//!
//! One row per ingested record, one nullable integer column per byte
//! offset (`off_0 .. off_{size-1}`). NULL is the missing sentinel for
//! offsets past the end of a short input. The store is append-only for
//! the duration of an ingestion batch and exposes the two grouped-count
//! queries the aggregator needs.

use std::path::Path;

use rusqlite::{params_from_iter, Connection};

use crate::error::{HexdagError, Result};

/// Upper bound on the configured record width, enforced before any work.
pub const MAX_RECORD_SIZE: usize = 1999;

/// One value-frequency entry at a single offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreqRow {
    /// Observed slot value, `None` for the missing sentinel.
    pub value: Option<u8>,
    /// Number of records carrying this value at the queried offset.
    pub count: u64,
}

/// One joint-occurrence entry for a pair of adjacent offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRow {
    /// Value at the earlier offset, `None` for missing.
    pub from: Option<u8>,
    /// Value at the later offset, `None` for missing.
    pub to: Option<u8>,
    /// Number of records carrying this value pair.
    pub count: u64,
}

/// Handle over the backing SQLite database for one record width.
pub struct RecordStore {
    conn: Connection,
    size: usize,
}

impl RecordStore {
    /// Opens (or creates) a store at `path` for records of width `size`.
    ///
    /// Rejects `size` outside `1..=MAX_RECORD_SIZE` before touching the
    /// database, so a rejected width never creates the file.
    pub fn open(path: &Path, size: usize) -> Result<Self> {
        check_size(size)?;
        let conn = Connection::open(path)?;
        Self::with_connection(conn, size)
    }

    /// Opens an in-memory store for records of width `size`.
    pub fn open_in_memory(size: usize) -> Result<Self> {
        check_size(size)?;
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, size)
    }

    fn with_connection(conn: Connection, size: usize) -> Result<Self> {
        let mut schema = String::from(
            "CREATE TABLE IF NOT EXISTS records (\n    id INTEGER PRIMARY KEY AUTOINCREMENT",
        );
        for offset in 0..size {
            schema.push_str(&format!(",\n    off_{offset} INTEGER"));
        }
        schema.push_str("\n)");
        conn.execute(&schema, [])?;
        Ok(Self { conn, size })
    }

    /// Configured record width.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Begins the ingestion batch transaction.
    pub fn begin_batch(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    /// Commits the ingestion batch. Durability boundary: all inserts since
    /// `begin_batch` become visible to every subsequent read.
    pub fn commit(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    /// Appends one normalized record. `slots` length must equal the
    /// configured width; no dedup, no update.
    pub fn insert(&self, slots: &[Option<u8>]) -> Result<i64> {
        if slots.len() != self.size {
            return Err(HexdagError::InvalidArgument(format!(
                "record has {} slots, store expects {}",
                slots.len(),
                self.size
            )));
        }
        let mut columns = String::new();
        let mut placeholders = String::new();
        for offset in 0..self.size {
            if offset > 0 {
                columns.push(',');
                placeholders.push(',');
            }
            columns.push_str(&format!("off_{offset}"));
            placeholders.push('?');
        }
        let sql = format!("INSERT INTO records ({columns}) VALUES ({placeholders})");
        let mut stmt = self.conn.prepare_cached(&sql)?;
        stmt.execute(params_from_iter(slots.iter().map(|s| s.map(i64::from))))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Distinct values observed at `offset` with their record counts,
    /// ordered by ascending count.
    ///
    /// Ties are broken by ascending value with the missing sentinel first
    /// (SQLite sorts NULL before all integers under `ASC`).
    pub fn value_counts(&self, offset: usize) -> Result<Vec<FreqRow>> {
        self.check_offset(offset)?;
        let sql = format!(
            "SELECT off_{offset}, COUNT(*) AS cnt FROM records \
             GROUP BY off_{offset} ORDER BY cnt ASC, off_{offset} ASC"
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(FreqRow {
                value: column_value(row.get(0)?),
                count: row.get::<_, i64>(1)? as u64,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Distinct value pairs observed at offsets `(a, b)` with their joint
    /// counts, grouped by the pair. Callers pass adjacent offsets; the
    /// store itself only requires both to be in range.
    pub fn transition_counts(&self, a: usize, b: usize) -> Result<Vec<TransitionRow>> {
        self.check_offset(a)?;
        self.check_offset(b)?;
        let sql = format!(
            "SELECT off_{a}, off_{b}, COUNT(*) AS cnt FROM records \
             GROUP BY off_{a}, off_{b} ORDER BY cnt ASC, off_{a} ASC, off_{b} ASC"
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(TransitionRow {
                from: column_value(row.get(0)?),
                to: column_value(row.get(1)?),
                count: row.get::<_, i64>(2)? as u64,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Total number of stored records.
    pub fn record_count(&self) -> Result<u64> {
        let mut stmt = self.conn.prepare_cached("SELECT COUNT(*) FROM records")?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset >= self.size {
            return Err(HexdagError::InvalidArgument(format!(
                "offset {offset} out of range for record size {}",
                self.size
            )));
        }
        Ok(())
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_RECORD_SIZE {
        return Err(HexdagError::InvalidSize(size));
    }
    Ok(())
}

fn column_value(raw: Option<i64>) -> Option<u8> {
    raw.map(|v| v as u8)
}
