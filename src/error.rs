//! Crate-wide error type and result alias.

use std::io;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, HexdagError>;

/// Errors surfaced by the ingestion, storage, and layout pipeline.
///
/// Per-item parse failures are deliberately not represented here: a
/// malformed input line is a diagnostic and a skip, never an error that
/// crosses a stage boundary.
#[derive(Debug, Error)]
pub enum HexdagError {
    /// I/O failure on the input stream or an export sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Failure inside the SQLite record store.
    #[error("record store error: {0}")]
    Store(#[from] rusqlite::Error),
    /// Failure serializing the laid-out graph for export.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Record width outside the supported range.
    #[error("record size {0} outside supported range 1..={max}", max = crate::store::MAX_RECORD_SIZE)]
    InvalidSize(usize),
    /// Caller-supplied argument rejected by a component contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
